use crate::annotations::{LinkTarget, PendingLink, goto_action, link_annotation, uri_action};
use crate::error::RenderError;
use crate::images::{add_image_xobject, deflate};
use crate::info::DocumentInfo;
use crate::outline::{OutlineEntry, build_outlines};
use log::{debug, warn};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use shotdoc_layout::fonts::{StandardFont, encode_win_ansi};
use shotdoc_layout::PageSink;
use shotdoc_resource::PreparedImage;
use shotdoc_types::{Color, PageHandle, Rect, Size};
use std::collections::HashMap;

/// Font, size and fill color of a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: StandardFont,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font: StandardFont, size: f32, color: Color) -> Self {
        Self { font, size, color }
    }
}

/// A registered image XObject that can be drawn on any page.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    name: String,
    /// Pixel dimensions of the embedded image.
    pub pixel_size: Size,
}

impl ImageHandle {
    /// The resource name the image is drawn with, e.g. `Im1`.
    pub fn name(&self) -> &str {
        &self.name
    }
}

struct PageRecord {
    id: ObjectId,
    operations: Vec<Operation>,
    links: Vec<PendingLink>,
}

/// An in-memory PDF whose pages can be drawn on and reordered until it is finished.
pub struct PdfDocument {
    doc: Document,
    pages_id: ObjectId,
    page_size: Size,
    order: Vec<PageHandle>,
    pages: HashMap<PageHandle, PageRecord>,
    next_handle: u32,
    images: Vec<(String, ObjectId)>,
    info: DocumentInfo,
    outline: Vec<OutlineEntry>,
}

impl PdfDocument {
    pub fn new(page_size: Size) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_size,
            order: Vec::new(),
            pages: HashMap::new(),
            next_handle: 1,
            images: Vec::new(),
            info: DocumentInfo::default(),
            outline: Vec::new(),
        }
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    /// Appends a blank page.
    pub fn add_page(&mut self) -> PageHandle {
        self.insert_page(self.order.len())
    }

    /// Inserts a blank page at `index` (clamped to the page count).
    ///
    /// Existing handles keep pointing at the same pages.
    pub fn insert_page(&mut self, index: usize) -> PageHandle {
        let handle = PageHandle::new(self.next_handle);
        self.next_handle += 1;
        let record = PageRecord {
            id: self.doc.new_object_id(),
            operations: Vec::new(),
            links: Vec::new(),
        };
        self.pages.insert(handle, record);
        let index = index.min(self.order.len());
        self.order.insert(index, handle);
        debug!("Created {} at index {} ({} pages).", handle, index, self.order.len());
        handle
    }

    pub fn page_count(&self) -> usize {
        self.order.len()
    }

    /// Page handles in document order.
    pub fn pages(&self) -> &[PageHandle] {
        &self.order
    }

    /// Current zero-based position of `page`.
    pub fn page_index(&self, page: PageHandle) -> Option<usize> {
        self.order.iter().position(|p| *p == page)
    }

    /// Current one-based page number of `page`.
    pub fn page_number(&self, page: PageHandle) -> Option<usize> {
        self.page_index(page).map(|index| index + 1)
    }

    fn record_mut(&mut self, page: PageHandle) -> Option<&mut PageRecord> {
        let record = self.pages.get_mut(&page);
        if record.is_none() {
            warn!("Drawing on unknown {} ignored.", page);
        }
        record
    }

    fn pdf_y(&self, y: f32) -> f32 {
        self.page_size.height - y
    }

    /// Draws one line of text with its baseline at top-down `baseline_y`.
    pub fn draw_text(&mut self, page: PageHandle, x: f32, baseline_y: f32, text: &str, style: &TextStyle) {
        if text.trim().is_empty() {
            return;
        }
        let y = self.pdf_y(baseline_y);
        let [r, g, b] = style.color.components();
        let ops = vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(style.font.resource_name().as_bytes().to_vec()), style.size.into()],
            ),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::String(encode_win_ansi(text), StringFormat::Literal)]),
            Operation::new("ET", vec![]),
        ];
        if let Some(record) = self.record_mut(page) {
            record.operations.extend(ops);
        }
    }

    /// Strokes a straight line between two top-down points.
    pub fn draw_line(&mut self, page: PageHandle, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        let [r, g, b] = color.components();
        let ops = vec![
            Operation::new("q", vec![]),
            Operation::new("w", vec![width.into()]),
            Operation::new("RG", vec![r.into(), g.into(), b.into()]),
            Operation::new("m", vec![from.0.into(), self.pdf_y(from.1).into()]),
            Operation::new("l", vec![to.0.into(), self.pdf_y(to.1).into()]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ];
        if let Some(record) = self.record_mut(page) {
            record.operations.extend(ops);
        }
    }

    /// Paints `image` scaled into `rect`.
    pub fn draw_image(&mut self, page: PageHandle, image: &ImageHandle, rect: Rect) {
        let bottom = self.pdf_y(rect.bottom());
        let ops = vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    rect.width.into(),
                    0.0f32.into(),
                    0.0f32.into(),
                    rect.height.into(),
                    rect.x.into(),
                    bottom.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(image.name.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ];
        if let Some(record) = self.record_mut(page) {
            record.operations.extend(ops);
        }
    }

    /// Makes `rect` on `page` a link to top-down `y` on `target`.
    pub fn link_to_page(&mut self, page: PageHandle, rect: Rect, target: PageHandle, y: f32) {
        if let Some(record) = self.record_mut(page) {
            record.links.push(PendingLink {
                rect,
                target: LinkTarget::Page { page: target, y },
            });
        }
    }

    /// Makes `rect` on `page` a link to an external URI.
    pub fn link_to_uri(&mut self, page: PageHandle, rect: Rect, uri: &str) {
        if let Some(record) = self.record_mut(page) {
            record.links.push(PendingLink {
                rect,
                target: LinkTarget::Uri(uri.to_string()),
            });
        }
    }

    /// Registers an image so it can be drawn with [`draw_image`](Self::draw_image).
    pub fn embed_image(&mut self, image: &PreparedImage) -> Result<ImageHandle, RenderError> {
        let id = add_image_xobject(&mut self.doc, image)?;
        let name = format!("Im{}", self.images.len() + 1);
        self.images.push((name.clone(), id));
        Ok(ImageHandle {
            name,
            pixel_size: Size::new(image.width as f32, image.height as f32),
        })
    }

    pub fn set_info(&mut self, info: DocumentInfo) {
        self.info = info;
    }

    pub fn set_outline(&mut self, entries: Vec<OutlineEntry>) {
        self.outline = entries;
    }

    /// Writes every page, the shared resources, outline and metadata, and
    /// serializes the document.
    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        let page_height = self.page_size.height;
        let resources_id = self.write_resources();
        let page_ids: HashMap<PageHandle, ObjectId> =
            self.pages.iter().map(|(handle, record)| (*handle, record.id)).collect();

        let mut kids = Vec::with_capacity(self.order.len());
        for handle in &self.order {
            let Some(record) = self.pages.remove(handle) else {
                continue;
            };

            let content = Content {
                operations: record.operations,
            };
            let encoded = deflate(&content.encode()?)?;
            let content_id = self
                .doc
                .add_object(Stream::new(dictionary! { "Filter" => "FlateDecode" }, encoded));

            let mut annots = Vec::new();
            for link in record.links {
                let action = match &link.target {
                    LinkTarget::Page { page, y } => match page_ids.get(page) {
                        Some(target_id) => goto_action(*target_id, *y, page_height),
                        None => {
                            warn!("Link to unknown {} dropped.", page);
                            continue;
                        }
                    },
                    LinkTarget::Uri(uri) => uri_action(uri),
                };
                let annot_id = self
                    .doc
                    .add_object(link_annotation(link.rect, action, page_height));
                annots.push(Object::Reference(annot_id));
            }

            let mut page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => vec![0.0f32.into(), 0.0f32.into(), self.page_size.width.into(), page_height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            };
            if !annots.is_empty() {
                page_dict.set("Annots", Object::Array(annots));
            }
            self.doc.objects.insert(record.id, Object::Dictionary(page_dict));
            kids.push(Object::Reference(record.id));
        }

        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        };
        let outline = std::mem::take(&mut self.outline);
        if let Some(outline_id) =
            build_outlines(&mut self.doc, &outline, |page| page_ids.get(&page).copied(), page_height)
        {
            catalog.set("Outlines", outline_id);
            catalog.set("PageMode", "UseOutlines");
        }
        if let Some(lang) = self.info.language_tag() {
            catalog.set("Lang", lang);
        }
        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", catalog_id);

        let info = self.info.to_dictionary();
        if !info.is_empty() {
            let info_id = self.doc.add_object(info);
            self.doc.trailer.set("Info", info_id);
        }

        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer)?;
        debug!("Serialized {} pages into {} bytes.", count, buffer.len());
        Ok(buffer)
    }

    fn write_resources(&mut self) -> ObjectId {
        let mut fonts = Dictionary::new();
        for font in StandardFont::ALL {
            let font_dict = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            };
            fonts.set(font.resource_name(), Object::Dictionary(font_dict));
        }

        let mut xobjects = Dictionary::new();
        for (name, id) in &self.images {
            xobjects.set(name.as_str(), Object::Reference(*id));
        }

        self.doc.add_object(dictionary! {
            "Font" => fonts,
            "XObject" => xobjects,
        })
    }
}

impl PageSink for PdfDocument {
    fn start_page(&mut self) -> PageHandle {
        self.add_page()
    }
}
