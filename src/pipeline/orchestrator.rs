use crate::appendix::appendix_blocks;
use crate::cover::Cover;
use crate::draw::Drawer;
use crate::embed::embed_shots;
use crate::error::PipelineError;
use crate::footer::stamp_footers;
use crate::options::{BuildRequest, BuildResult, ImageOptions};
use crate::toc::{AnchorRecorder, TocPlan};
use crate::warnings::Warnings;
use chrono::Utc;
use log::{debug, info};
use shotdoc_content::{DocumentModel, build_model, parse_lenient};
use shotdoc_layout::LayoutConfig;
use shotdoc_render_lopdf::{DocumentInfo, OutlineEntry, PdfDocument};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Builds documents with one layout configuration.
///
/// Every call to [`generate`](Self::generate) works on its own document;
/// a generator can be shared between threads.
#[derive(Debug, Clone)]
pub struct DocumentGenerator {
    config: LayoutConfig,
}

/// Builds a document with the default layout.
pub fn build_document(request: &BuildRequest) -> Result<BuildResult, PipelineError> {
    DocumentGenerator::new(LayoutConfig::default())?.generate(request)
}

impl DocumentGenerator {
    pub fn new(config: LayoutConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Builds the document described by `request`.
    ///
    /// Unreadable content and broken screenshots do not fail the build; they
    /// are rendered as fallbacks and reported in [`BuildResult::warnings`].
    pub fn generate(&self, request: &BuildRequest) -> Result<BuildResult, PipelineError> {
        let start = Instant::now();
        let config = &self.config;
        let options = &request.options.document;
        let generated_at = request.generated_at.unwrap_or_else(Utc::now);
        let mut warnings = Warnings::default();
        let mut doc = PdfDocument::new(config.page_size);

        let parse = parse_lenient(&request.result_text);
        debug!("Content parse finished at step {:?} (parsed: {}).", parse.step, parse.is_parsed());
        let model = build_model(request.schema_type, &parse, &request.result_text, request.enforce_schema);

        let raster = request.options.image.as_ref().map(ImageOptions::raster_options);
        let shots = embed_shots(&mut doc, &request.shots, raster.as_ref(), &mut warnings);

        let mut blocks = model.blocks.clone();
        if options.include_appendix {
            blocks.extend(appendix_blocks(&shots));
        }

        // Content pass: the only place content pages are created.
        let mut anchors = AnchorRecorder::new();
        Drawer::new(&mut doc, config, &shots, &mut anchors, &mut warnings)
            .with_linkify(options.linkify_urls)
            .draw_all(&blocks);
        let content_pages = doc.page_count();
        info!("Laid out {} blocks on {} content page(s).", blocks.len(), content_pages);

        if options.include_cover {
            Cover {
                title: model.title.as_deref(),
                hero: shots.hero(),
                author: options.author.as_deref(),
                subject: options.subject.as_deref(),
                keywords: &options.keywords,
                generated_at,
            }
            .render(&mut doc, config);
        }

        if options.include_toc {
            if let Some(plan) = TocPlan::compute(anchors.anchors(), config) {
                // Directly after the cover, if there is one.
                let at = usize::from(options.include_cover);
                plan.insert(&mut doc, at).render(&mut doc, config);
            }
        }

        let running_title = running_title(request, &model);
        stamp_footers(&mut doc, config, &running_title, options.include_cover);

        doc.set_outline(
            anchors
                .anchors()
                .iter()
                .map(|anchor| OutlineEntry {
                    title: anchor.title.clone(),
                    level: anchor.level,
                    page: anchor.page,
                    y: anchor.y,
                })
                .collect(),
        );
        doc.set_info(DocumentInfo {
            title: Some(model.display_title().to_string()),
            author: options.author.clone(),
            subject: options.subject.clone(),
            keywords: options.keywords.clone(),
            language: options.language.clone(),
            creator: Some("shotdoc".to_string()),
            producer: Some(format!("shotdoc {}", env!("CARGO_PKG_VERSION"))),
            created: Some(generated_at),
        });

        let page_count = doc.page_count();
        let buffer = doc.finish()?;
        info!(
            "Built {} page(s), {} bytes, {} warning(s) in {:.2?}.",
            page_count,
            buffer.len(),
            warnings.len(),
            start.elapsed()
        );

        Ok(BuildResult {
            buffer,
            suggested_filename: suggested_filename(&model),
            warnings: warnings.into_vec(),
            page_count,
            anchor_count: anchors.len(),
        })
    }

    /// Builds the document and writes it to `path`.
    pub fn generate_to_file<P: AsRef<Path>>(&self, request: &BuildRequest, path: P) -> Result<BuildResult, PipelineError> {
        let result = self.generate(request)?;
        fs::write(path.as_ref(), &result.buffer)?;
        info!("Wrote {}.", path.as_ref().display());
        Ok(result)
    }
}

/// Footer title: the explicit option, else the parsed title, else the schema default.
fn running_title(request: &BuildRequest, model: &DocumentModel) -> String {
    request
        .options
        .document
        .running_title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| model.display_title())
        .to_string()
}

/// `<slug>.pdf` for content with a parsed title; `None` for the raw-text fallback.
fn suggested_filename(model: &DocumentModel) -> Option<String> {
    let title = model.title.as_deref()?;
    let slug = slug::slugify(title);
    let stem = if slug.is_empty() { model.schema.default_title().to_lowercase().replace(' ', "-") } else { slug };
    Some(format!("{}.pdf", stem))
}
