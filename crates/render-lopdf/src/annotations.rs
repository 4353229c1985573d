use lopdf::{Dictionary, Object, ObjectId, StringFormat, dictionary};
use shotdoc_types::{PageHandle, Rect};

/// Where a link annotation points.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LinkTarget {
    /// A position on a page of this document, `y` in top-down page space.
    Page { page: PageHandle, y: f32 },
    Uri(String),
}

/// A link recorded on a page, resolved to a PDF annotation at finish time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingLink {
    pub rect: Rect,
    pub target: LinkTarget,
}

/// A `/GoTo` action to the top-down `y` on `page_id`.
pub(crate) fn goto_action(page_id: ObjectId, y: f32, page_height: f32) -> Dictionary {
    let dest = vec![Object::Reference(page_id), "FitH".into(), (page_height - y).into()];
    dictionary! { "Type" => "Action", "S" => "GoTo", "D" => dest }
}

pub(crate) fn uri_action(uri: &str) -> Dictionary {
    dictionary! {
        "Type" => "Action",
        "S" => "URI",
        "URI" => Object::String(uri.as_bytes().to_vec(), StringFormat::Literal),
    }
}

/// A borderless `/Link` annotation over `rect` (top-down page space).
pub(crate) fn link_annotation(rect: Rect, action: Dictionary, page_height: f32) -> Dictionary {
    let pdf_rect = vec![
        rect.x.into(),
        (page_height - rect.bottom()).into(),
        rect.right().into(),
        (page_height - rect.y).into(),
    ];
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => pdf_rect,
        "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
        "A" => action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_rect_is_flipped_to_pdf_space() {
        let annot = link_annotation(Rect::new(50.0, 100.0, 200.0, 15.0), uri_action("https://a.b"), 800.0);
        let rect: Vec<f32> = annot
            .get(b"Rect")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_float().unwrap())
            .collect();
        assert_eq!(rect, vec![50.0, 685.0, 250.0, 700.0]);
    }

    #[test]
    fn goto_targets_fith_position() {
        let action = goto_action((7, 0), 120.0, 800.0);
        let dest = action.get(b"D").unwrap().as_array().unwrap();
        assert_eq!(dest[0].as_reference().unwrap(), (7, 0));
        assert_eq!(dest[1].as_name().unwrap(), b"FitH");
        assert_eq!(dest[2].as_float().unwrap(), 680.0);
    }
}
