#![allow(dead_code)]

use lopdf::Document as LopdfDocument;
use lopdf::content::Content;
use lopdf::{Dictionary, ObjectId};

fn page_id(doc: &LopdfDocument, page_num: u32) -> ObjectId {
    *doc.get_pages().get(&page_num).expect("page exists")
}

fn page_content(doc: &LopdfDocument, page_num: u32) -> Content {
    let bytes = doc.get_page_content(page_id(doc, page_num)).expect("page content");
    Content::decode(&bytes).expect("decodable content")
}

/// Operands of every `Tj` on a page, decoded lossily
pub fn shown_text(doc: &LopdfDocument, page_num: u32) -> Vec<String> {
    page_content(doc, page_num)
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(|bytes| String::from_utf8_lossy(bytes).to_string())
        .collect()
}

pub fn page_contains(doc: &LopdfDocument, page_num: u32, needle: &str) -> bool {
    shown_text(doc, page_num).iter().any(|text| text.contains(needle))
}

/// Names of the XObjects painted on a page
pub fn painted_images(doc: &LopdfDocument, page_num: u32) -> Vec<String> {
    page_content(doc, page_num)
        .operations
        .iter()
        .filter(|op| op.operator == "Do")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_name().ok())
        .map(|name| String::from_utf8_lossy(name).to_string())
        .collect()
}

/// Annotation dictionaries of a page
pub fn annotations(doc: &LopdfDocument, page_num: u32) -> Vec<&Dictionary> {
    let page = doc.get_dictionary(page_id(doc, page_num)).expect("page dictionary");
    let Ok(annots) = page.get(b"Annots").and_then(|a| a.as_array()) else {
        return Vec::new();
    };
    annots
        .iter()
        .filter_map(|a| a.as_reference().ok())
        .filter_map(|id| doc.get_dictionary(id).ok())
        .collect()
}

/// The 1-based page number a GoTo link annotation jumps to
pub fn link_target_page(doc: &LopdfDocument, annotation: &Dictionary) -> Option<u32> {
    let action = annotation.get(b"A").ok()?.as_dict().ok()?;
    let dest = action.get(b"D").ok()?.as_array().ok()?;
    let target = dest.first()?.as_reference().ok()?;
    doc.get_pages()
        .into_iter()
        .find(|(_, id)| *id == target)
        .map(|(num, _)| num)
}

/// URI of a URI link annotation
pub fn link_uri(annotation: &Dictionary) -> Option<String> {
    let action = annotation.get(b"A").ok()?.as_dict().ok()?;
    let uri = action.get(b"URI").ok()?.as_str().ok()?;
    Some(String::from_utf8_lossy(uri).to_string())
}
