use crate::info::text_string;
use lopdf::{Document, Object, ObjectId, dictionary};
use shotdoc_types::PageHandle;
use std::collections::HashMap;

/// A bookmark in the document outline.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub title: String,
    /// 1 for top-level entries; deeper levels nest under the preceding shallower entry.
    pub level: u8,
    pub page: PageHandle,
    /// Top-down y of the destination on `page`.
    pub y: f32,
}

struct FlatItem {
    id: ObjectId,
    title: String,
    dest: Vec<Object>,
    parent: Option<usize>,
}

struct Node {
    id: ObjectId,
    title: String,
    dest: Vec<Object>,
    children: Vec<Node>,
}

/// Writes the outline tree for `entries` and returns the `/Outlines` root.
///
/// Entries whose page cannot be resolved are skipped.
pub(crate) fn build_outlines(
    doc: &mut Document,
    entries: &[OutlineEntry],
    resolve: impl Fn(PageHandle) -> Option<ObjectId>,
    page_height: f32,
) -> Option<ObjectId> {
    let mut flat: Vec<FlatItem> = Vec::new();
    // (level, index into `flat`)
    let mut level_stack: Vec<(u8, usize)> = Vec::new();

    for entry in entries {
        let Some(page_id) = resolve(entry.page) else {
            log::warn!("Outline entry '{}' points at unknown {}; skipped.", entry.title, entry.page);
            continue;
        };
        let dest = vec![Object::Reference(page_id), "FitH".into(), (page_height - entry.y).into()];

        while level_stack.last().is_some_and(|(level, _)| *level >= entry.level) {
            level_stack.pop();
        }
        let parent = level_stack.last().map(|(_, index)| *index);
        level_stack.push((entry.level, flat.len()));
        flat.push(FlatItem {
            id: doc.new_object_id(),
            title: entry.title.clone(),
            dest,
            parent,
        });
    }

    if flat.is_empty() {
        return None;
    }

    // Fold the flat list into a tree, children before parents.
    let mut children_of: HashMap<usize, Vec<Node>> = HashMap::new();
    let mut roots = Vec::new();
    for (index, item) in flat.into_iter().enumerate().rev() {
        let mut children = children_of.remove(&index).unwrap_or_default();
        children.reverse();
        let node = Node {
            id: item.id,
            title: item.title,
            dest: item.dest,
            children,
        };
        match item.parent {
            Some(parent) => children_of.entry(parent).or_default().push(node),
            None => roots.push(node),
        }
    }
    roots.reverse();

    let root_id = doc.new_object_id();
    let (first, last) = (roots.first()?.id, roots.last()?.id);
    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => first,
            "Last" => last,
            "Count" => roots.len() as i64,
        }),
    );
    write_level(doc, &roots, root_id);
    Some(root_id)
}

fn write_level(doc: &mut Document, items: &[Node], parent_id: ObjectId) {
    for (i, item) in items.iter().enumerate() {
        let mut dict = dictionary! {
            "Title" => text_string(&item.title),
            "Parent" => parent_id,
            "Dest" => item.dest.clone(),
        };
        if i > 0 {
            dict.set("Prev", items[i - 1].id);
        }
        if let Some(next) = items.get(i + 1) {
            dict.set("Next", next.id);
        }
        if let (Some(first), Some(last)) = (item.children.first(), item.children.last()) {
            dict.set("First", first.id);
            dict.set("Last", last.id);
            // Negative count: children start collapsed.
            dict.set("Count", -(item.children.len() as i64));
            write_level(doc, &item.children, item.id);
        }
        doc.objects.insert(item.id, Object::Dictionary(dict));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, level: u8, page: u32) -> OutlineEntry {
        OutlineEntry {
            title: title.into(),
            level,
            page: PageHandle::new(page),
            y: 100.0,
        }
    }

    #[test]
    fn nests_subsections_under_sections() {
        let mut doc = Document::with_version("1.7");
        let entries = vec![
            entry("Intro", 1, 1),
            entry("Steps", 1, 1),
            entry("Step 1", 2, 2),
            entry("Step 2", 2, 3),
            entry("Appendix", 1, 4),
        ];
        let root = build_outlines(&mut doc, &entries, |page| Some((page.raw(), 0)), 800.0).unwrap();
        let root_dict = doc.get_dictionary(root).unwrap();
        assert_eq!(root_dict.get(b"Count").unwrap().as_i64().unwrap(), 3);

        let first = root_dict.get(b"First").unwrap().as_reference().unwrap();
        let steps = doc
            .get_dictionary(first)
            .unwrap()
            .get(b"Next")
            .unwrap()
            .as_reference()
            .unwrap();
        let steps_dict = doc.get_dictionary(steps).unwrap();
        assert_eq!(steps_dict.get(b"Count").unwrap().as_i64().unwrap(), -2);
    }

    #[test]
    fn unresolvable_entries_are_skipped() {
        let mut doc = Document::with_version("1.7");
        let entries = vec![entry("Lost", 1, 9)];
        assert!(build_outlines(&mut doc, &entries, |_| None, 800.0).is_none());
    }
}
