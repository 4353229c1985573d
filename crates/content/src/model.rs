//! Maps parsed content onto layout blocks.

use crate::lenient::LenientParse;
use crate::schema::{MeetingSummary, SchemaType, Tutorial};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shotdoc_idf::{LayoutBlock, ParagraphStyle};
use shotdoc_types::ShotId;

/// Shown above the raw text when structured output was required but could not be read.
pub const FALLBACK_PREAMBLE: &str =
    "The generated content could not be read as structured data. The original text is reproduced below.";

/// The block list for one document plus what the rest of the pipeline needs to know about it.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentModel {
    pub schema: SchemaType,
    /// The title found in the content; `None` for the raw-text fallback.
    pub title: Option<String>,
    pub blocks: Vec<LayoutBlock>,
}

impl DocumentModel {
    /// The content title, or the schema's default.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.schema.default_title())
    }

    /// Screenshots referenced inline, in reading order.
    pub fn referenced_shots(&self) -> impl Iterator<Item = &ShotId> {
        self.blocks.iter().filter_map(LayoutBlock::shot)
    }
}

/// Builds the document model from a lenient parse of `raw_text`.
///
/// Content that did not parse, is not an object, or has none of the schema's
/// fields becomes a single paragraph holding `raw_text`, prefixed with
/// [`FALLBACK_PREAMBLE`] when `enforce_schema` is set.
pub fn build_model(schema: SchemaType, parse: &LenientParse, raw_text: &str, enforce_schema: bool) -> DocumentModel {
    let object = parse.value.as_ref().and_then(first_object);

    let model = object.and_then(|value| match schema {
        SchemaType::Tutorial => read::<Tutorial>(value)
            .filter(Tutorial::has_content)
            .map(tutorial_model),
        SchemaType::MeetingSummary => read::<MeetingSummary>(value)
            .filter(MeetingSummary::has_content)
            .map(meeting_model),
    });

    match model {
        Some(model) => {
            info!("Mapped {:?} content into {} blocks.", schema, model.blocks.len());
            model
        }
        None => {
            info!("Content is not usable {:?} data; rendering raw text.", schema);
            fallback_model(schema, raw_text, enforce_schema)
        }
    }
}

/// The object to read: the value itself, or the first object of a top-level array.
fn first_object(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(_) => Some(value),
        Value::Array(items) => items.iter().find(|item| item.is_object()),
        _ => None,
    }
}

fn read<T: DeserializeOwned>(value: &Value) -> Option<T> {
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!("Content does not match the expected shape: {}", e);
            None
        }
    }
}

fn push_list(blocks: &mut Vec<LayoutBlock>, heading: &str, items: Vec<String>) {
    if !items.is_empty() {
        blocks.push(LayoutBlock::section(heading));
        blocks.push(LayoutBlock::BulletList(items));
    }
}

fn tutorial_model(tutorial: Tutorial) -> DocumentModel {
    let schema = SchemaType::Tutorial;
    let mut blocks = vec![LayoutBlock::title(
        tutorial.title.clone().unwrap_or_else(|| schema.default_title().to_string()),
    )];

    if let Some(summary) = tutorial.summary {
        blocks.push(LayoutBlock::paragraph(summary));
    }
    push_list(&mut blocks, "Prerequisites", tutorial.prerequisites);

    if !tutorial.steps.is_empty() {
        blocks.push(LayoutBlock::section("Steps"));
    }
    for (index, step) in tutorial.steps.into_iter().enumerate() {
        let number = index + 1;
        blocks.push(LayoutBlock::subsection(match &step.title {
            Some(title) => format!("Step {}: {}", number, title),
            None => format!("Step {}", number),
        }));
        if let Some(timecode) = step.timecode {
            blocks.push(LayoutBlock::meta(format!("Timecode: {}", timecode)));
        }
        if let Some(description) = step.description {
            blocks.push(LayoutBlock::paragraph(description));
        }
        blocks.extend(step.screenshot_ids.into_iter().map(LayoutBlock::figure));
        if !step.tips.is_empty() {
            blocks.push(LayoutBlock::BulletList(step.tips));
        }
    }

    if let Some(closing) = tutorial.closing {
        blocks.push(LayoutBlock::section("Conclusion"));
        blocks.push(LayoutBlock::paragraph(closing));
    }

    DocumentModel {
        schema,
        title: tutorial.title,
        blocks,
    }
}

fn meeting_model(meeting: MeetingSummary) -> DocumentModel {
    let schema = SchemaType::MeetingSummary;
    let mut blocks = vec![LayoutBlock::title(
        meeting
            .meeting_title
            .clone()
            .unwrap_or_else(|| schema.default_title().to_string()),
    )];

    if let Some(date) = meeting.date {
        blocks.push(LayoutBlock::meta(format!("Date: {}", date)));
    }
    if !meeting.attendees.is_empty() {
        blocks.push(LayoutBlock::meta(format!("Attendees: {}", meeting.attendees.join(", "))));
    }
    if let Some(summary) = meeting.summary {
        blocks.push(LayoutBlock::paragraph(summary));
    }

    if !meeting.topics.is_empty() {
        blocks.push(LayoutBlock::section("Topics"));
    }
    for (index, topic) in meeting.topics.into_iter().enumerate() {
        blocks.push(LayoutBlock::subsection(
            topic.title.unwrap_or_else(|| format!("Topic {}", index + 1)),
        ));
        if let Some(notes) = topic.notes {
            blocks.push(LayoutBlock::paragraph(notes));
        }
        if !topic.points.is_empty() {
            blocks.push(LayoutBlock::BulletList(topic.points));
        }
    }

    push_list(&mut blocks, "Decisions", meeting.decisions);
    let actions = meeting.action_items.iter().filter_map(|item| item.display()).collect();
    push_list(&mut blocks, "Action Items", actions);
    push_list(&mut blocks, "Follow-ups", meeting.follow_ups);

    DocumentModel {
        schema,
        title: meeting.meeting_title,
        blocks,
    }
}

fn fallback_model(schema: SchemaType, raw_text: &str, enforce_schema: bool) -> DocumentModel {
    let text = if enforce_schema {
        format!("{}\n\n{}", FALLBACK_PREAMBLE, raw_text)
    } else {
        raw_text.to_string()
    };
    DocumentModel {
        schema,
        title: None,
        blocks: vec![
            LayoutBlock::title(schema.default_title()),
            LayoutBlock::styled_paragraph(text, ParagraphStyle::Body),
        ],
    }
}
