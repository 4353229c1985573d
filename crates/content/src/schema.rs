//! The two content shapes and their lenient deserialization.
//!
//! Model output drifts: a list may arrive as a single string, a number where
//! text was expected, objects where plain strings were expected, or the same
//! field under two names. Fields are therefore read through small coercing
//! helpers instead of strict types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaType {
    Tutorial,
    MeetingSummary,
}

impl SchemaType {
    /// Title used when the content does not provide one.
    pub fn default_title(&self) -> &'static str {
        match self {
            SchemaType::Tutorial => "Tutorial",
            SchemaType::MeetingSummary => "Meeting Summary",
        }
    }
}

/// A JSON object read field by field.
///
/// Each field is looked up under a list of accepted keys in priority order and
/// the first key with usable content wins, so a payload carrying two spellings
/// of the same field still reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
struct Fields(Map<String, Value>);

impl Fields {
    fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.0.get(*key).and_then(value_text))
    }

    fn text_list(&self, keys: &[&str]) -> Vec<String> {
        keys.iter()
            .map(|key| match self.0.get(*key) {
                Some(Value::Array(items)) => items.iter().filter_map(value_text).collect(),
                Some(other) => value_text(other).into_iter().collect(),
                None => Vec::new(),
            })
            .find(|items: &Vec<String>| !items.is_empty())
            .unwrap_or_default()
    }

    /// Screenshot references: a list, or a single id, possibly comma separated.
    fn id_list(&self, keys: &[&str]) -> Vec<String> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .map(ids)
            .find(|ids| !ids.is_empty())
            .unwrap_or_default()
    }

    /// A list of items, or a single item. Items that do not read are skipped.
    fn many<T: DeserializeOwned>(&self, keys: &[&str]) -> Vec<T> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .map(|value| {
                let items = match value {
                    Value::Array(items) => items.as_slice(),
                    Value::Null => return Vec::new(),
                    single => std::slice::from_ref(single),
                };
                items
                    .iter()
                    .filter_map(|item| T::deserialize(item).ok())
                    .collect::<Vec<T>>()
            })
            .find(|items| !items.is_empty())
            .unwrap_or_default()
    }
}

/// An entry of a list: either an object or a bare string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemRepr {
    Fields(Fields),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Fields")]
pub struct Tutorial {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub prerequisites: Vec<String>,
    pub steps: Vec<TutorialStep>,
    pub closing: Option<String>,
}

impl From<Fields> for Tutorial {
    fn from(fields: Fields) -> Self {
        Tutorial {
            title: fields.text(&["title", "name"]),
            summary: fields.text(&["summary", "overview", "introduction", "description"]),
            prerequisites: fields.text_list(&["prerequisites", "requirements"]),
            steps: fields.many(&["steps"]),
            closing: fields.text(&["closing", "conclusion", "wrapUp"]),
        }
    }
}

impl Tutorial {
    /// `true` when at least one field the renderer knows about is present.
    pub fn has_content(&self) -> bool {
        self.title.is_some() || self.summary.is_some() || !self.prerequisites.is_empty() || !self.steps.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "ItemRepr")]
pub struct TutorialStep {
    pub title: Option<String>,
    pub description: Option<String>,
    pub screenshot_ids: Vec<String>,
    pub timecode: Option<String>,
    pub tips: Vec<String>,
}

impl From<ItemRepr> for TutorialStep {
    fn from(repr: ItemRepr) -> Self {
        match repr {
            ItemRepr::Text(text) => TutorialStep {
                description: non_empty(text),
                ..Default::default()
            },
            ItemRepr::Fields(fields) => TutorialStep {
                title: fields.text(&["title", "heading", "name"]),
                description: fields.text(&["description", "instructions", "details", "text", "body"]),
                screenshot_ids: fields.id_list(&["screenshotIds", "screenshotId", "screenshots", "shotIds", "shots"]),
                timecode: fields.text(&["timecode", "timestamp", "time"]),
                tips: fields.text_list(&["tips", "notes", "tip"]),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Fields")]
pub struct MeetingSummary {
    pub meeting_title: Option<String>,
    pub date: Option<String>,
    pub attendees: Vec<String>,
    pub summary: Option<String>,
    pub topics: Vec<Topic>,
    pub decisions: Vec<String>,
    pub action_items: Vec<ActionItem>,
    pub follow_ups: Vec<String>,
}

impl From<Fields> for MeetingSummary {
    fn from(fields: Fields) -> Self {
        MeetingSummary {
            meeting_title: fields.text(&["meetingTitle", "title"]),
            date: fields.text(&["date", "meetingDate"]),
            attendees: fields.text_list(&["attendees", "participants"]),
            summary: fields.text(&["summary", "overview"]),
            topics: fields.many(&["topics", "agenda", "discussion", "discussionPoints"]),
            decisions: fields.text_list(&["decisions", "keyDecisions"]),
            action_items: fields.many(&["actionItems", "actions", "tasks"]),
            follow_ups: fields.text_list(&["followUps", "nextSteps", "followups"]),
        }
    }
}

impl MeetingSummary {
    pub fn has_content(&self) -> bool {
        self.meeting_title.is_some()
            || self.date.is_some()
            || !self.attendees.is_empty()
            || self.summary.is_some()
            || !self.topics.is_empty()
            || !self.decisions.is_empty()
            || !self.action_items.is_empty()
            || !self.follow_ups.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "ItemRepr")]
pub struct Topic {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub points: Vec<String>,
}

impl From<ItemRepr> for Topic {
    fn from(repr: ItemRepr) -> Self {
        match repr {
            ItemRepr::Text(text) => Topic {
                title: non_empty(text),
                ..Default::default()
            },
            ItemRepr::Fields(fields) => Topic {
                title: fields.text(&["title", "topic", "name"]),
                notes: fields.text(&["notes", "summary", "discussion", "details"]),
                points: fields.text_list(&["points", "keyPoints", "bullets"]),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "ItemRepr")]
pub struct ActionItem {
    pub task: Option<String>,
    pub owner: Option<String>,
    pub due: Option<String>,
}

impl ActionItem {
    /// One-line rendering: `task (owner, due date)`.
    pub fn display(&self) -> Option<String> {
        let task = self.task.as_deref()?;
        let mut details = Vec::new();
        if let Some(owner) = &self.owner {
            details.push(owner.clone());
        }
        if let Some(due) = &self.due {
            details.push(format!("due {}", due));
        }
        Some(if details.is_empty() {
            task.to_string()
        } else {
            format!("{} ({})", task, details.join(", "))
        })
    }
}

impl From<ItemRepr> for ActionItem {
    fn from(repr: ItemRepr) -> Self {
        match repr {
            ItemRepr::Text(text) => ActionItem {
                task: non_empty(text),
                ..Default::default()
            },
            ItemRepr::Fields(fields) => ActionItem {
                task: fields.text(&["task", "action", "item", "description", "title"]),
                owner: fields.text(&["owner", "assignee", "responsible"]),
                due: fields.text(&["due", "dueDate", "deadline"]),
            },
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Renders a scalar or list as display text.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_text).collect();
            if parts.is_empty() { None } else { Some(parts.join(", ")) }
        }
        Value::Object(map) => {
            // A person or labelled item: prefer its name-like field.
            let label = ["name", "text", "title", "label", "value"]
                .iter()
                .find_map(|key| map.get(*key).and_then(value_text))?;
            let role = ["role", "title"]
                .iter()
                .filter(|key| map.get(**key).and_then(value_text).as_deref() != Some(label.as_str()))
                .find_map(|key| map.get(*key).and_then(value_text));
            Some(match role {
                Some(role) => format!("{} ({})", label, role),
                None => label,
            })
        }
        Value::Null => None,
    }
}

fn ids(value: &Value) -> Vec<String> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .flat_map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}
