//! Request, option and result types of a document build.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use shotdoc_content::SchemaType;
use shotdoc_resource::{RasterFormat, RasterOptions};

/// Everything needed to build one document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    pub schema_type: SchemaType,
    /// Only changes the wording of the raw-text fallback.
    #[serde(default)]
    pub enforce_schema: bool,
    #[serde(default)]
    pub result_text: String,
    #[serde(default)]
    pub shots: Vec<ShotRecord>,
    #[serde(default)]
    pub options: ExportOptions,
    /// Fixes the date shown on the cover and written to the metadata.
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl BuildRequest {
    pub fn new(schema_type: SchemaType, result_text: impl Into<String>) -> Self {
        Self {
            schema_type,
            enforce_schema: false,
            result_text: result_text.into(),
            shots: Vec::new(),
            options: ExportOptions::default(),
            generated_at: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A captured screenshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub timecode: Option<String>,
    pub data_url: String,
}

impl ShotRecord {
    pub fn new(id: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            note: None,
            timecode: None,
            data_url: data_url.into(),
        }
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    scalar_text(Value::deserialize(deserializer)?)
        .ok_or_else(|| serde::de::Error::custom("expected a string or a number"))
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).filter(|s| !s.trim().is_empty()))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    pub document: DocumentOptions,
    /// `None` embeds screenshots exactly as supplied.
    pub image: Option<ImageOptions>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentOptions {
    #[serde(rename = "includeTOC", alias = "includeToc")]
    pub include_toc: bool,
    pub include_appendix: bool,
    pub include_cover: bool,
    pub linkify_urls: bool,
    /// Overrides the title repeated in page footers.
    pub running_title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Vec<String>,
    /// BCP 47 tag written as the document language.
    pub language: Option<String>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            include_toc: true,
            include_appendix: true,
            include_cover: false,
            linkify_urls: true,
            running_title: None,
            author: None,
            subject: None,
            keywords: Vec::new(),
            language: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    #[serde(alias = "jpg")]
    Jpeg,
    Png,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageOptions {
    pub format: ImageFormat,
    /// Encoder quality between 0 and 1.
    pub quality: f32,
    pub max_width: u32,
    pub progressive: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            format: ImageFormat::Jpeg,
            quality: 0.85,
            max_width: 1600,
            progressive: false,
        }
    }
}

impl ImageOptions {
    pub fn raster_options(&self) -> RasterOptions {
        RasterOptions {
            format: match self.format {
                ImageFormat::Jpeg => RasterFormat::Jpeg,
                ImageFormat::Png => RasterFormat::Png,
            },
            quality: RasterOptions::quality_from_fraction(self.quality),
            max_width: (self.max_width > 0).then_some(self.max_width),
            progressive: self.progressive,
        }
    }
}

/// The finished document and what happened while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildResult {
    pub buffer: Vec<u8>,
    /// Derived from the parsed title; absent when the content fell back to raw text.
    pub suggested_filename: Option<String>,
    pub warnings: Vec<String>,
    pub page_count: usize,
    /// Anchors recorded while laying out the content.
    pub anchor_count: usize,
}

impl BuildResult {
    /// `None` when the build produced no warnings.
    pub fn warnings(&self) -> Option<&[String]> {
        if self.warnings.is_empty() { None } else { Some(&self.warnings) }
    }

    pub fn summary(&self) -> BuildSummary {
        BuildSummary {
            filename: self.suggested_filename.clone(),
            warnings: self.warnings().map(<[String]>::to_vec),
            pages: self.page_count,
            bytes: self.buffer.len(),
        }
    }
}

/// Serializable report of a build, without the document bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    pub pages: usize,
    pub bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_options_have_stated_defaults() {
        let options: ExportOptions = serde_json::from_value(json!({})).unwrap();
        assert!(options.document.include_toc);
        assert!(options.document.include_appendix);
        assert!(!options.document.include_cover);
        assert!(options.document.linkify_urls);
        assert!(options.image.is_none());
    }

    #[test]
    fn request_reads_camel_case_fields() {
        let request = BuildRequest::from_json(
            r#"{
                "schemaType": "meetingSummary",
                "enforceSchema": true,
                "resultText": "{}",
                "shots": [{"id": 7, "timecode": 12.5, "dataUrl": "data:image/png;base64,AAAA"}],
                "options": {
                    "document": {"includeTOC": false, "includeCover": true, "keywords": ["a", "b"]},
                    "image": {"format": "png", "quality": 0.5}
                },
                "generatedAt": "2026-10-17T09:30:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(request.schema_type, SchemaType::MeetingSummary);
        assert!(request.enforce_schema);
        assert_eq!(request.shots[0].id, "7");
        assert_eq!(request.shots[0].timecode.as_deref(), Some("12.5"));
        assert!(!request.options.document.include_toc);
        assert!(request.options.document.include_cover);
        assert_eq!(request.options.document.keywords, vec!["a", "b"]);
        assert!(request.generated_at.is_some());

        let raster = request.options.image.unwrap().raster_options();
        assert_eq!(raster.format, RasterFormat::Png);
        assert_eq!(raster.quality, 50);
        assert_eq!(raster.max_width, Some(1600));
    }

    #[test]
    fn summary_omits_empty_warnings() {
        let result = BuildResult {
            buffer: vec![0; 10],
            suggested_filename: None,
            warnings: Vec::new(),
            page_count: 1,
            anchor_count: 1,
        };
        assert_eq!(result.warnings(), None);
        let json = serde_json::to_value(result.summary()).unwrap();
        assert_eq!(json, json!({"pages": 1, "bytes": 10}));
    }
}
