use chrono::{DateTime, Utc};
use lopdf::{Dictionary, Object, StringFormat};

/// Document-level metadata written to the `/Info` dictionary and catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Vec<String>,
    /// A BCP 47 tag such as `en-US`, written as the catalog `/Lang`.
    pub language: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl DocumentInfo {
    pub(crate) fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        let fields = [
            ("Title", self.title.as_deref()),
            ("Author", self.author.as_deref()),
            ("Subject", self.subject.as_deref()),
            ("Creator", self.creator.as_deref()),
            ("Producer", self.producer.as_deref()),
        ];
        for (key, value) in fields {
            if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
                dict.set(key, text_string(value));
            }
        }

        let keywords: Vec<&str> = self
            .keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect();
        if !keywords.is_empty() {
            dict.set("Keywords", text_string(&keywords.join(", ")));
        }

        if let Some(created) = self.created {
            let date = created.format("D:%Y%m%d%H%M%SZ").to_string();
            dict.set("CreationDate", Object::String(date.into_bytes(), StringFormat::Literal));
        }
        dict
    }

    pub(crate) fn language_tag(&self) -> Option<Object> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .map(text_string)
    }
}

/// Encodes a PDF text string: printable ASCII as a literal, anything else as
/// UTF-16BE with a byte order mark.
pub(crate) fn text_string(value: &str) -> Object {
    if value.chars().all(|c| c == ' ' || c.is_ascii_graphic()) {
        return Object::String(value.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn skips_blank_fields_and_joins_keywords() {
        let info = DocumentInfo {
            title: Some("Quarterly review".into()),
            author: Some("   ".into()),
            keywords: vec!["alpha".into(), "".into(), "beta".into()],
            created: Some(Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 5).unwrap()),
            ..Default::default()
        };
        let dict = info.to_dictionary();
        assert_eq!(dict.get(b"Title").unwrap().as_str().unwrap(), b"Quarterly review");
        assert!(dict.get(b"Author").is_err());
        assert_eq!(dict.get(b"Keywords").unwrap().as_str().unwrap(), b"alpha, beta");
        assert_eq!(dict.get(b"CreationDate").unwrap().as_str().unwrap(), b"D:20261017093005Z");
    }

    #[test]
    fn non_ascii_uses_utf16() {
        match text_string("Café") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
                assert_eq!(bytes.len(), 2 + 4 * 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
