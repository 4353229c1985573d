use crate::error::ResourceError;
use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};

/// A decoded `data:` URL.
#[derive(Debug, Clone, PartialEq)]
pub struct DataUrl {
    /// Lowercased media type, `application/octet-stream` when absent.
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Decodes `data:<mime>;base64,<payload>`.
///
/// A bare base64 string without the `data:` header is accepted too.
/// Whitespace inside the payload is ignored.
pub fn decode_data_url(input: &str) -> Result<DataUrl, ResourceError> {
    let input = input.trim();

    let (mime, payload) = match input.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| ResourceError::InvalidDataUrl("missing ',' separator".to_string()))?;
            let mut params = header.split(';');
            let mime = params
                .next()
                .filter(|mime| !mime.is_empty())
                .unwrap_or("application/octet-stream")
                .to_ascii_lowercase();
            if !params.any(|param| param.eq_ignore_ascii_case("base64")) {
                return Err(ResourceError::InvalidDataUrl(format!(
                    "'{}' payload is not base64 encoded",
                    mime
                )));
            }
            (mime, payload)
        }
        None => ("application/octet-stream".to_string(), input),
    };

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(ResourceError::InvalidDataUrl("empty payload".to_string()));
    }

    let bytes = match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => bytes,
        Err(err) => STANDARD_NO_PAD.decode(compact.as_bytes()).map_err(|_| err)?,
    };

    Ok(DataUrl { mime, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_media_type_and_payload() {
        let url = decode_data_url("data:image/PNG;base64,aGVsbG8=").unwrap();
        assert_eq!(url.mime, "image/png");
        assert_eq!(url.bytes, b"hello");
    }

    #[test]
    fn accepts_bare_payload_with_whitespace() {
        let url = decode_data_url("aGVs\nbG8=").unwrap();
        assert_eq!(url.mime, "application/octet-stream");
        assert_eq!(url.bytes, b"hello");
    }

    #[test]
    fn accepts_missing_padding() {
        assert_eq!(decode_data_url("data:image/jpeg;base64,aGVsbG8").unwrap().bytes, b"hello");
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(matches!(
            decode_data_url("data:image/png;base64"),
            Err(ResourceError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            decode_data_url("data:text/plain,hello"),
            Err(ResourceError::InvalidDataUrl(_))
        ));
        assert!(matches!(decode_data_url("data:image/png;base64,"), Err(ResourceError::InvalidDataUrl(_))));
        assert!(matches!(decode_data_url("!!!not base64!!!"), Err(ResourceError::Base64(_))));
    }
}
