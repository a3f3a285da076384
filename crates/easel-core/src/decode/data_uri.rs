//! Parsing of `data:` URIs produced by the browser's file reader.
//!
//! The front end hands us uploads as `data:<mime>;base64,<payload>` strings.
//! Only base64 payloads are accepted; percent-encoded text URIs never carry
//! image bytes in this application.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Errors raised while unpacking a data URI.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUriError {
    /// The string does not start with `data:`.
    #[error("missing `data:` scheme")]
    MissingScheme,

    /// There is no `,` separating the header from the payload.
    #[error("missing `,` between header and payload")]
    MissingComma,

    /// The header does not declare a `;base64` payload.
    #[error("payload is not base64-encoded")]
    NotBase64,

    /// The declared media type is not an image.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    InvalidPayload(String),
}

/// A decoded data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Media type from the header, e.g. `image/png`. `None` when omitted.
    pub mime: Option<String>,
    /// Raw payload bytes.
    pub bytes: Vec<u8>,
}

/// Parse a base64 `data:` URI into its media type and bytes.
///
/// The scheme and the `base64` token are matched case-insensitively. Any
/// ASCII whitespace inside the payload is ignored. A media type, when
/// present, must be `image/*`.
pub fn parse_data_uri(uri: &str) -> Result<DataUri, DataUriError> {
    let uri = uri.trim();
    let rest = match uri.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("data:") => &uri[5..],
        _ => return Err(DataUriError::MissingScheme),
    };

    let (header, payload) = rest.split_once(',').ok_or(DataUriError::MissingComma)?;

    let mut parts = header.split(';');
    let media_type = parts.next().unwrap_or("").trim();
    if !parts.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(DataUriError::NotBase64);
    }

    let mime = if media_type.is_empty() {
        None
    } else {
        let lower = media_type.to_ascii_lowercase();
        if !lower.starts_with("image/") {
            return Err(DataUriError::UnsupportedMediaType(media_type.to_string()));
        }
        Some(lower)
    };

    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| DataUriError::InvalidPayload(e.to_string()))?;

    Ok(DataUri { mime, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_png_uri() {
        let uri = format!("data:image/png;base64,{}", STANDARD.encode([1u8, 2, 3]));
        let parsed = parse_data_uri(&uri).unwrap();
        assert_eq!(parsed.mime.as_deref(), Some("image/png"));
        assert_eq!(parsed.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_without_media_type() {
        let parsed = parse_data_uri("data:;base64,AAEC").unwrap();
        assert_eq!(parsed.mime, None);
        assert_eq!(parsed.bytes, vec![0, 1, 2]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let parsed = parse_data_uri("DATA:Image/JPEG;BASE64,AAEC").unwrap();
        assert_eq!(parsed.mime.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn test_parse_ignores_whitespace_in_payload() {
        let parsed = parse_data_uri("data:image/gif;base64,AA\nEC ").unwrap();
        assert_eq!(parsed.bytes, vec![0, 1, 2]);
    }

    #[test]
    fn test_parse_accepts_extra_parameters() {
        let parsed = parse_data_uri("data:image/png;name=a.png;base64,AAEC").unwrap();
        assert_eq!(parsed.mime.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_missing_scheme() {
        assert_eq!(
            parse_data_uri("image/png;base64,AAEC"),
            Err(DataUriError::MissingScheme)
        );
        assert_eq!(parse_data_uri(""), Err(DataUriError::MissingScheme));
    }

    #[test]
    fn test_missing_comma() {
        assert_eq!(
            parse_data_uri("data:image/png;base64"),
            Err(DataUriError::MissingComma)
        );
    }

    #[test]
    fn test_not_base64() {
        assert_eq!(
            parse_data_uri("data:image/svg+xml,%3Csvg%3E"),
            Err(DataUriError::NotBase64)
        );
    }

    #[test]
    fn test_non_image_media_type() {
        assert!(matches!(
            parse_data_uri("data:text/plain;base64,AAEC"),
            Err(DataUriError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn test_invalid_payload() {
        assert!(matches!(
            parse_data_uri("data:image/png;base64,!!!!"),
            Err(DataUriError::InvalidPayload(_))
        ));
    }
}
