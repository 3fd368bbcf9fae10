use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

use crate::constants::HSTS_HEADER;

/// Parse header strings into HeaderMap
pub fn parse_headers(headers: &[String]) -> HeaderMap {
    let mut header_map = HeaderMap::new();
    for header_str in headers {
        if let Some((key, value)) = header_str.split_once(": ") {
            if let Ok(header_name) = HeaderName::from_bytes(key.as_bytes()) {
                if let Ok(header_value) = HeaderValue::from_str(value.trim()) {
                    header_map.insert(header_name, header_value);
                } else {
                    warn!(header = key, "invalid header value, skipping");
                }
            } else {
                warn!(header = key, "invalid header name, skipping");
            }
        } else {
            warn!(
                header = header_str.as_str(),
                "invalid header format, expected 'Key: Value'"
            );
        }
    }
    header_map
}

/// Value of the Strict-Transport-Security header, if present and not blank.
///
/// The value is returned as sent. Bytes outside visible ASCII are replaced
/// rather than discarding the header.
pub fn hsts_header_value(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(HSTS_HEADER)?;
    let text = String::from_utf8_lossy(value.as_bytes());
    if text.trim().is_empty() {
        None
    } else {
        Some(text.into_owned())
    }
}
