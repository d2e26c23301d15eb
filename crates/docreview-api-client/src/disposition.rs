//! `Content-Disposition` filename extraction.

use docreview_core::models::UNKNOWN_FILENAME;

/// Extract the filename parameter from a `Content-Disposition` header.
///
/// Accepts quoted and bare `filename=` values and the RFC 5987
/// `filename*=charset'lang'value` form, which wins when both are present.
/// Falls back to `"unknown"`.
pub fn filename_from_content_disposition(header: Option<&str>) -> String {
    let Some(header) = header else {
        return UNKNOWN_FILENAME.to_string();
    };

    let mut plain = None;
    let mut extended = None;

    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => extended = decode_extended(value.trim()),
            "filename" => plain = Some(unquote(value.trim())),
            _ => {}
        }
    }

    extended
        .or(plain)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_FILENAME.to_string())
}

fn unquote(value: &str) -> String {
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.replace("\\\"", "\"")
}

fn decode_extended(value: &str) -> Option<String> {
    // charset'language'percent-encoded
    let encoded = value.splitn(3, '\'').nth(2)?;
    urlencoding::decode(encoded).ok().map(|s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_filename() {
        assert_eq!(
            filename_from_content_disposition(Some("attachment; filename=\"passport.png\"")),
            "passport.png"
        );
    }

    #[test]
    fn test_bare_filename() {
        assert_eq!(
            filename_from_content_disposition(Some("attachment; filename=w2.pdf")),
            "w2.pdf"
        );
    }

    #[test]
    fn test_extended_filename_wins() {
        let header = "attachment; filename=\"fallback.docx\"; filename*=UTF-8''r%C3%A9sum%C3%A9.docx";
        assert_eq!(
            filename_from_content_disposition(Some(header)),
            "résumé.docx"
        );
    }

    #[test]
    fn test_case_insensitive_parameter() {
        assert_eq!(
            filename_from_content_disposition(Some("inline; FileName=\"Scan.JPG\"")),
            "Scan.JPG"
        );
    }

    #[test]
    fn test_missing_header_or_parameter() {
        assert_eq!(filename_from_content_disposition(None), "unknown");
        assert_eq!(
            filename_from_content_disposition(Some("attachment")),
            "unknown"
        );
        assert_eq!(
            filename_from_content_disposition(Some("attachment; filename=\"\"")),
            "unknown"
        );
    }
}
