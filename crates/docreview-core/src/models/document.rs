use bytes::Bytes;

/// Filename used when the server omits `Content-Disposition`.
pub const UNKNOWN_FILENAME: &str = "unknown";

/// A fetched document, alive only for the duration of one preview render.
#[derive(Debug, Clone)]
pub struct PreviewPayload {
    pub bytes: Bytes,
    /// Raw `Content-Type` header value; empty when the header was absent.
    pub declared_content_type: String,
    pub filename: String,
}

impl PreviewPayload {
    pub fn new(
        bytes: impl Into<Bytes>,
        declared_content_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            declared_content_type: declared_content_type.into(),
            filename: filename.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
