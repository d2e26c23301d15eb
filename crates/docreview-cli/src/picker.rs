use async_trait::async_trait;
use bytes::Bytes;
use docreview_core::ClientResult;
use docreview_services::{FilePicker, SelectedFile};
use std::path::PathBuf;

/// Picker answering with a path given on the command line.
///
/// No path means the prompt was dismissed.
pub struct PathPicker {
    path: Option<PathBuf>,
}

impl PathPicker {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl FilePicker for PathPicker {
    async fn pick_file(&self, accept: &str) -> ClientResult<Option<SelectedFile>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        tracing::debug!(path = %path.display(), accept = %accept, "Reading selected file");
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Ok(Some(SelectedFile {
            name,
            bytes: Bytes::from(bytes),
            content_type: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docreview_core::ClientError;

    #[tokio::test]
    async fn test_reads_file_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passport.png");
        std::fs::write(&path, b"\x89PNG").unwrap();

        let file = PathPicker::new(Some(path))
            .pick_file("image/*")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(file.name, "passport.png");
        assert_eq!(&file.bytes[..], b"\x89PNG");
    }

    #[tokio::test]
    async fn test_no_path_is_cancel() {
        assert!(PathPicker::new(None).pick_file("*").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PathPicker::new(Some(dir.path().join("nope.pdf")))
            .pick_file("*")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }
}
