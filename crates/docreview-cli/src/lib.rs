//! Terminal front-end for the review workflow: file-backed preview regions,
//! a printing review UI, a path-based file picker and the PDF rasterizer.

#[cfg(feature = "pdfium")]
pub mod pdfium;
pub mod picker;
pub mod rasterizer;
pub mod sinks;
pub mod terminal;

pub use picker::PathPicker;
pub use rasterizer::{pdf_rasterizer, UnavailablePdfRasterizer};
pub use sinks::{preview_regions, FileSink};
pub use terminal::TerminalUi;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("name does not match", 10), "name do...");
        assert_eq!(truncate_string("abc", 2), "...");
    }

    #[test]
    fn truncate_string_multibyte() {
        assert_eq!(truncate_string("résumé scanné", 8), "résum...");
    }
}
