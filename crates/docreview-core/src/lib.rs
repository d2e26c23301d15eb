//! docreview core library
//!
//! This crate provides the domain models, error types and configuration
//! shared by the API client, the preview pipeline and the review services.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorMetadata, LogLevel, Surface};
