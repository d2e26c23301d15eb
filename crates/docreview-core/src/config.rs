//! Configuration module
//!
//! Client settings are read from the environment (optionally through a
//! `.env` file) and validated once at startup.

use std::env;
use std::path::PathBuf;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_STUDENT_ID: &str = "student123";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_UPLOAD_SIZE_MB: usize = 50;
const DEFAULT_PREVIEW_DIR: &str = "preview";

/// Review client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the review server, without a trailing slash.
    pub api_url: String,
    /// Placeholder student id attached to every upload.
    pub student_id: String,
    pub request_timeout_secs: u64,
    pub max_upload_size_bytes: usize,
    /// Directory the terminal front-end writes rendered previews into.
    pub preview_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            student_id: DEFAULT_STUDENT_ID.to_string(),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            preview_dir: PathBuf::from(DEFAULT_PREVIEW_DIR),
        }
    }
}

impl ClientConfig {
    /// Load from DOCREVIEW_* variables. `API_URL` is accepted as a fallback for the base URL.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let api_url = env::var("DOCREVIEW_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let max_upload_size_mb = env::var("DOCREVIEW_MAX_UPLOAD_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let config = ClientConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            student_id: env::var("DOCREVIEW_STUDENT_ID")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STUDENT_ID.to_string()),
            request_timeout_secs: env::var("DOCREVIEW_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("DOCREVIEW_REQUEST_TIMEOUT_SECS must be a valid number")
                })?,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            preview_dir: env::var("DOCREVIEW_PREVIEW_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PREVIEW_DIR)),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "DOCREVIEW_API_URL must start with http:// or https://"
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "DOCREVIEW_REQUEST_TIMEOUT_SECS must be greater than zero"
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "DOCREVIEW_MAX_UPLOAD_MB must be greater than zero"
            ));
        }

        if self.student_id.trim().is_empty() {
            return Err(anyhow::anyhow!("DOCREVIEW_STUDENT_ID cannot be empty"));
        }

        Ok(())
    }

    /// Override the base URL, keeping the no-trailing-slash invariant.
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.student_id, "student123");
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = ClientConfig::default().with_api_url("ftp://example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_api_url_trims_trailing_slash() {
        let config = ClientConfig::default().with_api_url("http://review.local:8080/");
        assert_eq!(config.api_url, "http://review.local:8080");
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = ClientConfig {
            request_timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_student_id() {
        let config = ClientConfig {
            student_id: "  ".to_string(),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
