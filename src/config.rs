use anyhow::{Context, Result};
use std::env;

/// Configuration for the upload backend
///
/// The base URL and shared secret are deploy-time constants supplied by the
/// surrounding environment; they are validated here and injected into the
/// uploader at construction time so the core stays testable against
/// arbitrary backends.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub auth_token: String,
}

impl Config {
    /// Load configuration from environment variables and .env file
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or
    /// the base URL does not parse.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if it exists

        let base_url = env::var("UPLOAD_API_URL")
            .context("UPLOAD_API_URL not found in environment. Please set it in .env file")?;
        let base_url = Self::validate_base_url(&base_url)?;

        let auth_token = env::var("UPLOAD_API_TOKEN")
            .context("UPLOAD_API_TOKEN not found in environment. Please set it in .env file")?;
        if auth_token.trim().is_empty() {
            anyhow::bail!("UPLOAD_API_TOKEN cannot be empty");
        }

        Ok(Self {
            base_url,
            auth_token,
        })
    }

    /// Validate the API base URL and normalize away any trailing slash
    fn validate_base_url(raw: &str) -> Result<String> {
        if raw.is_empty() {
            anyhow::bail!("UPLOAD_API_URL cannot be empty");
        }

        let url = reqwest::Url::parse(raw)
            .with_context(|| format!("UPLOAD_API_URL '{}' is not a valid URL", raw))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!(
                "UPLOAD_API_URL '{}' must use http or https (got '{}')",
                raw,
                url.scheme()
            );
        }

        Ok(raw.trim_end_matches('/').to_string())
    }

    /// Endpoint that issues upload credentials
    pub fn presign_endpoint(&self) -> String {
        format!("{}/presigned-url", self.base_url)
    }

    /// Endpoint that confirms a completed upload
    pub fn confirm_endpoint(&self) -> String {
        format!("{}/confirm-upload", self.base_url)
    }
}
