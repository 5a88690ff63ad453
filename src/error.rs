use thiserror::Error;

/// Errors that can occur while driving a single upload
///
/// Every variant is terminal for the current attempt; there is no retry
/// anywhere in the core.
#[derive(Error, Debug)]
pub enum UploadError {
    /// File missing or not a regular file on the local filesystem
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// File exceeds the size limit declared by the credential grant
    #[error("file too large: {size} bytes (limit: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    /// A URL from the backend or configuration failed to parse
    #[error("invalid URL: {raw}")]
    InvalidUrl { raw: String },

    /// Backend returned a structured error envelope
    #[error("API error ({status}): {message}")]
    Api { message: String, status: u16 },

    /// Transport-level failure: DNS, connection refused, TLS, timeout
    #[error("network error: {message}")]
    Network { message: String },

    /// Backend returned a success status but an undecodable body
    #[error("response body did not match the expected schema")]
    InvalidResponse,

    /// The storage PUT came back with a non-200 status and no error envelope
    #[error("upload rejected with status {status}")]
    UploadFailed { status: u16 },
}

impl UploadError {
    pub fn network<E: std::fmt::Display>(error: E) -> Self {
        Self::Network {
            message: error.to_string(),
        }
    }

    pub fn invalid_url(raw: &str) -> Self {
        Self::InvalidUrl {
            raw: raw.to_string(),
        }
    }
}

/// Result type for upload operations
pub type Result<T> = std::result::Result<T, UploadError>;
