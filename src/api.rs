//! Wire contracts for the two backend endpoints.
//!
//! Field names mirror the backend JSON bodies exactly; everything here is
//! built fresh per upload and discarded when the attempt ends.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata sent to the credential endpoint, built once from a local stat
#[derive(Serialize, Debug)]
pub struct UploadRequest {
    pub file_name: String,
    pub content_type: String,
    pub file_size: Option<u64>,
}

/// Short-lived upload credential issued by the backend
///
/// `file_key` is opaque and must reach the confirmation step unmodified.
#[derive(Deserialize, Debug)]
pub struct CredentialGrant {
    pub presigned_put_url: String,
    pub file_key: String,
    pub bucket: String,
    pub expires_in: u64,
    pub max_file_size: u64,
    pub generated_at: String,
    pub presigned_post: PresignedPost,
}

/// Alternate multipart-POST parameters carried by the grant
#[derive(Deserialize, Debug)]
pub struct PresignedPost {
    pub url: String,
    pub fields: HashMap<String, String>,
}

#[derive(Serialize, Debug)]
pub struct ConfirmationRequest {
    pub file_key: String,
}

/// Terminal artifact of a successful upload
#[derive(Deserialize, Debug)]
pub struct ConfirmationResult {
    pub message: String,
    pub file_key: String,
    pub s3_url: String,
    pub bucket: String,
    pub file_size: u64,
    pub content_type: String,
    pub last_modified: String,
    pub confirmed_at: String,
}

/// Canonical backend error envelope on any 4xx/5xx response
#[derive(Deserialize, Debug)]
pub struct ApiErrorPayload {
    pub error: String,
}
