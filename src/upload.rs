//! The upload engine: one file, three backend exchanges, no retries.
//!
//! A failed step aborts the whole attempt; an abandoned credential simply
//! expires server-side. This is a single-shot tool, not a resumable
//! transfer system.

use indicatif::ProgressBar;
use std::path::Path;
use tracing::{debug, info};

use crate::api::{ConfirmationRequest, ConfirmationResult, CredentialGrant, UploadRequest};
use crate::config::Config;
use crate::error::{Result, UploadError};
use crate::mime::detect_content_type;
use crate::transport::Transport;

/// Observable states of a single upload, in the order they occur
///
/// The observer is a rendering hook only; it never changes control flow.
#[derive(Debug)]
pub enum UploadPhase {
    CredentialRequested,
    CredentialGranted {
        file_key: String,
        bucket: String,
        expires_in: u64,
        max_file_size: u64,
    },
    Uploading {
        total_bytes: u64,
    },
    Uploaded,
    Confirmed {
        s3_url: String,
    },
}

pub struct Uploader {
    config: Config,
    transport: Transport,
}

impl Uploader {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let transport = Transport::new(config.auth_token.clone())?;
        Ok(Self { config, transport })
    }

    /// Run the three-step protocol for one file
    ///
    /// 1. request a short-lived credential with the file's metadata,
    /// 2. stream the bytes to the pre-signed URL from the grant,
    /// 3. confirm completion with the grant's key, passed through verbatim.
    ///
    /// The size limit declared by the grant is checked before the transfer
    /// starts, so an oversized file never burns the upload window.
    pub async fn upload<F>(
        &self,
        path: &Path,
        pb: Option<&ProgressBar>,
        mut observe: F,
    ) -> Result<ConfirmationResult>
    where
        F: FnMut(UploadPhase),
    {
        // Preflight: stat the file and resolve its content type
        let not_found = || UploadError::FileNotFound {
            path: path.display().to_string(),
        };
        let metadata = tokio::fs::metadata(path).await.map_err(|_| not_found())?;
        if !metadata.is_file() {
            return Err(not_found());
        }
        let file_size = metadata.len();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(not_found)?;
        let content_type = detect_content_type(path);

        observe(UploadPhase::CredentialRequested);
        let request = UploadRequest {
            file_name,
            content_type: content_type.clone(),
            file_size: Some(file_size),
        };
        let grant: CredentialGrant = self
            .transport
            .post_json(&self.config.presign_endpoint(), &request)
            .await?;
        info!(
            "credential granted: key={} expires_in={}s",
            grant.file_key, grant.expires_in
        );
        debug!(
            "grant issued at {}; alternate multipart POST to {} with {} fields",
            grant.generated_at,
            grant.presigned_post.url,
            grant.presigned_post.fields.len()
        );
        observe(UploadPhase::CredentialGranted {
            file_key: grant.file_key.clone(),
            bucket: grant.bucket.clone(),
            expires_in: grant.expires_in,
            max_file_size: grant.max_file_size,
        });

        if file_size > grant.max_file_size {
            return Err(UploadError::FileTooLarge {
                size: file_size,
                max: grant.max_file_size,
            });
        }

        observe(UploadPhase::Uploading {
            total_bytes: file_size,
        });
        self.transport
            .put_file(&grant.presigned_put_url, path, &content_type, file_size, pb)
            .await?;
        observe(UploadPhase::Uploaded);

        let confirm = ConfirmationRequest {
            file_key: grant.file_key,
        };
        let result: ConfirmationResult = self
            .transport
            .post_json(&self.config.confirm_endpoint(), &confirm)
            .await?;
        info!("upload confirmed: {}", result.s3_url);
        observe(UploadPhase::Confirmed {
            s3_url: result.s3_url.clone(),
        });

        Ok(result)
    }
}
