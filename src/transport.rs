//! HTTP layer for the upload protocol.
//!
//! Two kinds of traffic with separate timeout budgets: small JSON metadata
//! round-trips, and a single long-running streaming PUT for the file bytes.
//! Transport failures are folded into [`UploadError`] here; `reqwest` error
//! types never cross this boundary.

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};
use tracing::debug;

use crate::api::ApiErrorPayload;
use crate::error::{Result, UploadError};

/// Budget for credential and confirmation round-trips
const METADATA_TIMEOUT: Duration = Duration::from_secs(30);

/// Budget for the streaming upload; transfer time grows with file size
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60 * 60);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Transport {
    http: Client,
    auth_token: String,
}

impl Transport {
    pub fn new(auth_token: String) -> anyhow::Result<Self> {
        let http = Client::builder()
            .use_rustls_tls()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self { http, auth_token })
    }

    /// POST a JSON body with bearer auth and decode a typed JSON response
    ///
    /// Any status >= 400 is decoded against the backend's error envelope;
    /// if that fails, a generic API error carrying the raw status is
    /// returned. A success status with an undecodable body is
    /// `InvalidResponse`.
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = Url::parse(url).map_err(|_| UploadError::invalid_url(url))?;

        let response = self
            .http
            .post(url.clone())
            .bearer_auth(&self.auth_token)
            .json(body)
            .timeout(METADATA_TIMEOUT)
            .send()
            .await
            .map_err(UploadError::network)?;

        let status = response.status().as_u16();
        debug!("POST {} -> {}", url, status);

        if status >= 400 {
            let message = match response.json::<ApiErrorPayload>().await {
                Ok(payload) => payload.error,
                Err(_) => format!("request failed with status {}", status),
            };
            return Err(UploadError::Api { message, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|_| UploadError::InvalidResponse)
    }

    /// Stream a file's bytes in a single PUT to a pre-authorized URL
    ///
    /// The file is read from disk straight into the connection, never
    /// buffered whole in memory. The storage service answers with a bare
    /// status; success is strictly 200.
    pub async fn put_file(
        &self,
        url: &str,
        path: &Path,
        content_type: &str,
        size: u64,
        pb: Option<&ProgressBar>,
    ) -> Result<()> {
        let url = Url::parse(url).map_err(|_| UploadError::invalid_url(url))?;

        let file = File::open(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => UploadError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => UploadError::network(e),
        })?;

        if let Some(pb) = pb {
            pb.set_length(size);
            pb.set_message(format!("Uploading {}", path.display()));
        }

        let pb = pb.cloned();
        let stream = FramedRead::new(file, BytesCodec::new()).map(move |chunk| {
            chunk.map(|bytes| {
                if let Some(pb) = &pb {
                    pb.inc(bytes.len() as u64);
                }
                bytes.freeze()
            })
        });

        let response = self
            .http
            .put(url.clone())
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, size)
            .body(Body::wrap_stream(stream))
            .timeout(UPLOAD_TIMEOUT)
            .send()
            .await
            .map_err(UploadError::network)?;

        let status = response.status().as_u16();
        debug!("PUT {} -> {}", url, status);

        if status != 200 {
            return Err(UploadError::UploadFailed { status });
        }

        Ok(())
    }
}
