//! src/services/storage_service.rs
//!
//! StorageService — relays buffered uploads to a Supabase Storage bucket over
//! its REST API and derives the public URL of stored objects. Objects are
//! written once (`x-upsert: false`); nothing is retried.

use crate::models::upload::{BufferedUpload, StoredObject};
use chrono::{DateTime, Utc};
use reqwest::{Body, Client, StatusCode, header};
use serde::Deserialize;
use std::{io, path::Path};
use thiserror::Error;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

/// Folder inside the bucket that receives every upload.
const UPLOAD_PREFIX: &str = "uploads";
/// Extensions longer than this are dropped from generated keys.
const MAX_EXTENSION_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("storage request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Error body returned by the Supabase Storage API.
#[derive(Debug, Deserialize)]
struct StorageErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// StorageService provides the two storage operations the upload flow needs:
/// - Upload an object (streams the buffer file to the bucket)
/// - Resolve the public URL of an object (pure string construction)
#[derive(Clone)]
pub struct StorageService {
    /// Shared HTTP client; cheap to clone.
    pub client: Client,

    /// Project base URL without trailing slash, e.g. `https://xyz.supabase.co`.
    pub base_url: String,

    /// Service key sent as both bearer token and `apikey`.
    api_key: String,

    /// Bucket receiving uploads.
    pub bucket: String,
}

impl StorageService {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            bucket: bucket.into(),
        }
    }

    /// Build the storage key for an upload made at `now`.
    ///
    /// Keys look like `uploads/<unix-millis><.ext>`. The extension is kept
    /// only when it is short ASCII alphanumeric, so the key is always safe to
    /// drop into a URL path unescaped.
    pub fn object_key(original_name: &str, now: DateTime<Utc>) -> String {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| {
                !ext.is_empty()
                    && ext.len() <= MAX_EXTENSION_LEN
                    && ext.bytes().all(|b| b.is_ascii_alphanumeric())
            })
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();

        format!("{}/{}{}", UPLOAD_PREFIX, now.timestamp_millis(), extension)
    }

    /// Authenticated endpoint for writing `key`.
    fn object_endpoint(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key)
    }

    /// Public URL of `key`. Deterministic; no request is made.
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, key
        )
    }

    /// Stream a buffered upload into the bucket under a freshly generated key.
    ///
    /// Any non-success status from the API fails the upload; the API's error
    /// message is carried in `StorageError::Rejected`.
    pub async fn upload(&self, upload: &BufferedUpload) -> StorageResult<StoredObject> {
        let key = Self::object_key(&upload.original_name, Utc::now());
        self.put_object(&key, &upload.content_type, &upload.temp_path, upload.size_bytes)
            .await?;

        let public_url = self.public_url(&key);
        info!(
            filename = %upload.original_name,
            key = %key,
            size_bytes = upload.size_bytes,
            "stored upload"
        );

        Ok(StoredObject { key, public_url })
    }

    /// Send the bytes at `path` to `key`.
    async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        path: &Path,
        size_bytes: u64,
    ) -> StorageResult<()> {
        let file = File::open(path).await?;
        let body = Body::wrap_stream(ReaderStream::new(file));

        debug!(key, content_type, size_bytes, "relaying upload to storage");
        let response = self
            .client
            .post(self.object_endpoint(key))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, size_bytes)
            .header("x-upsert", "false")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(StorageError::Rejected {
            status: status.as_u16(),
            message: rejection_message(status, &text),
        })
    }
}

/// Pull a readable message out of an error response body.
fn rejection_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<StorageErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message.or(parsed.error))
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        })
}
