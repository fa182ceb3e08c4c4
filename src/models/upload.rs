//! Represents a file moving through the upload pipeline.

use serde::Serialize;
use std::path::PathBuf;

/// An uploaded file that has been buffered to local disk.
///
/// The buffer at `temp_path` is owned by the request that created it and must
/// be discarded before the response is sent.
#[derive(Serialize, Clone, Debug)]
pub struct BufferedUpload {
    /// Original filename as sent by the client.
    pub original_name: String,

    /// Content type (MIME type).
    pub content_type: String,

    /// Size in bytes.
    pub size_bytes: u64,

    /// Location of the transient on-disk buffer.
    #[serde(skip)]
    pub temp_path: PathBuf,
}

/// An object that now lives in the remote bucket.
#[derive(Serialize, Clone, Debug)]
pub struct StoredObject {
    /// Key inside the bucket, e.g. `uploads/1718000000000.pdf`.
    pub key: String,

    /// Publicly accessible URL for the object.
    pub public_url: String,
}
