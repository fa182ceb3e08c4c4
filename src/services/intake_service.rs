//! src/services/intake_service.rs
//!
//! IntakeService — pulls the single `file` field out of a multipart body and
//! buffers it to a uniquely named file beneath `temp_dir`. The buffer belongs
//! to the request; callers hand it back through `discard` once they are done,
//! whatever the outcome.

use crate::models::upload::BufferedUpload;
use axum::{
    extract::{Multipart, multipart::Field},
    http::StatusCode,
};
use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};
use tracing::{debug, warn};
use uuid::Uuid;

/// Name of the multipart field that carries the upload.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("no file was provided in the `file` field")]
    MissingFile,
    #[error("request is not a valid multipart upload: {0}")]
    Malformed(String),
    #[error("file exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },
    #[error("failed to read multipart body: {message}")]
    Multipart { status: StatusCode, message: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<axum::extract::multipart::MultipartError> for IntakeError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        IntakeError::Multipart {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

pub type IntakeResult<T> = Result<T, IntakeError>;

#[derive(Clone, Debug)]
pub struct IntakeService {
    /// Directory holding in-flight upload buffers.
    pub temp_dir: PathBuf,

    /// Largest file accepted, in bytes.
    pub max_upload_bytes: u64,
}

impl IntakeService {
    pub fn new(temp_dir: impl Into<PathBuf>, max_upload_bytes: u64) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            max_upload_bytes,
        }
    }

    /// Create the buffer directory if it does not exist yet.
    pub async fn ensure_temp_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.temp_dir).await
    }

    /// Stream the first `file` field into a temp file.
    ///
    /// Fields with other names are skipped. A `file` field without a filename
    /// is what browsers send when nothing was selected, so it counts as
    /// missing. On any error the partial buffer is removed before returning.
    pub async fn buffer_upload(&self, multipart: &mut Multipart) -> IntakeResult<BufferedUpload> {
        while let Some(mut field) = multipart.next_field().await? {
            if field.name() != Some(FILE_FIELD) {
                debug!("skipping multipart field {:?}", field.name());
                continue;
            }

            let original_name = match field.file_name() {
                Some(name) if !name.trim().is_empty() => name.to_string(),
                _ => return Err(IntakeError::MissingFile),
            };
            let content_type = resolve_content_type(field.content_type(), &original_name);

            self.ensure_temp_dir().await?;
            let temp_path = self.temp_dir.join(format!(".upload-{}", Uuid::new_v4()));
            let mut file = File::create(&temp_path).await?;

            let size_bytes = match self.write_field(&mut field, &mut file).await {
                Ok(size) => size,
                Err(err) => {
                    drop(file);
                    let _ = fs::remove_file(&temp_path).await;
                    return Err(err);
                }
            };

            debug!(
                filename = %original_name,
                size_bytes,
                path = %temp_path.display(),
                "buffered upload"
            );

            return Ok(BufferedUpload {
                original_name,
                content_type,
                size_bytes,
                temp_path,
            });
        }

        Err(IntakeError::MissingFile)
    }

    /// Copy a field's chunks into `file`, failing fast once the limit is passed.
    async fn write_field(&self, field: &mut Field<'_>, file: &mut File) -> IntakeResult<u64> {
        let mut size_bytes: u64 = 0;
        while let Some(chunk) = field.chunk().await? {
            size_bytes += chunk.len() as u64;
            if size_bytes > self.max_upload_bytes {
                return Err(IntakeError::TooLarge {
                    limit: self.max_upload_bytes,
                });
            }
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        Ok(size_bytes)
    }

    /// Remove an upload buffer. Missing files are fine; other failures are
    /// logged and swallowed since the response is already decided.
    pub async fn discard(&self, upload: &BufferedUpload) {
        remove_buffer(&upload.temp_path).await;
    }
}

async fn remove_buffer(path: &Path) {
    match fs::remove_file(path).await {
        Ok(_) => debug!("removed upload buffer {}", path.display()),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("upload buffer {} already missing", path.display());
        }
        Err(err) => warn!("failed to remove upload buffer {}: {}", path.display(), err),
    }
}

/// Pick the MIME type for an upload.
///
/// Prefers what the client declared; falls back to a guess from the filename
/// extension, then to `application/octet-stream`.
pub fn resolve_content_type(declared: Option<&str>, filename: &str) -> String {
    match declared.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => mime_guess::from_path(filename)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::FromRequest,
        http::{Request, header},
    };

    const BOUNDARY: &str = "quickav-test-boundary";

    fn multipart_request(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, filename, content) in parts {
            body.push_str(&format!("--{}\r\n", BOUNDARY));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\r\n",
                    name, filename
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn multipart_of(parts: &[(&str, Option<&str>, &str)]) -> Multipart {
        Multipart::from_request(multipart_request(parts), &())
            .await
            .unwrap()
    }

    fn dir_is_empty(path: &Path) -> bool {
        std::fs::read_dir(path).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn buffers_the_file_field_and_skips_others() {
        let dir = tempfile::tempdir().unwrap();
        let service = IntakeService::new(dir.path(), 1024);
        let mut multipart = multipart_of(&[
            ("note", None, "ignored"),
            ("file", Some("report.txt"), "hello world"),
        ])
        .await;

        let upload = service.buffer_upload(&mut multipart).await.unwrap();
        assert_eq!(upload.original_name, "report.txt");
        assert_eq!(upload.content_type, "text/plain");
        assert_eq!(upload.size_bytes, 11);
        assert_eq!(std::fs::read(&upload.temp_path).unwrap(), b"hello world");

        service.discard(&upload).await;
        assert!(!upload.temp_path.exists());
        // a second discard is a no-op
        service.discard(&upload).await;
    }

    #[tokio::test]
    async fn missing_file_field_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let service = IntakeService::new(dir.path(), 1024);
        let mut multipart = multipart_of(&[("note", None, "no file here")]).await;

        let err = service.buffer_upload(&mut multipart).await.unwrap_err();
        assert!(matches!(err, IntakeError::MissingFile));
    }

    #[tokio::test]
    async fn empty_filename_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let service = IntakeService::new(dir.path(), 1024);
        let mut multipart = multipart_of(&[("file", Some(""), "")]).await;

        let err = service.buffer_upload(&mut multipart).await.unwrap_err();
        assert!(matches!(err, IntakeError::MissingFile));
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn oversize_file_leaves_no_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let service = IntakeService::new(dir.path(), 4);
        let mut multipart = multipart_of(&[("file", Some("big.bin"), "0123456789")]).await;

        let err = service.buffer_upload(&mut multipart).await.unwrap_err();
        assert!(matches!(err, IntakeError::TooLarge { limit: 4 }));
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn creates_temp_dir_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("temp");
        let service = IntakeService::new(&nested, 1024);
        let mut multipart = multipart_of(&[("file", Some("a.txt"), "a")]).await;

        let upload = service.buffer_upload(&mut multipart).await.unwrap();
        assert!(upload.temp_path.starts_with(&nested));
        service.discard(&upload).await;
    }

    #[test]
    fn content_type_prefers_declared_value() {
        assert_eq!(
            resolve_content_type(Some("image/webp"), "photo.png"),
            "image/webp"
        );
        assert_eq!(resolve_content_type(None, "photo.png"), "image/png");
        assert_eq!(
            resolve_content_type(Some("  "), "archive.unknownext"),
            "application/octet-stream"
        );
    }
}
