//! HTTP handlers for the landing page and the upload flow.
//!
//! `POST /upload` runs the whole pipeline in order: buffer the file, relay it
//! to storage, resolve its public URL, encode that URL as a QR image and
//! render the result. The buffer is discarded before the response goes out,
//! on success and on failure alike.

use crate::{
    errors::AppError,
    models::upload::{BufferedUpload, StoredObject},
    services::{intake_service::IntakeError, qr_service, storage_service::StorageService},
    state::AppState,
    views::pages,
};
use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    response::Html,
};

/// `GET /` — landing page with the upload form.
pub async fn index() -> Html<String> {
    Html(pages::landing_page())
}

/// `POST /upload` — accept one file and answer with a shareable link + QR code.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Html<String>, AppError> {
    let mut multipart =
        multipart.map_err(|rejection| IntakeError::Malformed(rejection.body_text()))?;

    let upload = state.intake.buffer_upload(&mut multipart).await?;
    let outcome = publish(&state.storage, &upload).await;
    state.intake.discard(&upload).await;

    let (stored, qr_data_url) = outcome?;
    Ok(Html(pages::success_page(
        &upload.original_name,
        &stored.public_url,
        &qr_data_url,
    )))
}

/// Store the buffered file and encode its public URL.
async fn publish(
    storage: &StorageService,
    upload: &BufferedUpload,
) -> Result<(StoredObject, String), AppError> {
    let stored = storage.upload(upload).await?;
    let qr_data_url = qr_service::qr_data_url(&stored.public_url)?;
    Ok((stored, qr_data_url))
}
