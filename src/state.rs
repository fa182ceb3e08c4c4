//! Shared, read-only state handed to every handler.

use crate::{
    config::AppConfig,
    services::{intake_service::IntakeService, storage_service::StorageService},
};
use reqwest::Client;

#[derive(Clone)]
pub struct AppState {
    pub intake: IntakeService,
    pub storage: StorageService,
}

impl AppState {
    pub fn new(intake: IntakeService, storage: StorageService) -> Self {
        Self { intake, storage }
    }

    /// Build state from resolved configuration and a shared HTTP client.
    pub fn from_config(cfg: &AppConfig, client: Client) -> Self {
        Self::new(
            IntakeService::new(cfg.temp_dir.clone(), cfg.max_upload_bytes),
            StorageService::new(
                client,
                cfg.supabase_url.clone(),
                cfg.supabase_key.clone(),
                cfg.bucket.clone(),
            ),
        )
    }
}
