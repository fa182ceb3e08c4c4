pub mod intake_service;
pub mod qr_service;
pub mod storage_service;
