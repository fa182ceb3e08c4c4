//! Per-request data models for the upload pipeline.
//!
//! Nothing here is persisted; every value lives only as long as the request
//! that created it.

pub mod upload;
