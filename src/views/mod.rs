//! Server-rendered HTML pages.

pub mod layout;
pub mod pages;
