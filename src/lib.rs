//! Developer documentation portal.
//!
//! Serves marketing pages, markdown documentation with per-language code
//! snippet tabs, legacy redirects, landing pages and a careers listing.

pub mod admin;
pub mod careers;
pub mod config;
pub mod content;
pub mod error;
pub mod feedback;
pub mod landing;
pub mod language;
pub mod pages;
pub mod redirects;
pub mod render;
pub mod retry;
pub mod router;
pub mod server;
