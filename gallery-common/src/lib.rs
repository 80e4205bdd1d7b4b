//! # Gallery Common Library
//!
//! Shared code for the gallery content crates including:
//! - Error type
//! - Configuration loading (environment + TOML) and the CMS base URL
//! - Tracing subscriber setup
//! - Calendar date helpers used by the date-based filters

pub mod config;
pub mod error;
pub mod logging;
pub mod time;

pub use config::{BaseUrl, CmsConfig};
pub use error::{Error, Result};
