//! Shared library for the SIEM Plus console.
//!
//! Wire models, error taxonomy, configuration, session state and the
//! authenticated manager API client used by siemctl.

pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod session;

pub use cache::ResponseCache;
pub use client::{AlertFilter, ApiClient};
pub use config::Config;
pub use errors::ApiError;
pub use session::SessionStore;
