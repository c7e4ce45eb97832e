//! # ott-finder
//!
//! HTTP service over [`ott_search`]: ranked title search with year
//! filtering and pagination, plus OTT release announcement lookup.
//!
//! Configuration lives in [`config`]; the axum router in [`server`].

pub mod config;
pub mod error;
pub mod server;

pub use config::{ServerConfig, ServiceConfig};
pub use error::{ApiError, Result, ServiceError};
pub use server::{router, run, AppState};
