//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::config::Config;

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `reqwest::Client` uses an `Arc` internally
/// - `Arc<Config>` is a reference-counted pointer
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for webhook notifications.
    ///
    /// Configured with security settings (no redirects) to prevent SSRF
    /// vulnerabilities.
    pub http_client: reqwest::Client,

    /// Environment-derived application configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// Called once during server startup after all dependencies have been
    /// initialized. The resulting state is then provided to the Axum router
    /// for use in request handlers.
    pub fn new(db: DatabaseConnection, http_client: reqwest::Client, config: Arc<Config>) -> Self {
        Self {
            db,
            http_client,
            config,
        }
    }
}
