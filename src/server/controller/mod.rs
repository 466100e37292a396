//! HTTP request handlers.
//!
//! Controllers validate access through `AuthGuard`, convert DTOs to parameter
//! types, call the service layer and convert domain models back to DTOs.
//! No business logic lives here.

pub mod account;
pub mod admin;
pub mod affiliate;
pub mod auth;
pub mod dashboard;
pub mod email_admin;
pub mod invite_code;
pub mod notification;
pub mod person;
pub mod sponsor;

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Client metadata recorded in audit entries.
///
/// Prefers the first `x-forwarded-for` hop (the app usually sits behind a
/// proxy) and falls back to the socket peer address.
pub(crate) fn request_meta(
    headers: &HeaderMap,
    addr: &SocketAddr,
) -> (Option<String>, Option<String>) {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| addr.ip().to_string());

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    (Some(ip), user_agent)
}
