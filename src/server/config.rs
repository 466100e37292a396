use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_COMMUNITY_INVITE_LINK: &str = "https://t.me/community";

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub app_url: String,

    /// Webhook endpoint notified when an affiliate is approved. Optional;
    /// approvals still succeed without it (logged as a warning).
    pub approval_webhook_url: Option<String>,
    /// Webhook endpoint notified when an affiliate is rejected. Optional.
    pub rejection_webhook_url: Option<String>,

    /// Link to the community group included in approval emails.
    pub community_invite_link: String,

    /// Credentials for the bootstrap admin account created on first startup
    /// when no account exists yet.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(DEFAULT_BIND_ADDR.to_string()),
            app_url: std::env::var("APP_URL")
                .map_err(|_| ConfigError::MissingEnvVar("APP_URL".to_string()))?,
            approval_webhook_url: std::env::var("APPROVAL_WEBHOOK_URL").ok(),
            rejection_webhook_url: std::env::var("REJECTION_WEBHOOK_URL").ok(),
            community_invite_link: std::env::var("COMMUNITY_INVITE_LINK")
                .unwrap_or(DEFAULT_COMMUNITY_INVITE_LINK.to_string()),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        })
    }
}
