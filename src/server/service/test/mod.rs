use crate::server::config::Config;

mod affiliate_approval;
mod anonymize_run;
mod template_mailer;

/// Config for service tests: no webhooks configured, so email delivery fails
/// fast without touching the network.
fn test_config() -> Config {
    Config {
        database_url: String::new(),
        bind_addr: String::new(),
        app_url: "http://localhost:8080".to_string(),
        approval_webhook_url: None,
        rejection_webhook_url: None,
        community_invite_link: "https://t.me/test-community".to_string(),
        admin_email: None,
        admin_password: None,
    }
}
