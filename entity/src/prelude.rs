pub use super::account::Entity as Account;
pub use super::account_role::Entity as AccountRole;
pub use super::affiliate::Entity as Affiliate;
pub use super::audit_log::Entity as AuditLog;
pub use super::email_log::Entity as EmailLog;
pub use super::email_setting::Entity as EmailSetting;
pub use super::email_template::Entity as EmailTemplate;
pub use super::invite_code::Entity as InviteCode;
pub use super::notification::Entity as Notification;
pub use super::person::Entity as Person;
