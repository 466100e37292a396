//! SeaORM entity models for the referralboard database schema.

pub mod prelude;

pub mod account;
pub mod account_role;
pub mod affiliate;
pub mod audit_log;
pub mod email_log;
pub mod email_setting;
pub mod email_template;
pub mod invite_code;
pub mod notification;
pub mod person;
