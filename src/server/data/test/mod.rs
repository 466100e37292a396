mod account;
mod affiliate;
mod audit_log;
mod email_setting;
mod email_template;
mod invite_code;
mod notification;
mod person;
