pub use sea_orm_migration::prelude::*;

mod m20260210_000001_create_person_table;
mod m20260210_000002_create_affiliate_table;
mod m20260210_000003_create_invite_code_table;
mod m20260210_000004_create_account_table;
mod m20260210_000005_create_account_role_table;
mod m20260211_000006_create_audit_log_table;
mod m20260211_000007_create_email_template_table;
mod m20260211_000008_create_email_setting_table;
mod m20260211_000009_create_email_log_table;
mod m20260211_000010_create_notification_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260210_000001_create_person_table::Migration),
            Box::new(m20260210_000002_create_affiliate_table::Migration),
            Box::new(m20260210_000003_create_invite_code_table::Migration),
            Box::new(m20260210_000004_create_account_table::Migration),
            Box::new(m20260210_000005_create_account_role_table::Migration),
            Box::new(m20260211_000006_create_audit_log_table::Migration),
            Box::new(m20260211_000007_create_email_template_table::Migration),
            Box::new(m20260211_000008_create_email_setting_table::Migration),
            Box::new(m20260211_000009_create_email_log_table::Migration),
            Box::new(m20260211_000010_create_notification_table::Migration),
        ]
    }
}
