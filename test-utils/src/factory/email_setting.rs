//! Email setting factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts one mail setting row.
pub async fn set_setting(
    db: &DatabaseConnection,
    key: impl Into<String>,
    value: impl Into<String>,
    group: impl Into<String>,
) -> Result<entity::email_setting::Model, DbErr> {
    entity::email_setting::ActiveModel {
        key: ActiveValue::Set(key.into()),
        value: ActiveValue::Set(value.into()),
        group: ActiveValue::Set(group.into()),
        updated_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
