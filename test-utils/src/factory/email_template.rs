//! Email template factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Creates an active template with the given code and placeholder-bearing
/// subject and body.
pub async fn create_template(
    db: &DatabaseConnection,
    code: impl Into<String>,
) -> Result<entity::email_template::Model, DbErr> {
    let now = Utc::now();
    entity::email_template::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        code: ActiveValue::Set(code.into()),
        name: ActiveValue::Set(format!("Template {}", next_id())),
        subject: ActiveValue::Set("Welcome {{ name }}".to_string()),
        body: ActiveValue::Set(
            "Hello {{ name }}, your invite code is {{ code }}.".to_string(),
        ),
        sender_name: ActiveValue::Set(None),
        sender_email: ActiveValue::Set(None),
        active: ActiveValue::Set(true),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}
