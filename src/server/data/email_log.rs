//! Email delivery log data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::server::model::email::{CreateEmailLogParam, EmailLogStatus};

/// Repository providing database operations for the email delivery log.
pub struct EmailLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmailLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a delivery log row and returns its id.
    pub async fn insert(&self, param: CreateEmailLogParam) -> Result<Uuid, DbErr> {
        let id = Uuid::new_v4();
        let sent_at = match param.status {
            EmailLogStatus::Sent => Some(Utc::now()),
            _ => None,
        };

        entity::email_log::ActiveModel {
            id: ActiveValue::Set(id),
            template_code: ActiveValue::Set(param.template_code),
            recipient_email: ActiveValue::Set(param.recipient_email),
            recipient_name: ActiveValue::Set(param.recipient_name),
            subject: ActiveValue::Set(param.subject),
            body: ActiveValue::Set(param.body),
            variables: ActiveValue::Set(param.variables),
            status: ActiveValue::Set(param.status.as_str().to_string()),
            error: ActiveValue::Set(param.error),
            affiliate_id: ActiveValue::Set(param.affiliate_id),
            attempts: ActiveValue::Set(param.attempts),
            sent_at: ActiveValue::Set(sent_at),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(id)
    }

    /// Marks a pending row as sent.
    pub async fn mark_sent(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), DbErr> {
        entity::prelude::EmailLog::update_many()
            .filter(entity::email_log::Column::Id.eq(id))
            .col_expr(
                entity::email_log::Column::Status,
                Expr::value(EmailLogStatus::Sent.as_str()),
            )
            .col_expr(entity::email_log::Column::SentAt, Expr::value(now))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Marks a pending row as failed and records the error.
    pub async fn mark_failed(&self, id: Uuid, error: &str) -> Result<(), DbErr> {
        entity::prelude::EmailLog::update_many()
            .filter(entity::email_log::Column::Id.eq(id))
            .col_expr(
                entity::email_log::Column::Status,
                Expr::value(EmailLogStatus::Failed.as_str()),
            )
            .col_expr(entity::email_log::Column::Error, Expr::value(error))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
