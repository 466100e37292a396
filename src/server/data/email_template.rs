//! Email template data repository.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::email::{
    CreateEmailTemplateParam, EmailTemplate, UpdateEmailTemplateParam,
};

/// Repository providing database operations for email templates.
pub struct EmailTemplateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmailTemplateRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a template.
    pub async fn create(&self, param: CreateEmailTemplateParam) -> Result<EmailTemplate, DbErr> {
        let now = Utc::now();
        let entity = entity::email_template::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            code: ActiveValue::Set(param.code),
            name: ActiveValue::Set(param.name),
            subject: ActiveValue::Set(param.subject),
            body: ActiveValue::Set(param.body),
            sender_name: ActiveValue::Set(param.sender_name),
            sender_email: ActiveValue::Set(param.sender_email),
            active: ActiveValue::Set(param.active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(EmailTemplate::from_entity(entity))
    }

    /// Finds a template by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EmailTemplate>, DbErr> {
        let entity = entity::prelude::EmailTemplate::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(EmailTemplate::from_entity))
    }

    /// Finds the active template with the given code.
    ///
    /// Inactive templates are invisible to the mailer; only the admin listing
    /// sees them.
    pub async fn find_active_by_code(&self, code: &str) -> Result<Option<EmailTemplate>, DbErr> {
        let entity = entity::prelude::EmailTemplate::find()
            .filter(entity::email_template::Column::Code.eq(code))
            .filter(entity::email_template::Column::Active.eq(true))
            .one(self.db)
            .await?;

        Ok(entity.map(EmailTemplate::from_entity))
    }

    /// Gets all templates ordered by name.
    pub async fn list_all(&self) -> Result<Vec<EmailTemplate>, DbErr> {
        let entities = entity::prelude::EmailTemplate::find()
            .order_by_asc(entity::email_template::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(EmailTemplate::from_entity).collect())
    }

    /// Applies a partial update to a template.
    ///
    /// # Returns
    /// - `Ok(Some(EmailTemplate))` - Updated template
    /// - `Ok(None)` - No template with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: Uuid,
        param: UpdateEmailTemplateParam,
    ) -> Result<Option<EmailTemplate>, DbErr> {
        let mut update = entity::prelude::EmailTemplate::update_many()
            .filter(entity::email_template::Column::Id.eq(id));

        if let Some(name) = param.name {
            update = update.col_expr(entity::email_template::Column::Name, Expr::value(name));
        }
        if let Some(subject) = param.subject {
            update = update.col_expr(
                entity::email_template::Column::Subject,
                Expr::value(subject),
            );
        }
        if let Some(body) = param.body {
            update = update.col_expr(entity::email_template::Column::Body, Expr::value(body));
        }
        if let Some(sender_name) = param.sender_name {
            update = update.col_expr(
                entity::email_template::Column::SenderName,
                Expr::value(sender_name),
            );
        }
        if let Some(sender_email) = param.sender_email {
            update = update.col_expr(
                entity::email_template::Column::SenderEmail,
                Expr::value(sender_email),
            );
        }
        if let Some(active) = param.active {
            update = update.col_expr(entity::email_template::Column::Active, Expr::value(active));
        }

        update
            .col_expr(
                entity::email_template::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        self.find_by_id(id).await
    }

    /// Deletes a template.
    ///
    /// # Returns
    /// - `Ok(true)` - Template deleted
    /// - `Ok(false)` - No template with that id
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::EmailTemplate::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
