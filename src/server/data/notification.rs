//! Notification data repository.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::model::notification::{CreateNotificationParam, Notification};

/// Repository providing database operations for in-app notifications.
pub struct NotificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a notification.
    pub async fn insert(&self, param: CreateNotificationParam) -> Result<Notification, DbErr> {
        let entity = entity::notification::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            person_id: ActiveValue::Set(param.person_id),
            kind: ActiveValue::Set(param.kind.as_str().to_string()),
            title: ActiveValue::Set(param.title),
            message: ActiveValue::Set(param.message),
            data: ActiveValue::Set(param.data),
            read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(Notification::from_entity(entity))
    }

    /// Gets unread notifications, newest first.
    pub async fn list_unread(&self, limit: u64) -> Result<Vec<Notification>, DbErr> {
        let entities = entity::prelude::Notification::find()
            .filter(entity::notification::Column::Read.eq(false))
            .order_by_desc(entity::notification::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Notification::from_entity).collect())
    }

    /// Marks a notification as read.
    ///
    /// # Returns
    /// - `Ok(true)` - Notification updated
    /// - `Ok(false)` - No notification with that id
    pub async fn mark_read(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .filter(entity::notification::Column::Id.eq(id))
            .col_expr(entity::notification::Column::Read, Expr::value(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts unread notifications.
    pub async fn unread_count(&self) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::Read.eq(false))
            .count(self.db)
            .await
    }
}
