//! Audit log data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::model::audit::{AuditEntry, AuditLog};

/// Repository providing database operations for the audit trail.
pub struct AuditLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuditLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an audit row.
    pub async fn insert(&self, entry: AuditEntry) -> Result<AuditLog, DbErr> {
        let entity = entity::audit_log::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            action: ActiveValue::Set(entry.action.as_str().to_string()),
            account_id: ActiveValue::Set(entry.account_id),
            entity_type: ActiveValue::Set(entry.entity_type),
            entity_id: ActiveValue::Set(entry.entity_id),
            details: ActiveValue::Set(entry.details),
            ip_address: ActiveValue::Set(entry.ip_address),
            user_agent: ActiveValue::Set(entry.user_agent),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(AuditLog::from_entity(entity))
    }

    /// Gets audit rows for one entity, newest first.
    pub async fn get_by_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
        limit: u64,
    ) -> Result<Vec<AuditLog>, DbErr> {
        let entities = entity::prelude::AuditLog::find()
            .filter(entity::audit_log::Column::EntityType.eq(entity_type))
            .filter(entity::audit_log::Column::EntityId.eq(entity_id))
            .order_by_desc(entity::audit_log::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(AuditLog::from_entity).collect())
    }

    /// Gets the most recent audit rows.
    pub async fn get_recent(&self, limit: u64) -> Result<Vec<AuditLog>, DbErr> {
        let entities = entity::prelude::AuditLog::find()
            .order_by_desc(entity::audit_log::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(AuditLog::from_entity).collect())
    }
}
