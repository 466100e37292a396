//! Audit trail service.
//!
//! Records privileged actions for traceability. Audit writes are strictly
//! best-effort: a failed insert is logged and swallowed so it can never abort
//! the operation being audited.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::audit_log::AuditLogRepository,
    error::AppError,
    model::audit::{AuditEntry, AuditLog},
};

/// Service providing audit trail operations.
pub struct AuditService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuditService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an audit entry.
    ///
    /// Never fails: insert errors are logged server-side and discarded, so
    /// callers do not need to handle a `Result`.
    pub async fn log(&self, entry: AuditEntry) {
        let action = entry.action.as_str();
        let entity = format!("{}:{}", entry.entity_type, entry.entity_id);

        let repo = AuditLogRepository::new(self.db);
        match repo.insert(entry).await {
            Ok(_) => {
                tracing::info!(action, entity, "audit log created");
            }
            Err(err) => {
                tracing::error!(action, entity, error = %err, "failed to save audit log");
            }
        }
    }

    /// Gets audit rows for one entity, newest first.
    pub async fn get_by_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
        limit: u64,
    ) -> Result<Vec<AuditLog>, AppError> {
        let repo = AuditLogRepository::new(self.db);
        let logs = repo.get_by_entity(entity_type, entity_id, limit).await?;
        Ok(logs)
    }

    /// Gets the most recent audit rows.
    pub async fn get_recent(&self, limit: u64) -> Result<Vec<AuditLog>, AppError> {
        let repo = AuditLogRepository::new(self.db);
        let logs = repo.get_recent(limit).await?;
        Ok(logs)
    }
}
