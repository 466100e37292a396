use crate::server::{
    data::audit_log::AuditLogRepository,
    model::audit::{AuditAction, AuditEntry},
};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;
use uuid::Uuid;

mod insert_and_query;
