//! Invite code data repository for database operations.
//!
//! This module provides the `InviteCodeRepository` for managing the single-use
//! code pool. Assignment is a conditional UPDATE guarded by `used = false`;
//! a concurrent assignment of the same row shows up as zero affected rows.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::model::invite_code::InviteCode;

/// Repository providing database operations for the invite code pool.
pub struct InviteCodeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InviteCodeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a batch of freshly generated codes.
    ///
    /// # Arguments
    /// - `codes` - Code strings to insert; all start unused
    ///
    /// # Returns
    /// - `Ok(())` - All codes inserted
    /// - `Err(DbErr)` - Database error (e.g. uniqueness violation)
    pub async fn insert_batch(&self, codes: &[String]) -> Result<(), DbErr> {
        if codes.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let models = codes.iter().map(|code| entity::invite_code::ActiveModel {
            id: sea_orm::ActiveValue::Set(Uuid::new_v4()),
            code: sea_orm::ActiveValue::Set(code.clone()),
            email: sea_orm::ActiveValue::Set(None),
            used: sea_orm::ActiveValue::Set(false),
            assigned_at: sea_orm::ActiveValue::Set(None),
            created_at: sea_orm::ActiveValue::Set(now),
        });

        entity::prelude::InviteCode::insert_many(models)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Checks whether a code string already exists.
    pub async fn code_exists(&self, code: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::InviteCode::find()
            .filter(entity::invite_code::Column::Code.eq(code))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Counts unused codes remaining in the pool.
    pub async fn count_available(&self) -> Result<u64, DbErr> {
        entity::prelude::InviteCode::find()
            .filter(entity::invite_code::Column::Used.eq(false))
            .count(self.db)
            .await
    }

    /// Counts all codes.
    pub async fn count_all(&self) -> Result<u64, DbErr> {
        entity::prelude::InviteCode::find().count(self.db).await
    }

    /// Picks the oldest unused, unassigned code.
    ///
    /// Oldest-first keeps the pool draining in generation order.
    pub async fn find_first_available(&self) -> Result<Option<InviteCode>, DbErr> {
        let entity = entity::prelude::InviteCode::find()
            .filter(entity::invite_code::Column::Used.eq(false))
            .filter(entity::invite_code::Column::Email.is_null())
            .order_by_asc(entity::invite_code::Column::CreatedAt)
            .one(self.db)
            .await?;

        Ok(entity.map(InviteCode::from_entity))
    }

    /// Conditionally assigns a code to an email.
    ///
    /// The WHERE clause re-checks `used = false`, so losing a race against a
    /// concurrent assignment yields `Ok(false)` instead of double-assigning.
    ///
    /// # Arguments
    /// - `id` - Code id selected by `find_first_available`
    /// - `email` - Recipient the code is assigned to
    /// - `now` - Assignment timestamp
    ///
    /// # Returns
    /// - `Ok(true)` - Code assigned
    /// - `Ok(false)` - Code was claimed concurrently
    /// - `Err(DbErr)` - Database error during update
    pub async fn assign(
        &self,
        id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::InviteCode::update_many()
            .filter(entity::invite_code::Column::Id.eq(id))
            .filter(entity::invite_code::Column::Used.eq(false))
            .col_expr(entity::invite_code::Column::Email, Expr::value(email))
            .col_expr(entity::invite_code::Column::Used, Expr::value(true))
            .col_expr(entity::invite_code::Column::AssignedAt, Expr::value(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Releases a code back to the pool.
    ///
    /// Used to roll back an assignment when a later step of the approval
    /// workflow fails.
    pub async fn release(&self, id: Uuid) -> Result<(), DbErr> {
        entity::prelude::InviteCode::update_many()
            .filter(entity::invite_code::Column::Id.eq(id))
            .col_expr(
                entity::invite_code::Column::Email,
                Expr::value(None::<String>),
            )
            .col_expr(entity::invite_code::Column::Used, Expr::value(false))
            .col_expr(
                entity::invite_code::Column::AssignedAt,
                Expr::value(None::<DateTime<Utc>>),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Finds a code by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<InviteCode>, DbErr> {
        let entity = entity::prelude::InviteCode::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(InviteCode::from_entity))
    }

    /// Finds the code assigned to an email, if any.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<InviteCode>, DbErr> {
        let entity = entity::prelude::InviteCode::find()
            .filter(entity::invite_code::Column::Email.eq(email))
            .filter(entity::invite_code::Column::Used.eq(true))
            .one(self.db)
            .await?;

        Ok(entity.map(InviteCode::from_entity))
    }

    /// Gets all codes with pagination, newest first.
    ///
    /// # Returns
    /// - `Ok((codes, total))` - Page of codes and total code count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<InviteCode>, u64), DbErr> {
        let paginator = entity::prelude::InviteCode::find()
            .order_by_desc(entity::invite_code::Column::CreatedAt)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;
        let codes = entities.into_iter().map(InviteCode::from_entity).collect();

        Ok((codes, total))
    }

    /// Gets every assignment timestamp, for per-day aggregation.
    pub async fn assigned_dates(&self) -> Result<Vec<DateTime<Utc>>, DbErr> {
        entity::prelude::InviteCode::find()
            .select_only()
            .column(entity::invite_code::Column::AssignedAt)
            .filter(entity::invite_code::Column::AssignedAt.is_not_null())
            .into_tuple::<DateTime<Utc>>()
            .all(self.db)
            .await
    }
}
