//! Affiliate data repository for database operations.
//!
//! This module provides the `AffiliateRepository` for managing referral
//! applications. The status-changing updates are guarded: the expected current
//! status is part of the UPDATE's WHERE clause so a concurrent transition is
//! detected as zero affected rows rather than silently overwritten.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::model::affiliate::{Affiliate, AffiliateStatus, CreateAffiliateParam};

/// Repository providing database operations for affiliate management.
pub struct AffiliateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AffiliateRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new pending affiliate application.
    ///
    /// # Arguments
    /// - `param` - Applicant contact data and the sponsoring person's id
    ///
    /// # Returns
    /// - `Ok(Affiliate)` - The created application in PENDING status
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateAffiliateParam) -> Result<Affiliate, DbErr> {
        let entity = entity::affiliate::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(param.name),
            email: ActiveValue::Set(param.email),
            sponsor_id: ActiveValue::Set(param.sponsor_id),
            person_id: ActiveValue::Set(None),
            status: ActiveValue::Set(AffiliateStatus::Pending.as_str().to_string()),
            registered_at: ActiveValue::Set(Utc::now()),
            approved_at: ActiveValue::Set(None),
            email_sent: ActiveValue::Set(false),
            email_sent_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Affiliate::from_entity(entity)
    }

    /// Finds an affiliate by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Affiliate>, DbErr> {
        let entity = entity::prelude::Affiliate::find_by_id(id).one(self.db).await?;

        entity.map(Affiliate::from_entity).transpose()
    }

    /// Gets affiliates with pagination, optionally filtered by status.
    ///
    /// Results are ordered by registration date, newest first.
    ///
    /// # Arguments
    /// - `status` - Optional status filter
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of affiliates per page
    ///
    /// # Returns
    /// - `Ok((affiliates, total))` - Page of affiliates and total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_all_paginated(
        &self,
        status: Option<AffiliateStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Affiliate>, u64), DbErr> {
        let mut query = entity::prelude::Affiliate::find()
            .order_by_desc(entity::affiliate::Column::RegisteredAt);

        if let Some(status) = status {
            query = query.filter(entity::affiliate::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;
        let affiliates = entities
            .into_iter()
            .map(Affiliate::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((affiliates, total))
    }

    /// Marks a pending affiliate as sent.
    ///
    /// The update is guarded by `status = PENDING` in the WHERE clause, so a
    /// concurrent approval or rejection makes this a no-op.
    ///
    /// # Arguments
    /// - `id` - Affiliate id
    /// - `now` - Timestamp recorded as approval and email-sent time
    ///
    /// # Returns
    /// - `Ok(true)` - Affiliate transitioned to SENT
    /// - `Ok(false)` - Affiliate was no longer PENDING
    /// - `Err(DbErr)` - Database error during update
    pub async fn mark_sent(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = entity::prelude::Affiliate::update_many()
            .filter(entity::affiliate::Column::Id.eq(id))
            .filter(entity::affiliate::Column::Status.eq(AffiliateStatus::Pending.as_str()))
            .col_expr(
                entity::affiliate::Column::Status,
                Expr::value(AffiliateStatus::Sent.as_str()),
            )
            .col_expr(entity::affiliate::Column::EmailSent, Expr::value(true))
            .col_expr(entity::affiliate::Column::EmailSentAt, Expr::value(now))
            .col_expr(entity::affiliate::Column::ApprovedAt, Expr::value(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Transitions a pending affiliate to the given status.
    ///
    /// Guarded by `status = PENDING` like `mark_sent`. Used for rejection and
    /// for the worker's ALREADY_MEMBER detection.
    ///
    /// # Returns
    /// - `Ok(true)` - Status updated
    /// - `Ok(false)` - Affiliate was no longer PENDING
    /// - `Err(DbErr)` - Database error during update
    pub async fn transition_from_pending(
        &self,
        id: Uuid,
        to: AffiliateStatus,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Affiliate::update_many()
            .filter(entity::affiliate::Column::Id.eq(id))
            .filter(entity::affiliate::Column::Status.eq(AffiliateStatus::Pending.as_str()))
            .col_expr(
                entity::affiliate::Column::Status,
                Expr::value(to.as_str()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Links an affiliate to the person record created for them.
    pub async fn set_person(&self, id: Uuid, person_id: Uuid) -> Result<(), DbErr> {
        entity::prelude::Affiliate::update_many()
            .filter(entity::affiliate::Column::Id.eq(id))
            .col_expr(
                entity::affiliate::Column::PersonId,
                Expr::value(Some(person_id)),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Gets the most recently registered affiliates.
    pub async fn latest(&self, limit: u64) -> Result<Vec<Affiliate>, DbErr> {
        let entities = entity::prelude::Affiliate::find()
            .order_by_desc(entity::affiliate::Column::RegisteredAt)
            .limit(limit)
            .all(self.db)
            .await?;

        entities.into_iter().map(Affiliate::from_entity).collect()
    }

    /// Gets all affiliates referred by one sponsor, newest first.
    pub async fn list_by_sponsor(&self, sponsor_id: Uuid) -> Result<Vec<Affiliate>, DbErr> {
        let entities = entity::prelude::Affiliate::find()
            .filter(entity::affiliate::Column::SponsorId.eq(sponsor_id))
            .order_by_desc(entity::affiliate::Column::RegisteredAt)
            .all(self.db)
            .await?;

        entities.into_iter().map(Affiliate::from_entity).collect()
    }

    /// Gets the oldest pending affiliates, for the automated worker.
    ///
    /// Oldest first so applications are processed in arrival order.
    pub async fn oldest_pending(&self, limit: u64) -> Result<Vec<Affiliate>, DbErr> {
        let entities = entity::prelude::Affiliate::find()
            .filter(entity::affiliate::Column::Status.eq(AffiliateStatus::Pending.as_str()))
            .order_by_asc(entity::affiliate::Column::RegisteredAt)
            .limit(limit)
            .all(self.db)
            .await?;

        entities.into_iter().map(Affiliate::from_entity).collect()
    }

    /// Counts affiliates grouped by status.
    ///
    /// # Returns
    /// - `Ok(Vec<(status, count)>)` - One entry per status present in the table
    /// - `Err(DbErr)` - Database error during aggregation
    pub async fn count_by_status(&self) -> Result<Vec<(String, i64)>, DbErr> {
        entity::prelude::Affiliate::find()
            .select_only()
            .column(entity::affiliate::Column::Status)
            .column_as(entity::affiliate::Column::Id.count(), "count")
            .group_by(entity::affiliate::Column::Status)
            .into_tuple::<(String, i64)>()
            .all(self.db)
            .await
    }

    /// Gets every registration timestamp, for per-day aggregation.
    pub async fn registration_dates(&self) -> Result<Vec<DateTime<Utc>>, DbErr> {
        entity::prelude::Affiliate::find()
            .select_only()
            .column(entity::affiliate::Column::RegisteredAt)
            .into_tuple::<DateTime<Utc>>()
            .all(self.db)
            .await
    }

    /// Gets every (sponsor_id, status) pair, for per-sponsor aggregation.
    pub async fn sponsor_status_pairs(&self) -> Result<Vec<(Uuid, String)>, DbErr> {
        entity::prelude::Affiliate::find()
            .select_only()
            .column(entity::affiliate::Column::SponsorId)
            .column(entity::affiliate::Column::Status)
            .into_tuple::<(Uuid, String)>()
            .all(self.db)
            .await
    }

    /// Gets the person ids of affiliates that became members.
    pub async fn member_person_ids(&self) -> Result<Vec<Uuid>, DbErr> {
        entity::prelude::Affiliate::find()
            .select_only()
            .column(entity::affiliate::Column::PersonId)
            .filter(entity::affiliate::Column::PersonId.is_not_null())
            .into_tuple::<Uuid>()
            .all(self.db)
            .await
    }
}
