//! Person data repository for database operations.
//!
//! This module provides the `PersonRepository` for managing community member
//! records, including the sponsor-specific queries (quota updates, ranking)
//! and the batched identity rewrites used by anonymization.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::model::person::{Person, UpdatePersonParam, UpdateQuotaParam};

/// Repository providing database operations for people and sponsors.
pub struct PersonRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PersonRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a person by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>, DbErr> {
        let entity = entity::prelude::Person::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Person::from_entity))
    }

    /// Finds a person by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Person>, DbErr> {
        let entity = entity::prelude::Person::find()
            .filter(entity::person::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(Person::from_entity))
    }

    /// Searches people by name, email or document substring.
    ///
    /// Results are ordered by most recent payment first, matching the
    /// original admin listing. A `None` search term returns everyone up to
    /// the limit.
    ///
    /// # Arguments
    /// - `search` - Optional substring matched against name, email and cpf
    /// - `limit` - Maximum number of rows returned
    pub async fn search(&self, search: Option<&str>, limit: u64) -> Result<Vec<Person>, DbErr> {
        let mut query = entity::prelude::Person::find()
            .order_by_desc(entity::person::Column::LastPaymentAt)
            .limit(limit);

        if let Some(term) = search {
            query = query.filter(
                Condition::any()
                    .add(entity::person::Column::Name.contains(term))
                    .add(entity::person::Column::Email.contains(term))
                    .add(entity::person::Column::Cpf.contains(term)),
            );
        }

        let entities = query.all(self.db).await?;

        Ok(entities.into_iter().map(Person::from_entity).collect())
    }

    /// Applies a partial update to a person record.
    ///
    /// # Returns
    /// - `Ok(Some(Person))` - Updated person
    /// - `Ok(None)` - No person with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: Uuid,
        param: UpdatePersonParam,
    ) -> Result<Option<Person>, DbErr> {
        let mut update = entity::prelude::Person::update_many()
            .filter(entity::person::Column::Id.eq(id));

        if let Some(name) = param.name {
            update = update.col_expr(entity::person::Column::Name, Expr::value(name));
        }
        if let Some(email) = param.email {
            update = update.col_expr(entity::person::Column::Email, Expr::value(email));
        }
        if let Some(cpf) = param.cpf {
            update = update.col_expr(entity::person::Column::Cpf, Expr::value(cpf));
        }
        if let Some(city) = param.city {
            update = update.col_expr(entity::person::Column::City, Expr::value(city));
        }
        if let Some(state) = param.state {
            update = update.col_expr(entity::person::Column::State, Expr::value(state));
        }
        if let Some(niche) = param.niche {
            update = update.col_expr(entity::person::Column::Niche, Expr::value(niche));
        }
        if let Some(phone) = param.phone {
            update = update.col_expr(entity::person::Column::Phone, Expr::value(phone));
        }
        if let Some(active) = param.active {
            update = update.col_expr(entity::person::Column::Active, Expr::value(active));
        }

        update.exec(self.db).await?;

        self.find_by_id(id).await
    }

    /// Gets people acting as sponsors: anyone whose quota counters are
    /// nonzero, newest first.
    pub async fn list_sponsors(&self, limit: u64) -> Result<Vec<Person>, DbErr> {
        let entities = entity::prelude::Person::find()
            .filter(
                Condition::any()
                    .add(entity::person::Column::InvitesSent.gt(0))
                    .add(entity::person::Column::InvitesUsed.gt(0)),
            )
            .order_by_desc(entity::person::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Person::from_entity).collect())
    }

    /// Counts people acting as sponsors.
    pub async fn count_sponsors(&self) -> Result<u64, DbErr> {
        entity::prelude::Person::find()
            .filter(
                Condition::any()
                    .add(entity::person::Column::InvitesSent.gt(0))
                    .add(entity::person::Column::InvitesUsed.gt(0)),
            )
            .count(self.db)
            .await
    }

    /// Overwrites a sponsor's quota counters.
    ///
    /// # Returns
    /// - `Ok(true)` - Counters updated
    /// - `Ok(false)` - No person with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_quota(&self, param: UpdateQuotaParam) -> Result<bool, DbErr> {
        let result = entity::prelude::Person::update_many()
            .filter(entity::person::Column::Id.eq(param.person_id))
            .col_expr(
                entity::person::Column::InvitesSent,
                Expr::value(param.invites_sent),
            )
            .col_expr(
                entity::person::Column::InvitesUsed,
                Expr::value(param.invites_used),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Increments a sponsor's used-invite counter by one.
    ///
    /// # Returns
    /// - `Ok(true)` - Counter incremented
    /// - `Ok(false)` - No person with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn increment_invites_used(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Person::update_many()
            .filter(entity::person::Column::Id.eq(id))
            .col_expr(
                entity::person::Column::InvitesUsed,
                Expr::col(entity::person::Column::InvitesUsed).add(1),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets the top sponsors by used invites, descending.
    pub async fn ranking(&self, limit: u64) -> Result<Vec<Person>, DbErr> {
        let entities = entity::prelude::Person::find()
            .filter(entity::person::Column::InvitesUsed.gt(0))
            .order_by_desc(entity::person::Column::InvitesUsed)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Person::from_entity).collect())
    }

    /// Gets one page of person ids in creation order.
    ///
    /// Used by anonymization so the synthetic identity of a row is a stable
    /// function of its position.
    pub async fn ids_page(&self, page: u64, per_page: u64) -> Result<Vec<Uuid>, DbErr> {
        entity::prelude::Person::find()
            .select_only()
            .column(entity::person::Column::Id)
            .order_by_asc(entity::person::Column::CreatedAt)
            .offset(page * per_page)
            .limit(per_page)
            .into_tuple::<Uuid>()
            .all(self.db)
            .await
    }

    /// Overwrites a person's name and email.
    pub async fn update_identity(&self, id: Uuid, name: &str, email: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Person::update_many()
            .filter(entity::person::Column::Id.eq(id))
            .col_expr(entity::person::Column::Name, Expr::value(name))
            .col_expr(entity::person::Column::Email, Expr::value(email))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts all people.
    pub async fn count_all(&self) -> Result<u64, DbErr> {
        entity::prelude::Person::find().count(self.db).await
    }

    /// Gets creation timestamps of sponsors, for per-day aggregation.
    pub async fn sponsor_created_dates(&self) -> Result<Vec<DateTime<Utc>>, DbErr> {
        entity::prelude::Person::find()
            .select_only()
            .column(entity::person::Column::CreatedAt)
            .filter(
                Condition::any()
                    .add(entity::person::Column::InvitesSent.gt(0))
                    .add(entity::person::Column::InvitesUsed.gt(0)),
            )
            .into_tuple::<DateTime<Utc>>()
            .all(self.db)
            .await
    }

    /// Gets the state (UF) of the given people, skipping rows without one.
    pub async fn states_by_ids(&self, ids: &[Uuid]) -> Result<Vec<String>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Person::find()
            .select_only()
            .column(entity::person::Column::State)
            .filter(entity::person::Column::Id.is_in(ids.iter().copied()))
            .filter(entity::person::Column::State.is_not_null())
            .into_tuple::<String>()
            .all(self.db)
            .await
    }

    /// Gets the state (UF) of every sponsor, skipping rows without one.
    pub async fn sponsor_states(&self) -> Result<Vec<String>, DbErr> {
        entity::prelude::Person::find()
            .select_only()
            .column(entity::person::Column::State)
            .filter(
                Condition::any()
                    .add(entity::person::Column::InvitesSent.gt(0))
                    .add(entity::person::Column::InvitesUsed.gt(0)),
            )
            .filter(entity::person::Column::State.is_not_null())
            .into_tuple::<String>()
            .all(self.db)
            .await
    }

    /// Gets display names for the given people.
    pub async fn names_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, String)>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Person::find()
            .select_only()
            .column(entity::person::Column::Id)
            .column(entity::person::Column::Name)
            .filter(entity::person::Column::Id.is_in(ids.iter().copied()))
            .into_tuple::<(Uuid, String)>()
            .all(self.db)
            .await
    }
}
