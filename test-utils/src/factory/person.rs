//! Person factory for creating test person entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test people with customizable fields.
///
/// Defaults produce an active member without an invite quota; use
/// `invites_sent`/`invites_used` (or `create_sponsor`) for sponsor rows.
pub struct PersonFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    email: String,
    state: Option<String>,
    active: bool,
    invites_sent: i32,
    invites_used: i32,
}

impl<'a> PersonFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Person {}", id),
            email: format!("person{}@example.com", id),
            state: None,
            active: true,
            invites_sent: 0,
            invites_used: 0,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn invites_sent(mut self, invites_sent: i32) -> Self {
        self.invites_sent = invites_sent;
        self
    }

    pub fn invites_used(mut self, invites_used: i32) -> Self {
        self.invites_used = invites_used;
        self
    }

    /// Builds and inserts the person entity into the database.
    pub async fn build(self) -> Result<entity::person::Model, DbErr> {
        entity::person::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(self.name),
            email: ActiveValue::Set(self.email),
            cpf: ActiveValue::Set(None),
            birth_date: ActiveValue::Set(None),
            sex: ActiveValue::Set(None),
            city: ActiveValue::Set(None),
            state: ActiveValue::Set(self.state),
            niche: ActiveValue::Set(None),
            phone: ActiveValue::Set(None),
            active: ActiveValue::Set(self.active),
            invites_sent: ActiveValue::Set(self.invites_sent),
            invites_used: ActiveValue::Set(self.invites_used),
            last_payment_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a person with default values.
pub async fn create_person(db: &DatabaseConnection) -> Result<entity::person::Model, DbErr> {
    PersonFactory::new(db).build().await
}

/// Creates an active sponsor with the given quota counters.
pub async fn create_sponsor(
    db: &DatabaseConnection,
    invites_sent: i32,
    invites_used: i32,
) -> Result<entity::person::Model, DbErr> {
    PersonFactory::new(db)
        .invites_sent(invites_sent)
        .invites_used(invites_used)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::Person;

    #[tokio::test]
    async fn creates_person_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Person).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let person = create_person(db).await?;

        assert!(!person.name.is_empty());
        assert!(person.email.contains('@'));
        assert!(person.active);
        assert_eq!(person.invites_sent, 0);

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_people() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Person).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_person(db).await?;
        let second = create_person(db).await?;

        assert_ne!(first.id, second.id);
        assert_ne!(first.email, second.email);

        Ok(())
    }

    #[tokio::test]
    async fn creates_sponsor_with_quota() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Person).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let sponsor = create_sponsor(db, 10, 3).await?;

        assert_eq!(sponsor.invites_sent, 10);
        assert_eq!(sponsor.invites_used, 3);

        Ok(())
    }
}
