use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Person, Affiliate};
///
/// let test = TestBuilder::new()
///     .with_table(Person)
///     .with_table(Affiliate)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements to execute during database setup, in insertion
    /// order. Tables with foreign keys must be added after their targets.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables needed for referral workflow tests, in dependency
    /// order: Person, Affiliate, InviteCode, AuditLog, Notification.
    ///
    /// Covers the approval workflow (validations, code assignment, audit
    /// trail and sponsor notifications) without the email or account tables.
    pub fn with_referral_tables(self) -> Self {
        self.with_table(Person)
            .with_table(Affiliate)
            .with_table(InviteCode)
            .with_table(AuditLog)
            .with_table(Notification)
    }

    /// Adds the account tables: Account, AccountRole.
    pub fn with_account_tables(self) -> Self {
        self.with_table(Account).with_table(AccountRole)
    }

    /// Adds the email tables: EmailTemplate, EmailSetting, EmailLog.
    ///
    /// EmailLog references Affiliate; add referral tables first when log rows
    /// will carry an affiliate id.
    pub fn with_email_tables(self) -> Self {
        self.with_table(EmailTemplate)
            .with_table(EmailSetting)
            .with_table(EmailLog)
    }

    /// Builds the configured test context.
    ///
    /// Creates the in-memory database and executes every CREATE TABLE
    /// statement added to the builder.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Ready test environment
    /// - `Err(TestError::Database)` - Failed to create the database or tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new();
        context.with_tables(self.tables).await?;
        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
