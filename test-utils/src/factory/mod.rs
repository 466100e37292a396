//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible
//! defaults, reducing boilerplate in tests. Factories automatically handle foreign
//! key relationships where possible, making tests more concise and maintainable.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let sponsor = factory::person::create_sponsor(&db, 10, 0).await?;
//!     let affiliate = factory::affiliate::create_pending_affiliate(&db, sponsor.id).await?;
//!     let code = factory::invite_code::create_code(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! Use the factory builders for custom values:
//!
//! ```rust,ignore
//! let person = factory::person::PersonFactory::new(&db)
//!     .name("Custom Person")
//!     .active(false)
//!     .build()
//!     .await?;
//! ```

pub mod account;
pub mod affiliate;
pub mod email_setting;
pub mod email_template;
pub mod helpers;
pub mod invite_code;
pub mod person;

// Re-export commonly used factory functions for concise usage
pub use account::{create_account, create_admin_account};
pub use affiliate::create_pending_affiliate;
pub use email_setting::set_setting;
pub use email_template::create_template;
pub use invite_code::{create_code, create_used_code};
pub use person::{create_person, create_sponsor};
