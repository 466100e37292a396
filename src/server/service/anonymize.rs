//! Anonymization of personal data for non-production environments.
//!
//! Replaces every person's name and email with synthetic values derived from
//! the row's position in creation order, so repeated runs produce the same
//! output and emails stay unique.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::person::PersonRepository,
    error::AppError,
    model::audit::{AuditAction, AuditEntry},
    service::audit::AuditService,
};

/// Rows fetched per id page.
const FETCH_PAGE_SIZE: u64 = 1000;

const FIRST_NAMES: &[&str] = &[
    "Joao", "Maria", "Pedro", "Ana", "Carlos", "Juliana", "Lucas", "Fernanda",
    "Rafael", "Camila", "Bruno", "Patricia", "Rodrigo", "Amanda", "Gustavo", "Beatriz",
    "Felipe", "Larissa", "Marcelo", "Carla", "Andre", "Renata", "Paulo", "Mariana",
    "Ricardo", "Tatiana", "Diego", "Gabriela", "Vitor", "Aline", "Thiago", "Daniela",
];

const SURNAMES: &[&str] = &[
    "Silva", "Santos", "Oliveira", "Souza", "Rodrigues", "Ferreira", "Alves", "Pereira",
    "Lima", "Gomes", "Costa", "Ribeiro", "Martins", "Carvalho", "Rocha", "Almeida",
    "Nascimento", "Araujo", "Melo", "Barbosa", "Cardoso", "Correia", "Dias", "Teixeira",
];

const EMAIL_DOMAINS: &[&str] = &["email.com", "teste.com", "exemplo.com", "demo.com"];

/// Outcome counters of one anonymization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnonymizeStats {
    pub total: u64,
    pub updated: u64,
    pub errors: u64,
}

/// Service performing the anonymization run.
pub struct AnonymizeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnonymizeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Rewrites every person's name and email with synthetic values.
    ///
    /// Processes ids in creation order, page by page. Individual row failures
    /// are counted and logged but do not stop the run. The run itself is
    /// audited with the final counters.
    ///
    /// # Returns
    /// - `Ok(AnonymizeStats)` - Totals for the completed run
    /// - `Err(AppError::DbErr)` - Failure while fetching an id page
    pub async fn run(
        &self,
        account_id: Option<Uuid>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<AnonymizeStats, AppError> {
        let repo = PersonRepository::new(self.db);

        tracing::info!("anonymization started");

        let mut stats = AnonymizeStats {
            total: repo.count_all().await?,
            ..Default::default()
        };

        let mut page = 0u64;
        let mut index = 0usize;
        loop {
            let ids = repo.ids_page(page, FETCH_PAGE_SIZE).await?;
            if ids.is_empty() {
                break;
            }

            for id in &ids {
                let name = synthetic_name(index);
                let email = synthetic_email(&name, index);

                match repo.update_identity(*id, &name, &email).await {
                    Ok(true) => stats.updated += 1,
                    Ok(false) => {
                        stats.errors += 1;
                        tracing::warn!(person_id = %id, "person vanished during anonymization");
                    }
                    Err(err) => {
                        stats.errors += 1;
                        tracing::error!(person_id = %id, error = %err, "failed to anonymize person");
                    }
                }
                index += 1;
            }

            tracing::info!(progress = index, total = stats.total, "anonymization progress");
            page += 1;
        }

        AuditService::new(self.db)
            .log(AuditEntry {
                action: AuditAction::AnonymizeData,
                account_id,
                entity_type: "person".to_string(),
                entity_id: "all".to_string(),
                details: serde_json::json!({
                    "total": stats.total,
                    "updated": stats.updated,
                    "errors": stats.errors,
                }),
                ip_address,
                user_agent,
            })
            .await;

        tracing::info!(updated = stats.updated, errors = stats.errors, "anonymization finished");

        Ok(stats)
    }
}

/// Builds a synthetic full name from the row index.
///
/// First name cycles fastest, the first surname advances once per full cycle
/// of first names, and the second surname jumps by a coprime stride so
/// adjacent rows don't share it.
pub fn synthetic_name(index: usize) -> String {
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let surname1 = SURNAMES[(index / FIRST_NAMES.len()) % SURNAMES.len()];
    let surname2 = SURNAMES[(index * 7) % SURNAMES.len()];
    format!("{first} {surname1} {surname2}")
}

/// Builds a synthetic email from the name. The index suffix guarantees
/// uniqueness even when names collide.
pub fn synthetic_email(name: &str, index: usize) -> String {
    let local = name.to_lowercase().replace(' ', ".");
    let domain = EMAIL_DOMAINS[index % EMAIL_DOMAINS.len()];
    format!("{local}.{index}@{domain}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_deterministic() {
        assert_eq!(synthetic_name(0), synthetic_name(0));
        assert_eq!(synthetic_name(123), synthetic_name(123));
    }

    #[test]
    fn emails_are_unique_across_indexes() {
        let emails: HashSet<String> = (0..5000)
            .map(|i| synthetic_email(&synthetic_name(i), i))
            .collect();
        assert_eq!(emails.len(), 5000);
    }

    #[test]
    fn emails_are_plain_ascii_addresses() {
        for i in 0..200 {
            let email = synthetic_email(&synthetic_name(i), i);
            assert!(email.is_ascii());
            assert!(!email.contains(' '));
            assert_eq!(email.matches('@').count(), 1);
        }
    }
}
