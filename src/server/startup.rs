use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::AppError,
    model::account::{CreateAccountParam, Role},
    service::account::AccountService,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the
/// database schema is up-to-date. This function must complete successfully before the
/// application can access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Initializes a tower-sessions store on the same SQLite pool the application
/// uses, runs the store's own migration, and configures a seven-day inactivity
/// expiry.
///
/// # Arguments
/// - `db` - Database connection whose underlying pool backs the session store
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Session middleware ready to be layered on the router
/// - `Err(AppError)` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store
        .migrate()
        .await
        .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

    Ok(SessionManagerLayer::new(session_store)
        .with_expiry(Expiry::OnInactivity(Duration::days(7))))
}

/// Builds the HTTP client used for webhook notifications.
///
/// Redirects are disabled so a compromised webhook target cannot bounce
/// requests to internal addresses.
pub fn setup_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap_or_default()
}

/// Creates the bootstrap admin account when the account table is empty.
///
/// On a fresh deployment there is no way to log in, so the first startup
/// creates an ADMIN account from the `ADMIN_EMAIL`/`ADMIN_PASSWORD` environment
/// variables. Subsequent startups (or deployments without the variables set)
/// leave the table untouched.
///
/// # Arguments
/// - `db` - Database connection
/// - `config` - Configuration holding the optional bootstrap credentials
///
/// # Returns
/// - `Ok(())` - Account created, or nothing to do
/// - `Err(AppError)` - Database error while checking or creating the account
pub async fn bootstrap_admin(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    let account_service = AccountService::new(db);

    if account_service.any_account_exists().await? {
        return Ok(());
    }

    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        tracing::warn!(
            "no accounts exist and ADMIN_EMAIL/ADMIN_PASSWORD are not set; nobody can log in"
        );
        return Ok(());
    };

    let account = account_service
        .create(CreateAccountParam {
            email: email.clone(),
            name: "Administrator".to_string(),
            password: password.clone(),
            roles: vec![Role::Admin],
        })
        .await?;

    tracing::info!(account_id = %account.id, "bootstrap admin account created");

    Ok(())
}
