mod model;
mod server;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::server::{config::Config, error::AppError, router, scheduler, startup, state::AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = startup::connect_to_database(&config).await?;
    let session_layer = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_http_client();

    startup::bootstrap_admin(&db, &config).await?;

    tracing::info!("Starting server");

    // Start the auto-approval worker in a separate task.
    let scheduler_db = db.clone();
    let scheduler_http = http_client.clone();
    let scheduler_config = config.clone();
    tokio::spawn(async move {
        if let Err(e) =
            scheduler::auto_approval::start_scheduler(scheduler_db, scheduler_http, scheduler_config)
                .await
        {
            tracing::error!("Auto-approval scheduler error: {}", e);
        }
    });

    let state = AppState::new(db, http_client, config.clone());
    let app = router::router(state)?.layer(session_layer);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
