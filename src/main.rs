// ==========================================
// Medication Shortage CDS Service - server entry point
// ==========================================

use clap::Parser;
use shortage_cds::config::AppConfig;
use shortage_cds::server::{router, AppState};
use shortage_cds::{db, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = AppConfig::parse();
    let db_path = config.db_path();

    tracing::info!("==================================================");
    tracing::info!("{}", shortage_cds::APP_NAME);
    tracing::info!("version: {}", shortage_cds::VERSION);
    tracing::info!("==================================================");
    tracing::info!("database: {}", db_path.display());
    tracing::info!("CDS hook target: {}", config.cds_hook_url);
    tracing::info!("portal export source: {}", config.portal_url);

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // bootstrap the dataset tables before any reader touches them
    let conn = db::open_sqlite_connection(&db_path.to_string_lossy())?;
    db::ensure_schema(&conn)?;
    drop(conn);

    let state = AppState::new(&config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    tracing::info!("listening on {}", config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
