use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_mapper::api::router;
use course_mapper::config::AppConfig;
use course_mapper::db;
use course_mapper::services::{RecordStore, SessionSweeper};
use course_mapper::session::{SessionStore, SqliteSessionStore};
use course_mapper::source::data_source_for;
use course_mapper::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "course_mapper=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;

    let pool = db::connect(&config.database_url).await?;
    let store: Arc<dyn SessionStore> = Arc::new(SqliteSessionStore::new(pool));

    let source = data_source_for(&config.mappings_source);
    let records = RecordStore::load_or_empty(source.as_ref()).await;

    let sweeper = SessionSweeper::new(store.clone(), config.session_ttl_secs, config.sweep_interval_secs);
    tokio::spawn(sweeper.start());

    let state = AppState::new(records, store);
    info!(
        "serving {} mappings ({} departments, {} universities, {} countries)",
        state.records.len(),
        state.facets.departments.len(),
        state.facets.institutions.len(),
        state.facets.countries.len()
    );

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
