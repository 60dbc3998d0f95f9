use dotenvy::dotenv;
use order_schema::{
    config::{
        database::{create_connection, create_tables, get_database_url},
        reference::load_optional_config,
    },
    core::{integrity::audit, reference::seed_reference_data},
    errors::Result,
};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Creates the parent directory of a file-backed `SQLite` URL.
fn ensure_database_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or_default();
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Load lookup descriptions
    let config_path =
        std::env::var("ORDER_SCHEMA_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = load_optional_config(&config_path)
        .inspect_err(|e| error!("Failed to load {}: {}", config_path, e))?;

    // 4. Open the database and create the schema
    let database_url = get_database_url();
    ensure_database_dir(&database_url)?;
    let db = create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to open database: {}", e))?;
    create_tables(&db)
        .await
        .inspect(|_| info!("Schema created"))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed the lookup tables
    seed_reference_data(&db, &config)
        .await
        .inspect_err(|e| error!("Failed to seed reference data: {}", e))?;

    // 6. Audit existing rows; dangling references are reported, not fatal
    let violations = audit(&db).await?;
    if violations.is_empty() {
        info!("Order schema ready");
    } else {
        warn!(
            count = violations.len(),
            "Order schema ready, but the database holds dangling references"
        );
    }
    Ok(())
}
