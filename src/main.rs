use axum::extract::Request;
use axum::ServiceExt;
use recipe_api::api::routes::create_routes;
use recipe_api::config::{run_migrations, AppConfig, DatabaseConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let db = db_config.create_pool().await?;
    run_migrations(&db).await?;

    let app = create_routes(db, &config);

    let listener = TcpListener::bind(config.server_address()).await?;
    info!("Recipe API server starting on http://{}", config.server_address());

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
