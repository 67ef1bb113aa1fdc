use clap::Parser;
use pagefilter::{PersonService, SeaOrmStore, ServerConfig, db, init_logging, routes};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for problem in &errors {
            error!("{problem}");
        }
        return Err(format!("invalid configuration: {}", errors.join("; ")).into());
    }

    let database = db::connect(&config.database_url).await?;
    db::ensure_schema(&database).await?;

    let service = PersonService::new(SeaOrmStore::new(database));
    if config.seed > 0 {
        let message = service.create_random_persons(i64::from(config.seed)).await?;
        info!("{message}");
    }

    let mut app = routes::router(service).layer(TraceLayer::new_for_http());
    if config.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(
        address = %listener.local_addr()?,
        "Serving persons at /person, docs at /docs"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
