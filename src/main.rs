use dotenv::dotenv;
use jobcast::{app, standard_registry, ServerConfig};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    let registry = standard_registry();
    tracing::info!(
        jobs = registry.len(),
        max_concurrent_jobs = config.max_concurrent_jobs,
        transport = ?config.stream_transport,
        "Starting job server"
    );

    let app = app(&config, registry);
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.addr, config.port))
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!("Listening at {}:{}", config.addr, config.port);
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
