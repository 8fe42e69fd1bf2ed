use actix_web::HttpServer;
use smogcast_api::{AppState, LoggingConfig, ServerConfig, create_app, init_tracing};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = init_tracing(&LoggingConfig::from_env()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let server = ServerConfig::from_env();
    let state = AppState::from_env().map_err(std::io::Error::other)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %server.bind_address,
        "Smogcast API starting"
    );

    HttpServer::new(move || create_app(state.clone()))
        .bind(&server.bind_address)?
        .run()
        .await
}
