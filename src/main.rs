//! Education Platform Admin
//!
//! With the `server` feature this is a small host for the compiled web bundle;
//! with `web` it is the browser entry point.

#[cfg(feature = "server")]
use anyhow::Result;

#[cfg(feature = "server")]
#[tokio::main]
async fn main() -> Result<()> {
    use axum::{routing::get, Router};
    use edu_admin::{api, config};
    use std::net::SocketAddr;
    use tower_http::{
        compression::CompressionLayer,
        cors::CorsLayer,
        services::{ServeDir, ServeFile},
        trace::TraceLayer,
    };
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edu_admin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Education Platform Admin");

    let config = config::load_config()?;
    tracing::info!(?config, "Configuration loaded");

    // Unknown paths fall through to index.html so client-side routes survive a reload
    let index = config.static_dir.join("index.html");
    let bundle = ServeDir::new(&config.static_dir).not_found_service(ServeFile::new(index));

    let app = Router::new()
        .route("/status", get(api::status_handler))
        .route("/client-config.json", get(api::client_config_handler))
        .fallback_service(bundle)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(api::AppState::new(config.client));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(not(feature = "server"))]
fn main() {
    dioxus::launch(edu_admin::app::App);
}
