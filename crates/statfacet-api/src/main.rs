use std::env;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use statfacet_api::create_router;
use statfacet_api::state::AppState;
use statfacet_core::config::HierarchyConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statfacet_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = env::var("STATFACET_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3001);

    let hierarchies = match HierarchyConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Failed to load hierarchy configuration: {}", err);
            tracing::error!(
                "Remediation:\n\
                1. Check the file named by STATFACET_HIERARCHY_CONFIG exists\n\
                2. Verify it is valid TOML with a [hierarchies] table\n\
                3. Unset STATFACET_HIERARCHY_CONFIG to use the built-in nesting"
            );
            std::process::exit(1);
        }
    };

    tracing::info!(port = port, "Starting statfacet API server");

    let state = Arc::new(AppState::new(hierarchies));

    let cors = CorsLayer::new()
        .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = create_router(state).layer(cors);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.unwrap();
}
