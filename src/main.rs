use std::sync::Arc;

use gastrack::{config::Config, model::app::AppState, router, startup};
use tower_http::{cors::CorsLayer, services::ServeDir, services::ServeFile, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = startup::connect_to_database(&config)
        .await
        .expect("Failed to connect to database");
    let mailer = startup::build_mailer(&config).expect("Failed to configure SMTP mailer");

    let state = AppState {
        db,
        config: Arc::new(config),
        mailer: Arc::new(mailer),
    };
    let config = state.config.clone();

    let mut app = router::routes()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Serve the built front-end bundle as a fallback for unmatched routes.
    if let Some(static_dir) = &config.static_dir {
        let index = std::path::Path::new(static_dir).join("index.html");
        app = app.fallback_service(ServeDir::new(static_dir).not_found_service(ServeFile::new(index)));
    }

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!("Starting server on {}", addr);

    axum::serve(listener, app).await.expect("Server error");
}
