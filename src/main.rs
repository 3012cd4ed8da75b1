use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;

use cinematch::{
    api::{create_router, AppState},
    config::Config,
    services::HttpBackend,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinematch=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let backend = HttpBackend::new(
        config.backend_base_url(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    tracing::info!(
        backend_url = backend.api_url(),
        profile = ?config.backend_profile,
        max_suggestions = config.max_suggestions,
        "Recommendation backend configured"
    );

    let state = AppState::new(Arc::new(backend), config.workflow_policy());
    state.spawn_view_sweeper(Duration::from_secs(config.view_idle_timeout_secs));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
