use tokio::net::TcpListener;
use tracing::info;
use seo_health_checker::{
    config::Config,
    api::routes::create_router,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::load()?;
    let server_addr = config.server_addr;
    info!(api_url = %config.api_url, "using scan service");

    let app_state = AppState::new(&config);
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    info!("Listening on http://{}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
