use dotenvy::dotenv;

use courseware::logging::init_tracing;
use courseware::router::init_router;
use courseware::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let state = init_app_state().await?;
    let bind_address = state.server_config.bind_address();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %bind_address, "Server running");
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_address);
    tracing::info!("Scalar UI available at http://{}/scalar", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
