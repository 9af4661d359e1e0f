use sea_orm::Database;
use tracing::info;

use foodgram_api::config::FoodgramConfig;
use foodgram_api::router::build_router;
use foodgram_api::state::AppState;
use foodgram_auth_types::token::TokenKeys;
use foodgram_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = FoodgramConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        tokens: TokenKeys::new(&config.jwt_secret, config.token_ttl_secs),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("foodgram api listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
