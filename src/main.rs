use axum::Router;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use supperclub_server::config::Config;
use supperclub_server::db::PgStore;
use supperclub_server::routes::create_routes;
use supperclub_server::services::{PaymentService, StripeClient};
use supperclub_server::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Migrations run successfully");

    let stripe = StripeClient::new(config.stripe_api_base, config.stripe_secret_key)
        .expect("Failed to build Stripe client");
    let payments = PaymentService::new(
        Arc::new(PgStore::new(pool)),
        Arc::new(stripe),
        config.currency,
    );

    let app: Router = create_routes(AppState::new(payments));

    let addr = SocketAddr::from(([0, 0, 0, 0], 3001));
    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
