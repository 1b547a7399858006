use core_jd::{
    allowed_origins, get_api_base_url, get_auth_config, get_bootstrap_admin, get_db_pool,
    setup_logging,
};

use api_jd::{bootstrap, routes};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    setup_logging("api_jd=debug,tower_http=debug");

    let pool = get_db_pool().await;
    let auth_config = get_auth_config();
    let seed = get_bootstrap_admin();

    bootstrap::ensure_default_admin(&pool, &seed)
        .await
        .expect("Failed to ensure the default admin account");

    let app = routes::router(pool.clone(), auth_config, allowed_origins()).with_state(pool);

    let addr = get_api_base_url().expect("Invalid HOST or PORT");

    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect(format!("Failed to bind to address: {}", addr).as_str());
    axum::serve(listener, app).await.unwrap();
}
