use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post, put},
};
use core_jd::{AuthConfig, health_check};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use data_model_jd::db::DbPool;

use crate::auth::{self, AuthState};

pub mod analytics;
pub mod jobs;
pub mod request_log;

//
// Router
//

pub fn router(pool: DbPool, auth_config: AuthConfig, origins: Vec<HeaderValue>) -> Router<DbPool> {
    // Auth routes carry their own state; everything else runs over the
    // shared pool supplied by the caller
    let auth_routes = Router::new()
        .route("/api/auth/register", post(auth::post_register))
        .route("/api/auth/login", post(auth::post_login))
        .route("/api/auth/validate", post(auth::post_validate))
        .with_state(AuthState {
            pool,
            auth: Arc::new(auth_config),
        });

    let analytics_routes = Router::new()
        .route("/api/analytics/view/website", post(analytics::post_website_view))
        .route("/api/analytics/view/job/{job_id}", post(analytics::post_job_view))
        .route("/api/analytics/apply/job/{job_id}", post(analytics::post_job_apply))
        .route("/api/analytics/search", post(analytics::post_search))
        .route("/api/analytics/website", get(analytics::get_website_stats))
        .route("/api/analytics/job/{job_id}", get(analytics::get_job_stats))
        .route("/api/analytics/searches/top", get(analytics::get_top_searches))
        .route("/api/analytics/historical", get(analytics::get_historical_stats));

    let job_routes = Router::new()
        .route("/api/jobs", get(jobs::get_jobs))
        .route("/api/jobs", post(jobs::post_job))
        .route("/api/jobs/search", get(jobs::search_jobs))
        .route("/api/jobs/location", get(jobs::get_jobs_by_location))
        .route("/api/jobs/{id}", get(jobs::get_job))
        .route("/api/jobs/{id}", put(jobs::put_job))
        .route("/api/jobs/{id}", delete(jobs::delete_job));

    // Combine all routes
    Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes)
        .merge(analytics_routes)
        .merge(job_routes)
        // Browser clients live on another origin
        .layer(cors_layer(origins))
        // Custom route access logging
        .layer(middleware::from_fn(request_log::log_requests))
        // Tracing middleware
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}
