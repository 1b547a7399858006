use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Local;
use data_model_jd::db::DbPool;
use data_model_jd::models::{JobError, JobPayload, KeywordParam, LocationParam};
use data_model_jd::repo;

/// GET /api/jobs
pub async fn get_jobs(State(pool): State<DbPool>) -> Result<impl IntoResponse, JobError> {
    let mut conn = pool.get().await?;
    let jobs = repo::all_jobs(&mut conn).await?;
    Ok(Json(jobs))
}

/// GET /api/jobs/{id}
pub async fn get_job(
    State(pool): State<DbPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, JobError> {
    let mut conn = pool.get().await?;
    let job = repo::job_by_id(&mut conn, id).await?;
    Ok(Json(job))
}

/// POST /api/jobs
/// `posted_date` is set server-side at creation time.
pub async fn post_job(
    State(pool): State<DbPool>,
    Json(payload): Json<JobPayload>,
) -> Result<impl IntoResponse, JobError> {
    payload.validate()?;

    let mut conn = pool.get().await?;
    let new_job = payload.into_new_job(Local::now().naive_local());
    let job = repo::insert_job(&mut conn, &new_job).await?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /api/jobs/{id}
/// Overwrites every mutable column, clearing optional fields the payload
/// leaves out. `posted_date` keeps its original value.
pub async fn put_job(
    State(pool): State<DbPool>,
    Path(id): Path<i64>,
    Json(payload): Json<JobPayload>,
) -> Result<impl IntoResponse, JobError> {
    payload.validate()?;

    let mut conn = pool.get().await?;
    let changes = payload.into_changes();
    let job = repo::update_job(&mut conn, id, &changes).await?;

    Ok(Json(job))
}

/// DELETE /api/jobs/{id}
/// Always 204, whether or not the id existed.
pub async fn delete_job(
    State(pool): State<DbPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, JobError> {
    let mut conn = pool.get().await?;
    repo::delete_job(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/jobs/search?keyword=…
pub async fn search_jobs(
    State(pool): State<DbPool>,
    Query(params): Query<KeywordParam>,
) -> Result<impl IntoResponse, JobError> {
    let mut conn = pool.get().await?;
    let jobs = repo::search_jobs(&mut conn, &params.keyword).await?;
    Ok(Json(jobs))
}

/// GET /api/jobs/location?location=…
pub async fn get_jobs_by_location(
    State(pool): State<DbPool>,
    Query(params): Query<LocationParam>,
) -> Result<impl IntoResponse, JobError> {
    let mut conn = pool.get().await?;
    let jobs = repo::jobs_in_location(&mut conn, &params.location).await?;
    Ok(Json(jobs))
}
