use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use data_model_jd::db::DbPool;
use data_model_jd::models::{
    AnalyticsError, DailyStats, KeywordCount, KeywordParam, TrafficStats,
};
use data_model_jd::repo;

/// Days covered by the historical endpoint, today included.
const HISTORY_DAYS: i64 = 15;

/// Keyword rows returned by a top-searches ranking.
const TOP_KEYWORDS: i64 = 5;

//
// Event recording. All of these answer 200 with an empty body; timestamps
// are taken server-side.
//

/// POST /api/analytics/view/website
pub async fn post_website_view(
    State(pool): State<DbPool>,
) -> Result<impl IntoResponse, AnalyticsError> {
    let mut conn = pool.get().await?;
    repo::record_website_view(&mut conn, Local::now().naive_local()).await?;
    Ok(StatusCode::OK)
}

/// POST /api/analytics/view/job/{job_id}
/// The job id is recorded as given; whether such a job exists is not checked.
pub async fn post_job_view(
    State(pool): State<DbPool>,
    Path(job_id): Path<i64>,
) -> Result<impl IntoResponse, AnalyticsError> {
    let mut conn = pool.get().await?;
    repo::record_job_view(&mut conn, job_id, Local::now().naive_local()).await?;
    Ok(StatusCode::OK)
}

/// POST /api/analytics/apply/job/{job_id}
pub async fn post_job_apply(
    State(pool): State<DbPool>,
    Path(job_id): Path<i64>,
) -> Result<impl IntoResponse, AnalyticsError> {
    let mut conn = pool.get().await?;
    repo::record_job_apply(&mut conn, job_id, Local::now().naive_local()).await?;
    Ok(StatusCode::OK)
}

/// POST /api/analytics/search?keyword=…
/// Keywords are trimmed and lowercased before storage; a blank keyword is
/// dropped without erroring.
pub async fn post_search(
    State(pool): State<DbPool>,
    Query(params): Query<KeywordParam>,
) -> Result<impl IntoResponse, AnalyticsError> {
    let Some(keyword) = normalize_keyword(&params.keyword) else {
        return Ok(StatusCode::OK);
    };

    let mut conn = pool.get().await?;
    repo::record_search(&mut conn, &keyword, Local::now().naive_local()).await?;
    Ok(StatusCode::OK)
}

//
// Aggregate queries. Each request captures `now` once so every window in
// the response shares the same anchor.
//

/// GET /api/analytics/website
pub async fn get_website_stats(
    State(pool): State<DbPool>,
) -> Result<impl IntoResponse, AnalyticsError> {
    let mut conn = pool.get().await?;

    let now = Local::now().naive_local();
    let midnight = day_bounds(now.date()).0;
    let week_ago = now - Duration::days(7);
    let hour_ago = now - Duration::hours(1);

    let stats = TrafficStats {
        lifetime: repo::website_view_total(&mut conn).await?,
        last7_days: repo::website_views_after(&mut conn, week_ago).await?,
        today: repo::website_views_after(&mut conn, midnight).await?,
        last1_hour: repo::website_views_after(&mut conn, hour_ago).await?,
        lifetime_applies: repo::apply_total(&mut conn).await?,
        last7_days_applies: repo::applies_after(&mut conn, week_ago).await?,
        today_applies: repo::applies_after(&mut conn, midnight).await?,
        last1_hour_applies: repo::applies_after(&mut conn, hour_ago).await?,
    };

    Ok(Json(stats))
}

/// GET /api/analytics/job/{job_id}
/// Same shape as the website stats, scoped to one job's views and applies.
pub async fn get_job_stats(
    State(pool): State<DbPool>,
    Path(job_id): Path<i64>,
) -> Result<impl IntoResponse, AnalyticsError> {
    let mut conn = pool.get().await?;

    let now = Local::now().naive_local();
    let midnight = day_bounds(now.date()).0;
    let week_ago = now - Duration::days(7);
    let hour_ago = now - Duration::hours(1);

    let stats = TrafficStats {
        lifetime: repo::job_view_total(&mut conn, job_id).await?,
        last7_days: repo::job_views_after(&mut conn, job_id, week_ago).await?,
        today: repo::job_views_after(&mut conn, job_id, midnight).await?,
        last1_hour: repo::job_views_after(&mut conn, job_id, hour_ago).await?,
        lifetime_applies: repo::job_apply_total(&mut conn, job_id).await?,
        last7_days_applies: repo::job_applies_after(&mut conn, job_id, week_ago).await?,
        today_applies: repo::job_applies_after(&mut conn, job_id, midnight).await?,
        last1_hour_applies: repo::job_applies_after(&mut conn, job_id, hour_ago).await?,
    };

    Ok(Json(stats))
}

/// GET /api/analytics/searches/top
/// Top keywords since local midnight: count descending, keyword ascending
/// on ties, at most five rows.
pub async fn get_top_searches(
    State(pool): State<DbPool>,
) -> Result<impl IntoResponse, AnalyticsError> {
    let mut conn = pool.get().await?;

    let midnight = day_bounds(Local::now().date_naive()).0;
    let top = repo::top_keywords_after(&mut conn, midnight, TOP_KEYWORDS)
        .await?
        .into_iter()
        .map(|(keyword, count)| KeywordCount { keyword, count })
        .collect::<Vec<_>>();

    Ok(Json(top))
}

/// GET /api/analytics/historical
/// Fifteen days of per-day numbers, today at index 0, walking backwards one
/// calendar day at a time. Counts are computed on demand against each day's
/// `[midnight, next midnight)` window; nothing is precomputed.
pub async fn get_historical_stats(
    State(pool): State<DbPool>,
) -> Result<impl IntoResponse, AnalyticsError> {
    let mut conn = pool.get().await?;

    let today = Local::now().date_naive();
    let mut history = Vec::with_capacity(HISTORY_DAYS as usize);

    for offset in 0..HISTORY_DAYS {
        let day = today - Duration::days(offset);
        let (start, end) = day_bounds(day);

        let top_searches = repo::top_keywords_between(&mut conn, start, end, TOP_KEYWORDS)
            .await?
            .into_iter()
            .map(|(keyword, count)| KeywordCount { keyword, count })
            .collect();

        history.push(DailyStats {
            date: day.format("%Y-%m-%d").to_string(),
            views: repo::website_views_between(&mut conn, start, end).await?,
            applies: repo::applies_between(&mut conn, start, end).await?,
            top_searches,
        });
    }

    Ok(Json(history))
}

/// Half-open `[midnight, next midnight)` window for a calendar day.
fn day_bounds(day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = day.and_time(NaiveTime::MIN);
    (start, start + Duration::days(1))
}

/// Trims and lowercases a raw search keyword; `None` when nothing is left.
fn normalize_keyword(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
