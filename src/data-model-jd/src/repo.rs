//! Query helpers over the job-board schema.
//!
//! Free async functions borrowing a pooled connection, so callers decide
//! how connections are sourced (one checkout per request in the API).
//!
//! Window conventions used by the count queries: `_after` filters are
//! strictly `>` the bound; `_between` covers the half-open `[start, end)`.

use chrono::NaiveDateTime;
use diesel::QueryResult;
use diesel::dsl::{count_star, exists};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::models::{Admin, Job, JobChanges, NewAdmin, NewJob};
use crate::schema::{admins, job_applies, job_views, jobs, search_queries, website_views};

// Admins

pub async fn username_exists(conn: &mut AsyncPgConnection, username: &str) -> QueryResult<bool> {
    diesel::select(exists(
        admins::table.filter(admins::username.eq(username)),
    ))
    .get_result(conn)
    .await
}

pub async fn email_exists(conn: &mut AsyncPgConnection, email: &str) -> QueryResult<bool> {
    diesel::select(exists(admins::table.filter(admins::email.eq(email))))
        .get_result(conn)
        .await
}

/// Keyed lookup, never "whichever row is first" -- the admin table may hold
/// any number of accounts.
pub async fn admin_by_username(conn: &mut AsyncPgConnection, username: &str) -> QueryResult<Admin> {
    admins::table
        .filter(admins::username.eq(username))
        .select(Admin::as_select())
        .first(conn)
        .await
}

pub async fn insert_admin(conn: &mut AsyncPgConnection, new_admin: &NewAdmin) -> QueryResult<Admin> {
    diesel::insert_into(admins::table)
        .values(new_admin)
        .returning(Admin::as_returning())
        .get_result(conn)
        .await
}

// Jobs

pub async fn all_jobs(conn: &mut AsyncPgConnection) -> QueryResult<Vec<Job>> {
    jobs::table.select(Job::as_select()).load(conn).await
}

pub async fn job_by_id(conn: &mut AsyncPgConnection, id: i64) -> QueryResult<Job> {
    jobs::table
        .find(id)
        .select(Job::as_select())
        .first(conn)
        .await
}

pub async fn insert_job(conn: &mut AsyncPgConnection, new_job: &NewJob) -> QueryResult<Job> {
    diesel::insert_into(jobs::table)
        .values(new_job)
        .returning(Job::as_returning())
        .get_result(conn)
        .await
}

/// Errors with `NotFound` when the id does not exist.
pub async fn update_job(
    conn: &mut AsyncPgConnection,
    id: i64,
    changes: &JobChanges,
) -> QueryResult<Job> {
    diesel::update(jobs::table.find(id))
        .set(changes)
        .returning(Job::as_returning())
        .get_result(conn)
        .await
}

/// Returns the number of deleted rows; deleting an absent id is a no-op.
pub async fn delete_job(conn: &mut AsyncPgConnection, id: i64) -> QueryResult<usize> {
    diesel::delete(jobs::table.find(id)).execute(conn).await
}

/// Case-insensitive substring match over title, company, location and the
/// comma-separated skills text.
pub async fn search_jobs(conn: &mut AsyncPgConnection, keyword: &str) -> QueryResult<Vec<Job>> {
    let pattern = format!("%{keyword}%");
    jobs::table
        .filter(
            jobs::title
                .ilike(pattern.clone())
                .nullable()
                .or(jobs::company.ilike(pattern.clone()).nullable())
                .or(jobs::location.ilike(pattern.clone()).nullable())
                .or(jobs::skills.ilike(pattern)),
        )
        .select(Job::as_select())
        .load(conn)
        .await
}

pub async fn jobs_in_location(conn: &mut AsyncPgConnection, location: &str) -> QueryResult<Vec<Job>> {
    let pattern = format!("%{location}%");
    jobs::table
        .filter(jobs::location.ilike(pattern))
        .select(Job::as_select())
        .load(conn)
        .await
}

// Events (append-only)

pub async fn record_website_view(
    conn: &mut AsyncPgConnection,
    viewed_at: NaiveDateTime,
) -> QueryResult<usize> {
    diesel::insert_into(website_views::table)
        .values(website_views::viewed_at.eq(viewed_at))
        .execute(conn)
        .await
}

pub async fn record_job_view(
    conn: &mut AsyncPgConnection,
    job_id: i64,
    viewed_at: NaiveDateTime,
) -> QueryResult<usize> {
    diesel::insert_into(job_views::table)
        .values((
            job_views::job_id.eq(job_id),
            job_views::viewed_at.eq(viewed_at),
        ))
        .execute(conn)
        .await
}

pub async fn record_job_apply(
    conn: &mut AsyncPgConnection,
    job_id: i64,
    applied_at: NaiveDateTime,
) -> QueryResult<usize> {
    diesel::insert_into(job_applies::table)
        .values((
            job_applies::job_id.eq(job_id),
            job_applies::applied_at.eq(applied_at),
        ))
        .execute(conn)
        .await
}

/// Stores the keyword exactly as given; trimming and lowercasing happen at
/// the API boundary.
pub async fn record_search(
    conn: &mut AsyncPgConnection,
    keyword: &str,
    searched_at: NaiveDateTime,
) -> QueryResult<usize> {
    diesel::insert_into(search_queries::table)
        .values((
            search_queries::keyword.eq(keyword),
            search_queries::searched_at.eq(searched_at),
        ))
        .execute(conn)
        .await
}

// Website view counts

pub async fn website_view_total(conn: &mut AsyncPgConnection) -> QueryResult<i64> {
    website_views::table.count().get_result(conn).await
}

pub async fn website_views_after(
    conn: &mut AsyncPgConnection,
    after: NaiveDateTime,
) -> QueryResult<i64> {
    website_views::table
        .filter(website_views::viewed_at.gt(after))
        .count()
        .get_result(conn)
        .await
}

pub async fn website_views_between(
    conn: &mut AsyncPgConnection,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> QueryResult<i64> {
    website_views::table
        .filter(website_views::viewed_at.ge(start))
        .filter(website_views::viewed_at.lt(end))
        .count()
        .get_result(conn)
        .await
}

// Job view counts (scoped to a single job id)

pub async fn job_view_total(conn: &mut AsyncPgConnection, job_id: i64) -> QueryResult<i64> {
    job_views::table
        .filter(job_views::job_id.eq(job_id))
        .count()
        .get_result(conn)
        .await
}

pub async fn job_views_after(
    conn: &mut AsyncPgConnection,
    job_id: i64,
    after: NaiveDateTime,
) -> QueryResult<i64> {
    job_views::table
        .filter(job_views::job_id.eq(job_id))
        .filter(job_views::viewed_at.gt(after))
        .count()
        .get_result(conn)
        .await
}

// Apply counts

pub async fn apply_total(conn: &mut AsyncPgConnection) -> QueryResult<i64> {
    job_applies::table.count().get_result(conn).await
}

pub async fn applies_after(
    conn: &mut AsyncPgConnection,
    after: NaiveDateTime,
) -> QueryResult<i64> {
    job_applies::table
        .filter(job_applies::applied_at.gt(after))
        .count()
        .get_result(conn)
        .await
}

pub async fn applies_between(
    conn: &mut AsyncPgConnection,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> QueryResult<i64> {
    job_applies::table
        .filter(job_applies::applied_at.ge(start))
        .filter(job_applies::applied_at.lt(end))
        .count()
        .get_result(conn)
        .await
}

pub async fn job_apply_total(conn: &mut AsyncPgConnection, job_id: i64) -> QueryResult<i64> {
    job_applies::table
        .filter(job_applies::job_id.eq(job_id))
        .count()
        .get_result(conn)
        .await
}

pub async fn job_applies_after(
    conn: &mut AsyncPgConnection,
    job_id: i64,
    after: NaiveDateTime,
) -> QueryResult<i64> {
    job_applies::table
        .filter(job_applies::job_id.eq(job_id))
        .filter(job_applies::applied_at.gt(after))
        .count()
        .get_result(conn)
        .await
}

// Search keyword rankings

/// Grouped keyword counts since `after`, count descending. Ties break by
/// keyword ascending so the ranking is deterministic.
pub async fn top_keywords_after(
    conn: &mut AsyncPgConnection,
    after: NaiveDateTime,
    limit: i64,
) -> QueryResult<Vec<(String, i64)>> {
    search_queries::table
        .filter(search_queries::searched_at.gt(after))
        .group_by(search_queries::keyword)
        .select((search_queries::keyword, count_star()))
        .order((count_star().desc(), search_queries::keyword.asc()))
        .limit(limit)
        .load(conn)
        .await
}

/// Same ranking over the half-open `[start, end)` window.
pub async fn top_keywords_between(
    conn: &mut AsyncPgConnection,
    start: NaiveDateTime,
    end: NaiveDateTime,
    limit: i64,
) -> QueryResult<Vec<(String, i64)>> {
    search_queries::table
        .filter(search_queries::searched_at.ge(start))
        .filter(search_queries::searched_at.lt(end))
        .group_by(search_queries::keyword)
        .select((search_queries::keyword, count_star()))
        .order((count_star().desc(), search_queries::keyword.asc()))
        .limit(limit)
        .load(conn)
        .await
}
