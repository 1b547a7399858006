use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::PoolError;

// admins table model (database representation)
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::admins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Insertable admin row. The id is assigned by the database.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::admins)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

// jobs table model (database representation)
//
// The wire representation is camelCase because that is what the admin
// frontend and public listing pages exchange.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub location: String,
    pub description: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub category: Option<String>,
    pub posted_date: NaiveDateTime,
    pub skills: Option<String>,
    pub salary: Option<String>,
    pub apply_link: Option<String>,
    pub role: Option<String>,
    pub company_type: Option<String>,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
}

/// Insertable job row. `posted_date` is filled in by the handler at
/// creation time and never touched again.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::jobs)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub location: String,
    pub description: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub category: Option<String>,
    pub posted_date: NaiveDateTime,
    pub skills: Option<String>,
    pub salary: Option<String>,
    pub apply_link: Option<String>,
    pub role: Option<String>,
    pub company_type: Option<String>,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
}

/// Changeset for job updates. `treat_none_as_null` so a full-representation
/// PUT clears nullable columns that the client omitted; `posted_date` is
/// not part of the changeset and therefore survives every update.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::jobs, treat_none_as_null = true)]
pub struct JobChanges {
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub location: String,
    pub description: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub category: Option<String>,
    pub skills: Option<String>,
    pub salary: Option<String>,
    pub apply_link: Option<String>,
    pub role: Option<String>,
    pub company_type: Option<String>,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
}

// API Payload Types

/// Input payload for POST /api/auth/register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Input payload for POST /api/auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

/// Input payload for job create/update. Missing fields deserialize to their
/// defaults so validation can produce field-level messages instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPayload {
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub location: String,
    pub description: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub category: Option<String>,
    pub skills: Option<String>,
    pub salary: Option<String>,
    pub apply_link: Option<String>,
    pub role: Option<String>,
    pub company_type: Option<String>,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
}

impl JobPayload {
    /// Required fields must be present and non-blank. Checked in a fixed
    /// order so the reported message is stable.
    pub fn validate(&self) -> Result<(), JobError> {
        if self.title.trim().is_empty() {
            return Err(JobError::Validation("Job title is required".to_string()));
        }
        if self.company.trim().is_empty() {
            return Err(JobError::Validation("Company name is required".to_string()));
        }
        if self.location.trim().is_empty() {
            return Err(JobError::Validation("Location is required".to_string()));
        }
        Ok(())
    }

    pub fn into_new_job(self, posted_date: NaiveDateTime) -> NewJob {
        NewJob {
            title: self.title,
            company: self.company,
            company_logo: self.company_logo,
            location: self.location,
            description: self.description,
            experience_level: self.experience_level,
            job_type: self.job_type,
            category: self.category,
            posted_date,
            skills: self.skills,
            salary: self.salary,
            apply_link: self.apply_link,
            role: self.role,
            company_type: self.company_type,
            responsibilities: self.responsibilities,
            requirements: self.requirements,
        }
    }

    pub fn into_changes(self) -> JobChanges {
        JobChanges {
            title: self.title,
            company: self.company,
            company_logo: self.company_logo,
            location: self.location,
            description: self.description,
            experience_level: self.experience_level,
            job_type: self.job_type,
            category: self.category,
            skills: self.skills,
            salary: self.salary,
            apply_link: self.apply_link,
            role: self.role,
            company_type: self.company_type,
            responsibilities: self.responsibilities,
            requirements: self.requirements,
        }
    }
}

/// Query-string input for POST /api/analytics/search and GET /api/jobs/search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordParam {
    pub keyword: String,
}

/// Query-string input for GET /api/jobs/location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationParam {
    pub location: String,
}

// API Response Types

/// Response payload for successful register/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub username: String,
    pub email: String,
}

/// Response payload for POST /api/auth/validate when the token checks out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenIdentity {
    pub valid: bool,
    pub username: String,
    pub email: String,
}

/// Response payload for POST /api/auth/validate when it does not
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRejection {
    pub valid: bool,
    pub error: String,
}

/// Windowed view/apply counts, either site-wide or scoped to one job. All
/// windows share a single `now` anchor captured when the request started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficStats {
    pub lifetime: i64,
    pub last7_days: i64,
    pub today: i64,
    pub last1_hour: i64,
    pub lifetime_applies: i64,
    pub last7_days_applies: i64,
    pub today_applies: i64,
    pub last1_hour_applies: i64,
}

/// One entry of a top-searches ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: i64,
}

/// One day of the 15-day rollup returned by GET /api/analytics/historical
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: String,
    pub views: i64,
    pub applies: i64,
    pub top_searches: Vec<KeywordCount>,
}

// API Error Types

/// Error for the /api/jobs endpoints
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("{0}")]
    Validation(String),
    #[error("Job not found")]
    NotFound,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for JobError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            JobError::Validation(_) => StatusCode::BAD_REQUEST,
            JobError::NotFound => StatusCode::NOT_FOUND,
            JobError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Error for the /api/analytics endpoints
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

macro_rules! from_internal_error {
    ($lib_err:path, $err_type:tt) => {
        impl From<$lib_err> for $err_type {
            fn from(e: $lib_err) -> Self {
                $err_type::Internal(e.to_string())
            }
        }
    };
}

from_internal_error!(PoolError, JobError);
from_internal_error!(PoolError, AnalyticsError);
from_internal_error!(diesel::result::Error, AnalyticsError);

/// Converts a `diesel::result::Error::NotFound` into `JobError::NotFound`,
/// anything else into `JobError::Internal`.
impl From<diesel::result::Error> for JobError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => JobError::NotFound,
            _ => JobError::Internal(e.to_string()),
        }
    }
}
