use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Local;
use core_jd::AuthConfig;
use data_model_jd::db::{DbPool, PoolError};
use data_model_jd::models::{
    AuthResponse, LoginPayload, NewAdmin, RegisterPayload, TokenIdentity, TokenRejection,
};
use data_model_jd::repo;
use std::sync::Arc;
use tracing::{debug, warn};

use super::password::{PasswordError, hash_password, verify_password};
use super::token::{self, TokenError};

/// State for the auth routes: the only handlers that need the token
/// configuration alongside a database handle.
#[derive(Clone)]
pub struct AuthState {
    pub pool: DbPool,
    pub auth: Arc<AuthConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error("Registration failed: {0}")]
    Internal(String),
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> Response {
        let status = match self {
            RegisterError::UsernameTaken | RegisterError::EmailTaken => StatusCode::BAD_REQUEST,
            RegisterError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Login failed: {0}")]
    Internal(String),
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        let status = match self {
            LoginError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            LoginError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<PoolError> for RegisterError {
    fn from(e: PoolError) -> Self {
        RegisterError::Internal(e.to_string())
    }
}

impl From<diesel::result::Error> for RegisterError {
    fn from(e: diesel::result::Error) -> Self {
        RegisterError::Internal(e.to_string())
    }
}

impl From<PasswordError> for RegisterError {
    fn from(e: PasswordError) -> Self {
        RegisterError::Internal(e.to_string())
    }
}

impl From<TokenError> for RegisterError {
    fn from(e: TokenError) -> Self {
        RegisterError::Internal(e.to_string())
    }
}

impl From<PoolError> for LoginError {
    fn from(e: PoolError) -> Self {
        LoginError::Internal(e.to_string())
    }
}

/// An unknown username reads exactly like a wrong password: no
/// account-existence oracle.
impl From<diesel::result::Error> for LoginError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => LoginError::InvalidCredentials,
            _ => LoginError::Internal(e.to_string()),
        }
    }
}

impl From<PasswordError> for LoginError {
    fn from(e: PasswordError) -> Self {
        LoginError::Internal(e.to_string())
    }
}

impl From<TokenError> for LoginError {
    fn from(e: TokenError) -> Self {
        LoginError::Internal(e.to_string())
    }
}

/// POST /api/auth/register
/// Creates an admin account and returns a fresh token for it.
pub async fn post_register(
    State(state): State<AuthState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, RegisterError> {
    let mut conn = state.pool.get().await?;

    // Username is checked before email so the reported conflict is stable
    if repo::username_exists(&mut conn, &payload.username).await? {
        return Err(RegisterError::UsernameTaken);
    }
    if repo::email_exists(&mut conn, &payload.email).await? {
        return Err(RegisterError::EmailTaken);
    }

    let password_hash = hash_password(&payload.password)?;
    let admin = repo::insert_admin(
        &mut conn,
        &NewAdmin {
            username: payload.username,
            email: payload.email,
            password_hash,
            created_at: Local::now().naive_local(),
        },
    )
    .await?;

    let token = token::issue(
        &admin.username,
        &state.auth.token_secret,
        state.auth.token_ttl_seconds,
    )?;

    debug!(username = %admin.username, "registered new admin");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Admin registered successfully".to_string(),
            token,
            username: admin.username,
            email: admin.email,
        }),
    ))
}

/// POST /api/auth/login
pub async fn post_login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, LoginError> {
    let mut conn = state.pool.get().await?;

    let admin = match repo::admin_by_username(&mut conn, &payload.username).await {
        Ok(admin) => admin,
        Err(e) => {
            // An unknown username warns the same way a wrong password does
            if matches!(e, diesel::result::Error::NotFound) {
                warn!("Failed login attempt");
            }
            return Err(e.into());
        }
    };

    let is_valid = verify_password(&payload.password, &admin.password_hash)?;
    if !is_valid {
        warn!("Failed login attempt");
        return Err(LoginError::InvalidCredentials);
    }

    let token = token::issue(
        &admin.username,
        &state.auth.token_secret,
        state.auth.token_ttl_seconds,
    )?;

    debug!(username = %admin.username, "successful login");

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        username: admin.username,
        email: admin.email,
    }))
}

/// POST /api/auth/validate
/// Confirms a bearer token and that its admin account still exists. Every
/// failure mode is a 401 with `valid: false`; only the reason differs.
pub async fn post_validate(State(state): State<AuthState>, headers: HeaderMap) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return rejection("Invalid token format");
    };

    match check_token(&state, token).await {
        Ok(Some(identity)) => (StatusCode::OK, Json(identity)).into_response(),
        Ok(None) => rejection("Invalid or expired token"),
        Err(e) => {
            debug!(error = %e, "token validation aborted");
            rejection("Token validation failed")
        }
    }
}

/// The token payload, if the Authorization header carries a bearer token.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Ok(Some) when the token verifies and its account exists, Ok(None) when
/// verification fails, Err on structural or database failures.
async fn check_token(state: &AuthState, token: &str) -> Result<Option<TokenIdentity>, anyhow::Error> {
    let subject = token::extract_subject(token)?;
    if !token::verify(token, &subject, &state.auth.token_secret)? {
        return Ok(None);
    }

    let mut conn = state.pool.get().await?;
    match repo::admin_by_username(&mut conn, &subject).await {
        Ok(admin) => Ok(Some(TokenIdentity {
            valid: true,
            username: admin.username,
            email: admin.email,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn rejection(reason: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(TokenRejection {
            valid: false,
            error: reason.to_string(),
        }),
    )
        .into_response()
}
