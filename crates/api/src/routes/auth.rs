//! Authentication routes for register, login, logout, and the current user.

use std::sync::LazyLock;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extractors::JsonBody,
    middleware::auth::AuthUser,
};
use tally_core::auth::{
    hash_password, normalize_email, validate_email, validate_password, verify_password,
};
use tally_shared::auth::{AuthResponse, LoginRequest, RegisterRequest};
use tally_shared::{AUTH_COOKIE, AppError};
use tally_store::{UserRecord, UserRepository};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Hash checked against when the email is unknown, so both paths pay for Argon2.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("tally-unknown-account").ok());

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Creates the auth routes that need a session.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

fn base_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Builds the cookie carrying a session token.
fn session_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(token, secure);
    cookie.set_max_age(time::Duration::seconds(max_age_secs));
    cookie
}

/// Builds the cookie that tells the browser to drop the session.
fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(String::new(), secure);
    cookie.make_removal();
    cookie
}

fn invalid_credentials() -> ApiError {
    ApiError(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
}

fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: &UserRecord,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let token = state.jwt_service.issue_token(&user.id, &user.email)?;
    let expires_in = state.jwt_service.expires_in();
    let jar = jar.add(session_cookie(token.clone(), expires_in, state.secure_cookies));

    Ok((
        jar,
        Json(AuthResponse {
            user: user.to_info(),
            token,
            expires_in,
        }),
    ))
}

/// POST /auth/register - Create an account and start a session.
async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = normalize_email(&payload.email);
    validate_email(&email)?;
    validate_password(&payload.password)?;
    let full_name = payload
        .full_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let users = UserRepository::new(state.store.clone());
    if users.email_exists(&email).await? {
        return Err(ApiError::conflict("An account with this email already exists"));
    }

    let password = payload.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;
    let user = users.create(&email, &password_hash, &full_name).await?;

    info!(user_id = %user.id, "User registered");

    let (jar, body) = start_session(&state, jar, &user)?;
    Ok((StatusCode::CREATED, jar, body))
}

/// POST /auth/login - Authenticate and start a session.
///
/// Unknown emails and wrong passwords get the same answer after the same
/// amount of hashing work.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = normalize_email(&payload.email);
    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let users = UserRepository::new(state.store.clone());
    let user = users.find_by_email(&email).await?;

    let password = payload.password;
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let matches = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                let _ = verify_password(&password, hash);
            }
            Ok(false)
        }
    })
    .await??;

    let Some(user) = user else {
        info!("Login attempt for unknown email");
        return Err(invalid_credentials());
    };
    if !matches {
        info!(user_id = %user.id, "Failed login attempt");
        return Err(invalid_credentials());
    }

    info!(user_id = %user.id, "User logged in");

    start_session(&state, jar, &user)
}

/// POST /auth/logout - Clear the session cookie.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(removal_cookie(state.secure_cookies)),
        Json(json!({ "success": true })),
    )
}

/// GET /auth/me - Return the current user.
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<impl IntoResponse> {
    let users = UserRepository::new(state.store.clone());
    let user = users
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    Ok(Json(json!({ "user": user.to_info() })))
}
