// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin session routes (demo single-account login).

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, AuthUser, SESSION_COOKIE, SESSION_DAYS};
use crate::AppState;

/// ID of the single demo admin account.
pub const ADMIN_USER_ID: &str = "1";

/// Login and logout (no session required).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Session introspection (session required).
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(me))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub user: AdminUser,
    /// Same token as the session cookie, for bearer clients
    pub token: String,
}

fn admin_user(state: &AppState) -> AdminUser {
    AdminUser {
        id: ADMIN_USER_ID.to_string(),
        name: state.config.admin_name.clone(),
        email: state.config.admin_email.clone(),
        role: "admin".to_string(),
    }
}

fn session_cookie(value: String, secure: bool, max_age: time::Duration) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

fn credentials_match(state: &AppState, email: &str, password: &str) -> bool {
    let email = email.trim().to_lowercase();
    let expected_email = state.config.admin_email.to_lowercase();

    let email_ok = email.as_bytes().ct_eq(expected_email.as_bytes());
    let password_ok = password
        .as_bytes()
        .ct_eq(state.config.admin_password.as_bytes());
    (email_ok & password_ok).into()
}

/// Check credentials and start a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    body.validate()?;

    if !credentials_match(&state, &body.email, &body.password) {
        tracing::warn!(email = %body.email, "Failed admin login");
        return Err(AppError::InvalidCredentials);
    }

    let token = create_jwt(ADMIN_USER_ID, &state.config.jwt_signing_key)?;

    let cookie = session_cookie(
        token.clone(),
        state.config.secure_cookies(),
        time::Duration::days(SESSION_DAYS),
    );

    tracing::info!(email = %body.email, "Admin logged in");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            user: admin_user(&state),
            token,
        }),
    ))
}

/// End the session by clearing the cookie.
///
/// The removal cookie carries the same attributes as the one set at login.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(session_cookie(
        String::new(),
        state.config.secure_cookies(),
        time::Duration::ZERO,
    ));
    (jar, StatusCode::NO_CONTENT)
}

/// Current admin profile.
async fn me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AdminUser>> {
    if user.user_id != ADMIN_USER_ID {
        return Err(AppError::InvalidToken);
    }
    Ok(Json(admin_user(&state)))
}
