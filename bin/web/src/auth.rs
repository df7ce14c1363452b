//! Email and password sign-in endpoints.
//!
//! The hosted identity toolkit does the actual sign-in; these handlers
//! store the resulting identity token in the `session` cookie and send the
//! browser back to where it was going. Form failures land back on the form
//! with a user-safe message.

use crate::config::SessionConfig;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use bankdash_platform_access::{BackendError, IdentityToolkitClient, SignInResult};
use bankdash_routing::{Location, REDIRECT_PARAM};
use rootcause::prelude::Report;
use serde::Deserialize;
use std::sync::Arc;
use time::Duration as TimeDuration;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Where a signed-in user goes when no safe destination was requested.
const LANDING_PATH: &str = "/index";

/// Shared state for the auth endpoints.
pub struct AppState {
    /// Identity toolkit client for the configured project.
    pub toolkit: IdentityToolkitClient,
    /// Session cookie configuration.
    pub session_config: SessionConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(toolkit: IdentityToolkitClient, session_config: SessionConfig) -> Self {
        Self {
            toolkit,
            session_config,
        }
    }
}

/// Fields posted by the login and register forms.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    email: String,
    password: String,
    #[serde(default)]
    redirect: Option<String>,
}

/// Signs in with email and password.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse, AuthError> {
    let destination = sanitize_redirect(form.redirect.as_deref());
    let result = state
        .toolkit
        .sign_in_with_password(&form.email, &form.password)
        .await
        .map_err(|report| AuthError::from_backend(&report, "/login", &destination))?;

    tracing::info!(uid = %result.identity.uid(), "user signed in");
    Ok((
        jar.add(session_cookie(&result, &state.session_config)),
        Redirect::to(&destination),
    ))
}

/// Creates an account and signs it in.
pub async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse, AuthError> {
    let destination = sanitize_redirect(form.redirect.as_deref());
    let result = state
        .toolkit
        .sign_up(&form.email, &form.password)
        .await
        .map_err(|report| AuthError::from_backend(&report, "/register", &destination))?;

    tracing::info!(uid = %result.identity.uid(), "account registered");
    Ok((
        jar.add(session_cookie(&result, &state.session_config)),
        Redirect::to(&destination),
    ))
}

/// Signs out by clearing the session cookie.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let remove_session = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    (jar.add(remove_session), Redirect::to("/login"))
}

fn session_cookie(result: &SignInResult, config: &SessionConfig) -> Cookie<'static> {
    let token_lifetime =
        TimeDuration::seconds(i64::try_from(result.expires_in_seconds).unwrap_or(i64::MAX));
    let configured = TimeDuration::seconds(config.duration_minutes.clamp(0, i64::MAX / 60) * 60);
    let max_age = token_lifetime.min(configured);

    Cookie::build((SESSION_COOKIE, result.id_token.clone()))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// Returns `requested` if it is a local absolute path, otherwise the
/// landing path.
pub fn sanitize_redirect(requested: Option<&str>) -> String {
    match requested {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => LANDING_PATH.to_string(),
    }
}

/// Authentication errors.
#[derive(Debug)]
pub enum AuthError {
    /// The provider refused the credentials; show the form again.
    Rejected {
        form: &'static str,
        redirect: String,
        message: &'static str,
    },
    /// The provider could not be reached or answered nonsense.
    Unavailable(String),
}

impl AuthError {
    fn from_backend(report: &Report<BackendError>, form: &'static str, redirect: &str) -> Self {
        let error = report.current_context();
        match error {
            BackendError::Rejected { .. } | BackendError::UnknownAccount => {
                tracing::debug!(error = %error, "sign-in rejected");
                Self::Rejected {
                    form,
                    redirect: redirect.to_string(),
                    message: error.user_message(),
                }
            }
            _ => Self::Unavailable(report.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Rejected {
                form,
                redirect,
                message,
            } => {
                let back = Location::parse(form)
                    .with_query(REDIRECT_PARAM, &redirect)
                    .with_query("error", message);
                Redirect::to(&back.full_path()).into_response()
            }
            Self::Unavailable(details) => {
                tracing::error!("Identity toolkit unavailable: {}", details);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Authentication service unavailable",
                )
                    .into_response()
            }
        }
    }
}
