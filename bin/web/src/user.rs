//! Server functions for identity and navigation settings.

use crate::config::NavigationConfig;
use bankdash_platform_access::Identity;
use leptos::prelude::*;

/// The signed-in user, resolved once per page load by the shell.
pub type CurrentUser = Resource<Result<Option<Identity>, ServerFnError>>;

/// Returns the user resource the shell put in context.
pub fn use_current_user() -> CurrentUser {
    expect_context::<CurrentUser>()
}

/// Returns the signed-in user behind the `session` cookie.
///
/// Any failure (no cookie, expired token, unreachable provider) reads as
/// signed out.
#[server]
pub async fn get_current_user() -> Result<Option<Identity>, ServerFnError> {
    use crate::auth::SESSION_COOKIE;
    use axum::Extension;
    use axum_extra::extract::CookieJar;
    use bankdash_platform_access::IdentityToolkitClient;

    let jar: CookieJar = leptos_axum::extract().await?;
    let Extension(toolkit): Extension<IdentityToolkitClient> = leptos_axum::extract().await?;

    let Some(session_cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };

    match toolkit.lookup(session_cookie.value()).await {
        Ok(identity) => Ok(Some(identity)),
        Err(e) => {
            tracing::debug!(error = %e, "session token did not resolve to a user");
            Ok(None)
        }
    }
}

/// Returns the client-side navigation settings.
#[server]
pub async fn get_navigation_config() -> Result<NavigationConfig, ServerFnError> {
    use axum::Extension;

    let Extension(config): Extension<NavigationConfig> = leptos_axum::extract().await?;
    Ok(config)
}
