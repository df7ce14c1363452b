//! REST client for the hosted identity toolkit.
//!
//! Used server-side to sign users in and up with email and password, and
//! to turn a session token back into an [`Identity`].

use crate::backend::BackendAuth;
use crate::error::BackendError;
use crate::user::Identity;
use bankdash_core::UserId;
use bankdash_core::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Outcome of a successful sign-in or sign-up.
#[derive(Debug, Clone)]
pub struct SignInResult {
    /// The signed-in user.
    pub identity: Identity,
    /// Short-lived token identifying the session.
    pub id_token: String,
    /// Token for refreshing the session.
    pub refresh_token: String,
    /// Lifetime of `id_token`, in seconds.
    pub expires_in_seconds: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountInfo {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Identity toolkit REST client bound to one backend project.
#[derive(Debug, Clone)]
pub struct IdentityToolkitClient {
    auth: BackendAuth,
    http: reqwest::Client,
}

impl IdentityToolkitClient {
    /// Creates a client for the given auth handle.
    #[must_use]
    pub fn new(auth: BackendAuth) -> Self {
        Self {
            auth,
            http: reqwest::Client::new(),
        }
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` for bad credentials and transport
    /// errors for anything else.
    #[instrument(skip(self, password))]
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInResult, BackendError> {
        let response: TokenResponse = self
            .call(
                "signInWithPassword",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        sign_in_result(response)
    }

    /// Creates an account with email and password and signs it in.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` when the email is taken or the
    /// password is too weak.
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInResult, BackendError> {
        let response: TokenResponse = self
            .call(
                "signUp",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        sign_in_result(response)
    }

    /// Looks up the account behind a session token.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` for expired or invalid tokens and
    /// `BackendError::UnknownAccount` when no account matches.
    #[instrument(skip_all)]
    pub async fn lookup(&self, id_token: &str) -> Result<Identity, BackendError> {
        let response: LookupResponse = self.call("lookup", &LookupRequest { id_token }).await?;
        let account = response
            .users
            .into_iter()
            .next()
            .ok_or(BackendError::UnknownAccount)?;
        identity_from_parts(account.local_id, account.email, account.display_name)
    }

    async fn call<Req, Resp>(&self, method: &str, body: &Req) -> Result<Resp, BackendError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.auth.endpoint(method);
        let endpoint = format!("accounts:{method}");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::RequestFailed {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        debug!(%endpoint, status = status.as_u16(), "identity toolkit responded");

        if !status.is_success() {
            return Err(rejection(&text).into());
        }

        serde_json::from_str(&text).map_err(|e| {
            BackendError::InvalidResponse {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

fn sign_in_result(response: TokenResponse) -> Result<SignInResult, BackendError> {
    let expires_in_seconds = response
        .expires_in
        .as_deref()
        .map(str::parse::<u64>)
        .transpose()
        .map_err(|e| BackendError::InvalidResponse {
            reason: format!("expiresIn: {e}"),
        })?
        .unwrap_or(3600);

    Ok(SignInResult {
        identity: identity_from_parts(response.local_id, response.email, response.display_name)?,
        id_token: response.id_token,
        refresh_token: response.refresh_token,
        expires_in_seconds,
    })
}

fn identity_from_parts(
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
) -> Result<Identity, BackendError> {
    let uid: UserId = local_id.parse().map_err(|e: bankdash_core::ParseIdError| {
        BackendError::InvalidResponse {
            reason: e.to_string(),
        }
    })?;
    Ok(Identity::new(uid)
        .with_email(email)
        .with_display_name(display_name.filter(|name| !name.is_empty())))
}

/// Extracts the provider's error code from an error response body.
fn rejection(body: &str) -> BackendError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => BackendError::Rejected {
            code: envelope.error.message,
        },
        Err(_) => BackendError::InvalidResponse {
            reason: "unrecognized error body".to_string(),
        },
    }
}
