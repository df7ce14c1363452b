//! Hosted backend configuration and service handles.
//!
//! The dashboard talks to one hosted backend project that provides
//! authentication, a document database and serverless functions. This
//! module holds the project configuration and derives each service's
//! endpoints from it; only authentication is used for navigation.

use crate::error::BackendError;
use bankdash_core::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Configuration for the hosted backend project.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Public web API key of the project.
    api_key: String,
    /// Project identifier.
    project_id: String,
    /// Domain serving the hosted sign-in handlers.
    /// Default: "<project_id>.firebaseapp.com"
    #[serde(default)]
    auth_domain: Option<String>,
    /// Storage bucket name.
    /// Default: "<project_id>.firebasestorage.app"
    #[serde(default)]
    storage_bucket: Option<String>,
    /// Sender id for push messaging.
    #[serde(default)]
    messaging_sender_id: String,
    /// Registered web app id.
    #[serde(default)]
    app_id: String,
    /// Analytics measurement id.
    #[serde(default)]
    measurement_id: Option<String>,
    /// Base URL of the identity toolkit REST API.
    /// Default: "https://identitytoolkit.googleapis.com/v1"
    #[serde(default = "default_identity_toolkit_url")]
    identity_toolkit_url: String,
    /// Base URL of the document database REST API.
    /// Default: "https://firestore.googleapis.com/v1"
    #[serde(default = "default_firestore_url")]
    firestore_url: String,
    /// Region hosting the serverless functions.
    /// Default: "us-central1"
    #[serde(default = "default_functions_region")]
    functions_region: String,
}

fn default_identity_toolkit_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

fn default_firestore_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_functions_region() -> String {
    "us-central1".to_string()
}

impl BackendConfig {
    /// Creates a configuration with defaults for optional fields.
    #[must_use]
    pub fn new(api_key: String, project_id: String) -> Self {
        Self {
            api_key,
            project_id,
            auth_domain: None,
            storage_bucket: None,
            messaging_sender_id: String::new(),
            app_id: String::new(),
            measurement_id: None,
            identity_toolkit_url: default_identity_toolkit_url(),
            firestore_url: default_firestore_url(),
            functions_region: default_functions_region(),
        }
    }

    /// Sets the registered web app id.
    #[must_use]
    pub fn with_app_id(mut self, app_id: String) -> Self {
        self.app_id = app_id;
        self
    }

    /// Sets the messaging sender id.
    #[must_use]
    pub fn with_messaging_sender_id(mut self, sender_id: String) -> Self {
        self.messaging_sender_id = sender_id;
        self
    }

    /// Sets the analytics measurement id.
    #[must_use]
    pub fn with_measurement_id(mut self, measurement_id: Option<String>) -> Self {
        self.measurement_id = measurement_id;
        self
    }

    /// Overrides the identity toolkit base URL (e.g. for a local emulator).
    #[must_use]
    pub fn with_identity_toolkit_url(mut self, url: String) -> Self {
        self.identity_toolkit_url = url;
        self
    }

    /// Overrides the functions region.
    #[must_use]
    pub fn with_functions_region(mut self, region: String) -> Self {
        self.functions_region = region;
        self
    }

    /// Returns the public web API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the project identifier.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Returns the auth domain, derived from the project id when unset.
    #[must_use]
    pub fn auth_domain(&self) -> String {
        self.auth_domain
            .clone()
            .unwrap_or_else(|| format!("{}.firebaseapp.com", self.project_id))
    }

    /// Returns the storage bucket, derived from the project id when unset.
    #[must_use]
    pub fn storage_bucket(&self) -> String {
        self.storage_bucket
            .clone()
            .unwrap_or_else(|| format!("{}.firebasestorage.app", self.project_id))
    }

    /// Returns the messaging sender id.
    #[must_use]
    pub fn messaging_sender_id(&self) -> &str {
        &self.messaging_sender_id
    }

    /// Returns the web app id.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Returns the analytics measurement id, if configured.
    #[must_use]
    pub fn measurement_id(&self) -> Option<&str> {
        self.measurement_id.as_deref()
    }

    /// Returns the identity toolkit base URL without a trailing slash.
    #[must_use]
    pub fn identity_toolkit_url(&self) -> &str {
        self.identity_toolkit_url.trim_end_matches('/')
    }

    /// Returns the document database base URL without a trailing slash.
    #[must_use]
    pub fn firestore_url(&self) -> &str {
        self.firestore_url.trim_end_matches('/')
    }

    /// Returns the functions region.
    #[must_use]
    pub fn functions_region(&self) -> &str {
        &self.functions_region
    }

    /// Checks that the configuration can address the backend.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), BackendError> {
        if self.api_key.trim().is_empty() {
            return invalid("api_key is empty");
        }
        if self.project_id.trim().is_empty() {
            return invalid("project_id is empty");
        }
        if !is_http_url(&self.identity_toolkit_url) {
            return invalid("identity_toolkit_url must be an http(s) URL");
        }
        if !is_http_url(&self.firestore_url) {
            return invalid("firestore_url must be an http(s) URL");
        }
        if self.functions_region.trim().is_empty() {
            return invalid("functions_region is empty");
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> Result<(), BackendError> {
    Err(BackendError::InvalidConfig {
        reason: reason.to_string(),
    }
    .into())
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// An initialized connection to the hosted backend project.
#[derive(Debug, Clone)]
pub struct BackendApp {
    config: Arc<BackendConfig>,
}

impl BackendApp {
    /// Validates the configuration and wires the service handles.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidConfig` if the configuration is unusable.
    pub fn initialize(config: BackendConfig) -> Result<Self, BackendError> {
        config.validate()?;
        info!(
            project_id = config.project_id(),
            auth_domain = %config.auth_domain(),
            "backend app initialized"
        );
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Returns the project configuration.
    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Returns the authentication service handle.
    #[must_use]
    pub fn auth(&self) -> BackendAuth {
        BackendAuth {
            config: Arc::clone(&self.config),
        }
    }

    /// Returns the document database handle.
    #[must_use]
    pub fn database(&self) -> DocumentDatabase {
        DocumentDatabase {
            config: Arc::clone(&self.config),
        }
    }

    /// Returns the serverless functions handle.
    #[must_use]
    pub fn functions(&self) -> Functions {
        Functions {
            config: Arc::clone(&self.config),
        }
    }
}

/// Handle to the hosted authentication service.
#[derive(Debug, Clone)]
pub struct BackendAuth {
    config: Arc<BackendConfig>,
}

impl BackendAuth {
    /// Returns the project configuration.
    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// URL of an identity toolkit `accounts:<method>` call, keyed with the API key.
    #[must_use]
    pub fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/accounts:{}?key={}",
            self.config.identity_toolkit_url(),
            method,
            self.config.api_key()
        )
    }

    /// Creates a REST client for the identity toolkit.
    #[cfg(feature = "rest")]
    #[must_use]
    pub fn client(&self) -> crate::toolkit::IdentityToolkitClient {
        crate::toolkit::IdentityToolkitClient::new(self.clone())
    }
}

/// Handle to the hosted document database.
#[derive(Debug, Clone)]
pub struct DocumentDatabase {
    config: Arc<BackendConfig>,
}

impl DocumentDatabase {
    /// Root URL of the project's default database documents.
    #[must_use]
    pub fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.config.firestore_url(),
            self.config.project_id()
        )
    }

    /// URL of a document or collection, e.g. `users/uid_42`.
    #[must_use]
    pub fn document_url(&self, path: &str) -> String {
        format!("{}/{}", self.documents_url(), path.trim_matches('/'))
    }
}

/// Handle to the hosted serverless functions.
#[derive(Debug, Clone)]
pub struct Functions {
    config: Arc<BackendConfig>,
}

impl Functions {
    /// Base URL of the project's functions in the configured region.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "https://{}-{}.cloudfunctions.net",
            self.config.functions_region(),
            self.config.project_id()
        )
    }

    /// URL of a named callable function.
    #[must_use]
    pub fn callable_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url(), name)
    }
}
