//! Remote preference service client.

use async_trait::async_trait;
use url::Url;

use crate::error::PrefsError;
use crate::model::{Preferences, RemotePreferences};

/// Client trait for the remote preference endpoint.
///
/// `fetch` and `store` target the same resource, so both are idempotent
/// and safe to retry or abandon; the store fires writes without awaiting
/// them.
#[async_trait]
pub trait PreferenceService: Send + Sync {
    /// Read the stored preference record.
    async fn fetch(&self) -> Result<RemotePreferences, PrefsError>;

    /// Replace the stored record with the full reconciled one. The service
    /// has no partial-patch semantics.
    async fn store(&self, prefs: &Preferences) -> Result<(), PrefsError>;
}

/// HTTP implementation: GET/PUT of a JSON object on one endpoint.
pub struct HttpPreferenceService {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpPreferenceService {
    /// Create a client for the given preference endpoint.
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Create a client reusing an existing `reqwest::Client` (shared
    /// connection pool with the rest of the console).
    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl PreferenceService for HttpPreferenceService {
    async fn fetch(&self) -> Result<RemotePreferences, PrefsError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn store(&self, prefs: &Preferences) -> Result<(), PrefsError> {
        self.client
            .put(self.endpoint.clone())
            .json(&RemotePreferences::from(prefs))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
