//! HTTP client for the remote settings endpoint.
//!
//! The endpoint fronts the hosting platform's blob store and exposes the
//! settings document under a single well-known key: `GET` returns
//! `{ "settings": {...} }`, `POST { "settings": {...} }` overwrites the
//! stored document. The document has no versioning or locking, so the
//! last writer wins.

use anyhow::{Context, Result};
use async_trait::async_trait;
use praiser_core::PraiserError;
use praiser_core::config::RemoteConfig;
use praiser_core::settings::{PartialSettings, Settings, SettingsRepository, merge_defaults};
use reqwest::header::CACHE_CONTROL;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings repository backed by the remote settings endpoint.
pub struct RemoteSettingsRepository {
    http_client: reqwest::Client,
    endpoint: String,
}

impl RemoteSettingsRepository {
    /// Creates a remote repository from configuration.
    ///
    /// Returns `None` when no endpoint is configured; the application
    /// then runs against the local cache only.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &RemoteConfig) -> praiser_core::Result<Option<Self>> {
        if !config.is_configured() {
            return Ok(None);
        }

        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_string();

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PraiserError::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Some(Self {
            http_client,
            endpoint,
        }))
    }

    /// The configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SettingsRepository for RemoteSettingsRepository {
    async fn load(&self) -> Result<Option<Settings>> {
        // Cache-busting nonce: the blob store sits behind a CDN and a
        // stale read here would resurrect old settings on every launch.
        let url = format!("{}?t={}", self.endpoint, uuid::Uuid::new_v4().simple());

        let response = self
            .http_client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .context("Settings fetch failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(
                PraiserError::remote(format!("settings fetch failed ({}): {}", status, body))
                    .into(),
            );
        }

        let envelope: SettingsEnvelope = response
            .json()
            .await
            .context("Failed to parse settings response")?;

        Ok(Some(merge_defaults(envelope.settings)))
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&SaveRequest { settings })
            .send()
            .await
            .context("Settings save request failed")?;

        let status = response.status();
        if status.is_success() {
            let result: SaveResponse = response
                .json()
                .await
                .context("Failed to parse save response")?;
            tracing::debug!(
                success = result.success,
                url = result.url.as_deref().unwrap_or(""),
                pathname = result.pathname.as_deref().unwrap_or(""),
                "Settings saved to remote store"
            );
            Ok(())
        } else {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => match body.details {
                    Some(details) => format!("{}: {}", body.error, details),
                    None => body.error,
                },
                Err(_) => "unknown".to_string(),
            };
            Err(
                PraiserError::remote(format!("settings save rejected ({}): {}", status, message))
                    .into(),
            )
        }
    }
}

/// `GET` response wrapper: `{ "settings": {...} }`.
#[derive(Deserialize)]
struct SettingsEnvelope {
    settings: PartialSettings,
}

/// `POST` request body: `{ "settings": {...} }`.
#[derive(Serialize)]
struct SaveRequest<'a> {
    settings: &'a Settings,
}

/// Successful `POST` response.
#[derive(Deserialize)]
struct SaveResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    pathname: Option<String>,
}

/// Failure `POST` response.
#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    details: Option<String>,
}
