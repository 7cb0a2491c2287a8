//! Optional remote mirror.
//!
//! When an endpoint is configured, the full public snapshot is pushed after
//! each successful local mutation. The mirror is best-effort: a failed push
//! is logged and surfaced as a soft warning, never an error to the caller.
//! There are no retries and no backoff; the local store is the source of
//! truth.

use crate::directory::model::Agent;
use crate::error::ApiError;
use chrono::Utc;
use serde::Serialize;
use std::time::Duration;

/// Environment variable naming the mirror endpoint.
pub const ENDPOINT_ENV: &str = "OXO_SYNC_ENDPOINT";
/// Environment variable holding the bearer token, optional.
pub const TOKEN_ENV: &str = "OXO_SYNC_TOKEN";

/// Mirror configuration, resolved from environment over config file values.
/// An absent endpoint silently disables sync.
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    pub endpoint: Option<String>,
    pub token: Option<String>,
}

impl SyncConfig {
    /// Resolve with environment taking precedence over file-provided values.
    pub fn resolve(file_endpoint: Option<String>, file_token: Option<String>) -> Self {
        let endpoint = std::env::var(ENDPOINT_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or(file_endpoint);
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or(file_token);
        Self { endpoint, token }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotPayload<'a> {
    agents: &'a [Agent],
    last_update: i64,
}

/// Pushes the public agent snapshot to a configured HTTP endpoint.
pub struct RemoteMirror {
    endpoint: String,
    token: Option<String>,
    client: reqwest::blocking::Client,
}

impl RemoteMirror {
    /// Build a mirror from config; `None` when no endpoint is configured.
    pub fn from_config(config: &SyncConfig) -> Option<Self> {
        let endpoint = config.endpoint.clone()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .ok()?;
        Some(Self {
            endpoint,
            token: config.token.clone(),
            client,
        })
    }

    /// Push the full public snapshot. Notes are `serde(skip)` on the agent
    /// record, so the mirrored payload can never carry them.
    pub fn push_snapshot(&self, agents: &[Agent]) -> Result<(), ApiError> {
        let payload = SnapshotPayload {
            agents,
            last_update: Utc::now().timestamp_millis(),
        };
        let mut request = self.client.put(&self.endpoint).json(&payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .map_err(|e| ApiError::SyncError(format!("push failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(ApiError::SyncError(format!(
                "push rejected with status {}",
                response.status()
            )));
        }
        tracing::debug!(endpoint = %self.endpoint, count = agents.len(), "mirrored snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::model::AgentDraft;

    #[test]
    fn unconfigured_sync_yields_no_mirror() {
        let config = SyncConfig::default();
        assert!(!config.is_configured());
        assert!(RemoteMirror::from_config(&config).is_none());
    }

    #[test]
    fn push_snapshot_hits_endpoint() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/snapshot")
            .match_header("authorization", "Bearer sekrit")
            .with_status(200)
            .create();

        let mirror = RemoteMirror::from_config(&SyncConfig {
            endpoint: Some(format!("{}/snapshot", server.url())),
            token: Some("sekrit".to_string()),
        })
        .unwrap();

        let agents = vec![AgentDraft {
            name: "Ana".to_string(),
            ..Default::default()
        }
        .into_agent()];
        mirror.push_snapshot(&agents).unwrap();
        mock.assert();
    }

    #[test]
    fn rejected_push_is_a_sync_error() {
        let mut server = mockito::Server::new();
        server.mock("PUT", "/snapshot").with_status(500).create();

        let mirror = RemoteMirror::from_config(&SyncConfig {
            endpoint: Some(format!("{}/snapshot", server.url())),
            token: None,
        })
        .unwrap();

        assert!(matches!(
            mirror.push_snapshot(&[]),
            Err(ApiError::SyncError(_))
        ));
    }
}
