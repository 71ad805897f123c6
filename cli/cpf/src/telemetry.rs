//! Anonymous, opt-in usage telemetry.
//!
//! When enabled, each command reports its name, whether it succeeded, the
//! error kind on failure, and the OS, architecture, and tool version. CPF
//! values and command arguments are never sent.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::TelemetryConfig;

/// Default collector endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://app.posthog.com/capture";

/// Environment variable holding the collector API key.
pub const API_KEY_ENV: &str = "CPF_TELEMETRY_API_KEY";

/// Environment variable overriding the collector endpoint.
pub const ENDPOINT_ENV: &str = "CPF_TELEMETRY_ENDPOINT";

/// Upper bound on the time spent delivering one event.
const SEND_TIMEOUT: Duration = Duration::from_secs(2);

/// Event name reported for every command.
const EVENT_NAME: &str = "cli_command";

/// A usage event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub command: String,
    pub success: bool,
    pub error: Option<String>,
    pub os: &'static str,
    pub arch: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// Build an event for the running binary.
    pub fn new(command: &str, success: bool, error: Option<&str>) -> Self {
        Self {
            command: command.to_string(),
            success,
            error: error.map(str::to_string),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now(),
        }
    }

    /// Anonymous identifier shared by every install on the same platform.
    fn distinct_id(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }
}

/// Collector wire format.
#[derive(Debug, Serialize)]
struct CapturePayload<'a> {
    api_key: &'a str,
    event: &'static str,
    distinct_id: String,
    properties: Map<String, Value>,
    timestamp: String,
}

impl<'a> CapturePayload<'a> {
    fn new(api_key: &'a str, event: &Event) -> Self {
        let timestamp = event.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut properties = Map::new();
        properties.insert("command".to_string(), Value::from(event.command.clone()));
        properties.insert("success".to_string(), Value::from(event.success));
        properties.insert("os".to_string(), Value::from(event.os));
        properties.insert("arch".to_string(), Value::from(event.arch));
        properties.insert("version".to_string(), Value::from(event.version));
        properties.insert("timestamp".to_string(), Value::from(timestamp.clone()));
        if let Some(error) = &event.error {
            properties.insert("error".to_string(), Value::from(error.clone()));
        }

        Self {
            api_key,
            event: EVENT_NAME,
            distinct_id: event.distinct_id(),
            properties,
            timestamp,
        }
    }
}

/// Telemetry state for one CLI invocation.
#[derive(Debug, Clone)]
pub struct Telemetry {
    config: TelemetryConfig,
    config_dir: Option<PathBuf>,
    api_key: Option<String>,
    endpoint: String,
}

impl Telemetry {
    /// Load telemetry settings from `config_dir` and the environment.
    ///
    /// Failures degrade to a disabled reporter; telemetry never blocks a
    /// command.
    pub fn init(config_dir: Option<PathBuf>) -> Self {
        let config = match config_dir.as_deref() {
            Some(dir) => TelemetryConfig::load_from(dir).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "telemetry config unavailable");
                TelemetryConfig::default()
            }),
            None => TelemetryConfig::default(),
        };

        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .or_else(|| option_env!("CPF_TELEMETRY_API_KEY").map(str::to_string))
            .filter(|key| !key.is_empty());

        let endpoint = std::env::var(ENDPOINT_ENV)
            .ok()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Self::with_settings(config, config_dir, api_key, endpoint)
    }

    /// Build a reporter with explicit settings.
    pub fn with_settings(
        config: TelemetryConfig,
        config_dir: Option<PathBuf>,
        api_key: Option<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            config,
            config_dir,
            api_key,
            endpoint: endpoint.into(),
        }
    }

    /// Whether the user opted in.
    pub fn opted_in(&self) -> bool {
        self.config.enabled
    }

    /// Whether events will actually be sent.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled && self.api_key.is_some()
    }

    /// Persist the opt-in flag.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        let dir = self
            .config_dir
            .as_deref()
            .ok_or(crate::error::CliError::ConfigDirUnavailable)?;
        self.config.enabled = enabled;
        self.config
            .save_to(dir)
            .context("Failed to save telemetry config")
    }

    /// Report a command outcome if telemetry is enabled.
    ///
    /// Delivery errors are logged and otherwise ignored.
    pub async fn track(&self, command: &str, success: bool, error: Option<&str>) {
        if !self.is_enabled() {
            return;
        }

        let event = Event::new(command, success, error);
        match self.send(&event).await {
            Ok(()) => tracing::debug!(command, "telemetry event delivered"),
            Err(e) => tracing::debug!(error = %e, "telemetry event not delivered"),
        }
    }

    async fn send(&self, event: &Event) -> Result<()> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(());
        };

        let payload = CapturePayload::new(api_key, event);
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        let response = client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .context("Failed to send telemetry event")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("unexpected status code: {}", status.as_u16());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn reporter(enabled: bool, api_key: Option<&str>, endpoint: &str) -> Telemetry {
        Telemetry::with_settings(
            TelemetryConfig { enabled },
            None,
            api_key.map(str::to_string),
            endpoint,
        )
    }

    #[test]
    fn test_enabled_requires_opt_in_and_key() {
        assert!(!reporter(false, Some("key"), DEFAULT_ENDPOINT).is_enabled());
        assert!(!reporter(true, None, DEFAULT_ENDPOINT).is_enabled());
        assert!(reporter(true, Some("key"), DEFAULT_ENDPOINT).is_enabled());
    }

    #[test]
    fn test_payload_shape() {
        let event = Event::new("validate", false, Some("invalid_length"));
        let payload = serde_json::to_value(CapturePayload::new("phc_test", &event)).unwrap();

        assert_eq!(payload["api_key"], "phc_test");
        assert_eq!(payload["event"], "cli_command");
        assert_eq!(
            payload["distinct_id"],
            format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
        );
        assert_eq!(payload["properties"]["command"], "validate");
        assert_eq!(payload["properties"]["success"], false);
        assert_eq!(payload["properties"]["error"], "invalid_length");
        assert_eq!(payload["properties"]["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_payload_omits_missing_error() {
        let event = Event::new("generate", true, None);
        let payload = serde_json::to_value(CapturePayload::new("k", &event)).unwrap();
        assert!(payload["properties"].get("error").is_none());
    }

    #[test]
    fn test_set_enabled_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut telemetry = Telemetry::with_settings(
            TelemetryConfig::default(),
            Some(dir.path().to_path_buf()),
            None,
            DEFAULT_ENDPOINT,
        );
        telemetry.set_enabled(true).unwrap();
        assert!(telemetry.opted_in());
        assert!(TelemetryConfig::load_from(dir.path()).unwrap().enabled);
    }

    #[test]
    fn test_set_enabled_without_dir_fails() {
        let mut telemetry = reporter(false, None, DEFAULT_ENDPOINT);
        assert!(telemetry.set_enabled(true).is_err());
    }

    #[tokio::test]
    async fn test_track_posts_event() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/capture"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let telemetry = reporter(true, Some("phc_test"), &format!("{}/capture", server.uri()));
        telemetry.track("format", true, None).await;

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["properties"]["command"], "format");
        assert_eq!(body["properties"]["success"], true);
    }

    #[tokio::test]
    async fn test_track_disabled_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let telemetry = reporter(false, Some("phc_test"), &server.uri());
        telemetry.track("validate", true, None).await;
    }

    #[tokio::test]
    async fn test_track_ignores_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let telemetry = reporter(true, Some("phc_test"), &server.uri());
        assert!(telemetry.send(&Event::new("validate", true, None)).await.is_err());
        telemetry.track("validate", true, None).await;
    }
}
