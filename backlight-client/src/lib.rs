//! Backlight power switch client
//!
//! Drives the external backlight service with fire-and-forget HTTP
//! commands: `POST {base}/set-display/{on|off}`. Failures are logged and
//! never retried; nothing here may block or fail the state machine that
//! issued the command.

use std::sync::Arc;

use thiserror::Error;

use display_core::PowerSwitch;

/// Errors from the backlight service
#[derive(Debug, Error)]
pub enum BacklightError {
    /// The configured endpoint is not a valid URL
    #[error("invalid backlight endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The request could not be sent
    #[error("backlight request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("backlight service returned {status}")]
    Status { status: reqwest::StatusCode },
}

/// HTTP client for the backlight service
#[derive(Debug, Clone)]
pub struct BacklightClient {
    endpoint: String,
    http: reqwest::Client,
}

impl BacklightClient {
    /// Create a client, validating the endpoint URL
    pub fn new(endpoint: &str) -> Result<Self, BacklightError> {
        url::Url::parse(endpoint)?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        })
    }

    /// Switch the display backlight on or off
    pub async fn set_display(&self, on: bool) -> Result<(), BacklightError> {
        let response = self.http.post(self.command_url(on)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BacklightError::Status { status });
        }
        Ok(())
    }

    fn command_url(&self, on: bool) -> String {
        let command = if on { "on" } else { "off" };
        format!("{}/set-display/{}", self.endpoint, command)
    }
}

/// Fire-and-forget [`PowerSwitch`] adapter
///
/// Each command runs in a detached task; the caller never waits on the
/// result and errors surface only in the log. Must be used from within a
/// tokio runtime.
pub struct FireAndForget {
    client: Arc<BacklightClient>,
}

impl FireAndForget {
    pub fn new(client: BacklightClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl PowerSwitch for FireAndForget {
    fn set_power(&mut self, on: bool) {
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            tracing::info!(on, "sending backlight command");
            if let Err(err) = client.set_display(on).await {
                tracing::warn!(%err, on, "backlight command failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_command_url() {
        let client = BacklightClient::new("http://192.168.0.114:8713").unwrap();
        assert_eq!(
            client.command_url(true),
            "http://192.168.0.114:8713/set-display/on"
        );
        assert_eq!(
            client.command_url(false),
            "http://192.168.0.114:8713/set-display/off"
        );
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let client = BacklightClient::new("http://host:8713/").unwrap();
        assert_eq!(client.command_url(true), "http://host:8713/set-display/on");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        assert!(matches!(
            BacklightClient::new("not a url"),
            Err(BacklightError::InvalidEndpoint(_))
        ));
    }

    #[tokio::test]
    async fn test_set_display_posts_command() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/set-display/on")
            .with_status(200)
            .create_async()
            .await;

        let client = BacklightClient::new(&server.url()).unwrap();
        client.set_display(true).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/set-display/off")
            .with_status(500)
            .create_async()
            .await;

        let client = BacklightClient::new(&server.url()).unwrap();
        let err = client.set_display(false).await.unwrap_err();
        assert!(matches!(err, BacklightError::Status { .. }));
    }

    #[tokio::test]
    async fn test_fire_and_forget_delivers_command() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/set-display/on")
            .with_status(200)
            .create_async()
            .await;

        let client = BacklightClient::new(&server.url()).unwrap();
        let mut switch = FireAndForget::new(client);
        switch.set_power(true);

        // The command runs detached; poll until it lands.
        for _ in 0..200 {
            if mock.matched_async().await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("backlight command never arrived");
    }
}
