//! HTTP artwork fetcher
//!
//! Fetches album art from the player core's image service. Requests run as
//! detached tasks; completions re-enter the event loop as
//! [`AppEvent::ArtworkReady`] messages, where the controller decides
//! whether the result is still current.

use tokio::sync::mpsc;

use display_core::{ArtworkFetchError, ArtworkImage, ArtworkSource};

use crate::driver::AppEvent;

/// Image request parameters: fit-scaled square art for the panel
const IMAGE_QUERY: &str = "scale=fit&width=360&height=360";

pub struct HttpArtworkSource {
    endpoint: String,
    http: reqwest::Client,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl HttpArtworkSource {
    pub fn new(endpoint: impl Into<String>, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
            tx,
        }
    }

    fn image_url(&self, key: &str) -> String {
        format!(
            "{}/image/{}?{}",
            self.endpoint.trim_end_matches('/'),
            key,
            IMAGE_QUERY
        )
    }
}

impl ArtworkSource for HttpArtworkSource {
    fn request(&mut self, key: &str) {
        let url = self.image_url(key);
        let http = self.http.clone();
        let tx = self.tx.clone();
        let key = key.to_string();

        tokio::spawn(async move {
            let result = fetch(&http, &url, &key).await;
            let _ = tx.send(AppEvent::ArtworkReady { key, result });
        });
    }
}

async fn fetch(
    http: &reqwest::Client,
    url: &str,
    key: &str,
) -> Result<ArtworkImage, ArtworkFetchError> {
    let error = |reason: String| ArtworkFetchError {
        key: key.to_string(),
        reason,
    };

    let response = http
        .get(url)
        .send()
        .await
        .map_err(|err| error(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(error(format!("image service returned {}", status)));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();

    let data = response
        .bytes()
        .await
        .map_err(|err| error(err.to_string()))?;

    Ok(ArtworkImage { data, content_type })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_image_url_shape() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let source = HttpArtworkSource::new("http://192.168.0.206:9204", tx);
        assert_eq!(
            source.image_url("art-1"),
            "http://192.168.0.206:9204/image/art-1?scale=fit&width=360&height=360"
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_reports_error_completion() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        // Unroutable port: the fetch fails fast with a connect error.
        let mut source = HttpArtworkSource::new("http://127.0.0.1:1", tx);
        source.request("art-1");

        match rx.recv().await {
            Some(AppEvent::ArtworkReady { key, result }) => {
                assert_eq!(key, "art-1");
                assert!(result.is_err());
            }
            other => panic!("expected artwork completion, got {:?}", other),
        }
    }
}
