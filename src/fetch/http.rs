// src/fetch/http.rs
// =============================================================================
// Fetches assets over HTTP with reqwest.
//
// Key functionality:
// - One pooled client for the whole run (cheap to share between workers)
// - Browser-like User-Agent on every request
// - Text or binary body, as the caller asks
// - Non-2xx responses and transport failures become MirrorErrors, with
//   transport failures sorted into something a person can act on
// =============================================================================

use super::{Body, Fetch, Fetched, ResponseKind};
use crate::config::MirrorConfig;
use crate::error::MirrorError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &MirrorConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, url: &Url, kind: ResponseKind) -> Result<Fetched, MirrorError> {
        debug!(%url, ?kind, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = match kind {
            ResponseKind::Text => Body::Text(
                response
                    .text()
                    .await
                    .map_err(|e| categorize_error(url, e))?,
            ),
            ResponseKind::Binary => Body::Binary(
                response
                    .bytes()
                    .await
                    .map_err(|e| categorize_error(url, e))?
                    .to_vec(),
            ),
        };

        Ok(Fetched {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

// Turns a reqwest error into a Network error with a readable reason
fn categorize_error(url: &Url, error: reqwest::Error) -> MirrorError {
    let error_string = error.to_string();

    let message = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "could not resolve hostname".to_string()
        } else {
            format!("connection failed: {}", error_string)
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error".to_string()
    } else {
        error_string
    };

    MirrorError::Network {
        url: url.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use wiremock::matchers::{header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&MirrorConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_sends_browser_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/style.css"))
            // header() splits values on commas, and the UA has one
            .and(header_regex("user-agent", "^Mozilla/5\\.0 .*Chrome/91"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("body { color: red }", "text/css"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/style.css", server.uri())).unwrap();
        let fetched = fetcher().get(&url, ResponseKind::Text).await.unwrap();

        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.content_type.as_deref(), Some("text/css"));
        assert_eq!(fetched.body.as_text(), "body { color: red }");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            requests[0].headers.get("user-agent").unwrap(),
            DEFAULT_USER_AGENT
        );
    }

    #[tokio::test]
    async fn test_binary_body_is_untouched() {
        let server = MockServer::start().await;
        let bytes = vec![0x77, 0x4f, 0x46, 0x32, 0x00, 0xff, 0xfe];
        Mock::given(method("GET"))
            .and(path("/fonts/a.woff2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "font/woff2")
                    .set_body_bytes(bytes.clone()),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/fonts/a.woff2", server.uri())).unwrap();
        let fetched = fetcher().get(&url, ResponseKind::Binary).await.unwrap();

        assert_eq!(fetched.body.into_bytes(), bytes);
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/missing.js", server.uri())).unwrap();
        let err = fetcher().get(&url, ResponseKind::Text).await.unwrap_err();

        assert!(matches!(err, MirrorError::Http { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Port 9 (discard) is closed on test machines
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let err = fetcher().get(&url, ResponseKind::Text).await.unwrap_err();

        assert!(matches!(err, MirrorError::Network { .. }));
    }
}
