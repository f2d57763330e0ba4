//! HTTP client wrapping reqwest.
//!
//! One attempt per request: no retry on 5xx, no backoff on 429. Redirects
//! are followed and the whole exchange is bounded by the configured timeout.

use crate::types::{FetchConfig, FetchResult};

/// Maximum redirect hops before giving up.
const MAX_REDIRECTS: usize = 10;

/// Response from an HTTP GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Content-Type header, if any.
    pub content_type: Option<String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// HTTP client for document downloads.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Build a client with the configured user agent and timeout.
    pub fn new(config: &FetchConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    /// Perform a single GET and read the whole body.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        let r = self.client.get(url).send().await?;

        let status = r.status().as_u16();
        let final_url = r.url().to_string();
        let content_type = r
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = r.bytes().await?.to_vec();

        Ok(HttpResponse {
            final_url,
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new(&FetchConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_client_timeout_bounds_request() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let mut cfg = FetchConfig::with_base_url(server.uri());
        cfg.timeout = Duration::from_millis(200);
        let client = HttpClient::new(&cfg).unwrap();

        let err = client.get(&cfg.url_for("/slow")).await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_final_url_after_redirect() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
            .mount(&server)
            .await;

        let cfg = FetchConfig::with_base_url(server.uri());
        let resp = HttpClient::new(&cfg)
            .unwrap()
            .get(&cfg.url_for("/old"))
            .await
            .unwrap();

        assert_eq!(resp.status, 200);
        assert!(resp.final_url.ends_with("/new"));
        assert_eq!(resp.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(resp.body, b"%PDF-1.4");
    }
}
