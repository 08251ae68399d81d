use anyhow::Context as _;
use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

pub const API_VERSION_HEADER: &str = "ZUMO-API-VERSION";
pub const API_VERSION: &str = "2.0.0";
pub const AUTH_HEADER: &str = "X-ZUMO-AUTH";

/// Blocking HTTP client that attaches the table API headers and the bearer
/// token to every request. One instance (and one token) serves a whole run.
pub struct ApiClient {
    http: Client,
    token: String,
}

impl ApiClient {
    pub fn new(token: String) -> anyhow::Result<Self> {
        // Target backends are local or test deployments behind self-signed
        // certificates; server identity is not verified.
        let http = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .context("build http client")?;

        Ok(Self { http, token })
    }

    /// Sends one request and returns the response body. A connection failure
    /// or a non-success status is an error; there is no retry.
    pub fn send(&self, method: Method, url: Url, body: Vec<u8>) -> anyhow::Result<Vec<u8>> {
        let response = self
            .http
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(API_VERSION_HEADER, API_VERSION)
            .header(AUTH_HEADER, self.token.as_str())
            .body(body)
            .send()
            .with_context(|| format!("{method} {url}"))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .with_context(|| format!("read response body: {method} {url}"))?;

        if !status.is_success() {
            anyhow::bail!(
                "{method} {url} returned {status}: {}",
                String::from_utf8_lossy(&bytes)
            );
        }

        tracing::debug!(%method, %url, %status, "request succeeded");
        Ok(bytes.to_vec())
    }

    pub fn post(&self, url: Url, body: Vec<u8>) -> anyhow::Result<Vec<u8>> {
        self.send(Method::POST, url, body)
    }

    pub fn get(&self, url: Url) -> anyhow::Result<Vec<u8>> {
        self.send(Method::GET, url, Vec::new())
    }
}
