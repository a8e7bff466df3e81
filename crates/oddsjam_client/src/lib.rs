//! OddsJam page fetcher.
//!
//! A cookie-backed reqwest session with browser-like headers and optional
//! form login. Implements [`DocumentFetcher`] for the cycle.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use common::config::SourceConfig;
use common::{DocumentFetcher, Error, FetchedDocument, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use scraper::{Html, Selector};
use tracing::{debug, error, info, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

static CSRF_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="csrf-token"]"#).expect("static csrf selector")
});

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct OddsJamClient {
    client: reqwest::Client,
    login_url: String,
    login_required: bool,
    credentials: Option<Credentials>,
}

impl OddsJamClient {
    pub fn new(
        login_url: impl Into<String>,
        login_required: bool,
        credentials: Option<Credentials>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .gzip(true)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Http(format!("failed to build OddsJam HTTP client: {e}")))?;

        Ok(Self {
            client,
            login_url: login_url.into(),
            login_required,
            credentials,
        })
    }

    /// Credentials are only used when both email and password are set.
    pub fn from_config(cfg: &SourceConfig) -> Result<Self> {
        let credentials = (!cfg.email.trim().is_empty() && !cfg.password.is_empty()).then(|| {
            Credentials {
                email: cfg.email.trim().to_string(),
                password: cfg.password.clone(),
            }
        });
        Self::new(cfg.login_url.clone(), cfg.login_required, credentials)
    }

    /// Log in with the configured credentials. Returns `Ok(false)` when
    /// there are no credentials or the site rejected them.
    pub async fn login(&self) -> Result<bool> {
        let Some(creds) = &self.credentials else {
            warn!("No OddsJam credentials provided. Scraping without login.");
            return Ok(false);
        };

        let page = self
            .client
            .get(&self.login_url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("login page request failed: {e}")))?
            .text()
            .await
            .map_err(|e| Error::Http(format!("login page body unreadable: {e}")))?;

        let mut request = self.client.post(&self.login_url).form(&[
            ("email", creds.email.as_str()),
            ("password", creds.password.as_str()),
        ]);
        if let Some(token) = csrf_token(&page) {
            debug!("Using CSRF token from login page");
            request = request.header("X-CSRF-TOKEN", token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| Error::Http(format!("login request failed: {e}")))?;

        if resp.status().is_success() || resp.url().path().contains("dashboard") {
            info!("Successfully logged into OddsJam");
            Ok(true)
        } else {
            error!("Failed to login to OddsJam: {}", resp.status());
            Ok(false)
        }
    }
}

#[async_trait]
impl DocumentFetcher for OddsJamClient {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument> {
        if self.login_required {
            if let Err(e) = self.login().await {
                warn!("OddsJam login failed, continuing unauthenticated: {}", e);
            }
        }

        debug!("Fetching {}", url);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("GET {url} failed: {e}")))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Http(format!("GET {url} body unreadable: {e}")))?;

        Ok(FetchedDocument { status, body })
    }
}

/// Content of `<meta name="csrf-token">`, if the page has one.
pub fn csrf_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&CSRF_SELECTOR)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
