use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use wra_core::{Error, Result, WikiSource};

pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";
pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = "wra/0.1 (wikipedia research assistant)";

/// Connection settings for the live wiki source.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `WikiSource` backed by a real MediaWiki install over HTTP.
///
/// One reqwest client is built up front with the configured timeout, so no
/// single fetch can hang a request forever.
pub struct HttpWikiSource {
    client: Client,
    config: ClientConfig,
}

impl HttpWikiSource {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    fn page_url(&self, slug: &str) -> Result<Url> {
        Url::parse(&format!("{}/wiki/{}", self.config.base_url, slug))
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", slug, e)))
    }
}

// MediaWiki search API response, trimmed to the fields we read.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[async_trait]
impl WikiSource for HttpWikiSource {
    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn page_exists(&self, slug: &str) -> Result<bool> {
        let url = self.page_url(slug)?;
        let response = self.client.head(url.clone()).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(Error::Fetch(format!(
                "existence check for {} returned status {}",
                url, status
            )))
        }
    }

    async fn fetch_page(&self, slug: &str) -> Result<String> {
        let url = self.page_url(slug)?;
        debug!("fetching page {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("no article at {}", url)));
        }
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "fetching {} returned status {}",
                url, status
            )));
        }
        Ok(response.text().await?)
    }

    async fn search(&self, term: &str) -> Result<Vec<String>> {
        debug!("searching for '{}'", term);
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", term),
                ("format", "json"),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "search API returned status {}",
                status
            )));
        }
        let body: SearchResponse = response.json().await?;
        Ok(body
            .query
            .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
            .unwrap_or_default())
    }
}
