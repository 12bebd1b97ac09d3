use async_trait::async_trait;

use crate::Result;

/// Network capability the pipeline is built against. The production
/// implementation speaks HTTP to a MediaWiki install; tests substitute an
/// in-memory double with canned pages, so nothing in the pipeline ever
/// needs a live connection to be exercised.
#[async_trait]
pub trait WikiSource: Send + Sync {
    /// Base URL articles live under, e.g. "https://en.wikipedia.org".
    fn base_url(&self) -> &str;

    /// Lightweight existence probe for an article slug. `Ok(false)` means
    /// the wiki answered not-found; transport and server failures are errors.
    async fn page_exists(&self, slug: &str) -> Result<bool>;

    /// Retrieves the raw HTML for an article slug. Not-found surfaces as
    /// `Error::NotFound` so callers can distinguish it from transport trouble.
    async fn fetch_page(&self, slug: &str) -> Result<String>;

    /// Runs the wiki's search API for a free-form term, returning candidate
    /// article titles best match first. An empty vector is a valid answer.
    async fn search(&self, term: &str) -> Result<Vec<String>>;
}
