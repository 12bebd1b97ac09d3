use std::sync::Arc;

use wra_core::{ArticleDocument, ArticleRef, Result, WikiSource};

use crate::parse;

/// Retrieves one article page and parses it into a typed document.
pub struct PageFetcher {
    source: Arc<dyn WikiSource>,
}

impl PageFetcher {
    pub fn new(source: Arc<dyn WikiSource>) -> Self {
        Self { source }
    }

    /// `want_excerpt` marks the per-related-page path, which needs the
    /// summary and categories but never walks the page's own links.
    pub async fn fetch(&self, article: &ArticleRef, want_excerpt: bool) -> Result<ArticleDocument> {
        let html = self.source.fetch_page(&article.slug()).await?;
        parse::parse_document(&html, article, self.source.base_url(), !want_excerpt)
    }
}
