use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::debug;

use wra_core::{ArticleDocument, RelatedArticle};

use crate::fetcher::PageFetcher;

/// Default cap on in-flight related-page fetches.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;

/// Collects a bounded set of related articles from a document's candidates.
///
/// Candidates are taken in page order, earlier links being more central to
/// the topic. Failed candidates are dropped without backfilling, so the
/// result can legitimately come up shorter than the limit.
pub struct RelatedCollector {
    fetcher: PageFetcher,
    max_concurrent: usize,
}

impl RelatedCollector {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self {
            fetcher,
            max_concurrent: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    pub fn with_max_concurrent(fetcher: PageFetcher, max_concurrent: usize) -> Self {
        Self {
            fetcher,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Takes the first `limit` candidates. Without excerpts this touches no
    /// network at all; with excerpts each candidate page is fetched under
    /// the concurrency cap, and page order is preserved in the output.
    pub async fn collect(
        &self,
        doc: &ArticleDocument,
        limit: usize,
        want_excerpts: bool,
    ) -> Vec<RelatedArticle> {
        let selected = doc.related_link_candidates.iter().take(limit);

        if !want_excerpts {
            return selected
                .map(|article| RelatedArticle::link_only(article.clone()))
                .collect();
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let fetches = selected.cloned().map(|article| {
            let semaphore = semaphore.clone();
            async move {
                let _permit = semaphore.acquire().await.ok()?;
                match self.fetcher.fetch(&article, true).await {
                    Ok(page) => Some(RelatedArticle {
                        article,
                        excerpt: Some(page.summary),
                        categories: page.categories,
                    }),
                    Err(e) => {
                        debug!("dropping related link {}: {}", article.url, e);
                        None
                    }
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }
}
