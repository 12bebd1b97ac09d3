use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use wra_core::{ArticleDocument, ArticleRef, ResearchRequest, Result, ResultSet, WikiSource};
use wra_text::{filter_by_keywords, summarize};

use crate::fetcher::PageFetcher;
use crate::related::{RelatedCollector, DEFAULT_MAX_CONCURRENT_FETCHES};
use crate::resolver::{normalize_topic, Resolver};

/// Tuning knobs for a pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub summary_max_chars: usize,
    pub excerpt_max_chars: usize,
    pub max_concurrent_fetches: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            summary_max_chars: 600,
            excerpt_max_chars: 300,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }
}

/// The research pipeline: resolve, fetch, collect, condense, filter.
///
/// One call to `run` is one self-contained request; nothing is cached or
/// shared across runs.
pub struct ResearchPipeline {
    resolver: Resolver,
    fetcher: PageFetcher,
    collector: RelatedCollector,
    config: PipelineConfig,
}

impl ResearchPipeline {
    pub fn new(source: Arc<dyn WikiSource>) -> Self {
        Self::with_config(source, PipelineConfig::default())
    }

    pub fn with_config(source: Arc<dyn WikiSource>, config: PipelineConfig) -> Self {
        let resolver = Resolver::new(source.clone());
        let fetcher = PageFetcher::new(source.clone());
        let collector = RelatedCollector::with_max_concurrent(
            PageFetcher::new(source),
            config.max_concurrent_fetches,
        );
        Self {
            resolver,
            fetcher,
            collector,
            config,
        }
    }

    /// Runs one research request end to end. Failures on the main-article
    /// path fail the whole request; related-page failures never do.
    pub async fn run(&self, request: &ResearchRequest) -> Result<ResultSet> {
        let article = self.resolver.resolve(&request.topic).await?;
        info!("📚 resolved '{}' to {}", request.topic, article.url);

        let mut main = self.fetch_main(&article).await?;
        main.summary = summarize(&main.summary, self.config.summary_max_chars);

        let mut related = self
            .collector
            .collect(&main, request.limit, request.mode.wants_excerpts())
            .await;
        info!(
            "🔗 collected {} of up to {} related articles",
            related.len(),
            request.limit
        );

        for item in &mut related {
            if let Some(raw) = item.excerpt.take() {
                let excerpt = summarize(&raw, self.config.excerpt_max_chars);
                item.excerpt = (!excerpt.is_empty()).then_some(excerpt);
            }
        }

        if request.mode.applies_filter() {
            let before = related.len();
            related = filter_by_keywords(related, &request.keywords);
            info!(
                "🧹 keyword filter kept {} of {} related articles",
                related.len(),
                before
            );
        }

        Ok(ResultSet {
            topic: normalize_topic(&request.topic),
            mode: request.mode,
            main,
            related,
            fetched_at: Utc::now(),
        })
    }

    // One retry for transient trouble on the main article; definitive
    // failures (not found, unparseable) surface immediately.
    async fn fetch_main(&self, article: &ArticleRef) -> Result<ArticleDocument> {
        match self.fetcher.fetch(article, false).await {
            Err(e) if e.is_transient() => {
                warn!("⚠️ main article fetch failed ({}), retrying once", e);
                self.fetcher.fetch(article, false).await
            }
            result => result,
        }
    }
}
