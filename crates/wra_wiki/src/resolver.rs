use std::sync::Arc;

use tracing::{debug, info};

use wra_core::{ArticleRef, Error, Result, WikiSource};

/// Maps a raw user-typed topic to a canonical article reference.
///
/// The direct slug is probed first; only when the wiki reports not-found
/// does the search API get involved. The cheap probe keeps the common case
/// to one round trip, while search absorbs typos and title drift.
pub struct Resolver {
    source: Arc<dyn WikiSource>,
}

impl Resolver {
    pub fn new(source: Arc<dyn WikiSource>) -> Self {
        Self { source }
    }

    pub async fn resolve(&self, topic: &str) -> Result<ArticleRef> {
        let display_topic = normalize_topic(topic);
        if display_topic.is_empty() {
            return Err(Error::NotFound("empty topic".to_string()));
        }

        let slug = canonical_slug(&display_topic);
        if self.source.page_exists(&slug).await? {
            debug!("direct hit for '{}'", display_topic);
            return Ok(ArticleRef::from_slug(&slug, self.source.base_url()));
        }

        info!("🔎 no direct page for '{}', falling back to search", display_topic);
        let hits = self.source.search(&display_topic).await?;
        let top = hits
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("no article found for '{}'", display_topic)))?;

        let slug = top.trim().replace(' ', "_");
        if !self.source.page_exists(&slug).await? {
            return Err(Error::NotFound(format!(
                "search suggested '{}' but no page exists for it",
                top
            )));
        }
        Ok(ArticleRef::from_slug(&slug, self.source.base_url()))
    }
}

/// Display-normalizes a topic: trims, collapses whitespace runs, and treats
/// underscores as spaces, so "dream_daddy" and " dream  daddy " are the
/// same topic.
pub fn normalize_topic(topic: &str) -> String {
    topic
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// URL slug the wiki canonicalizes a display title to: spaces become
/// underscores and the first letter is uppercased, matching MediaWiki's
/// first-letter-insensitive title rule.
fn canonical_slug(display_topic: &str) -> String {
    let underscored = display_topic.replace(' ', "_");
    let mut chars = underscored.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => underscored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{article_html, long_lead, MockSource};

    #[test]
    fn test_normalize_topic() {
        assert_eq!(normalize_topic("climate change"), "climate change");
        assert_eq!(normalize_topic("  climate   change  "), "climate change");
        assert_eq!(normalize_topic("climate_change"), "climate change");
        assert_eq!(normalize_topic("_"), "");
        assert_eq!(normalize_topic(""), "");
    }

    #[test]
    fn test_canonical_slug_uppercases_first_letter() {
        assert_eq!(canonical_slug("climate change"), "Climate_change");
        assert_eq!(canonical_slug("Climate change"), "Climate_change");
        assert_eq!(canonical_slug("jazz"), "Jazz");
        assert_eq!(canonical_slug("éclair"), "Éclair");
    }

    #[tokio::test]
    async fn test_direct_hit_skips_search() {
        let source = MockSource::new().with_page(
            "Climate_change",
            article_html("Climate change", &long_lead("Climate change"), &[], &[]),
        );
        let source = Arc::new(source);
        let resolver = Resolver::new(source.clone());

        let article = resolver.resolve("climate change").await.unwrap();
        assert_eq!(article.slug(), "Climate_change");
        assert_eq!(article.url, "https://wiki.test/wiki/Climate_change");
        assert_eq!(source.searches(), 0);
    }

    #[tokio::test]
    async fn test_search_fallback() {
        let source = MockSource::new()
            .with_page(
                "Dream_Daddy",
                article_html("Dream Daddy", &long_lead("Dream Daddy"), &[], &[]),
            )
            .with_search_hits(&["Dream Daddy", "Dream"]);
        let source = Arc::new(source);
        let resolver = Resolver::new(source.clone());

        let article = resolver.resolve("dream dady").await.unwrap();
        assert_eq!(article.slug(), "Dream_Daddy");
        assert_eq!(source.searches(), 1);
        assert_eq!(source.existence_checks(), 2);
    }

    #[tokio::test]
    async fn test_no_hits_is_not_found() {
        let source = Arc::new(MockSource::new());
        let resolver = Resolver::new(source);

        let err = resolver.resolve("zxqy nonsense").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_stale_search_hit_is_not_found() {
        let source = Arc::new(MockSource::new().with_search_hits(&["Ghost Page"]));
        let resolver = Resolver::new(source);

        let err = resolver.resolve("ghost").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_topic_touches_nothing() {
        let source = Arc::new(MockSource::new());
        let resolver = Resolver::new(source.clone());

        let err = resolver.resolve("   ").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(source.existence_checks(), 0);
        assert_eq!(source.searches(), 0);
    }
}
