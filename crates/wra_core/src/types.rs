use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of related articles collected per request.
pub const DEFAULT_RELATED_LIMIT: usize = 5;

/// Canonical identifier for a single article: display title plus resolved
/// URL. Immutable once produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    pub title: String,
    pub url: String,
}

impl ArticleRef {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Builds a ref from a wiki URL slug ("Climate_change") and base URL.
    pub fn from_slug(slug: &str, base_url: &str) -> Self {
        Self {
            title: slug.replace('_', " "),
            url: format!("{}/wiki/{}", base_url, slug),
        }
    }

    /// The URL path segment for this article ("Climate change" -> "Climate_change").
    pub fn slug(&self) -> String {
        self.title.replace(' ', "_")
    }
}

/// Structured content extracted from one fetched article page.
///
/// `related_link_candidates` holds internal links in page order, first
/// occurrence only, with the article's own page excluded. Category order
/// carries no meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDocument {
    pub article: ArticleRef,
    pub summary: String,
    pub categories: Vec<String>,
    pub related_link_candidates: Vec<ArticleRef>,
}

/// One related article discovered from the main page. The excerpt is only
/// populated in modes that fetch related pages; a failed per-link fetch
/// drops the entry entirely rather than leaving it half-filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedArticle {
    pub article: ArticleRef,
    pub excerpt: Option<String>,
    pub categories: Vec<String>,
}

impl RelatedArticle {
    /// A bare link entry, as produced in `links` mode where nothing beyond
    /// the reference itself is fetched.
    pub fn link_only(article: ArticleRef) -> Self {
        Self {
            article,
            excerpt: None,
            categories: Vec::new(),
        }
    }
}

/// Output mode for a research run. The mode is mapped onto behavior in
/// exactly one place so presentation layers never branch on it themselves.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Related links only, no per-link fetches.
    #[default]
    Links,
    /// Fetch each related page and attach a short excerpt.
    Summaries,
    /// Like `summaries`, then keep only keyword matches.
    Filtered,
}

impl Mode {
    pub fn wants_excerpts(&self) -> bool {
        matches!(self, Mode::Summaries | Mode::Filtered)
    }

    pub fn applies_filter(&self) -> bool {
        matches!(self, Mode::Filtered)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mode::Links => "links",
            Mode::Summaries => "summaries",
            Mode::Filtered => "filtered",
        };
        write!(f, "{}", name)
    }
}

/// Parameters for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub topic: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub keywords: Vec<String>,
}

fn default_limit() -> usize {
    DEFAULT_RELATED_LIMIT
}

impl ResearchRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            mode: Mode::default(),
            limit: DEFAULT_RELATED_LIMIT,
            keywords: Vec::new(),
        }
    }
}

/// The complete result of one research run, the sole artifact handed to
/// presentation layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    /// The user's topic in display form (whitespace collapsed, no underscores).
    pub topic: String,
    pub mode: Mode,
    pub main: ArticleDocument,
    pub related: Vec<RelatedArticle>,
    pub fetched_at: DateTime<Utc>,
}
