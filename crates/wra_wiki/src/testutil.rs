use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use wra_core::{Error, Result, WikiSource};

pub const TEST_BASE_URL: &str = "https://wiki.test";

/// In-memory stand-in for the live wiki: canned pages keyed by slug, canned
/// search hits, and call counters so tests can assert on fetch behavior.
pub struct MockSource {
    pages: HashMap<String, String>,
    search_hits: Vec<String>,
    broken_slugs: HashSet<String>,
    flaky_slugs: Mutex<HashSet<String>>,
    pub fetch_calls: AtomicUsize,
    pub exists_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            search_hits: Vec::new(),
            broken_slugs: HashSet::new(),
            flaky_slugs: Mutex::new(HashSet::new()),
            fetch_calls: AtomicUsize::new(0),
            exists_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_page(mut self, slug: &str, html: String) -> Self {
        self.pages.insert(slug.to_string(), html);
        self
    }

    pub fn with_search_hits(mut self, titles: &[&str]) -> Self {
        self.search_hits = titles.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Every fetch of this slug fails with a transient error. The slug still
    /// reports as existing, so resolution succeeds and fetching fails.
    pub fn with_broken_page(mut self, slug: &str) -> Self {
        self.broken_slugs.insert(slug.to_string());
        self
    }

    /// The first fetch of this slug fails; later fetches succeed.
    pub fn with_flaky_page(self, slug: &str) -> Self {
        self.flaky_slugs.lock().unwrap().insert(slug.to_string());
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn existence_checks(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WikiSource for MockSource {
    fn base_url(&self) -> &str {
        TEST_BASE_URL
    }

    async fn page_exists(&self, slug: &str) -> Result<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages.contains_key(slug) || self.broken_slugs.contains(slug))
    }

    async fn fetch_page(&self, slug: &str) -> Result<String> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.broken_slugs.contains(slug) {
            return Err(Error::Fetch(format!("canned failure for {}", slug)));
        }
        if self.flaky_slugs.lock().unwrap().remove(slug) {
            return Err(Error::Fetch(format!("canned transient failure for {}", slug)));
        }
        self.pages
            .get(slug)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("no canned page for {}", slug)))
    }

    async fn search(&self, _term: &str) -> Result<Vec<String>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.search_hits.clone())
    }
}

/// Builds a minimal wiki-shaped page: heading, parser-output block with a
/// lead paragraph and a second paragraph of body links, and a category bar.
pub fn article_html(title: &str, lead: &str, categories: &[&str], link_slugs: &[&str]) -> String {
    let links: String = link_slugs
        .iter()
        .map(|slug| format!(r#"<a href="/wiki/{}">{}</a> "#, slug, slug.replace('_', " ")))
        .collect();
    let category_items: String = categories
        .iter()
        .map(|c| {
            format!(
                r#"<li><a href="/wiki/Category:{}">{}</a></li>"#,
                c.replace(' ', "_"),
                c
            )
        })
        .collect();
    format!(
        concat!(
            "<!DOCTYPE html><html><body>",
            "<h1 id=\"firstHeading\">{title}</h1>",
            "<div class=\"mw-parser-output\">",
            "<p>{lead}</p>",
            "<p>See also {links}among other neighboring subjects.</p>",
            "</div>",
            "<div id=\"mw-normal-catlinks\"><ul>{categories}</ul></div>",
            "</body></html>"
        ),
        title = title,
        lead = lead,
        links = links,
        categories = category_items,
    )
}

/// A lead paragraph long enough to count as substantive.
pub fn long_lead(subject: &str) -> String {
    format!(
        "{} is a broad subject studied around the world, with many aspects, \
         debates, methods, and open questions that researchers keep revisiting today.",
        subject
    )
}
