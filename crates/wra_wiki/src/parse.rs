use std::collections::HashSet;

use lazy_static::lazy_static;
use scraper::{Html, Selector};

use wra_core::{ArticleDocument, ArticleRef, Error, Result};

// A lead paragraph must carry more than this many words to count as the
// article summary; shorter ones are hatnotes, coordinate stubs or empty
// shells that MediaWiki emits before the real text.
const MIN_LEAD_WORDS: usize = 15;

lazy_static! {
    static ref HEADING_SELECTOR: Selector = Selector::parse("h1#firstHeading").unwrap();
    static ref LEAD_PARAGRAPH_SELECTOR: Selector =
        Selector::parse("div.mw-parser-output > p").unwrap();
    static ref BODY_LINK_SELECTOR: Selector =
        Selector::parse("div.mw-parser-output a[href^='/wiki/']").unwrap();
    static ref CATEGORY_SELECTOR: Selector = Selector::parse("#mw-normal-catlinks ul li").unwrap();
}

/// Parses raw article HTML into a validated `ArticleDocument`.
///
/// A heading and a substantive lead paragraph are required; pages missing
/// either fail with `Parse` rather than producing a half-filled document.
/// Disambiguation pages fail with `NotFound`, since picking a sub-article
/// on the caller's behalf would be guessing.
///
/// Link enumeration only runs when `want_links` is set. The per-related
/// fetch path needs the summary and categories but never walks links, so
/// it skips the most expensive part of the parse.
pub fn parse_document(
    html: &str,
    article: &ArticleRef,
    base_url: &str,
    want_links: bool,
) -> Result<ArticleDocument> {
    let document = Html::parse_document(html);

    let title = document
        .select(&HEADING_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Parse(format!("missing article heading at {}", article.url)))?;

    let categories = extract_categories(&document);
    if categories
        .iter()
        .any(|c| c.to_lowercase().contains("disambiguation"))
    {
        return Err(Error::NotFound(format!(
            "'{}' is a disambiguation page",
            title
        )));
    }

    let summary = extract_lead_paragraph(&document).ok_or_else(|| {
        Error::Parse(format!(
            "no substantive lead paragraph at {}",
            article.url
        ))
    })?;

    let resolved = ArticleRef::new(title, article.url.clone());
    let related_link_candidates = if want_links {
        extract_internal_links(&document, &resolved, article, base_url)
    } else {
        Vec::new()
    };

    Ok(ArticleDocument {
        article: resolved,
        summary,
        categories,
        related_link_candidates,
    })
}

fn extract_lead_paragraph(document: &Html) -> Option<String> {
    document
        .select(&LEAD_PARAGRAPH_SELECTOR)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| text.split_whitespace().count() > MIN_LEAD_WORDS)
}

fn extract_categories(document: &Html) -> Vec<String> {
    document
        .select(&CATEGORY_SELECTOR)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Walks body links in page order, keeping the first occurrence of each
/// distinct article and skipping links back to the page itself.
fn extract_internal_links(
    document: &Html,
    resolved: &ArticleRef,
    requested: &ArticleRef,
    base_url: &str,
) -> Vec<ArticleRef> {
    let own_slugs = [resolved.slug(), requested.slug()];
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for link in document.select(&BODY_LINK_SELECTOR) {
        let href = match link.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        let slug = match candidate_slug(href) {
            Some(slug) => slug,
            None => continue,
        };
        if own_slugs.contains(&slug) {
            continue;
        }
        if seen.insert(slug.clone()) {
            candidates.push(ArticleRef::from_slug(&slug, base_url));
        }
    }

    candidates
}

/// Reduces an in-page href to an article slug. Anything outside the plain
/// article namespace (File:, Help:, Template:, ...) is rejected, fragments
/// and query strings are cut, and percent escapes are decoded once.
fn candidate_slug(href: &str) -> Option<String> {
    let path = href.strip_prefix("/wiki/")?;
    let path = path.split(['#', '?']).next().unwrap_or("");
    let decoded = urlencoding::decode(path).ok()?;
    let slug = decoded.trim();
    if slug.is_empty() || slug.contains(':') {
        return None;
    }
    Some(slug.to_string())
}
