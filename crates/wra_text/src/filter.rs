use wra_core::RelatedArticle;

/// Keeps only the related articles matching at least one keyword.
///
/// A keyword matches when it appears, case-insensitively, as a substring of
/// the title, the excerpt, or any category. The permissive OR-across-keywords
/// policy is deliberate: excerpts are often sparse and whole-word matching
/// would hide relevant results. An empty keyword set matches everything, and
/// input order is always preserved.
pub fn filter_by_keywords(
    related: Vec<RelatedArticle>,
    keywords: &[String],
) -> Vec<RelatedArticle> {
    let needles: Vec<String> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if needles.is_empty() {
        return related;
    }

    related
        .into_iter()
        .filter(|item| matches_any(item, &needles))
        .collect()
}

fn matches_any(item: &RelatedArticle, needles: &[String]) -> bool {
    let title = item.article.title.to_lowercase();
    let excerpt = item.excerpt.as_deref().unwrap_or_default().to_lowercase();
    let categories: Vec<String> = item.categories.iter().map(|c| c.to_lowercase()).collect();

    needles.iter().any(|needle| {
        title.contains(needle.as_str())
            || excerpt.contains(needle.as_str())
            || categories.iter().any(|c| c.contains(needle.as_str()))
    })
}
