use std::fs;
use std::path::{Path, PathBuf};

use wra_core::{Result, ResultSet};

/// Where a finished result goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputTarget {
    /// Print to stdout.
    #[default]
    Console,
    /// Write `<slug>.txt` in the current directory.
    Text,
    /// Write `<slug>.json` in the current directory.
    Json,
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputTarget::Console => "console",
            OutputTarget::Text => "text",
            OutputTarget::Json => "json",
        };
        write!(f, "{}", name)
    }
}

/// Sends the result to the chosen target. File targets name the file after
/// the main article slug and echo where it landed.
pub fn write(result: &ResultSet, target: OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Console => {
            print!("{}", render_text(result));
            Ok(())
        }
        OutputTarget::Text => {
            let path = default_file_name(result, "txt");
            write_text_file(result, &path)?;
            println!("Results written to {}", path.display());
            Ok(())
        }
        OutputTarget::Json => {
            let path = default_file_name(result, "json");
            write_json_file(result, &path)?;
            println!("Results written to {}", path.display());
            Ok(())
        }
    }
}

pub fn write_text_file(result: &ResultSet, path: &Path) -> Result<()> {
    fs::write(path, render_text(result))?;
    Ok(())
}

/// Pretty JSON of the whole `ResultSet`; non-ASCII text stays as-is.
pub fn write_json_file(result: &ResultSet, path: &Path) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(result)?)?;
    Ok(())
}

fn default_file_name(result: &ResultSet, extension: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", result.main.article.slug(), extension))
}

/// Key-colon-value blocks: one for the main article, then one per related
/// article, separated by blank lines. The excerpt line only appears when
/// an excerpt was collected.
pub fn render_text(result: &ResultSet) -> String {
    let mut out = String::new();

    out.push_str(&format!("Topic: {}\n", result.topic));
    out.push_str(&format!("URL: {}\n", result.main.article.url));
    out.push_str(&format!("Summary: {}\n", result.main.summary));
    out.push_str(&format!(
        "Categories: {}\n",
        result.main.categories.join(", ")
    ));
    out.push_str(&format!("Fetched: {}\n", result.fetched_at.to_rfc3339()));
    out.push('\n');

    for item in &result.related {
        out.push_str(&format!("Title: {}\n", item.article.title));
        out.push_str(&format!("URL: {}\n", item.article.url));
        if let Some(excerpt) = &item.excerpt {
            out.push_str(&format!("Excerpt: {}\n", excerpt));
        }
        out.push_str(&format!("Categories: {}\n", item.categories.join(", ")));
        out.push('\n');
    }

    out
}
