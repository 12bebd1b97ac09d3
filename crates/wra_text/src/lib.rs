pub mod filter;
pub mod summarize;

pub use filter::filter_by_keywords;
pub use summarize::{clean_text, summarize};
