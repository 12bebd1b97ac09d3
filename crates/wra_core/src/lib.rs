pub mod error;
pub mod source;
pub mod types;

pub use error::Error;
pub use error::Result;
pub use source::WikiSource;
pub use types::{
    ArticleDocument, ArticleRef, Mode, RelatedArticle, ResearchRequest, ResultSet,
    DEFAULT_RELATED_LIMIT,
};
