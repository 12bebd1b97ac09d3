use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Transient failures are worth one retry on the main-article path.
    /// Not-found and parse failures are definitive and never retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Fetch(_) | Error::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(Error::Fetch("status 503".to_string()).is_transient());
        assert!(!Error::NotFound("no such topic".to_string()).is_transient());
        assert!(!Error::Parse("missing heading".to_string()).is_transient());
        assert!(!Error::InvalidUrl("::".to_string()).is_transient());
    }

    #[test]
    fn test_display_messages() {
        let err = Error::NotFound("zzz".to_string());
        assert_eq!(err.to_string(), "not found: zzz");
        let err = Error::Parse("no lead paragraph".to_string());
        assert_eq!(err.to_string(), "parse error: no lead paragraph");
    }
}
