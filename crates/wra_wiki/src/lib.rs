pub mod client;
pub mod fetcher;
pub mod parse;
pub mod pipeline;
pub mod related;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testutil;

pub use client::{ClientConfig, HttpWikiSource, DEFAULT_API_URL, DEFAULT_BASE_URL};
pub use fetcher::PageFetcher;
pub use pipeline::{PipelineConfig, ResearchPipeline};
pub use related::RelatedCollector;
pub use resolver::Resolver;

pub mod prelude {
    pub use crate::client::{ClientConfig, HttpWikiSource};
    pub use crate::pipeline::{PipelineConfig, ResearchPipeline};
    pub use wra_core::{Error, Mode, ResearchRequest, Result, ResultSet};
}
