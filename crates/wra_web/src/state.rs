use std::sync::Arc;

use wra_wiki::ResearchPipeline;

pub struct AppState {
    pub pipeline: Arc<ResearchPipeline>,
}
