use std::sync::Arc;

use pdftext_core::{AppConfig, Result};
use pdftext_extraction::ExtractionOrchestrator;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub orchestrator: Arc<ExtractionOrchestrator>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let orchestrator = Arc::new(ExtractionOrchestrator::from_config(&config)?);
        Ok(Self {
            config,
            orchestrator,
        })
    }
}
