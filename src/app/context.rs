use std::sync::Arc;

use crate::app::Result;
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::supervisor::FetchSupervisor;
use crate::fetcher::Fetcher;
use crate::registry::Registry;
use crate::render::Html2TextRenderer;

/// Everything the UI and the fetch tasks share, built once at startup.
pub struct AppContext {
    pub config: Config,
    pub registry: Arc<Registry>,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub renderer: Html2TextRenderer,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::new(config.fetch.timeout())?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let registry = Arc::new(Registry::from_config(&config.sources));

        Self {
            config,
            registry,
            fetcher,
            renderer: Html2TextRenderer::new(),
        }
    }

    pub fn supervisor(&self) -> FetchSupervisor {
        FetchSupervisor::new(self.fetcher.clone(), self.config.fetch.timeout())
            .with_max_concurrency(self.config.fetch.max_concurrency)
    }
}
