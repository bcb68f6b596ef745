pub mod http_fetcher;
pub mod supervisor;

use std::time::Duration;

use async_trait::async_trait;

use crate::app::{AppError, Result};
use crate::domain::Topic;
use crate::normalizer::Normalizer;

/// Default bound on a single fetch, parse included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[async_trait]
pub trait Fetcher {
    /// Download the raw feed body.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetch and parse one feed, giving up once `timeout` has elapsed.
pub async fn fetch_source(
    fetcher: &(dyn Fetcher + Send + Sync),
    normalizer: &Normalizer,
    url: &str,
    timeout: Duration,
) -> Result<Vec<Topic>> {
    let work = async {
        let body = fetcher.fetch(url).await?;
        normalizer.normalize(&body)
    };

    tokio::time::timeout(timeout, work)
        .await
        .map_err(|_| AppError::Timeout(timeout))?
}
