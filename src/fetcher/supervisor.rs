use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinHandle, JoinSet};

use crate::app::{AppError, Result};
use crate::domain::Topic;
use crate::fetcher::{fetch_source, Fetcher};
use crate::normalizer::Normalizer;
use crate::registry::{LoadSummary, Registry};

/// Progress reported by the supervisor while sources load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    Loaded { source: usize, count: usize },
    Failed { source: usize, reason: String },
    /// Every fetch task has ended.
    Finished(LoadSummary),
}

/// Runs one fetch task per registry slot and publishes the results.
///
/// Each task is the only writer of its slot. Failures are recorded as
/// unavailable sources instead of tearing the process down; whether a
/// failure is fatal is decided by whoever consumes the events.
pub struct FetchSupervisor {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    timeout: Duration,
    semaphore: Option<Arc<Semaphore>>,
}

impl FetchSupervisor {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, timeout: Duration) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
            timeout,
            semaphore: None,
        }
    }

    /// Cap the number of fetches in flight. `None` runs every source at once.
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.semaphore = limit.map(|n| Arc::new(Semaphore::new(n.max(1))));
        self
    }

    pub fn spawn(
        self,
        registry: Arc<Registry>,
        events: mpsc::UnboundedSender<FetchEvent>,
    ) -> JoinHandle<LoadSummary> {
        tokio::spawn(self.run(registry, events))
    }

    pub async fn run(
        self,
        registry: Arc<Registry>,
        events: mpsc::UnboundedSender<FetchEvent>,
    ) -> LoadSummary {
        let mut tasks = JoinSet::new();

        for (index, url) in registry.urls() {
            let fetcher = self.fetcher.clone();
            let normalizer = self.normalizer.clone();
            let semaphore = self.semaphore.clone();
            let registry = registry.clone();
            let events = events.clone();
            let timeout = self.timeout;

            tasks.spawn(async move {
                let result = match semaphore {
                    Some(semaphore) => match semaphore.acquire_owned().await {
                        Ok(_permit) => {
                            fetch_source(fetcher.as_ref(), &normalizer, &url, timeout).await
                        }
                        Err(e) => Err(AppError::FetchAborted(e.to_string())),
                    },
                    None => fetch_source(fetcher.as_ref(), &normalizer, &url, timeout).await,
                };

                record(&registry, &events, index, &url, result);
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Task join error: {}", e);
            }
        }

        // A task that panicked never wrote its slot.
        for (index, url) in registry.urls() {
            if registry.snapshot(index).is_some_and(|s| s.is_pending()) {
                let reason = AppError::FetchAborted(url).to_string();
                if registry.mark_unavailable(index, reason.clone()).is_ok() {
                    send(&events, FetchEvent::Failed { source: index, reason });
                }
            }
        }

        let summary = registry.summary();
        tracing::info!("{}", summary);
        send(&events, FetchEvent::Finished(summary));
        summary
    }
}

fn record(
    registry: &Registry,
    events: &mpsc::UnboundedSender<FetchEvent>,
    index: usize,
    url: &str,
    result: Result<Vec<Topic>>,
) {
    let event = match result {
        Ok(topics) => {
            let count = topics.len();
            if let Err(e) = registry.publish(index, topics) {
                tracing::error!("Could not publish topics for {}: {}", url, e);
                return;
            }
            tracing::info!("Loaded {} topics from {}", count, url);
            FetchEvent::Loaded {
                source: index,
                count,
            }
        }
        Err(e) => {
            let reason = e.to_string();
            tracing::warn!("Failed to load {}: {}", url, reason);
            if let Err(e) = registry.mark_unavailable(index, reason.clone()) {
                tracing::error!("Could not mark {} unavailable: {}", url, e);
                return;
            }
            FetchEvent::Failed {
                source: index,
                reason,
            }
        }
    };

    send(events, event);
}

fn send(events: &mpsc::UnboundedSender<FetchEvent>, event: FetchEvent) {
    if events.send(event).is_err() {
        tracing::debug!("Fetch event dropped, receiver closed");
    }
}
