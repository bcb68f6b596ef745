//! The fixed, ordered collection of feed sources.
//!
//! Every slot starts out [`TopicState::Pending`] and is written exactly once,
//! by the fetch for that source. Writers publish a whole new [`Source`]
//! value, so readers holding an `Arc<Source>` keep a consistent snapshot.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::app::{AppError, Result};
use crate::config::SourceConfig;
use crate::domain::{Source, Topic, TopicState};

pub struct Registry {
    slots: Vec<RwLock<Arc<Source>>>,
}

impl Registry {
    pub fn new(sources: Vec<Source>) -> Self {
        Self {
            slots: sources
                .into_iter()
                .map(|s| RwLock::new(Arc::new(s)))
                .collect(),
        }
    }

    pub fn from_config(sources: &[SourceConfig]) -> Self {
        Self::new(
            sources
                .iter()
                .map(|s| Source::new(s.name.clone(), s.url.clone()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current value of a slot. Later writes do not affect the returned value.
    pub fn snapshot(&self, index: usize) -> Option<Arc<Source>> {
        self.slots
            .get(index)
            .map(|slot| slot.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    /// Display names in source order. Known from startup, before any fetch.
    pub fn names(&self) -> Vec<String> {
        (0..self.len())
            .filter_map(|i| self.snapshot(i))
            .map(|s| s.name.clone())
            .collect()
    }

    /// `(index, url)` for every source, in order.
    pub fn urls(&self) -> Vec<(usize, String)> {
        (0..self.len())
            .filter_map(|i| self.snapshot(i).map(|s| (i, s.url.clone())))
            .collect()
    }

    pub fn publish(&self, index: usize, topics: Vec<Topic>) -> Result<()> {
        self.write_once(index, TopicState::Loaded(topics))
    }

    pub fn mark_unavailable(&self, index: usize, reason: impl Into<String>) -> Result<()> {
        self.write_once(index, TopicState::Unavailable(reason.into()))
    }

    fn write_once(&self, index: usize, topics: TopicState) -> Result<()> {
        let slot = self
            .slots
            .get(index)
            .ok_or(AppError::SourceNotFound(index))?;

        let mut current = slot.write().unwrap_or_else(PoisonError::into_inner);
        if !current.is_pending() {
            return Err(AppError::SlotAlreadyWritten(index));
        }
        *current = Arc::new(current.with_topics(topics));
        Ok(())
    }

    pub fn summary(&self) -> LoadSummary {
        let mut summary = LoadSummary {
            total: self.len(),
            ..LoadSummary::default()
        };

        for source in (0..self.len()).filter_map(|i| self.snapshot(i)) {
            match source.topics {
                TopicState::Pending => summary.pending += 1,
                TopicState::Loaded(_) => summary.loaded += 1,
                TopicState::Unavailable(_) => summary.unavailable += 1,
            }
        }

        summary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub total: usize,
    pub loaded: usize,
    pub unavailable: usize,
    pub pending: usize,
}

impl LoadSummary {
    pub fn is_complete(&self) -> bool {
        self.pending == 0
    }
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} sources loaded", self.loaded, self.total)?;
        if self.unavailable > 0 {
            write!(f, ", {} unavailable", self.unavailable)?;
        }
        if self.pending > 0 {
            write!(f, ", {} pending", self.pending)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::new(vec![
            Source::new("Jobs DOU PHP", "https://jobs.dou.ua/vacancies/feeds/?category=PHP"),
            Source::new("Jobs DOU Golang", "https://jobs.dou.ua/vacancies/feeds/?category=Golang"),
        ])
    }

    #[test]
    fn test_names_available_before_fetch() {
        let registry = registry();
        assert_eq!(registry.names(), vec!["Jobs DOU PHP", "Jobs DOU Golang"]);
        assert!(registry.snapshot(0).unwrap().is_pending());
    }

    #[test]
    fn test_publish_is_write_once() {
        let registry = registry();
        registry.publish(1, vec![Topic::new("Backend Engineer", "Acme", "")]).unwrap();

        let err = registry.publish(1, vec![]).unwrap_err();
        assert!(matches!(err, AppError::SlotAlreadyWritten(1)));

        let err = registry.mark_unavailable(1, "late failure").unwrap_err();
        assert!(matches!(err, AppError::SlotAlreadyWritten(1)));

        assert_eq!(registry.snapshot(1).unwrap().topics().len(), 1);
    }

    #[test]
    fn test_publish_unknown_index() {
        let registry = registry();
        let err = registry.publish(7, vec![]).unwrap_err();
        assert!(matches!(err, AppError::SourceNotFound(7)));
    }

    #[test]
    fn test_snapshot_is_not_live() {
        let registry = registry();
        let before = registry.snapshot(0).unwrap();
        registry.publish(0, vec![Topic::new("a", "", "")]).unwrap();

        assert!(before.topics().is_empty());
        assert_eq!(registry.snapshot(0).unwrap().topics().len(), 1);
    }

    #[test]
    fn test_slots_do_not_leak_into_each_other() {
        let registry = registry();
        registry.publish(1, vec![Topic::new("go", "", "")]).unwrap();
        registry.publish(0, vec![Topic::new("php", "", "")]).unwrap();

        assert_eq!(registry.snapshot(0).unwrap().topics()[0].name, "php");
        assert_eq!(registry.snapshot(1).unwrap().topics()[0].name, "go");
    }

    #[test]
    fn test_summary() {
        let registry = Registry::new(vec![
            Source::new("a", "https://a.example/feed"),
            Source::new("b", "https://b.example/feed"),
            Source::new("c", "https://c.example/feed"),
        ]);
        assert_eq!(registry.summary().to_string(), "0/3 sources loaded, 3 pending");

        registry.publish(0, vec![]).unwrap();
        registry.publish(2, vec![]).unwrap();
        registry.mark_unavailable(1, "boom").unwrap();

        let summary = registry.summary();
        assert!(summary.is_complete());
        assert_eq!(summary.to_string(), "2/3 sources loaded, 1 unavailable");
    }
}
