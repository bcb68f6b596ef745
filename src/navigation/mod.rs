//! Three-level selection state machine: sources, then topics, then content.
//!
//! Selecting a source takes a snapshot of its registry slot; topic rows and
//! content are derived from that snapshot only, so a fetch that lands while
//! the pane is open shows up once the source is selected again.
//!
//! The highlighted row of each list is whatever was selected last. Rows are
//! rebuilt from the selected index, so every row other than the selected one
//! is reported unselected.

use std::sync::Arc;

use crate::domain::Source;
use crate::registry::Registry;
use crate::render::{render_topic, ContentView, TextRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    ViewingSources,
    ViewingTopics { source: usize },
    ViewingContent { source: usize, topic: usize },
}

impl NavState {
    pub fn source(&self) -> Option<usize> {
        match *self {
            NavState::ViewingSources => None,
            NavState::ViewingTopics { source } | NavState::ViewingContent { source, .. } => {
                Some(source)
            }
        }
    }

    pub fn topic(&self) -> Option<usize> {
        match *self {
            NavState::ViewingContent { topic, .. } => Some(topic),
            _ => None,
        }
    }
}

/// One line of a list pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub selected: bool,
}

pub struct Navigator {
    state: NavState,
    source_names: Vec<String>,
    opened: Option<Arc<Source>>,
    content: Option<ContentView>,
    should_quit: bool,
}

impl Navigator {
    /// Start in [`NavState::ViewingSources`] with every source name listed.
    pub fn new(registry: &Registry) -> Self {
        Self {
            state: NavState::ViewingSources,
            source_names: registry.names(),
            opened: None,
            content: None,
            should_quit: false,
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn source_count(&self) -> usize {
        self.source_names.len()
    }

    pub fn topic_count(&self) -> usize {
        self.opened.as_ref().map_or(0, |s| s.topics().len())
    }

    pub fn source_rows(&self) -> Vec<Row> {
        let selected = self.state.source();
        self.source_names
            .iter()
            .enumerate()
            .map(|(i, name)| Row {
                label: name.clone(),
                selected: selected == Some(i),
            })
            .collect()
    }

    /// Rows of the opened source, empty when none is open or it has no topics.
    pub fn topic_rows(&self) -> Vec<Row> {
        let selected = self.state.topic();
        self.opened
            .iter()
            .flat_map(|source| source.topics())
            .enumerate()
            .map(|(i, topic)| Row {
                label: topic.name.clone(),
                selected: selected == Some(i),
            })
            .collect()
    }

    /// The snapshot taken when the current source was selected.
    pub fn opened_source(&self) -> Option<&Source> {
        self.opened.as_deref()
    }

    pub fn content(&self) -> Option<&ContentView> {
        self.content.as_ref()
    }

    /// Open source `row`. Rows outside the list are ignored.
    pub fn select_source(&mut self, row: usize, registry: &Registry) -> bool {
        if row >= self.source_names.len() {
            return false;
        }
        let Some(snapshot) = registry.snapshot(row) else {
            return false;
        };

        tracing::debug!(
            "Selected source {} ({} topics)",
            snapshot.name,
            snapshot.topics().len()
        );

        self.opened = Some(snapshot);
        self.content = None;
        self.state = NavState::ViewingTopics { source: row };
        true
    }

    /// Show topic `row` of the opened source. Ignored when no source is open
    /// or the row does not exist in the snapshot.
    pub fn select_topic(&mut self, row: usize, renderer: &dyn TextRenderer) -> bool {
        let Some(source) = self.state.source() else {
            return false;
        };
        let Some(topic) = self.opened.as_ref().and_then(|s| s.topic(row)) else {
            return false;
        };

        self.content = Some(render_topic(renderer, topic));
        self.state = NavState::ViewingContent { source, topic: row };
        true
    }

    /// Whether the registry holds a newer value for the opened source.
    pub fn is_stale(&self, registry: &Registry) -> bool {
        match (self.state.source(), &self.opened) {
            (Some(index), Some(opened)) => registry
                .snapshot(index)
                .is_some_and(|current| !Arc::ptr_eq(&current, opened)),
            _ => false,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Topic;
    use crate::render::Html2TextRenderer;

    fn registry() -> Registry {
        Registry::new(vec![
            Source::new("Jobs DOU PHP", "https://jobs.dou.ua/vacancies/feeds/?category=PHP"),
            Source::new("Jobs DOU Golang", "https://jobs.dou.ua/vacancies/feeds/?category=Golang"),
            Source::new("Jobs DOU Architect", "https://jobs.dou.ua/vacancies/feeds/?category=Architect"),
        ])
    }

    fn selected(rows: &[Row]) -> Vec<usize> {
        rows.iter()
            .enumerate()
            .filter(|(_, r)| r.selected)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_initial_state_lists_sources() {
        let nav = Navigator::new(&registry());

        assert_eq!(nav.state(), NavState::ViewingSources);
        let labels: Vec<String> = nav.source_rows().into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Jobs DOU PHP", "Jobs DOU Golang", "Jobs DOU Architect"]);
        assert!(selected(&nav.source_rows()).is_empty());
        assert!(nav.topic_rows().is_empty());
        assert!(nav.content().is_none());
    }

    #[test]
    fn test_select_source_highlights_only_that_row() {
        let registry = registry();
        registry
            .publish(1, vec![Topic::new("a", "", ""), Topic::new("b", "", "")])
            .unwrap();
        let mut nav = Navigator::new(&registry);

        assert!(nav.select_source(0, &registry));
        assert!(nav.select_source(1, &registry));

        assert_eq!(nav.state(), NavState::ViewingTopics { source: 1 });
        assert_eq!(selected(&nav.source_rows()), vec![1]);

        let topics = nav.topic_rows();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].label, "a");
        assert!(selected(&topics).is_empty());
    }

    #[test]
    fn test_select_pending_source_has_no_topics() {
        let registry = registry();
        let mut nav = Navigator::new(&registry);

        assert!(nav.select_source(2, &registry));
        assert!(nav.topic_rows().is_empty());
        assert_eq!(nav.topic_count(), 0);
        assert!(!nav.select_topic(0, &Html2TextRenderer::new()));
        assert_eq!(nav.state(), NavState::ViewingTopics { source: 2 });
    }

    #[test]
    fn test_select_unavailable_source_exposes_reason() {
        let registry = registry();
        registry.mark_unavailable(0, "Fetch timed out after 60s").unwrap();
        let mut nav = Navigator::new(&registry);

        nav.select_source(0, &registry);
        assert!(nav.topic_rows().is_empty());
        assert_eq!(
            nav.opened_source().and_then(|s| s.unavailable_reason()),
            Some("Fetch timed out after 60s")
        );
    }

    #[test]
    fn test_out_of_range_selection_is_ignored() {
        let registry = registry();
        let mut nav = Navigator::new(&registry);

        assert!(!nav.select_source(3, &registry));
        assert_eq!(nav.state(), NavState::ViewingSources);
        assert!(!nav.select_topic(0, &Html2TextRenderer::new()));
    }

    #[test]
    fn test_select_topic_renders_content() {
        let registry = registry();
        registry
            .publish(1, vec![Topic::new("Backend Engineer", "Acme", "<p>Great job</p>")])
            .unwrap();
        let mut nav = Navigator::new(&registry);
        let renderer = Html2TextRenderer::new();

        nav.select_source(1, &registry);
        assert!(nav.select_topic(0, &renderer));

        assert_eq!(nav.state(), NavState::ViewingContent { source: 1, topic: 0 });
        assert_eq!(selected(&nav.topic_rows()), vec![0]);
        assert_eq!(
            nav.content().map(|c| c.text()),
            Some("Backend Engineer \n\nGreat job")
        );
    }

    #[test]
    fn test_reselecting_topic_is_idempotent() {
        let registry = registry();
        registry
            .publish(0, vec![Topic::new("x", "", "<p>one</p>"), Topic::new("y", "", "<p>two</p>")])
            .unwrap();
        let mut nav = Navigator::new(&registry);
        let renderer = Html2TextRenderer::new();

        nav.select_source(0, &registry);
        nav.select_topic(1, &renderer);
        let first = nav.content().cloned();
        let first_rows = nav.topic_rows();

        nav.select_topic(1, &renderer);
        assert_eq!(nav.content().cloned(), first);
        assert_eq!(nav.topic_rows(), first_rows);
        assert_eq!(nav.state(), NavState::ViewingContent { source: 0, topic: 1 });
    }

    #[test]
    fn test_switching_source_clears_content() {
        let registry = registry();
        registry.publish(0, vec![Topic::new("x", "", "body")]).unwrap();
        let mut nav = Navigator::new(&registry);

        nav.select_source(0, &registry);
        nav.select_topic(0, &Html2TextRenderer::new());
        nav.select_source(2, &registry);

        assert_eq!(nav.state(), NavState::ViewingTopics { source: 2 });
        assert!(nav.content().is_none());
        assert!(nav.topic_rows().is_empty());
    }

    #[test]
    fn test_open_pane_is_a_snapshot() {
        let registry = registry();
        let mut nav = Navigator::new(&registry);

        nav.select_source(1, &registry);
        assert!(!nav.is_stale(&registry));

        registry.publish(1, vec![Topic::new("late", "", "")]).unwrap();
        assert!(nav.topic_rows().is_empty());
        assert!(nav.is_stale(&registry));

        nav.select_source(1, &registry);
        assert_eq!(nav.topic_rows()[0].label, "late");
        assert!(!nav.is_stale(&registry));
    }

    #[test]
    fn test_quit_from_any_state() {
        let registry = registry();

        let mut idle = Navigator::new(&registry);
        idle.quit();

        let mut browsing = Navigator::new(&registry);
        browsing.select_source(0, &registry);
        browsing.quit();

        assert!(idle.should_quit());
        assert!(browsing.should_quit());
    }
}
