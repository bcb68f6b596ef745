use crate::domain::Topic;

/// What is currently known about a source's entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicState {
    /// The fetch for this source has not finished yet.
    Pending,
    /// Entries in feed order; the topic index is the vector index.
    Loaded(Vec<Topic>),
    /// The fetch failed; the reason is shown to the user.
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub url: String,
    pub topics: TopicState,
}

impl Source {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            topics: TopicState::Pending,
        }
    }

    /// Loaded topics, or an empty slice while pending or unavailable.
    pub fn topics(&self) -> &[Topic] {
        match &self.topics {
            TopicState::Loaded(topics) => topics,
            TopicState::Pending | TopicState::Unavailable(_) => &[],
        }
    }

    pub fn topic(&self, index: usize) -> Option<&Topic> {
        self.topics().get(index)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.topics, TopicState::Pending)
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.topics {
            TopicState::Unavailable(reason) => Some(reason),
            _ => None,
        }
    }

    /// Copy of this source with a new topic state.
    pub fn with_topics(&self, topics: TopicState) -> Self {
        Self {
            name: self.name.clone(),
            url: self.url.clone(),
            topics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_source_is_pending_and_empty() {
        let source = Source::new("Jobs DOU PHP", "https://jobs.dou.ua/vacancies/feeds/?category=PHP");
        assert!(source.is_pending());
        assert!(source.topics().is_empty());
        assert_eq!(source.unavailable_reason(), None);
    }

    #[test]
    fn test_unavailable_source_has_no_topics() {
        let source = Source::new("a", "https://a.example/feed")
            .with_topics(TopicState::Unavailable("timed out".into()));
        assert!(source.topics().is_empty());
        assert_eq!(source.unavailable_reason(), Some("timed out"));
        assert!(source.topic(0).is_none());
    }

    #[test]
    fn test_loaded_topics_are_indexed_in_order() {
        let source = Source::new("a", "https://a.example/feed").with_topics(TopicState::Loaded(vec![
            Topic::new("first", "", ""),
            Topic::new("second", "", ""),
        ]));
        assert_eq!(source.topic(0).map(|t| t.name.as_str()), Some("first"));
        assert_eq!(source.topic(1).map(|t| t.name.as_str()), Some("second"));
        assert!(source.topic(2).is_none());
    }
}
