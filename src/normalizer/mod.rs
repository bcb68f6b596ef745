use feed_rs::model::Person;
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{AppError, Result};
use crate::domain::Topic;

/// Turns a raw RSS/Atom/JSON feed body into topics, preserving entry order.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &[u8]) -> Result<Vec<Topic>> {
        let feed = parser::parse(body).map_err(|e| AppError::FeedParse(e.to_string()))?;

        let topics = feed
            .entries
            .into_iter()
            .map(|entry| {
                Topic::from_entry(
                    entry.title.map(|t| decode_html_entities(&t.content).to_string()),
                    entry.authors.into_iter().next().map(author_name),
                    entry.summary.map(|s| s.content),
                    entry.content.and_then(|c| c.body),
                )
            })
            .collect();

        Ok(topics)
    }
}

/// feed-rs names RSS `<author>` people "author" and keeps the element text
/// in `email`, e.g. `jobs@acme.com (Acme)`.
fn author_name(person: Person) -> String {
    match person.email {
        Some(email) if person.name == "author" => name_from_address(&email),
        _ => person.name,
    }
}

/// `addr (Name)` and `Name <addr>` yield the name, a bare address yields "".
fn name_from_address(text: &str) -> String {
    let text = text.trim();

    if let (Some(open), Some(close)) = (text.find('('), text.rfind(')')) {
        if open < close {
            return text[open + 1..close].trim().to_string();
        }
    }
    if let Some(open) = text.find('<') {
        return text[..open].trim().to_string();
    }
    if text.contains('@') {
        return String::new();
    }
    text.to_string()
}
