//! Turning a topic into the text shown in the content pane.

use crate::app::{AppError, Result};
use crate::domain::Topic;

/// Line width handed to the HTML converter. The content pane wraps on its
/// own, so this only needs to be wide enough to avoid hard breaks.
pub const RENDER_WIDTH: usize = 1000;

/// Converts a body that may contain HTML into plain text.
pub trait TextRenderer {
    fn to_plain_text(&self, html: &str) -> Result<String>;
}

pub struct Html2TextRenderer {
    width: usize,
}

impl Html2TextRenderer {
    pub fn new() -> Self {
        Self {
            width: RENDER_WIDTH,
        }
    }
}

impl Default for Html2TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer for Html2TextRenderer {
    fn to_plain_text(&self, html: &str) -> Result<String> {
        html2text::config::plain()
            .string_from_read(html.as_bytes(), self.width)
            .map(|text| text.trim_end().to_string())
            .map_err(|e| AppError::Render(e.to_string()))
    }
}

/// Text for the content pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    Rendered(String),
    /// The body could not be converted; `text` still carries the title.
    Failed { text: String, reason: String },
}

impl ContentView {
    pub fn text(&self) -> &str {
        match self {
            ContentView::Rendered(text) => text,
            ContentView::Failed { text, .. } => text,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ContentView::Failed { .. })
    }
}

/// Title, a blank line, then the plain-text body.
pub fn render_topic(renderer: &dyn TextRenderer, topic: &Topic) -> ContentView {
    match renderer.to_plain_text(&topic.text) {
        Ok(body) => ContentView::Rendered(format!("{} \n\n{}", topic.name, body)),
        Err(e) => {
            let reason = e.to_string();
            tracing::warn!("Failed to render \"{}\": {}", topic.name, reason);
            ContentView::Failed {
                text: format!("{} \n\nUnable to render content: {}", topic.name, reason),
                reason,
            }
        }
    }
}
