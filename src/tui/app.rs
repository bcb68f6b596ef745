use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;

use crate::app::{AppError, Result};
use crate::fetcher::supervisor::FetchEvent;
use crate::navigation::Navigator;
use crate::registry::{LoadSummary, Registry};
use crate::render::TextRenderer;
use crate::tui::event::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Sources,
    Topics,
    Content,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Sources => ActivePane::Topics,
            ActivePane::Topics => ActivePane::Content,
            ActivePane::Content => ActivePane::Sources,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActivePane::Sources => ActivePane::Content,
            ActivePane::Topics => ActivePane::Sources,
            ActivePane::Content => ActivePane::Topics,
        }
    }
}

pub const PAGE_SIZE: usize = 10;

/// Cursor of a list pane.
///
/// The cursor is hidden until the pane is put in cursor mode (Enter, a
/// movement key or a click). In cursor mode Enter selects the cursor row.
#[derive(Debug, Default)]
pub struct ListCursor {
    pub state: ListState,
    pub cursor_mode: bool,
}

impl ListCursor {
    pub fn index(&self) -> usize {
        self.state.selected().unwrap_or(0)
    }

    fn move_by(&mut self, delta: isize, len: usize) {
        self.cursor_mode = true;
        if len == 0 {
            self.state.select(None);
            return;
        }
        let max = (len - 1) as isize;
        let next = (self.index() as isize + delta).clamp(0, max);
        self.state.select(Some(next as usize));
    }

    fn reset(&mut self) {
        self.state = ListState::default();
        self.cursor_mode = false;
    }
}

/// Screen areas of the visible panes, recorded at draw time for mouse hits.
#[derive(Debug, Default, Clone, Copy)]
pub struct PaneAreas {
    pub sources: Option<Rect>,
    pub topics: Option<Rect>,
    pub content: Option<Rect>,
}

pub struct TuiApp {
    pub navigator: Navigator,
    pub active_pane: ActivePane,
    pub sources: ListCursor,
    pub topics: ListCursor,
    pub content_scroll: u16,
    pub status_message: Option<String>,
    pub summary: LoadSummary,
    /// The opened source received topics after it was opened.
    pub topics_stale: bool,
    pub areas: PaneAreas,
}

impl TuiApp {
    pub fn new(registry: &Registry) -> Self {
        Self {
            navigator: Navigator::new(registry),
            active_pane: ActivePane::Sources,
            sources: ListCursor::default(),
            topics: ListCursor::default(),
            content_scroll: 0,
            status_message: None,
            summary: registry.summary(),
            topics_stale: false,
            areas: PaneAreas::default(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.navigator.should_quit()
    }

    pub fn handle_action(
        &mut self,
        action: Action,
        registry: &Registry,
        renderer: &dyn TextRenderer,
    ) {
        match action {
            Action::Quit => self.navigator.quit(),
            Action::Select => self.select_at_cursor(registry, renderer),
            Action::MoveUp => self.move_cursor(-1),
            Action::MoveDown => self.move_cursor(1),
            Action::PageUp => self.move_cursor(-(PAGE_SIZE as isize)),
            Action::PageDown => self.move_cursor(PAGE_SIZE as isize),
            Action::NextPane => self.active_pane = self.active_pane.next(),
            Action::PrevPane => self.active_pane = self.active_pane.prev(),
            Action::None => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        match self.active_pane {
            ActivePane::Sources => {
                let len = self.navigator.source_count();
                self.sources.move_by(delta, len);
            }
            ActivePane::Topics => {
                let len = self.navigator.topic_count();
                self.topics.move_by(delta, len);
            }
            ActivePane::Content => {
                self.content_scroll = if delta < 0 {
                    self.content_scroll.saturating_sub(delta.unsigned_abs() as u16)
                } else {
                    self.content_scroll.saturating_add(delta as u16)
                };
            }
        }
    }

    fn select_at_cursor(&mut self, registry: &Registry, renderer: &dyn TextRenderer) {
        match self.active_pane {
            ActivePane::Sources if !self.sources.cursor_mode => {
                self.sources.cursor_mode = true;
                self.sources.state.select(Some(self.sources.index()));
            }
            ActivePane::Sources => {
                let row = self.sources.index();
                self.open_source(row, registry);
            }
            ActivePane::Topics if !self.topics.cursor_mode => {
                self.topics.cursor_mode = true;
                self.topics.state.select(Some(self.topics.index()));
            }
            ActivePane::Topics => {
                let row = self.topics.index();
                self.open_topic(row, renderer);
            }
            ActivePane::Content => {}
        }
    }

    fn open_source(&mut self, row: usize, registry: &Registry) {
        if self.navigator.select_source(row, registry) {
            self.topics.reset();
            self.content_scroll = 0;
            self.topics_stale = false;
            self.active_pane = ActivePane::Topics;
        }
    }

    fn open_topic(&mut self, row: usize, renderer: &dyn TextRenderer) {
        if self.navigator.select_topic(row, renderer) {
            self.content_scroll = 0;
        }
    }

    pub fn handle_mouse(
        &mut self,
        mouse: MouseEvent,
        registry: &Registry,
        renderer: &dyn TextRenderer,
    ) {
        let position = Position::new(mouse.column, mouse.row);
        let hit = |area: Option<Rect>| area.filter(|a| a.contains(position));

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(area) = hit(self.areas.sources) {
                    self.active_pane = ActivePane::Sources;
                    if let Some(row) = row_at(area, &self.sources.state, mouse.row) {
                        if row < self.navigator.source_count() {
                            self.sources.cursor_mode = true;
                            self.sources.state.select(Some(row));
                            self.open_source(row, registry);
                        }
                    }
                } else if let Some(area) = hit(self.areas.topics) {
                    self.active_pane = ActivePane::Topics;
                    if let Some(row) = row_at(area, &self.topics.state, mouse.row) {
                        if row < self.navigator.topic_count() {
                            self.topics.cursor_mode = true;
                            self.topics.state.select(Some(row));
                            self.open_topic(row, renderer);
                        }
                    }
                } else if hit(self.areas.content).is_some() {
                    self.active_pane = ActivePane::Content;
                }
            }
            MouseEventKind::ScrollDown if hit(self.areas.content).is_some() => {
                self.content_scroll = self.content_scroll.saturating_add(1);
            }
            MouseEventKind::ScrollUp if hit(self.areas.content).is_some() => {
                self.content_scroll = self.content_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    /// Apply a progress event from the fetch supervisor.
    ///
    /// With `fail_fast` a failed source is returned as an error and the
    /// caller is expected to stop.
    pub fn handle_fetch_event(
        &mut self,
        event: FetchEvent,
        registry: &Registry,
        fail_fast: bool,
    ) -> Result<()> {
        match event {
            FetchEvent::Loaded { source, count } => {
                let name = source_name(registry, source);
                self.set_status(format!("Loaded {} topics from {}", count, name));
            }
            FetchEvent::Failed { source, reason } => {
                let name = source_name(registry, source);
                if fail_fast {
                    return Err(AppError::FetchAborted(format!("{}: {}", name, reason)));
                }
                self.set_status(format!("{} unavailable: {}", name, reason));
            }
            FetchEvent::Finished(summary) => {
                self.set_status(summary.to_string());
            }
        }

        self.summary = registry.summary();
        self.topics_stale = self.navigator.is_stale(registry);
        Ok(())
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}

fn source_name(registry: &Registry, index: usize) -> String {
    registry
        .snapshot(index)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| format!("source {}", index))
}

/// List row under screen line `y` for a bordered list drawn in `area`.
fn row_at(area: Rect, state: &ListState, y: u16) -> Option<usize> {
    let first = area.y.checked_add(1)?;
    let last = (area.y + area.height).checked_sub(1)?;
    if y < first || y >= last {
        return None;
    }
    Some((y - first) as usize + state.offset())
}
