use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::navigation::Row;
use crate::tui::app::{ActivePane, ListCursor, PaneAreas, TuiApp};

const LOGO: &str = r".__  __. __.  .__         .
[__)(__ (__   [__) _  _. _| _ ._.
|  \.__).__)  |  \(/,(_](_](/,[  ";

/// Terminals narrower than this only show the topic pane.
pub const WIDE_LAYOUT_MIN_WIDTH: u16 = 100;

const SOURCES_WIDTH: u16 = 30;
const TOPICS_WIDTH: u16 = 40;

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Logo
            Constraint::Min(3),    // Panes
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(LOGO).style(Style::default().fg(colors.header)),
        chunks[0],
    );

    app.areas = pane_areas(chunks[1]);

    if let Some(area) = app.areas.sources {
        render_sources_pane(frame, app, area, colors);
    }
    if let Some(area) = app.areas.topics {
        render_topics_pane(frame, app, area, colors);
    }
    if let Some(area) = app.areas.content {
        render_content_pane(frame, app, area, colors);
    }

    render_footer(frame, app, chunks[2], colors);
}

/// Split the body into panes. The narrow layout hides sources and content.
pub fn pane_areas(body: Rect) -> PaneAreas {
    if body.width < WIDE_LAYOUT_MIN_WIDTH {
        return PaneAreas {
            sources: None,
            topics: Some(body),
            content: None,
        };
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SOURCES_WIDTH),
            Constraint::Length(TOPICS_WIDTH),
            Constraint::Min(0),
        ])
        .split(body);

    PaneAreas {
        sources: Some(columns[0]),
        topics: Some(columns[1]),
        content: Some(columns[2]),
    }
}

fn pane_block<'a>(title: impl Into<Line<'a>>, active: bool, colors: &ColorConfig) -> Block<'a> {
    let border = if active {
        colors.active_border
    } else {
        colors.inactive_border
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn render_list(
    frame: &mut Frame,
    rows: Vec<Row>,
    block: Block,
    cursor: &mut ListCursor,
    area: Rect,
    colors: &ColorConfig,
) {
    let items: Vec<ListItem> = rows
        .into_iter()
        .map(|row| {
            let color = if row.selected {
                colors.selected_row
            } else {
                colors.unselected_row
            };
            ListItem::new(row.label).style(Style::default().fg(color))
        })
        .collect();

    let mut list = List::new(items).block(block);
    if cursor.cursor_mode {
        list = list
            .highlight_style(Style::default().bg(colors.cursor_bg).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
    }

    frame.render_stateful_widget(list, area, &mut cursor.state);
}

fn render_sources_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let block = pane_block(
        " Sources ",
        app.active_pane == ActivePane::Sources,
        colors,
    );
    let rows = app.navigator.source_rows();
    render_list(frame, rows, block, &mut app.sources, area, colors);
}

fn render_topics_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let title = match app.navigator.opened_source() {
        None => Line::from(" Topics "),
        Some(source) => match source.unavailable_reason() {
            Some(reason) => Line::styled(
                format!(" {}: unavailable ({}) ", source.name, reason),
                Style::default().fg(colors.error),
            ),
            None if app.topics_stale => {
                Line::from(format!(" {} [updated, select again] ", source.name))
            }
            None => Line::from(format!(" {} ({}) ", source.name, source.topics().len())),
        },
    };

    let block = pane_block(title, app.active_pane == ActivePane::Topics, colors);
    let rows = app.navigator.topic_rows();
    render_list(frame, rows, block, &mut app.topics, area, colors);
}

fn render_content_pane(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let block = pane_block(" Content ", app.active_pane == ActivePane::Content, colors);

    let paragraph = match app.navigator.content() {
        Some(view) if view.is_failed() => {
            Paragraph::new(view.text()).style(Style::default().fg(colors.error))
        }
        Some(view) => Paragraph::new(view.text()),
        None => Paragraph::new("Content"),
    };

    frame.render_widget(
        paragraph
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((app.content_scroll, 0)),
        area,
    );
}

fn render_footer(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let version = concat!("Ver ", env!("CARGO_PKG_VERSION"), " alpha");
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(version.len() as u16 + 1)])
        .split(area);

    let status = app
        .status_message
        .clone()
        .unwrap_or_else(|| app.summary.to_string());
    let style = Style::default().fg(colors.footer);

    frame.render_widget(Paragraph::new(status).style(style), columns[0]);
    frame.render_widget(
        Paragraph::new(version)
            .style(style)
            .alignment(Alignment::Right),
        columns[1],
    );
}
