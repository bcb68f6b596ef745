//! # feedpane
//!
//! A terminal reader for a fixed list of RSS/Atom feeds.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Registry → Navigator → UI
//! ```
//!
//! Every configured source is fetched concurrently at startup. Each fetch
//! writes its own registry slot once; the UI is usable immediately and
//! reads snapshots of those slots as the user drills down from sources to
//! topics to a topic's content.

/// Application context and error types.
pub mod app;

/// Command-line flags.
pub mod cli;

/// TOML configuration: sources, fetch policy, colors and keybindings.
pub mod config;

/// Sources and topics.
pub mod domain;

/// HTTP fetching and the per-source fetch supervisor.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for downloading a feed
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`FetchSupervisor`](fetcher::supervisor::FetchSupervisor): one task per source
pub mod fetcher;

/// The source → topic → content selection state machine.
pub mod navigation;

/// RSS/Atom parsing into [`Topic`](domain::Topic)s.
pub mod normalizer;

/// Shared, write-once store of every source's topics.
pub mod registry;

/// HTML to plain text for the content pane.
pub mod render;

/// Terminal user interface.
///
/// Logo header, three panes side by side (sources, topics, content) on
/// terminals at least 100 columns wide, only topics on narrower ones, and
/// a status footer. Esc quits, Enter shows the cursor and then selects,
/// Tab cycles panes, mouse clicks select rows.
pub mod tui;
