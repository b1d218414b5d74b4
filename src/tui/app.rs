//! TUI application state and event handling.
//!
//! The `App` owns the query state, the last applied collaborator result and the
//! per-view presentation state. It manages:
//!
//! - **Query line**: `directives | free text`. Free text is debounced 300ms and then
//!   becomes the search query; directives are applied on Enter
//! - **Background fetches**: every collaborator call runs on a worker thread; only
//!   the latest response of each purpose is applied
//! - **Pipeline recomputation**: sort, range and category edits recompute locally;
//!   only layer or search changes refetch
//! - **Status messages**: Transient feedback for clipboard operations and errors
//! - **Dirty state tracking**: Redraw only when state changes
//!
//! # Example
//!
//! ```rust,ignore
//! let source = Arc::new(HttpEntrySource::new("http://localhost:8000", timeout)?);
//! let mut app = App::new(source);
//! app.run(&mut terminal)?;
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::{info, warn};

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::client::EntrySource;
use crate::clipboard::copy_post_url;
use crate::models::{Entry, LayerInfo, QueryState, Stats};
use crate::pipeline::{available_categories, parse_directives, run_pipeline, split_query_line, year_bounds};
use crate::session::{Debouncer, FetchPayload, FetchResponse, Fetcher, RequestPurpose};
use crate::views::{ViewMode, ViewRow, ViewState};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest accepted query line
const MAX_INPUT_LEN: usize = 256;
/// Rows moved by PageUp/PageDown
const PAGE_STEP: isize = 10;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Pane receiving keyboard input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Search,
    Results,
    Layers,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Results,
            Focus::Results => Focus::Layers,
            Focus::Layers => Focus::Search,
        }
    }
}

/// Outcome of the last `/stats` fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StatsState {
    #[default]
    NotLoaded,
    Loaded(Stats),
    Failed,
}

pub struct App {
    fetcher: Fetcher,
    debouncer: Debouncer<String>,
    query: QueryState,
    input: String,
    focus: Focus,
    // Collaborator result for the current layer/search selection
    source_entries: Vec<Entry>,
    // Pipeline output over `source_entries`
    visible: Vec<Entry>,
    categories: Vec<String>,
    year_bounds: (i32, i32),
    layers: Vec<LayerInfo>,
    stats: StatsState,
    show_stats: bool,
    view: ViewState,
    selected_idx: usize,
    layer_idx: usize,
    detail: Option<Entry>,
    directive_error: Option<String>,
    status_message: Option<StatusMessage>,
    should_quit: bool,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(source: Arc<dyn EntrySource>) -> Self {
        Self {
            fetcher: Fetcher::new(source),
            debouncer: Debouncer::default(),
            query: QueryState::new(),
            input: String::new(),
            focus: Focus::default(),
            source_entries: Vec::new(),
            visible: Vec::new(),
            categories: Vec::new(),
            year_bounds: year_bounds(&[]),
            layers: Vec::new(),
            stats: StatsState::default(),
            show_stats: false,
            view: ViewState::default(),
            selected_idx: 0,
            layer_idx: 0,
            detail: None,
            directive_error: None,
            status_message: None,
            should_quit: false,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        }
    }

    /// Issue the initial layer catalog and timeline requests
    pub fn start(&mut self) {
        info!("starting interactive session");
        self.fetcher.request_layers();
        self.fetcher.request_entries(self.query.source_request());
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.start();

        while !self.should_quit {
            self.check_and_clear_expired_status();

            if let Some(text) = self.debouncer.poll(Instant::now()) {
                self.apply_search(text);
            }
            while let Some(response) = self.fetcher.try_next() {
                self.apply_response(response);
            }

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                let rows = self.view.rows(&self.visible);
                let state = self.render_state(&rows);
                terminal.draw(|f| render_ui(f, &state))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(50))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn render_state<'a>(&'a self, rows: &'a [ViewRow<'a>]) -> RenderState<'a> {
        RenderState {
            input: &self.input,
            focus: self.focus,
            query: &self.query,
            rows,
            selected_idx: self.selected_idx,
            view: &self.view,
            summary: self.view.summary(&self.visible),
            visible: &self.visible,
            categories: &self.categories,
            year_bounds: self.year_bounds,
            layers: &self.layers,
            layer_idx: self.layer_idx,
            stats: self.show_stats.then_some(&self.stats),
            detail: self.detail.as_ref(),
            loading: self.fetcher.is_loading(),
            directive_error: self.directive_error.as_deref(),
            status_message: self.status_message.as_ref(),
        }
    }

    /// Apply a current (non-stale) collaborator response.
    ///
    /// Failures leave the previous data in place.
    fn apply_response(&mut self, response: FetchResponse) {
        match response.payload {
            FetchPayload::Entries(Ok(entries)) => self.apply_results(entries),
            FetchPayload::Entries(Err(e)) => {
                warn!(error = %e, "failed to load posts");
                self.set_status("✗ Failed to load posts", MessageType::Error, STATUS_ERROR_DURATION_MS);
            }
            FetchPayload::Layers(Ok(layers)) => {
                self.layers = layers;
                self.layer_idx = self.layer_idx.min(self.layers.len().saturating_sub(1));
            }
            FetchPayload::Layers(Err(e)) => {
                warn!(error = %e, "failed to load layers");
                self.set_status("✗ Failed to load layers", MessageType::Error, STATUS_ERROR_DURATION_MS);
            }
            FetchPayload::Stats(Ok(stats)) => self.stats = StatsState::Loaded(stats),
            FetchPayload::Stats(Err(e)) => {
                warn!(error = %e, "failed to load statistics");
                if !matches!(self.stats, StatsState::Loaded(_)) {
                    self.stats = StatsState::Failed;
                }
                self.set_status(
                    "✗ Failed to load statistics",
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }
        self.needs_redraw = true;
    }

    /// Replace the source collection; pagination and grid expansion start over
    fn apply_results(&mut self, entries: Vec<Entry>) {
        self.source_entries = entries;
        self.recompute();
        self.view.reset_for(&self.visible);
        self.selected_idx = 0;
    }

    /// Rerun the pipeline over the current source collection
    fn recompute(&mut self) {
        self.visible = run_pipeline(&self.source_entries, &self.query);
        self.categories = available_categories(&self.source_entries);
        self.year_bounds = year_bounds(&self.source_entries);
        self.clamp_selection();
        self.needs_redraw = true;
    }

    /// Switch to `next`, refetching only when the source collection changes
    fn set_query(&mut self, next: QueryState) {
        let refetch = next.source_request() != self.query.source_request();
        let layers_changed = next.selected_layers != self.query.selected_layers;
        self.query = next;

        if refetch {
            self.fetcher.request_entries(self.query.source_request());
        }
        if layers_changed && self.show_stats {
            self.fetcher.request_stats();
        }
        self.recompute();
    }

    fn apply_search(&mut self, text: String) {
        if text != self.query.search_query {
            let next = self.query.clone().with_search(text);
            self.set_query(next);
        }
    }

    /// Parse the directive portion of the query line and apply it
    fn apply_directives(&mut self) {
        let (directives, text) = split_query_line(&self.input);
        let text = text.to_string();

        let next = parse_directives(directives)
            .and_then(|parsed| parsed.apply(&self.query.clone().with_search(text)));
        match next {
            Ok(next) => {
                self.debouncer.cancel();
                self.directive_error = None;
                self.set_query(next);
            }
            Err(e) => {
                self.directive_error = Some(format!(
                    "{:#} | Try: layer:data from:2019 sort:oldest | kafka",
                    e
                ));
                self.needs_redraw = true;
            }
        }
    }

    fn rows(&self) -> Vec<ViewRow<'_>> {
        self.view.rows(&self.visible)
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        self.selected_idx = self.selected_idx.min(len.saturating_sub(1));
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Escape => self.escape(),
            Action::MoveUp => self.move_focused(-1),
            Action::MoveDown => self.move_focused(1),
            Action::PageUp => self.move_focused(-PAGE_STEP),
            Action::PageDown => self.move_focused(PAGE_STEP),
            Action::Activate => self.activate(),
            Action::CycleFocus => {
                self.focus = self.focus.next();
                self.needs_redraw = true;
            }
            Action::CycleView => {
                self.view.mode = self.view.mode.next();
                self.selected_idx = 0;
                self.needs_redraw = true;
            }
            Action::ToggleStats => {
                self.show_stats = !self.show_stats;
                if self.show_stats {
                    self.fetcher.request_stats();
                }
                self.needs_redraw = true;
            }
            Action::CopyUrl => self.copy_url(),
            Action::Refresh => {
                self.fetcher.request_layers();
                self.fetcher.request_entries(self.query.source_request());
                if self.show_stats {
                    self.fetcher.request_stats();
                }
                self.needs_redraw = true;
            }
            Action::Input(c) => match self.focus {
                Focus::Search => self.update_input(c),
                Focus::Layers if c == ' ' => self.toggle_selected_layer(),
                _ => {}
            },
            Action::DeleteChar => {
                if self.focus == Focus::Search {
                    self.delete_char();
                }
            }
            Action::None => {}
        }
    }

    fn escape(&mut self) {
        if self.detail.take().is_some() {
            self.needs_redraw = true;
        } else if !self.input.is_empty() {
            self.input.clear();
            self.debouncer.cancel();
            self.directive_error = None;
            let next = self.query.clone().with_search("");
            self.set_query(next);
        } else {
            self.should_quit = true;
        }
    }

    fn move_focused(&mut self, delta: isize) {
        match self.focus {
            Focus::Layers => {
                self.layer_idx = step(self.layer_idx, delta, self.layers.len());
                self.needs_redraw = true;
            }
            Focus::Search | Focus::Results => self.move_selection(delta),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let total = self.rows().len();
        let old_idx = self.selected_idx;
        self.selected_idx = step(self.selected_idx, delta, total);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }

        // Reaching the sentinel row pulls in the next page
        if matches!(self.rows().get(self.selected_idx), Some(ViewRow::LoadMore { .. })) {
            self.load_more();
        }
    }

    fn load_more(&mut self) {
        if self.view.load_more(&self.visible) {
            self.needs_redraw = true;
        }
    }

    fn activate(&mut self) {
        match self.focus {
            Focus::Search => self.apply_directives(),
            Focus::Layers => self.toggle_selected_layer(),
            Focus::Results => self.activate_row(),
        }
    }

    fn activate_row(&mut self) {
        let target = match self.rows().get(self.selected_idx) {
            Some(ViewRow::Post(entry)) => RowTarget::Post((*entry).clone()),
            Some(ViewRow::Section { key, expanded: Some(_), .. }) => RowTarget::Year(key.clone()),
            Some(ViewRow::LoadMore { .. }) => RowTarget::LoadMore,
            Some(ViewRow::Section { expanded: None, .. }) | Some(ViewRow::End { .. }) | None => {
                RowTarget::Inert
            }
        };
        match target {
            RowTarget::Post(entry) => self.detail = Some(entry),
            RowTarget::Year(key) => {
                self.view.toggle_year(&key);
                self.clamp_selection();
            }
            RowTarget::LoadMore => self.load_more(),
            RowTarget::Inert => {}
        }
        self.needs_redraw = true;
    }

    fn toggle_selected_layer(&mut self) {
        let Some(layer) = self.layers.get(self.layer_idx).map(|info| info.name.clone()) else {
            return;
        };
        let next = self.query.clone().toggle_layer(&layer);
        self.set_query(next);
    }

    fn selected_entry(&self) -> Option<Entry> {
        if let Some(entry) = &self.detail {
            return Some(entry.clone());
        }
        match self.rows().get(self.selected_idx) {
            Some(ViewRow::Post(entry)) => Some((*entry).clone()),
            _ => None,
        }
    }

    fn copy_url(&mut self) {
        let Some(entry) = self.selected_entry() else {
            self.set_status("✗ No post selected", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };
        match copy_post_url(&entry) {
            Ok(_) => {
                self.set_status("✓ Copied URL to clipboard", MessageType::Success, STATUS_SUCCESS_DURATION_MS)
            }
            Err(e) => self.set_status(
                format!("✗ Clipboard error: {}", e),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            ),
        }
    }

    fn update_input(&mut self, c: char) {
        // Limit query line to prevent runaway input
        if self.input.chars().count() < MAX_INPUT_LEN {
            self.input.push(c);
            self.schedule_search();
        }
    }

    fn delete_char(&mut self) {
        if self.input.pop().is_some() {
            self.schedule_search();
        }
    }

    /// Restart the quiet period for the free-text portion of the query line
    fn schedule_search(&mut self) {
        let (_, text) = split_query_line(&self.input);
        self.debouncer.schedule(text.to_string(), Instant::now());
        self.needs_redraw = true;
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view.mode
    }

    pub fn is_pending(&self, purpose: RequestPurpose) -> bool {
        self.fetcher.is_pending(purpose)
    }
}

/// What Enter does on the selected result row
enum RowTarget {
    Post(Entry),
    Year(String),
    LoadMore,
    Inert,
}

/// Move `idx` by `delta` within `0..len`
fn step(idx: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let moved = (idx as isize + delta).max(0) as usize;
    moved.min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FetchError;
    use crate::models::{DateRange, SortKey, SourceRequest};

    /// In-memory collaborator: timeline filtered by layer, search by title substring
    struct StaticSource {
        entries: Vec<Entry>,
    }

    impl EntrySource for StaticSource {
        fn fetch_layers(&self) -> Result<Vec<LayerInfo>, FetchError> {
            Ok(vec![
                LayerInfo { name: "observability".to_string(), count: 2, earliest: None, latest: None },
                LayerInfo { name: "performance".to_string(), count: 1, earliest: None, latest: None },
            ])
        }

        fn fetch_timeline(&self, layers: &[String]) -> Result<Vec<Entry>, FetchError> {
            Ok(self
                .entries
                .iter()
                .filter(|e| layers.is_empty() || e.layers.iter().any(|l| layers.contains(l)))
                .cloned()
                .collect())
        }

        fn search(&self, query: &str, layers: &[String]) -> Result<Vec<Entry>, FetchError> {
            Ok(self
                .fetch_timeline(layers)?
                .into_iter()
                .filter(|e| e.title.to_lowercase().contains(&query.to_lowercase()))
                .collect())
        }

        fn fetch_stats(&self) -> Result<Stats, FetchError> {
            Err(FetchError::Status { endpoint: "/stats".to_string(), status: 503 })
        }
    }

    fn entry(id: u32, title: &str, date: Option<&str>, layer: &str) -> Entry {
        Entry {
            path: format!("/posts/{}_post.md", id),
            title: title.to_string(),
            date: date.map(str::to_string),
            layers: vec![layer.to_string()],
            snippet: String::new(),
        }
    }

    fn sample_entries() -> Vec<Entry> {
        vec![
            entry(1, "[Ops] Tracing at scale", Some("2021-05-01"), "observability"),
            entry(2, "Alerting without noise", Some("2019-01-01"), "observability"),
            entry(3, "[Perf] Faster startup", Some("2020-03-15"), "performance"),
            entry(4, "Undated notes", None, "performance"),
        ]
    }

    fn app() -> App {
        App::new(Arc::new(StaticSource { entries: sample_entries() }))
    }

    /// App with the initial fetches applied
    fn loaded_app() -> App {
        let mut app = app();
        app.start();
        drain(&mut app);
        app
    }

    fn drain(app: &mut App) {
        while app.fetcher.is_loading() {
            match app.fetcher.wait_next(Duration::from_secs(2)) {
                Some(response) => app.apply_response(response),
                None => break,
            }
        }
    }

    fn visible_titles(app: &App) -> Vec<&str> {
        app.visible.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_app_new_initializes_state() {
        let app = app();
        assert_eq!(app.selected_idx, 0);
        assert_eq!(app.input, "");
        assert_eq!(app.focus, Focus::Search);
        assert_eq!(app.view_mode(), ViewMode::Cards);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_start_loads_layers_and_timeline() {
        let app = loaded_app();
        assert_eq!(app.layers.len(), 2);
        assert_eq!(
            visible_titles(&app),
            vec!["[Ops] Tracing at scale", "[Perf] Faster startup", "Alerting without noise", "Undated notes"]
        );
        assert_eq!(app.categories, vec!["Ops", "Perf"]);
        assert_eq!(app.year_bounds, (2019, 2021));
    }

    #[test]
    fn test_typing_is_debounced() {
        let mut app = loaded_app();
        for c in "trac".chars() {
            app.handle_action(Action::Input(c));
        }

        // Nothing is sent while the quiet period runs
        assert!(app.debouncer.is_pending());
        assert!(!app.is_pending(RequestPurpose::Entries));
        assert_eq!(app.query.search_query, "");

        let fired = app.debouncer.poll(Instant::now() + Duration::from_secs(1));
        assert_eq!(fired.as_deref(), Some("trac"));
        app.apply_search("trac".to_string());
        drain(&mut app);

        assert_eq!(visible_titles(&app), vec!["[Ops] Tracing at scale"]);
    }

    #[test]
    fn test_input_cap_counts_characters() {
        let mut app = loaded_app();
        for _ in 0..MAX_INPUT_LEN + 10 {
            app.handle_action(Action::Input('é'));
        }

        assert_eq!(app.input.chars().count(), MAX_INPUT_LEN);
        assert_eq!(app.input.len(), MAX_INPUT_LEN * 'é'.len_utf8());
    }

    #[test]
    fn test_single_character_search_does_not_refetch() {
        let mut app = loaded_app();
        app.apply_search("t".to_string());
        assert_eq!(app.query.search_query, "t");
        assert!(!app.is_pending(RequestPurpose::Entries));
    }

    #[test]
    fn test_directives_recompute_locally() {
        let mut app = loaded_app();
        app.input = "from:2020 sort:title-asc |".to_string();

        app.handle_action(Action::Activate);

        assert!(app.directive_error.is_none());
        assert!(!app.is_pending(RequestPurpose::Entries));
        assert_eq!(app.query.sort, SortKey::TitleAsc);
        assert_eq!(app.query.date_range, DateRange::new(Some(2020), None).unwrap());
        assert_eq!(visible_titles(&app), vec!["[Ops] Tracing at scale", "[Perf] Faster startup"]);
    }

    #[test]
    fn test_layer_directive_refetches() {
        let mut app = loaded_app();
        app.input = "layer:performance |".to_string();

        app.handle_action(Action::Activate);

        assert!(app.is_pending(RequestPurpose::Entries));
        drain(&mut app);
        assert_eq!(visible_titles(&app), vec!["[Perf] Faster startup", "Undated notes"]);
    }

    #[test]
    fn test_category_directive_filters() {
        let mut app = loaded_app();
        app.input = "category:Ops |".to_string();
        app.handle_action(Action::Activate);
        assert_eq!(visible_titles(&app), vec!["[Ops] Tracing at scale"]);
    }

    #[test]
    fn test_invalid_directive_keeps_state() {
        let mut app = loaded_app();
        let before = app.query.clone();
        app.input = "from:20 |".to_string();

        app.handle_action(Action::Activate);

        assert!(app.directive_error.is_some());
        assert_eq!(app.query, before);
    }

    #[test]
    fn test_toggle_layer_from_sidebar() {
        let mut app = loaded_app();
        app.handle_action(Action::CycleFocus);
        app.handle_action(Action::CycleFocus);
        assert_eq!(app.focus, Focus::Layers);

        app.handle_action(Action::MoveDown);
        app.handle_action(Action::Input(' '));

        assert!(app.query.selected_layers.contains("performance"));
        assert_eq!(
            app.fetcher.wait_next(Duration::from_secs(2)).map(|r| r.payload.purpose()),
            Some(RequestPurpose::Entries)
        );
    }

    #[test]
    fn test_open_and_close_detail() {
        let mut app = loaded_app();
        app.focus = Focus::Results;

        app.handle_action(Action::Activate);
        assert_eq!(app.detail.as_ref().map(|e| e.title.as_str()), Some("[Ops] Tracing at scale"));

        app.handle_action(Action::Escape);
        assert!(app.detail.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_escape_clears_query_then_quits() {
        let mut app = loaded_app();
        app.input = "abc".to_string();

        app.handle_action(Action::Escape);
        assert_eq!(app.input, "");
        assert!(!app.should_quit);

        app.handle_action(Action::Escape);
        assert!(app.should_quit);
    }

    #[test]
    fn test_sentinel_row_loads_next_page() {
        let entries: Vec<Entry> = (0..40)
            .map(|i| entry(i, &format!("post {}", i), Some(&format!("2021-01-{:02}", i % 28 + 1)), "performance"))
            .collect();
        let mut app = App::new(Arc::new(StaticSource { entries }));
        app.start();
        drain(&mut app);
        app.focus = Focus::Results;

        // 30 posts + sentinel
        assert_eq!(app.rows().len(), 31);
        app.handle_action(Action::PageDown);
        app.handle_action(Action::PageDown);
        app.handle_action(Action::PageDown);
        assert_eq!(app.view.cards.loaded_pages(), 2);
        assert_eq!(app.rows().last(), Some(&ViewRow::End { total: 40 }));

        // Further movement at the end requests nothing more
        app.handle_action(Action::PageDown);
        assert_eq!(app.view.cards.loaded_pages(), 2);
    }

    #[test]
    fn test_cycle_view_resets_selection() {
        let mut app = loaded_app();
        app.selected_idx = 2;
        app.handle_action(Action::CycleView);
        assert_eq!(app.view_mode(), ViewMode::Magazine);
        assert_eq!(app.selected_idx, 0);
    }

    #[test]
    fn test_grid_year_toggle() {
        let mut app = loaded_app();
        app.view.mode = ViewMode::Grid;
        app.focus = Focus::Results;

        // 2021 and 2020 expanded, 2019 collapsed: header, post, header, post, header
        assert_eq!(app.rows().len(), 5);
        app.selected_idx = 4;
        app.handle_action(Action::Activate);
        assert_eq!(app.rows().len(), 6);
    }

    #[test]
    fn test_stats_failure_is_reported() {
        let mut app = loaded_app();
        app.handle_action(Action::ToggleStats);
        drain(&mut app);

        assert_eq!(app.stats, StatsState::Failed);
        let msg = app.status_message.as_ref().expect("status message");
        assert_eq!(msg.text, "✗ Failed to load statistics");
        assert_eq!(msg.message_type, MessageType::Error);
    }

    #[test]
    fn test_failed_fetch_keeps_previous_entries() {
        let mut app = loaded_app();
        let before = app.visible.clone();
        let token = app.fetcher.request_entries(SourceRequest::Timeline { layers: vec![] });
        app.apply_response(FetchResponse {
            token,
            payload: FetchPayload::Entries(Err(FetchError::Status {
                endpoint: "/timeline".to_string(),
                status: 500,
            })),
        });
        assert_eq!(app.visible, before);
        assert_eq!(app.status_message.as_ref().map(|m| m.text.as_str()), Some("✗ Failed to load posts"));
    }

    #[test]
    fn test_copy_url_without_selection() {
        let mut app = app();
        app.handle_action(Action::CopyUrl);
        let msg = app.status_message.as_ref().unwrap();
        assert_eq!(msg.text, "✗ No post selected");
    }

    #[test]
    fn test_status_message_expiry() {
        let mut app = app();
        app.set_status("Expired", MessageType::Success, 0);
        std::thread::sleep(Duration::from_millis(1));
        app.check_and_clear_expired_status();
        assert!(app.status_message.is_none());

        app.set_status("Active", MessageType::Success, 10_000);
        app.check_and_clear_expired_status();
        assert_eq!(app.status_message.as_ref().unwrap().text, "Active");
    }

    #[test]
    fn test_step_bounds() {
        assert_eq!(step(0, -10, 5), 0);
        assert_eq!(step(3, 10, 5), 4);
        assert_eq!(step(2, 1, 0), 0);
    }
}
