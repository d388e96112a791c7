use logwatch_logs::{LogView, ScrollTarget};

/// Default page size until the first render reports the real viewport
const DEFAULT_VIEWPORT: usize = 20;

/// A transient message shown in the status line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// UI-specific transient state
pub struct UiState {
    /// Is the search bar focused?
    pub search_active: bool,

    /// Current search input text
    pub search_input: String,

    /// Is help overlay visible?
    pub help_visible: bool,

    /// Is the clear confirmation dialog open?
    pub confirm_clear: bool,

    /// Show statistics bar?
    pub stats_visible: bool,

    /// First visible row, counted over rows not hidden by the search
    pub log_scroll: usize,

    /// Rows that fit in the log area, updated on every render
    pub viewport_height: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            search_active: false,
            search_input: String::new(),
            help_visible: false,
            confirm_clear: false,
            stats_visible: false,
            log_scroll: 0,
            viewport_height: DEFAULT_VIEWPORT,
        }
    }
}

/// Global application state
pub struct AppState {
    /// Server the viewer is attached to, shown in the header
    pub base_url: String,

    /// UI state
    pub ui_state: UiState,

    /// Message to display (if any)
    pub message: Option<StatusMessage>,

    /// Whether app should quit
    pub should_quit: bool,

    /// Dirty flag for rendering - only render when true
    pub render_dirty: bool,
}

impl AppState {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ui_state: UiState::default(),
            message: None,
            should_quit: false,
            render_dirty: true, // Start dirty to ensure initial render
        }
    }

    pub fn show_info(&mut self, msg: impl Into<String>) {
        self.message = Some(StatusMessage::info(msg));
    }

    pub fn show_error(&mut self, msg: impl Into<String>) {
        let message = StatusMessage::error(msg);
        tracing::debug!(error = %message.text, "showing error");
        self.message = Some(message);
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    // Search input

    /// Focus the search bar, keeping the current query for editing
    pub fn start_search(&mut self) {
        self.ui_state.search_active = true;
    }

    /// Leave the search bar; the query stays applied
    pub fn close_search(&mut self) {
        self.ui_state.search_active = false;
    }

    /// Add a character to search input, returning the new input
    pub fn search_input_char(&mut self, c: char) -> &str {
        self.ui_state.search_input.push(c);
        &self.ui_state.search_input
    }

    /// Remove last character from search input, returning the new input
    pub fn search_input_backspace(&mut self) -> &str {
        self.ui_state.search_input.pop();
        &self.ui_state.search_input
    }

    pub fn clear_search_input(&mut self) {
        self.ui_state.search_input.clear();
    }

    // Scrolling over the visible rows

    fn max_scroll(&self, visible: usize) -> usize {
        visible.saturating_sub(self.ui_state.viewport_height.max(1))
    }

    /// Whether the last visible row is on screen
    pub fn is_at_bottom(&self, visible: usize) -> bool {
        self.ui_state.log_scroll >= self.max_scroll(visible)
    }

    /// Scroll up; returns whether the view ended at the bottom
    pub fn scroll_up(&mut self, n: usize, visible: usize) -> bool {
        self.clamp_scroll(visible);
        self.ui_state.log_scroll = self.ui_state.log_scroll.saturating_sub(n);
        self.is_at_bottom(visible)
    }

    /// Scroll down; returns whether the view ended at the bottom
    pub fn scroll_down(&mut self, n: usize, visible: usize) -> bool {
        self.ui_state.log_scroll = self
            .ui_state
            .log_scroll
            .saturating_add(n)
            .min(self.max_scroll(visible));
        self.is_at_bottom(visible)
    }

    pub fn page_size(&self) -> usize {
        self.ui_state.viewport_height.saturating_sub(1).max(1)
    }

    pub fn scroll_to_top(&mut self) {
        self.ui_state.log_scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self, visible: usize) {
        self.ui_state.log_scroll = self.max_scroll(visible);
    }

    /// Keep the offset inside the scrollable range
    pub fn clamp_scroll(&mut self, visible: usize) {
        let max = self.max_scroll(visible);
        if self.ui_state.log_scroll > max {
            self.ui_state.log_scroll = max;
        }
    }

    /// Move the viewport as the log component asked
    pub fn apply_scroll_target(&mut self, target: ScrollTarget, view: &LogView) {
        let visible = view.visible_count();
        match target {
            ScrollTarget::Newest => self.scroll_to_bottom(visible),
            ScrollTarget::Row(row) => {
                let position = view.visible_rows().take_while(|(i, _)| *i < row).count();
                self.ui_state.log_scroll = position.min(self.max_scroll(visible));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use logwatch_logs::{LogStream, LogStreamConfig};

    fn state(height: usize) -> AppState {
        let mut state = AppState::new("http://localhost:8000");
        state.ui_state.viewport_height = height;
        state
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = state(10);
        assert!(!state.scroll_up(5, 30));
        assert_eq!(state.ui_state.log_scroll, 0);

        assert!(state.scroll_down(100, 30));
        assert_eq!(state.ui_state.log_scroll, 20);

        assert!(!state.scroll_up(1, 30));
        assert_eq!(state.ui_state.log_scroll, 19);
    }

    #[test]
    fn test_short_log_is_always_at_bottom() {
        let mut state = state(10);
        assert!(state.is_at_bottom(3));
        assert!(state.scroll_up(1, 3));
    }

    #[test]
    fn test_shrinking_log_clamps_offset() {
        let mut state = state(10);
        state.scroll_to_bottom(50);
        assert_eq!(state.ui_state.log_scroll, 40);
        state.clamp_scroll(12);
        assert_eq!(state.ui_state.log_scroll, 2);
    }

    #[test]
    fn test_search_input_editing() {
        let mut state = state(10);
        state.start_search();
        assert_eq!(state.search_input_char('e'), "e");
        assert_eq!(state.search_input_char('r'), "er");
        assert_eq!(state.search_input_backspace(), "e");
        state.close_search();
        assert!(!state.ui_state.search_active);
        assert_eq!(state.ui_state.search_input, "e");
    }

    #[test]
    fn test_scroll_target_row_counts_visible_rows_only() {
        let now = Local.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        let mut logs = LogStream::new(LogStreamConfig::default());
        let lines: Vec<String> = (0..30)
            .map(|n| if n == 25 { "needle".to_string() } else { format!("line {n}") })
            .collect();
        logs.load_snapshot(lines, now);
        logs.submit_search("needle");

        let mut state = state(10);
        let target = logs.take_scroll_request().unwrap();
        assert_eq!(target, ScrollTarget::Row(25));
        state.apply_scroll_target(target, logs.view());
        assert_eq!(state.ui_state.log_scroll, 0);

        logs.clear_search();
        state.apply_scroll_target(ScrollTarget::Row(25), logs.view());
        assert_eq!(state.ui_state.log_scroll, 20);
    }
}
