use chrono::{DateTime, Local, NaiveDate};

use logwatch_types::{ConnectionState, LogInfo, WatchEvent};

use crate::buffer::{DEFAULT_MAX_LOGS, LogBuffer, PushOutcome};
use crate::export::{ExportArtifact, ExportError};
use crate::parser::LogParser;
use crate::render::{LogView, RenderOp, ViewStatus, render_row, render_rows};
use crate::scroll::ScrollState;
use crate::search::{MIN_LIVE_QUERY_CHARS, SearchState};

/// Default number of lines requested by the bulk fetch
pub const DEFAULT_TAIL: usize = 50;

/// Tail sizes offered by [`LogStream::step_tail`], smallest first
pub const TAIL_STEPS: [usize; 9] = [10, 25, 50, 100, 200, 500, 1000, 2000, 5000];

/// Construction parameters for a [`LogStream`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogStreamConfig {
    /// Buffer capacity
    pub max_logs: usize,
    /// Lines requested by the bulk fetch
    pub tail: usize,
    /// Initial auto-scroll preference
    pub auto_scroll: bool,
}

impl Default for LogStreamConfig {
    fn default() -> Self {
        Self {
            max_logs: DEFAULT_MAX_LOGS,
            tail: DEFAULT_TAIL,
            auto_scroll: true,
        }
    }
}

/// Where the UI should move the viewport after the last change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Bottom of the log area
    Newest,
    /// A row index in [`LogView::rows`]
    Row(usize),
}

/// The log viewer component
///
/// Owns the bounded buffer and everything derived from it. All mutation goes
/// through `&mut self`, so the owner is the single writer; every change of
/// the buffer is followed by a render, then by a search pass, then by the
/// auto-scroll decision.
pub struct LogStream {
    config: LogStreamConfig,
    buffer: LogBuffer,
    view: LogView,
    search: SearchState,
    scroll: ScrollState,
    scroll_request: Option<ScrollTarget>,
    connection: ConnectionState,
    last_update: Option<DateTime<Local>>,
    info: Option<LogInfo>,
    info_error: Option<String>,
    notice: Option<String>,
    refreshing: bool,
}

impl LogStream {
    pub fn new(config: LogStreamConfig) -> Self {
        Self {
            buffer: LogBuffer::new(config.max_logs),
            scroll: ScrollState::new(config.auto_scroll),
            config,
            view: LogView::new(),
            search: SearchState::default(),
            scroll_request: None,
            connection: ConnectionState::Idle,
            last_update: None,
            info: None,
            info_error: None,
            notice: None,
            refreshing: false,
        }
    }

    // ------------------------------------------------------------------
    // Ingestion
    // ------------------------------------------------------------------

    /// Show the loading placeholder while a bulk fetch runs
    pub fn begin_load(&mut self) {
        self.view.show_status(ViewStatus::Loading);
        self.refresh_search();
    }

    /// Replace the buffer with a bulk snapshot, in file order
    pub fn load_snapshot<I, S>(&mut self, lines: I, now: DateTime<Local>) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries: Vec<_> = lines
            .into_iter()
            .map(|line| LogParser::parse(line.as_ref(), &now))
            .collect();
        let received = entries.len();

        let dropped = self.buffer.replace(entries);
        if dropped > 0 {
            tracing::debug!(received, dropped, "snapshot larger than buffer capacity");
        }

        self.rerender(RenderOp::Full(render_rows(&self.buffer.all())));
        self.last_update = Some(now);
        self.buffer.len()
    }

    /// Show a bulk fetch failure in place of the log list
    pub fn load_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(error = %message, "failed to load logs");
        self.view.show_status(ViewStatus::Error(message));
        self.refresh_search();
    }

    /// Parse and append one raw line
    ///
    /// While a refresh is in flight or a load error is shown, the line is
    /// buffered but the placeholder stays; the next successful load redraws.
    pub fn ingest_line(&mut self, raw: &str, now: DateTime<Local>) -> PushOutcome {
        let entry = LogParser::parse(raw, &now);
        let row = render_row(&entry);
        let outcome = self.buffer.push(entry);

        if self.refreshing || matches!(self.view.status(), ViewStatus::Error(_)) {
            tracing::trace!(status = ?self.view.status(), "line buffered behind placeholder");
            self.last_update = Some(now);
            return outcome;
        }

        let in_sync = self.view.rows().len() + 1 == self.buffer.len();
        let op = match outcome {
            PushOutcome::Appended if in_sync => RenderOp::Append(row),
            PushOutcome::Appended => RenderOp::Full(render_rows(&self.buffer.all())),
            PushOutcome::Truncated { evicted } => {
                tracing::trace!(evicted, "buffer full, rebuilding view");
                RenderOp::Full(render_rows(&self.buffer.all()))
            }
        };

        self.rerender(op);
        self.last_update = Some(now);
        outcome
    }

    /// Apply one event from the live channel
    pub fn handle_event(&mut self, event: WatchEvent, now: DateTime<Local>) {
        match event {
            WatchEvent::Connected { message } => {
                tracing::info!(detail = message.as_deref().unwrap_or(""), "log watch connected");
                if self.connection == ConnectionState::Connecting {
                    self.connection = ConnectionState::Connected;
                }
            }
            WatchEvent::History { .. } => {}
            WatchEvent::Log { content } => {
                self.ingest_line(&content, now);
            }
            WatchEvent::Heartbeat { .. } => {
                self.last_update = Some(now);
            }
            WatchEvent::Error { message } => {
                let message = message.unwrap_or_else(|| "unknown error".to_string());
                tracing::error!(error = %message, "log watch reported an error");
                self.notice = Some(format!("Log watch error: {message}"));
            }
            WatchEvent::Unknown => {
                tracing::debug!("ignoring unknown log watch event");
            }
        }
    }

    /// Empty the buffer and the display; the backing log file is untouched
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.view.show_status(ViewStatus::Cleared);
        self.refresh_search();
    }

    // ------------------------------------------------------------------
    // Refresh
    // ------------------------------------------------------------------

    /// Start a refresh
    ///
    /// Returns the tail to fetch, or `None` while another refresh is still
    /// running.
    pub fn begin_refresh(&mut self) -> Option<usize> {
        if self.refreshing {
            return None;
        }
        self.refreshing = true;
        self.begin_load();
        Some(self.config.tail)
    }

    /// Finish a refresh started with [`Self::begin_refresh`]
    pub fn finish_refresh(&mut self, result: Result<Vec<String>, String>, now: DateTime<Local>) {
        self.refreshing = false;
        match result {
            Ok(lines) => {
                self.load_snapshot(lines, now);
            }
            Err(message) => self.load_failed(message),
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Lines requested by the next bulk fetch and live channel start
    pub fn tail(&self) -> usize {
        self.config.tail
    }

    /// Change the tail used by later fetches; never below one line
    pub fn set_tail(&mut self, tail: usize) -> usize {
        let tail = tail.max(1);
        if tail != self.config.tail {
            tracing::info!(from = self.config.tail, to = tail, "tail changed");
        }
        self.config.tail = tail;
        tail
    }

    /// Move the tail to the next larger (`up`) or smaller entry of
    /// [`TAIL_STEPS`]; returns the new tail
    pub fn step_tail(&mut self, up: bool) -> usize {
        let current = self.config.tail;
        let next = if up {
            TAIL_STEPS.iter().copied().find(|&step| step > current)
        } else {
            TAIL_STEPS.iter().rev().copied().find(|&step| step < current)
        };
        self.set_tail(next.unwrap_or(current))
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// React to the search input changing
    ///
    /// Clears on empty input, searches once the trimmed input reaches
    /// [`MIN_LIVE_QUERY_CHARS`], and otherwise leaves the current state.
    pub fn on_search_input(&mut self, input: &str) {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.clear_search();
        } else if trimmed.chars().count() >= MIN_LIVE_QUERY_CHARS {
            self.perform_search(input);
        }
    }

    /// Explicit search (Enter or the search trigger)
    pub fn submit_search(&mut self, input: &str) {
        if input.trim().is_empty() {
            self.clear_search();
        } else {
            self.perform_search(input);
        }
    }

    /// Remove all marks, highlights and the summary
    pub fn clear_search(&mut self) {
        self.search = SearchState::default();
        self.refresh_search();
    }

    fn perform_search(&mut self, input: &str) {
        self.search = SearchState::new(input);
        self.refresh_search();
        if let Some(first) = self.view.summary().and_then(|s| s.first_match) {
            self.scroll_request = Some(ScrollTarget::Row(first));
        }
    }

    fn refresh_search(&mut self) {
        let summary = self.search.apply(self.view.rows_mut());
        self.view.set_summary(summary);
    }

    fn rerender(&mut self, op: RenderOp) {
        self.view.apply(op);
        self.refresh_search();
        if self.scroll.should_follow(self.search.is_active()) {
            self.scroll_request = Some(ScrollTarget::Newest);
        }
    }

    // ------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------

    /// Flip the auto-scroll preference; returns the new value
    pub fn toggle_auto_scroll(&mut self) -> bool {
        let enabled = self.scroll.toggle();
        if enabled {
            self.scroll_request = Some(ScrollTarget::Newest);
        }
        enabled
    }

    /// Record a manual scroll of the viewport
    pub fn on_user_scroll(&mut self, at_bottom: bool) {
        self.scroll.on_user_scroll(at_bottom);
    }

    /// Jump to the newest entry on request
    pub fn scroll_to_newest(&mut self) {
        self.scroll.on_user_scroll(true);
        self.scroll_request = Some(ScrollTarget::Newest);
    }

    /// Take the pending viewport move, if any
    pub fn take_scroll_request(&mut self) -> Option<ScrollTarget> {
        self.scroll_request.take()
    }

    // ------------------------------------------------------------------
    // Live channel and metadata
    // ------------------------------------------------------------------

    pub fn set_connection(&mut self, state: ConnectionState) {
        if self.connection != state {
            tracing::debug!(from = ?self.connection, to = ?state, "connection state changed");
        }
        self.connection = state;
    }

    /// The live channel failed; restarting is up to the user
    pub fn stream_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(error = %reason, "log watch disconnected");
        self.connection = ConnectionState::Disconnected;
        self.notice = Some(format!("Live view disconnected: {reason}"));
    }

    pub fn set_info(&mut self, info: LogInfo) {
        self.info = Some(info);
        self.info_error = None;
    }

    pub fn info_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(error = %message, "failed to fetch log info");
        self.info_error = Some(message);
    }

    // ------------------------------------------------------------------
    // Export and accessors
    // ------------------------------------------------------------------

    /// Export every buffered raw line, regardless of the search state
    pub fn export(&self, date: NaiveDate) -> Result<ExportArtifact, ExportError> {
        ExportArtifact::from_buffer(&self.buffer, date)
    }

    /// Read-only handle to the buffer
    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    pub fn view(&self) -> &LogView {
        &self.view
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    /// Time of the last load, appended line or heartbeat
    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    pub fn info(&self) -> Option<&LogInfo> {
        self.info.as_ref()
    }

    pub fn info_error(&self) -> Option<&str> {
        self.info_error.as_deref()
    }

    /// Last user-facing message from the live channel
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

impl Default for LogStream {
    fn default() -> Self {
        Self::new(LogStreamConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Column, render};
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.timestamp_opt(1_750_000_000, 0).unwrap()
    }

    fn structured(n: usize, level: &str, message: &str) -> String {
        format!("2025-06-20 10:11:{:02} | {level}    {n} | mod:fn:{n} - {message}", n % 60)
    }

    fn stream_with_capacity(max_logs: usize) -> LogStream {
        LogStream::new(LogStreamConfig {
            max_logs,
            ..LogStreamConfig::default()
        })
    }

    #[test]
    fn test_bulk_fetch_scenario() {
        let mut stream = LogStream::default();
        stream.load_snapshot(
            ["2025-06-20 10:11:20 | INFO    24368 | mod:fn:10 - started"],
            now(),
        );

        let entries = stream.buffer().all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, "INFO");
        assert_eq!(entries[0].process, "24368");
        assert_eq!(entries[0].source, "mod:fn:10");
        assert_eq!(entries[0].message, "started");
        assert_eq!(stream.view().status(), &ViewStatus::Ready);
        assert_eq!(stream.take_scroll_request(), Some(ScrollTarget::Newest));
    }

    #[test]
    fn test_streamed_unstructured_line_scenario() {
        let mut stream = LogStream::default();
        stream.load_snapshot(Vec::<String>::new(), now());
        stream.handle_event(
            WatchEvent::Log {
                content: "plain unstructured text".to_string(),
            },
            now(),
        );

        let entry = stream.buffer().get(0).unwrap();
        assert_eq!(entry.level, "INFO");
        assert_eq!(entry.source, "system");
        assert_eq!(entry.message, "plain unstructured text");
        assert_eq!(stream.view().rows().len(), 1);
    }

    #[test]
    fn test_capacity_overflow_scenario() {
        let mut stream = LogStream::default();
        let lines: Vec<String> = (0..1000).map(|n| format!("line {n}")).collect();
        stream.load_snapshot(&lines, now());
        assert_eq!(stream.buffer().len(), 1000);

        let outcome = stream.ingest_line("line 1000", now());
        assert_eq!(outcome, PushOutcome::Truncated { evicted: 1 });
        assert_eq!(stream.buffer().len(), 1000);
        assert_eq!(stream.buffer().get(0).unwrap().raw, "line 1");
        assert_eq!(stream.buffer().get(999).unwrap().raw, "line 1000");
        assert_eq!(stream.view().rows().len(), 1000);
        assert_eq!(stream.view().rows()[0].cell(Column::Message), "line 1");
    }

    #[test]
    fn test_search_scenario() {
        let mut stream = LogStream::default();
        stream.load_snapshot(
            [
                structured(1, "INFO", "database error"),
                structured(2, "INFO", "all good"),
                structured(3, "WARN", "another error"),
            ],
            now(),
        );
        stream.take_scroll_request();

        stream.on_search_input("err");
        let summary = stream.view().summary().unwrap();
        assert_eq!(summary.match_count, 2);
        assert_eq!(summary.total_count, 3);

        let rows = stream.view().rows();
        assert!(rows[0].matched && !rows[0].highlights(Column::Message).is_empty());
        assert!(rows[1].hidden);
        assert!(rows[2].matched && !rows[2].highlights(Column::Message).is_empty());
        assert_eq!(stream.take_scroll_request(), Some(ScrollTarget::Row(0)));
        assert_eq!(stream.view().visible_count(), 2);
    }

    #[test]
    fn test_single_character_input_does_not_search() {
        let mut stream = LogStream::default();
        stream.load_snapshot(["alpha", "beta"], now());

        stream.on_search_input("a");
        assert!(!stream.search().is_active());
        assert!(stream.view().summary().is_none());

        stream.submit_search("a");
        assert_eq!(stream.view().summary().unwrap().match_count, 2);
    }

    #[test]
    fn test_clearing_query_restores_rows() {
        let mut stream = LogStream::default();
        stream.load_snapshot(["alpha", "beta"], now());
        stream.on_search_input("alp");
        assert!(stream.view().rows().iter().any(|r| r.hidden));

        stream.on_search_input("  ");
        assert!(stream.view().summary().is_none());
        for row in stream.view().rows() {
            assert!(!row.matched && !row.hidden);
            for column in Column::ALL {
                assert!(row.highlights(column).is_empty());
            }
        }
    }

    #[test]
    fn test_search_is_recomputed_after_render() {
        let mut stream = LogStream::default();
        stream.load_snapshot(["first error"], now());
        stream.on_search_input("error");

        stream.ingest_line("unrelated", now());
        stream.ingest_line("second error", now());

        let summary = stream.view().summary().unwrap();
        assert_eq!(summary.match_count, 2);
        assert_eq!(summary.total_count, 3);
        assert!(stream.view().rows()[1].hidden);
    }

    #[test]
    fn test_search_matches_pure_render_after_truncation() {
        let mut stream = stream_with_capacity(3);
        stream.load_snapshot(["a err", "b", "c err"], now());
        stream.on_search_input("err");
        stream.ingest_line("d err", now());

        let expected = render(&stream.buffer().all(), stream.search());
        assert_eq!(stream.view().rows(), expected.rows.as_slice());
        assert_eq!(stream.view().summary(), expected.summary.as_ref());
        assert_eq!(stream.view().summary().unwrap().match_count, 2);
    }

    #[test]
    fn test_incremental_view_equals_full_render() {
        let mut stream = stream_with_capacity(4);
        stream.load_snapshot(["x1"], now());
        for n in 0..10 {
            stream.ingest_line(&structured(n, "DEBUG", &format!("tick {n}")), now());
            let expected = render(&stream.buffer().all(), stream.search());
            assert_eq!(stream.view().rows(), expected.rows.as_slice());
            assert!(stream.buffer().len() <= 4);
        }
    }

    #[test]
    fn test_auto_scroll_suppressed_while_searching() {
        let mut stream = LogStream::default();
        stream.load_snapshot(["one"], now());
        stream.take_scroll_request();

        stream.on_search_input("zz");
        stream.take_scroll_request();
        stream.ingest_line("two", now());
        assert_eq!(stream.take_scroll_request(), None);

        stream.clear_search();
        stream.ingest_line("three", now());
        assert_eq!(stream.take_scroll_request(), Some(ScrollTarget::Newest));
    }

    #[test]
    fn test_manual_scroll_suspends_follow() {
        let mut stream = LogStream::default();
        stream.load_snapshot(["one"], now());
        stream.take_scroll_request();

        stream.on_user_scroll(false);
        stream.ingest_line("two", now());
        assert_eq!(stream.take_scroll_request(), None);
        assert!(stream.scroll().is_enabled());

        stream.on_user_scroll(true);
        stream.ingest_line("three", now());
        assert_eq!(stream.take_scroll_request(), Some(ScrollTarget::Newest));
    }

    #[test]
    fn test_duplicates_across_bulk_and_stream_are_kept() {
        let line = structured(5, "INFO", "same line");
        let mut stream = LogStream::default();
        stream.load_snapshot([line.clone()], now());
        stream.handle_event(
            WatchEvent::History {
                content: Some(line.clone()),
            },
            now(),
        );
        stream.handle_event(WatchEvent::Log { content: line.clone() }, now());

        let raws: Vec<String> = stream.buffer().all().into_iter().map(|e| e.raw).collect();
        assert_eq!(raws, vec![line.clone(), line]);
    }

    #[test]
    fn test_non_log_events_leave_buffer_alone() {
        let mut stream = LogStream::default();
        stream.load_snapshot(["one"], now());
        stream.set_connection(ConnectionState::Connecting);

        stream.handle_event(WatchEvent::Connected { message: None }, now());
        assert_eq!(stream.connection(), ConnectionState::Connected);

        let later = now() + chrono::Duration::seconds(5);
        stream.handle_event(WatchEvent::Heartbeat {}, later);
        assert_eq!(stream.last_update(), Some(later));

        stream.handle_event(
            WatchEvent::Error {
                message: Some("file rotated".to_string()),
            },
            now(),
        );
        assert!(stream.notice().unwrap().contains("file rotated"));
        assert_eq!(stream.connection(), ConnectionState::Connected);

        stream.handle_event(WatchEvent::Unknown, now());
        assert_eq!(stream.buffer().len(), 1);
    }

    #[test]
    fn test_export_ignores_search_state() {
        let mut stream = LogStream::default();
        stream.load_snapshot(["keep err", "other", "more err"], now());
        stream.on_search_input("err");

        let date = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let artifact = stream.export(date).unwrap();
        assert_eq!(artifact.contents, "keep err\nother\nmore err");
        assert_eq!(artifact.line_count, 3);
    }

    #[test]
    fn test_clear_empties_buffer_and_view() {
        let mut stream = LogStream::default();
        stream.load_snapshot(["one", "two"], now());
        stream.clear();

        assert!(stream.buffer().is_empty());
        assert!(stream.view().rows().is_empty());
        assert_eq!(stream.view().status(), &ViewStatus::Cleared);

        let date = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        assert!(matches!(stream.export(date), Err(ExportError::Empty)));
    }

    #[test]
    fn test_refresh_guard_and_failure() {
        let mut stream = LogStream::default();
        stream.load_snapshot(["old"], now());

        assert_eq!(stream.begin_refresh(), Some(DEFAULT_TAIL));
        assert_eq!(stream.begin_refresh(), None);
        assert_eq!(stream.view().status(), &ViewStatus::Loading);

        stream.finish_refresh(Err("HTTP 404: log file not found".to_string()), now());
        assert!(!stream.is_refreshing());
        assert!(matches!(stream.view().status(), ViewStatus::Error(_)));
        assert_eq!(stream.buffer().len(), 1);

        assert!(stream.begin_refresh().is_some());
        stream.finish_refresh(Ok(vec!["fresh".to_string()]), now());
        assert_eq!(stream.buffer().export_raw(), "fresh");
        assert_eq!(stream.view().status(), &ViewStatus::Ready);
    }

    #[test]
    fn test_streamed_lines_keep_loading_and_error_placeholders() {
        let mut stream = LogStream::default();
        stream.load_snapshot(["old"], now());

        assert!(stream.begin_refresh().is_some());
        stream.ingest_line("during refresh", now());
        assert_eq!(stream.view().status(), &ViewStatus::Loading);
        assert!(stream.view().rows().is_empty());
        assert_eq!(stream.buffer().len(), 2);

        stream.finish_refresh(Err("HTTP 500: boom".to_string()), now());
        stream.ingest_line("after failure", now());
        assert_eq!(
            stream.view().status(),
            &ViewStatus::Error("HTTP 500: boom".to_string())
        );
        assert!(stream.view().rows().is_empty());
        assert_eq!(stream.buffer().len(), 3);
        assert_eq!(stream.last_update(), Some(now()));

        assert!(stream.begin_refresh().is_some());
        stream.finish_refresh(Ok(vec!["a".to_string(), "b".to_string()]), now());
        assert_eq!(stream.view().rows().len(), 2);

        stream.ingest_line("c", now());
        assert_eq!(stream.view().rows().len(), 3);
        assert_eq!(stream.view().status(), &ViewStatus::Ready);
    }

    #[test]
    fn test_changed_tail_drives_next_refresh() {
        let mut stream = LogStream::default();
        assert_eq!(stream.tail(), DEFAULT_TAIL);

        assert_eq!(stream.set_tail(200), 200);
        assert_eq!(stream.begin_refresh(), Some(200));
        stream.finish_refresh(Ok(vec!["x".to_string()]), now());

        assert_eq!(stream.set_tail(0), 1);
        assert_eq!(stream.begin_refresh(), Some(1));
    }

    #[test]
    fn test_step_tail_walks_the_steps() {
        let mut stream = LogStream::default();
        assert_eq!(stream.step_tail(true), 100);
        assert_eq!(stream.step_tail(false), 50);
        assert_eq!(stream.step_tail(false), 25);

        stream.set_tail(30);
        assert_eq!(stream.step_tail(true), 50);

        stream.set_tail(5000);
        assert_eq!(stream.step_tail(true), 5000);
        stream.set_tail(10);
        assert_eq!(stream.step_tail(false), 10);
    }

    #[test]
    fn test_info_failure_only_touches_header() {
        let mut stream = LogStream::default();
        stream.load_snapshot(["a", "b"], now());

        stream.info_failed("HTTP 500: boom");
        assert_eq!(stream.info_error(), Some("HTTP 500: boom"));
        assert_eq!(stream.view().status(), &ViewStatus::Ready);
        assert_eq!(stream.view().rows().len(), 2);
        assert_eq!(stream.buffer().len(), 2);

        stream.set_info(LogInfo {
            file_exists: true,
            file_size: 2048,
            total_lines: 2,
            file_path: None,
        });
        assert_eq!(stream.info_error(), None);
        assert_eq!(stream.info().map(|i| i.total_lines), Some(2));
        assert_eq!(stream.view().status(), &ViewStatus::Ready);
    }

    #[test]
    fn test_stream_failure_marks_disconnected() {
        let mut stream = LogStream::default();
        stream.set_connection(ConnectionState::Connected);
        stream.stream_failed("connection reset");
        assert_eq!(stream.connection(), ConnectionState::Disconnected);
        assert!(stream.notice().is_some());
        stream.dismiss_notice();
        assert!(stream.notice().is_none());
    }
}
