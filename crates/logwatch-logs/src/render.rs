//! Pure rendering of log entries into display rows
//!
//! Rendering never touches a terminal. The UI layer draws whatever
//! [`LogView`] holds.

use logwatch_types::LogEntry;

use crate::search::{SearchState, SearchSummary};

/// Displayed columns of a row, in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Timestamp,
    Level,
    Source,
    Message,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::Timestamp,
        Column::Level,
        Column::Source,
        Column::Message,
    ];

    fn index(self) -> usize {
        match self {
            Column::Timestamp => 0,
            Column::Level => 1,
            Column::Source => 2,
            Column::Message => 3,
        }
    }
}

/// One rendered log entry
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedRow {
    cells: [String; 4],
    highlights: [Vec<(usize, usize)>; 4],

    /// Uppercased level token used for styling
    pub level_class: String,

    /// Matches the active search
    pub matched: bool,

    /// Filtered out by the active search
    pub hidden: bool,
}

impl RenderedRow {
    /// Text of one column
    pub fn cell(&self, column: Column) -> &str {
        &self.cells[column.index()]
    }

    /// Highlighted byte ranges within one column
    pub fn highlights(&self, column: Column) -> &[(usize, usize)] {
        &self.highlights[column.index()]
    }

    pub(crate) fn set_highlights(&mut self, column: Column, ranges: Vec<(usize, usize)>) {
        self.highlights[column.index()] = ranges;
    }

    /// Concatenated visible text, the haystack for search
    pub fn text(&self) -> String {
        self.cells.join(" ")
    }

    /// Drop search marks and highlights
    pub fn clear_search(&mut self) {
        self.matched = false;
        self.hidden = false;
        for ranges in &mut self.highlights {
            ranges.clear();
        }
    }
}

/// Render a single entry without any search marks
pub fn render_row(entry: &LogEntry) -> RenderedRow {
    RenderedRow {
        cells: [
            entry.timestamp.clone(),
            entry.level.clone(),
            entry.source.clone(),
            entry.message.clone(),
        ],
        highlights: Default::default(),
        level_class: entry.level_class(),
        matched: false,
        hidden: false,
    }
}

/// Render every entry, unmarked
pub fn render_rows(entries: &[LogEntry]) -> Vec<RenderedRow> {
    entries.iter().map(render_row).collect()
}

/// Full output of a render pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedOutput {
    pub rows: Vec<RenderedRow>,
    pub summary: Option<SearchSummary>,
}

/// Render entries and apply the search on top
pub fn render(entries: &[LogEntry], search: &SearchState) -> RenderedOutput {
    let mut rows = render_rows(entries);
    let summary = search.clone().apply(&mut rows);
    RenderedOutput { rows, summary }
}

/// Change to apply to a [`LogView`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOp {
    /// Redraw everything
    Full(Vec<RenderedRow>),
    /// Add one row at the bottom
    Append(RenderedRow),
}

/// What the log area shows besides (or instead of) rows
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewStatus {
    /// Bulk fetch in flight
    #[default]
    Loading,
    /// Rows are shown
    Ready,
    /// The log has no entries
    Empty,
    /// The user cleared the display
    Cleared,
    /// Loading failed; the message is shown with a retry hint
    Error(String),
}

impl ViewStatus {
    /// Placeholder text shown when there are no rows
    pub fn placeholder(&self) -> Option<String> {
        match self {
            Self::Loading => Some("Loading logs...".to_string()),
            Self::Ready => None,
            Self::Empty => Some("No log records".to_string()),
            Self::Cleared => Some("Log display cleared".to_string()),
            Self::Error(msg) => Some(format!("{msg} (press R to retry)")),
        }
    }
}

/// Rendered state of the log area
#[derive(Clone, Debug, Default)]
pub struct LogView {
    rows: Vec<RenderedRow>,
    status: ViewStatus,
    summary: Option<SearchSummary>,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a render operation
    pub fn apply(&mut self, op: RenderOp) {
        match op {
            RenderOp::Full(rows) => {
                self.status = if rows.is_empty() {
                    ViewStatus::Empty
                } else {
                    ViewStatus::Ready
                };
                self.rows = rows;
            }
            RenderOp::Append(row) => {
                self.rows.push(row);
                self.status = ViewStatus::Ready;
            }
        }
    }

    /// All rendered rows, hidden ones included
    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [RenderedRow] {
        &mut self.rows
    }

    /// Rows not hidden by the search, with their index in [`Self::rows`]
    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &RenderedRow)> {
        self.rows.iter().enumerate().filter(|(_, row)| !row.hidden)
    }

    pub fn visible_count(&self) -> usize {
        self.rows.iter().filter(|row| !row.hidden).count()
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    /// Replace every row with a status placeholder
    pub(crate) fn show_status(&mut self, status: ViewStatus) {
        self.rows.clear();
        self.status = status;
    }

    pub fn summary(&self) -> Option<&SearchSummary> {
        self.summary.as_ref()
    }

    pub(crate) fn set_summary(&mut self, summary: Option<SearchSummary>) {
        self.summary = summary;
    }
}
