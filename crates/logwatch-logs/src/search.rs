use regex::{Regex, RegexBuilder};

use crate::render::{Column, RenderedRow};

/// Live search only kicks in once the trimmed input has this many characters
pub const MIN_LIVE_QUERY_CHARS: usize = 2;

/// Case-fold text before substring comparison
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Result of one search pass, shown above the log area
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchSummary {
    /// Folded query
    pub query: String,
    /// Rows whose rendered text contains the query
    pub match_count: usize,
    /// Rows examined
    pub total_count: usize,
    /// Index of the first matching row
    pub first_match: Option<usize>,
}

impl SearchSummary {
    pub fn is_empty(&self) -> bool {
        self.match_count == 0
    }
}

/// Search over the rendered rows
///
/// An empty query means search is inactive.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    /// Trimmed, folded query
    query: String,

    /// Case-insensitive literal matcher used for highlighting
    highlighter: Option<Regex>,

    match_count: usize,
    total_count: usize,
}

impl SearchState {
    /// Build a search from raw user input
    pub fn new(input: &str) -> Self {
        let query = fold(input.trim());
        let highlighter = if query.is_empty() {
            None
        } else {
            // Escaped literal: only an oversized query fails to compile, and
            // matching does not need the regex.
            match RegexBuilder::new(&regex::escape(&query))
                .case_insensitive(true)
                .build()
            {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::debug!(error = %e, "search highlighter unavailable");
                    None
                }
            }
        };

        Self {
            query,
            highlighter,
            match_count: 0,
            total_count: 0,
        }
    }

    /// Whether a query is set
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// The folded query
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn match_count(&self) -> usize {
        self.match_count
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Check if a rendered text matches this search
    pub fn matches_text(&self, text: &str) -> bool {
        self.is_active() && fold(text).contains(&self.query)
    }

    /// Find all match positions in a string (for highlighting)
    pub fn find_matches(&self, text: &str) -> Vec<(usize, usize)> {
        match &self.highlighter {
            Some(re) => re.find_iter(text).map(|m| (m.start(), m.end())).collect(),
            None => Vec::new(),
        }
    }

    /// Classify and highlight every row
    ///
    /// With an inactive search all marks are removed and `None` is returned.
    pub fn apply(&mut self, rows: &mut [RenderedRow]) -> Option<SearchSummary> {
        if !self.is_active() {
            for row in rows.iter_mut() {
                row.clear_search();
            }
            self.match_count = 0;
            self.total_count = 0;
            return None;
        }

        let mut match_count = 0;
        let mut first_match = None;

        for (index, row) in rows.iter_mut().enumerate() {
            row.clear_search();
            if self.matches_text(&row.text()) {
                match_count += 1;
                first_match.get_or_insert(index);
                row.matched = true;
                for column in Column::ALL {
                    let ranges = self.find_matches(row.cell(column));
                    row.set_highlights(column, ranges);
                }
            } else {
                row.hidden = true;
            }
        }

        self.match_count = match_count;
        self.total_count = rows.len();

        Some(SearchSummary {
            query: self.query.clone(),
            match_count,
            total_count: rows.len(),
            first_match,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_row;
    use logwatch_types::LogEntry;

    fn row(level: &str, message: &str) -> RenderedRow {
        render_row(&LogEntry {
            timestamp: "2025-06-20 10:11:20".to_string(),
            level: level.to_string(),
            process: "42".to_string(),
            source: "mod:fn:1".to_string(),
            message: message.to_string(),
            raw: message.to_string(),
        })
    }

    #[test]
    fn test_query_is_trimmed_and_folded() {
        let search = SearchState::new("  ErR ");
        assert!(search.is_active());
        assert_eq!(search.query(), "err");
        assert!(!SearchState::new("   ").is_active());
    }

    #[test]
    fn test_apply_counts_and_hides() {
        let mut rows = vec![
            row("INFO", "database error"),
            row("INFO", "started"),
            row("WARN", "Error again"),
        ];
        let mut search = SearchState::new("err");
        let summary = search.apply(&mut rows).unwrap();

        assert_eq!(summary.match_count, 2);
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.first_match, Some(0));
        assert!(rows[0].matched && !rows[0].hidden);
        assert!(rows[1].hidden && !rows[1].matched);
        assert!(rows[2].matched);
        assert_eq!(rows[2].highlights(Column::Message), &[(0, 3)]);
        assert_eq!(search.match_count(), 2);
        assert_eq!(search.total_count(), 3);
    }

    #[test]
    fn test_highlight_is_global_and_case_insensitive() {
        let search = SearchState::new("ab");
        assert_eq!(search.find_matches("xAB ab aB"), vec![(1, 3), (4, 6), (7, 9)]);
    }

    #[test]
    fn test_query_matches_any_rendered_column() {
        let mut rows = vec![row("ERROR", "boom"), row("INFO", "fine")];
        let mut search = SearchState::new("error");
        let summary = search.apply(&mut rows).unwrap();
        assert_eq!(summary.match_count, 1);
        assert_eq!(rows[0].highlights(Column::Level), &[(0, 5)]);
        assert!(rows[0].highlights(Column::Message).is_empty());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let mut rows = vec![row("INFO", "retry (1/3) ok"), row("INFO", "retry 13 ok")];
        let mut search = SearchState::new("(1/3)");
        let summary = search.apply(&mut rows).unwrap();
        assert_eq!(summary.match_count, 1);
        assert!(rows[0].matched);
    }

    #[test]
    fn test_inactive_search_clears_marks() {
        let mut rows = vec![row("INFO", "database error"), row("INFO", "started")];
        SearchState::new("err").apply(&mut rows);
        assert!(rows.iter().any(|r| r.hidden));

        let mut cleared = SearchState::default();
        assert!(cleared.apply(&mut rows).is_none());
        for r in &rows {
            assert!(!r.matched && !r.hidden);
            for column in Column::ALL {
                assert!(r.highlights(column).is_empty());
            }
        }
    }

    #[test]
    fn test_no_match_summary() {
        let mut rows = vec![row("INFO", "started")];
        let summary = SearchState::new("zzz").apply(&mut rows).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.first_match, None);
        assert!(rows[0].hidden);
    }
}
