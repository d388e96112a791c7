use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Areas of the log viewer screen, top to bottom
pub struct LogViewerAreas {
    pub header: Rect,
    pub stats: Option<Rect>,
    pub search: Option<Rect>,
    pub summary: Option<Rect>,
    pub logs: Rect,
    pub status: Rect,
}

/// Layout helper for consistent screen layouts
pub struct Layout;

impl Layout {
    /// Split the log viewer screen; optional bars collapse when hidden
    pub fn log_viewer(
        area: Rect,
        show_stats: bool,
        show_search: bool,
        show_summary: bool,
    ) -> LogViewerAreas {
        let mut constraints = vec![Constraint::Length(3)]; // Header
        if show_stats {
            constraints.push(Constraint::Length(1));
        }
        if show_search {
            constraints.push(Constraint::Length(3));
        }
        if show_summary {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(1)); // Logs
        constraints.push(Constraint::Length(1)); // Status bar

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut next = chunks.iter().copied();
        let mut take = |shown: bool| if shown { next.next() } else { None };

        let header = take(true).unwrap_or_default();
        let stats = take(show_stats);
        let search = take(show_search);
        let summary = take(show_summary);
        let logs = take(true).unwrap_or_default();
        let status = take(true).unwrap_or_default();

        LogViewerAreas {
            header,
            stats,
            search,
            summary,
            logs,
            status,
        }
    }

    /// A centered popup of the given size, shrunk to fit `area`
    pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width.saturating_sub(4));
        let height = height.min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        Rect::new(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_layout() {
        let areas = Layout::log_viewer(Rect::new(0, 0, 80, 24), false, false, false);
        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.logs.height, 20);
        assert_eq!(areas.status.y, 23);
        assert!(areas.search.is_none() && areas.summary.is_none() && areas.stats.is_none());
    }

    #[test]
    fn test_all_bars_shown() {
        let areas = Layout::log_viewer(Rect::new(0, 0, 80, 24), true, true, true);
        assert_eq!(areas.stats.map(|r| r.y), Some(3));
        assert_eq!(areas.search.map(|r| r.y), Some(4));
        assert_eq!(areas.summary.map(|r| r.y), Some(7));
        assert_eq!(areas.logs.y, 8);
        assert_eq!(areas.logs.height, 15);
    }

    #[test]
    fn test_centered_popup() {
        let popup = Layout::centered(Rect::new(0, 0, 100, 40), 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));
    }
}
