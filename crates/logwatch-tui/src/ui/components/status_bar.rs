use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::ui::Theme;

/// Status bar showing keyboard shortcuts, with optional text on the right
pub struct StatusBar<'a> {
    hints: Vec<(&'a str, &'a str)>,
    right: Option<Line<'a>>,
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self {
            hints: Vec::new(),
            right: None,
        }
    }

    /// Add keyboard hints as (key, description) pairs
    pub fn hints<I>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.hints = hints.into_iter().collect();
        self
    }

    /// Set plain text to display on the right side
    pub fn right<S: Into<String>>(self, text: S) -> Self {
        self.right_styled(text, Theme::status_bar())
    }

    /// Set styled text to display on the right side
    pub fn right_styled<S: Into<String>>(mut self, text: S, style: Style) -> Self {
        self.right = Some(Line::from(Span::styled(text.into(), style)));
        self
    }
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        buf.set_style(area, Theme::status_bar());

        let mut spans = Vec::new();
        for (i, (key, desc)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Theme::status_bar()));
            }
            spans.push(Span::styled(format!("[{}]", key), Theme::status_bar_key()));
            spans.push(Span::styled(format!(" {}", desc), Theme::status_bar()));
        }

        let line = Line::from(spans);
        let line_width = line.width() as u16;

        // The right text wins when both do not fit
        let right_width = self.right.as_ref().map_or(0, |r| r.width() as u16);
        let hints_width = if right_width > 0 {
            area.width.saturating_sub(right_width + 4)
        } else {
            area.width.saturating_sub(2)
        };
        buf.set_line(area.x + 1, area.y, &line, hints_width.min(line_width));

        if let Some(right) = self.right {
            let right_x = area.x + area.width.saturating_sub(right_width + 1);
            buf.set_line(right_x, area.y, &right, right_width);
        }
    }
}

/// Default hints for the log viewer
pub fn log_viewer_hints() -> Vec<(&'static str, &'static str)> {
    vec![
        ("/", "Search"),
        ("f", "Follow"),
        ("r", "Refresh"),
        ("l", "Live"),
        ("e", "Export"),
        ("c", "Clear"),
        ("?", "Help"),
        ("q", "Quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, width: u16) -> String {
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_hints_and_right_text() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new()
            .hints([("q", "Quit")])
            .right("12 logs")
            .render(area, &mut buf);

        let text = row_text(&buf, 40);
        assert!(text.starts_with(" [q] Quit"));
        assert!(text.trim_end().ends_with("12 logs"));
    }

    #[test]
    fn test_right_text_survives_narrow_width() {
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new()
            .hints(log_viewer_hints())
            .right("live")
            .render(area, &mut buf);

        assert!(row_text(&buf, 20).trim_end().ends_with("live"));
    }
}
