use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use unicode_width::UnicodeWidthChar;

use logwatch_logs::{Column, LogStream, RenderedRow, format_file_size};

use crate::app::AppState;
use crate::ui::components::{StatusBar, log_viewer_hints};
use crate::ui::{Layout, Theme};

/// Fixed cell widths (display columns)
const TIMESTAMP_WIDTH: usize = 19;
const LEVEL_WIDTH: usize = 8;
const SOURCE_WIDTH: usize = 28;

/// Log viewer screen
pub struct LogViewerScreen;

impl LogViewerScreen {
    pub fn render(frame: &mut Frame, state: &mut AppState, logs: &LogStream) {
        let show_search = state.ui_state.search_active || logs.search().is_active();
        let areas = Layout::log_viewer(
            frame.area(),
            state.ui_state.stats_visible,
            show_search,
            logs.view().summary().is_some(),
        );

        Self::render_header(frame, areas.header, state, logs);
        if let Some(area) = areas.stats {
            Self::render_stats_bar(frame, area, logs);
        }
        if let Some(area) = areas.search {
            Self::render_search_bar(frame, area, state);
        }
        if let Some(area) = areas.summary {
            Self::render_summary(frame, area, logs);
        }
        Self::render_logs(frame, areas.logs, state, logs);
        Self::render_status_bar(frame, areas.status, state, logs);
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &AppState, logs: &LogStream) {
        let connection = logs.connection();
        let separator = || Span::styled(" │ ", Theme::text_dim());

        let mut spans = vec![
            Span::styled("logwatch", Theme::title()),
            separator(),
            Span::styled(state.base_url.clone(), Theme::text()),
            separator(),
            Span::styled(
                format!("● {}", connection.label()),
                Style::default()
                    .fg(connection.color())
                    .add_modifier(Modifier::BOLD),
            ),
            separator(),
            Span::styled(format!("tail {}", logs.tail()), Theme::text_dim()),
        ];

        if let Some(at) = logs.last_update() {
            spans.push(separator());
            spans.push(Span::styled(
                format!("updated {}", at.format("%H:%M:%S")),
                Theme::text_dim(),
            ));
        }

        spans.push(separator());
        spans.extend(info_summary(logs));

        if logs.is_refreshing() {
            spans.push(separator());
            spans.push(Span::styled("refreshing...", Theme::text_highlight()));
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

        frame.render_widget(header, area);
    }

    fn render_stats_bar(frame: &mut Frame, area: Rect, logs: &LogStream) {
        let counts = logs.buffer().level_counts();
        let mut spans = vec![Span::raw(" ")];

        let mut push = |label: &'static str, class: &str, count: usize| {
            spans.push(Span::styled(label, Theme::level(class)));
            spans.push(Span::styled(format!("{count}  "), Theme::text()));
        };
        push("ERR:", "ERROR", counts.error + counts.fatal);
        push("WRN:", "WARNING", counts.warn);
        push("SUC:", "SUCCESS", counts.success);
        push("INF:", "INFO", counts.info);
        push("DBG:", "DEBUG", counts.debug + counts.trace);
        if counts.unknown > 0 {
            push("OTH:", "OTHER", counts.unknown);
        }

        spans.push(Span::styled(
            format!("of {} (max {})", counts.total(), logs.buffer().capacity()),
            Theme::text_dim(),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState) {
        let active = state.ui_state.search_active;
        let mut spans = vec![Span::styled(
            if active { " /" } else { " Search: " },
            if active {
                Theme::text_highlight()
            } else {
                Theme::text_dim()
            },
        )];

        spans.push(Span::styled(
            state.ui_state.search_input.clone(),
            Theme::text_highlight(),
        ));

        if active {
            spans.push(Span::styled(
                "█",
                Theme::text_highlight().add_modifier(Modifier::SLOW_BLINK),
            ));
            spans.push(Span::styled(
                "  [Enter] Search  [Esc] Done  [Ctrl+u] Erase",
                Theme::text_dim(),
            ));
        } else {
            spans.push(Span::styled("  [n] Clear  [/] Edit", Theme::text_dim()));
        }

        let bar = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if active {
                    Theme::border_focused()
                } else {
                    Theme::border()
                })
                .title(Span::styled(" Search ", Theme::title())),
        );

        frame.render_widget(bar, area);
    }

    fn render_summary(frame: &mut Frame, area: Rect, logs: &LogStream) {
        let Some(summary) = logs.view().summary() else {
            return;
        };

        let line = if summary.is_empty() {
            Line::from(Span::styled(
                format!(" No entries match \"{}\"", summary.query),
                Theme::error(),
            ))
        } else {
            Line::from(vec![
                Span::styled(
                    format!(" Found {} of {} entries", summary.match_count, summary.total_count),
                    Theme::success(),
                ),
                Span::styled(format!(" matching \"{}\"", summary.query), Theme::text_dim()),
            ])
        };

        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_logs(frame: &mut Frame, area: Rect, state: &mut AppState, logs: &LogStream) {
        let view = logs.view();
        let visible = view.visible_count();
        let total = view.rows().len();

        // Calculate visible area (accounting for border)
        let inner_height = area.height.saturating_sub(2) as usize;
        let inner_width = area.width.saturating_sub(3) as usize; // borders + scrollbar
        state.ui_state.viewport_height = inner_height.max(1);
        state.clamp_scroll(visible);

        let lines: Vec<Line> = if total == 0 {
            let text = view.status().placeholder().unwrap_or_default();
            vec![Line::from(Span::styled(format!(" {text}"), Theme::placeholder()))]
        } else if visible == 0 {
            vec![Line::from(Span::styled(
                " No matching entries",
                Theme::placeholder(),
            ))]
        } else {
            view.visible_rows()
                .skip(state.ui_state.log_scroll)
                .take(inner_height)
                .map(|(_, row)| format_row(row, inner_width))
                .collect()
        };

        let title = if logs.search().is_active() {
            format!(" Logs ({visible} of {total}) ")
        } else {
            format!(" Logs ({total}) ")
        };

        let logs_widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(Span::styled(title, Theme::title())),
        );

        frame.render_widget(logs_widget, area);

        if visible > inner_height {
            let max_scroll = visible.saturating_sub(inner_height);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(max_scroll)
                .position(state.ui_state.log_scroll.min(max_scroll));

            frame.render_stateful_widget(
                scrollbar,
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }

    fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, logs: &LogStream) {
        let bar = StatusBar::new().hints(log_viewer_hints());

        // Messages take the right side until dismissed
        let bar = if let Some(message) = &state.message {
            let style = if message.is_error {
                Theme::error().bg(ratatui::style::Color::DarkGray)
            } else {
                Theme::status_bar_key()
            };
            bar.right_styled(message.text.clone(), style)
        } else if let Some(notice) = logs.notice() {
            bar.right_styled(notice.to_string(), Theme::error().bg(ratatui::style::Color::DarkGray))
        } else {
            let scroll = logs.scroll();
            let follow = if !scroll.is_enabled() {
                "follow off"
            } else if scroll.is_suspended() {
                "follow paused"
            } else {
                "following ▼"
            };
            bar.right(format!("{} logs │ {}", logs.buffer().len(), follow))
        };

        frame.render_widget(bar, area);
    }
}

/// File metadata summary for the header
fn info_summary(logs: &LogStream) -> Vec<Span<'static>> {
    if let Some(err) = logs.info_error() {
        return vec![Span::styled(format!("info unavailable: {err}"), Theme::error())];
    }

    match logs.info() {
        None => vec![Span::styled("file info loading...", Theme::text_dim())],
        Some(info) if !info.file_exists => {
            vec![Span::styled("log file missing", Theme::error())]
        }
        Some(info) => {
            let mut spans = vec![Span::styled(
                format!(
                    "{} · {} lines",
                    format_file_size(info.file_size),
                    info.total_lines
                ),
                Theme::text(),
            )];
            if let Some(path) = &info.file_path {
                spans.push(Span::styled(format!(" · {path}"), Theme::text_dim()));
            }
            spans
        }
    }
}

/// Lay out one rendered row as a terminal line
fn format_row(row: &RenderedRow, width: usize) -> Line<'static> {
    let level_style = Theme::level(&row.level_class);
    let message_style = Theme::message(&row.level_class);

    let mut spans = Vec::new();
    let mut remaining = width;

    let fixed = [
        (Column::Timestamp, TIMESTAMP_WIDTH, Theme::text_dim()),
        (Column::Level, LEVEL_WIDTH, level_style),
        (Column::Source, SOURCE_WIDTH, Theme::text_dim()),
    ];
    for (column, cell_width, style) in fixed {
        if remaining == 0 {
            break;
        }
        let cell_width = cell_width.min(remaining);
        spans.extend(cell_spans(
            row.cell(column),
            row.highlights(column),
            style,
            cell_width,
            true,
        ));
        remaining -= cell_width;
        if remaining > 0 {
            spans.push(Span::raw(" "));
            remaining -= 1;
        }
    }

    if remaining > 0 {
        spans.extend(cell_spans(
            row.cell(Column::Message),
            row.highlights(Column::Message),
            message_style,
            remaining,
            false,
        ));
    }

    Line::from(spans)
}

/// Split a cell into styled spans, cut to `max_width` display columns
///
/// `ranges` are byte offsets into `text`; parts past the cut are dropped.
/// With `pad` the result is filled with spaces up to `max_width`.
fn cell_spans(
    text: &str,
    ranges: &[(usize, usize)],
    base: Style,
    max_width: usize,
    pad: bool,
) -> Vec<Span<'static>> {
    let mut end = 0;
    let mut used = 0;
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        end = i + c.len_utf8();
    }
    let shown = &text[..end];

    let mut spans = Vec::new();
    let mut last = 0;
    for &(start, stop) in ranges {
        let start = start.min(end);
        let stop = stop.min(end);
        if start < last || start >= stop {
            continue;
        }
        if start > last {
            spans.push(Span::styled(shown[last..start].to_string(), base));
        }
        spans.push(Span::styled(shown[start..stop].to_string(), Theme::search_match()));
        last = stop;
    }
    if last < end {
        spans.push(Span::styled(shown[last..].to_string(), base));
    }

    if pad && used < max_width {
        spans.push(Span::raw(" ".repeat(max_width - used)));
    }
    spans
}
