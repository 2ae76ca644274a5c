//! Drawing for each pipeline state

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use super::spinner;
use super::theme::Theme;
use crate::pipeline::{FileStatus, Lifecycle, PipelineSession};

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const SEPARATOR_CHAR: &str = "─";

pub const REVIEW_HELP: &str = "Press 'c' to confirm, 'r' to retry, 'q' to quit";

pub fn draw(f: &mut Frame, session: &PipelineSession, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Separator
            Constraint::Min(3),    // Body
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Key help / activity
        ])
        .split(f.area());

    draw_title(f, chunks[0], theme);
    draw_separator(f, chunks[1]);
    match session.lifecycle {
        Lifecycle::Loading => draw_loading(f, chunks[2], session, theme),
        Lifecycle::Processing => draw_processing(f, chunks[2], session, theme),
        Lifecycle::Review => draw_review(f, chunks[2], session, theme),
        Lifecycle::Complete => draw_complete(f, chunks[2], session, theme),
        Lifecycle::Error => draw_error(f, chunks[2], session, theme),
    }
    draw_separator(f, chunks[3]);
    draw_footer(f, chunks[4], session, theme);
}

fn draw_title(f: &mut Frame, area: Rect, theme: &Theme) {
    let title_text = format!(" Luna v{APP_VERSION} ");
    let len = title_text.chars().count();

    let mut spans: Vec<Span> = title_text
        .chars()
        .enumerate()
        .map(|(i, c)| {
            Span::styled(
                c.to_string(),
                Style::default()
                    .fg(Theme::gradient_at(i, len))
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    spans.push(Span::styled(
        " one commit per file",
        theme.dim.add_modifier(Modifier::ITALIC),
    ));

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn draw_separator(f: &mut Frame, area: Rect) {
    #[allow(clippy::as_conversions)]
    let width = area.width as usize;
    let spans: Vec<Span> = (0..width)
        .map(|i| Span::styled(SEPARATOR_CHAR, Style::default().fg(Theme::gradient_at(i, width))))
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn spinner_paragraph<'a>(
    session: &PipelineSession,
    label: &str,
    area: Rect,
    theme: &Theme,
) -> Line<'a> {
    let text = spinner::spinner_line(session.tick, label, usize::from(area.width));
    Line::from(Span::styled(text, theme.spinner))
}

fn draw_loading(f: &mut Frame, area: Rect, session: &PipelineSession, theme: &Theme) {
    let line = spinner_paragraph(session, "Loading files...", area, theme);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_processing(f: &mut Frame, area: Rect, session: &PipelineSession, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(spinner_paragraph(session, "Processing files...", rows[0], theme)),
        rows[0],
    );

    let gauge = Gauge::default()
        .gauge_style(theme.gauge)
        .ratio(session.progress().clamp(0.0, 1.0))
        .label(format!(
            "{}/{}",
            session.generation_cursor,
            session.file_count()
        ));
    f.render_widget(gauge, rows[1]);

    if let Some(current) = session.current_file() {
        let line = Line::from(vec![
            Span::styled("Current: ", theme.dim),
            Span::styled(current.to_string(), theme.path),
        ]);
        f.render_widget(Paragraph::new(line), rows[2]);
    }
}

fn status_glyph(status: &FileStatus) -> &'static str {
    match status {
        FileStatus::Failed(_) => "❌",
        FileStatus::Ignored => "⏭️",
        FileStatus::Pending => "…",
        FileStatus::Generated | FileStatus::Committed(_) => "✅",
    }
}

fn status_style(status: &FileStatus, theme: &Theme) -> Style {
    match status {
        FileStatus::Failed(_) => theme.error,
        FileStatus::Ignored | FileStatus::Pending => theme.dim,
        FileStatus::Generated => theme.warning,
        FileStatus::Committed(_) => theme.success,
    }
}

fn review_item<'a>(path: &str, session: &PipelineSession, theme: &Theme) -> ListItem<'a> {
    let status = session.status(path);
    let message = session.message(path).unwrap_or_default().to_string();

    ListItem::new(vec![
        Line::from(vec![
            Span::raw(format!("{} ", status_glyph(status))),
            Span::styled(path.to_string(), theme.path),
            Span::styled(": ", theme.dim),
            Span::styled(message, theme.message),
        ]),
        Line::from(vec![
            Span::styled("   Result: ", theme.dim),
            Span::styled(status.to_string(), status_style(status, theme)),
        ]),
        Line::from(""),
    ])
}

fn draw_review(f: &mut Frame, area: Rect, session: &PipelineSession, theme: &Theme) {
    let items: Vec<ListItem> = session
        .files
        .iter()
        .map(|path| review_item(path, session, theme))
        .collect();

    let block = Block::default()
        .title(Span::styled(" 📝 Review Commit Messages ", theme.title))
        .borders(Borders::ALL)
        .border_style(theme.border)
        .padding(Padding::horizontal(1));

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected)
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default().with_selected(Some(session.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_complete(f: &mut Frame, area: Rect, session: &PipelineSession, theme: &Theme) {
    let headline = if session.files.is_empty() {
        Span::styled("Nothing staged to commit.", theme.warning)
    } else if session.committed_count() == 0 {
        Span::styled("No files needed committing.", theme.warning)
    } else {
        Span::styled(
            "🎉 All files committed successfully!",
            theme.success.add_modifier(Modifier::BOLD),
        )
    };
    let lines = vec![
        Line::from(headline),
        Line::from(Span::styled("Exiting in 2 seconds...", theme.dim)),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_error(f: &mut Frame, area: Rect, session: &PipelineSession, theme: &Theme) {
    let cause = session.last_error.as_deref().unwrap_or("unknown error");
    let lines = vec![
        Line::from(Span::styled(format!("❌ Error: {cause}"), theme.error)),
        Line::from(""),
        Line::from(Span::styled("Press any key to exit", theme.dim)),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn draw_footer(f: &mut Frame, area: Rect, session: &PipelineSession, theme: &Theme) {
    let line = match session.lifecycle {
        Lifecycle::Review if session.busy => {
            let label = if session.committing {
                "Committing..."
            } else {
                "Regenerating..."
            };
            spinner_paragraph(session, label, area, theme)
        }
        Lifecycle::Review => Line::from(vec![
            Span::styled(REVIEW_HELP, theme.key),
            Span::styled("  ↑/↓ select", theme.dim),
        ]),
        Lifecycle::Loading | Lifecycle::Processing => {
            Line::from(Span::styled("Ctrl+C to quit", theme.dim))
        }
        Lifecycle::Complete | Lifecycle::Error => Line::from(""),
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
