use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::get_theme_colors;
use crate::app::App;
use crate::toast::Severity;

/// Helper to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Full-screen image viewer over the detail view. Shares the inline
/// carousel index, so it opens on whatever image was active.
pub fn render_viewer(app: &App, frame: &mut Frame) {
    let theme = get_theme_colors(app);

    let Some(detail) = app.detail_state.as_ref() else {
        return;
    };
    if !detail.viewer_open {
        return;
    }
    let Some(post) = app.store.get(detail.post_id) else {
        return;
    };

    let urls = post.image_urls();
    let index = detail.carousel.index();
    let Some(url) = urls.get(index) else {
        return;
    };

    let area = centered_rect(90, 80, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    let middle = area.height.saturating_sub(6) / 2;
    for _ in 0..middle {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled("‹  ", Style::default().fg(theme.primary)),
        Span::styled(
            url.clone(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ›", Style::default().fg(theme.primary)),
    ]));
    lines.push(Line::from(""));
    if urls.len() > 1 {
        lines.push(Line::from(Span::styled(
            format!("{} / {}", index + 1, urls.len()),
            Style::default().fg(theme.text_dim),
        )));
    }
    lines.push(Line::from(Span::styled(
        "h/l navigate · Esc close",
        Style::default().fg(theme.text_dim),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.background));
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

/// Delete confirmation dialog. Deleting is irrevocable, so nothing
/// happens without an explicit `y`.
pub fn render_delete_confirm(app: &App, frame: &mut Frame) {
    if app.delete_confirm.is_none() {
        return;
    }
    let theme = get_theme_colors(app);

    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Are you sure you want to delete this post?",
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "[y]",
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" delete   ", Style::default().fg(theme.text)),
            Span::styled(
                "[n]",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" cancel", Style::default().fg(theme.text)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error))
        .title(Span::styled(" delete post ", Style::default().fg(theme.error)))
        .style(Style::default().bg(theme.background));
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

/// Latest toast, rendered as a single status line at the bottom edge.
pub fn render_toast(app: &App, frame: &mut Frame) {
    let Some(toast) = app.toasts.latest() else {
        return;
    };
    let theme = get_theme_colors(app);
    let color = match toast.severity {
        Severity::Success => theme.success,
        Severity::Error => theme.error,
    };

    let area = frame.area();
    if area.height < 2 {
        return;
    }
    let line_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", toast.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(toast.message.clone(), Style::default().fg(color)),
    ]);
    frame.render_widget(Clear, line_area);
    frame.render_widget(Paragraph::new(line), line_area);
}
