use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::get_theme_colors;
use crate::app::{App, ProfileSlot, Route};

/// Render a user's profile screen, resolved through the same profile
/// directory the feed uses.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let theme = get_theme_colors(app);

    let Route::Profile(username) = &app.route else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            format!(" @{} ", username),
            Style::default().fg(theme.primary),
        ));

    let lines = match app.profiles.get(username.as_str()) {
        Some(ProfileSlot::Ready(profile)) => {
            let mut lines = vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled(
                        format!("  {}", profile.name),
                        Style::default()
                            .fg(theme.text)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" ✓", Style::default().fg(theme.accent)),
                ]),
                Line::from(Span::styled(
                    format!("  @{}", profile.username),
                    Style::default().fg(theme.primary),
                )),
            ];
            if let Some(pic) = &profile.profile_pic {
                lines.push(Line::from(Span::styled(
                    format!("  ◉ {}", pic),
                    Style::default().fg(theme.text_dim),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  Esc back",
                Style::default().fg(theme.text_dim),
            )));
            lines
        }
        Some(ProfileSlot::Failed) => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Profile unavailable",
                Style::default().fg(theme.error),
            )),
        ],
        _ => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Loading profile...",
                Style::default().fg(theme.text_dim),
            )),
        ],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
