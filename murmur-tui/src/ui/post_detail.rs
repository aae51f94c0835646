use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::formatting::{format_post_text, format_relative_time};
use super::theme::get_theme_colors;
use crate::app::App;

/// Render the post detail screen: full content with the inline image
/// strip, then the reply thread.
pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    let theme = get_theme_colors(app);
    let now = Utc::now();

    let Some(detail) = app.detail_state.as_ref() else {
        return;
    };
    let Some(post) = app.store.get(detail.post_id) else {
        // Nothing cached yet: show the spinner or the fetch error
        let message = if detail.loading {
            Span::styled("Loading post...", Style::default().fg(theme.text_dim))
        } else {
            Span::styled(
                detail
                    .error
                    .clone()
                    .unwrap_or_else(|| "Post not found".to_string()),
                Style::default().fg(theme.error),
            )
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(Paragraph::new(Line::from(message)).block(block), area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Percentage(40),
            Constraint::Length(1),
        ])
        .split(area);

    // ---- content ----

    let author = app.profile_for(&post.posted_by.to_string());
    let username = author
        .map(|a| a.username.clone())
        .unwrap_or_else(|| "…".to_string());

    let mut lines: Vec<Line> = Vec::new();

    let mut header = vec![
        Span::styled(
            username,
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ✓", Style::default().fg(theme.accent)),
        Span::styled(
            format!("  {}", format_relative_time(&post.created_at, now)),
            Style::default().fg(theme.text_dim),
        ),
    ];
    if app.can_delete(post) {
        header.push(Span::styled(
            "  (d to delete)",
            Style::default().fg(theme.text_dim),
        ));
    }
    lines.push(Line::from(header));
    lines.push(Line::from(""));

    lines.extend(format_post_text(&post.text, &theme, area.width as usize));
    lines.push(Line::from(""));

    // Inline image strip: each image is a pane, the active one filled.
    let urls = post.image_urls();
    if !urls.is_empty() {
        let index = detail.carousel.index();
        let mut strip: Vec<Span> = vec![Span::raw("  ")];
        for (i, _) in urls.iter().enumerate() {
            let marker = if i == index { "●" } else { "○" };
            let style = if i == index {
                Style::default().fg(theme.accent)
            } else {
                Style::default().fg(theme.text_dim)
            };
            strip.push(Span::styled(format!("{} ", marker), style));
        }
        strip.push(Span::styled(
            format!("  {}/{}", index + 1, urls.len()),
            Style::default().fg(theme.text_dim),
        ));
        lines.push(Line::from(strip));

        let name = urls
            .get(index)
            .map(String::as_str)
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled("  ◄ ", Style::default().fg(theme.primary)),
            Span::styled(name.to_string(), Style::default().fg(theme.text)),
            Span::styled(" ►", Style::default().fg(theme.primary)),
            Span::styled(
                "   h/l step · [ ] drag · v view",
                Style::default().fg(theme.text_dim),
            ),
        ]));
        lines.push(Line::from(""));
    }

    if let Some(video) = &post.video {
        lines.push(Line::from(Span::styled(
            format!("  ▶ {}", video),
            Style::default().fg(theme.accent),
        )));
    }
    if let Some(location) = &post.location {
        lines.push(Line::from(Span::styled(
            format!("  ⌖ {}", location.name),
            Style::default().fg(theme.text_dim),
        )));
    }

    lines.push(Line::from(Span::styled(
        format!("  ♥ {}  💬 {}", post.likes.len(), post.replies.len()),
        Style::default().fg(theme.text_dim),
    )));

    if let Some(error) = &detail.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(theme.error),
        )));
    }

    let content_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(" post ", Style::default().fg(theme.primary)));
    frame.render_widget(Paragraph::new(lines).block(content_block), chunks[0]);

    // ---- replies ----

    let items: Vec<ListItem> = post
        .replies
        .iter()
        .map(|reply| {
            let name = if reply.username.is_empty() {
                "someone".to_string()
            } else {
                reply.username.clone()
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        name,
                        Style::default()
                            .fg(theme.primary)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", format_relative_time(&reply.created_at, now)),
                        Style::default().fg(theme.text_dim),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", reply.text),
                    Style::default().fg(theme.text),
                )),
            ])
        })
        .collect();

    let replies_title = format!(" replies ({}) ", post.replies.len());
    let replies_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            replies_title,
            Style::default().fg(theme.primary),
        ));

    let list = List::new(items)
        .block(replies_block)
        .highlight_style(Style::default().bg(theme.highlight_bg));

    let show_composer = detail.show_reply_composer;
    let draft = detail.reply_draft.clone();

    let Some(detail) = app.detail_state.as_mut() else {
        return;
    };
    frame.render_stateful_widget(list, chunks[1], &mut detail.reply_list_state);

    // ---- footer ----

    let footer = if show_composer {
        Line::from(vec![
            Span::styled("Reply: ", Style::default().fg(theme.primary)),
            Span::styled(draft, Style::default().fg(theme.text)),
            Span::styled("▌", Style::default().fg(theme.accent)),
        ])
    } else {
        Line::from(Span::styled(
            "r reply · d delete · p profile · Esc back",
            Style::default().fg(theme.text_dim),
        ))
    };
    frame.render_widget(Paragraph::new(footer), chunks[2]);
}
