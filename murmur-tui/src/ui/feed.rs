use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::formatting::{format_post_text, format_relative_time};
use super::theme::get_theme_colors;
use crate::app::App;

/// Render the feed screen: one compact card per post whose author has
/// resolved. Unresolved items are simply absent.
pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    let theme = get_theme_colors(app);
    let now = Utc::now();
    let width = area.width as usize;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            " murmur ",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ));

    let visible = app.visible_feed_posts();

    if visible.is_empty() {
        let message = if app.feed_state.loading || app.feed_state.pending_load {
            "Loading feed...".to_string()
        } else if let Some(error) = &app.feed_state.error {
            error.clone()
        } else if app.store.is_empty() {
            "Nothing here yet. Press r to refresh.".to_string()
        } else {
            // Posts exist but their authors are still resolving
            "Loading feed...".to_string()
        };
        let style = if app.feed_state.error.is_some() {
            Style::default().fg(theme.error)
        } else {
            Style::default().fg(theme.text_dim)
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(message, style))).block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let mut items: Vec<ListItem> = Vec::with_capacity(visible.len());
    for &post in &visible {
        let author_key = post.posted_by.to_string();
        let Some(author) = app.profile_for(&author_key) else {
            continue;
        };

        let mut lines: Vec<Line> = Vec::new();

        // Header: username, verified mark, timestamp, ownership hint
        let mut header = vec![
            Span::styled(
                author.username.clone(),
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

        // Reply preview stack
        if post.replies.is_empty() {
            lines.push(Line::from(Span::styled(
                "  🥱",
                Style::default().fg(theme.text_dim),
            )));
        } else {
            let names: Vec<String> = post
                .replies
                .iter()
                .take(3)
                .map(|r| {
                    if r.username.is_empty() {
                        "someone".to_string()
                    } else {
                        r.username.clone()
                    }
                })
                .collect();
            lines.push(Line::from(Span::styled(
                format!("  ↳ {}", names.join(", ")),
                Style::default().fg(theme.text_dim),
            )));
        }

        // Post text, truncated for the card
        let mut text_lines = format_post_text(&post.text, &theme, width);
        if text_lines.len() > 3 {
            text_lines.truncate(3);
            text_lines.push(Line::from(Span::styled(
                "  …",
                Style::default().fg(theme.text_dim),
            )));
        }
        lines.extend(text_lines);

        // Media and location markers
        let mut markers: Vec<Span> = Vec::new();
        let image_count = post.image_urls().len();
        if image_count == 1 {
            markers.push(Span::styled("  ▣ image", Style::default().fg(theme.accent)));
        } else if image_count > 1 {
            markers.push(Span::styled(
                format!("  ▣ {} images", image_count),
                Style::default().fg(theme.accent),
            ));
        }
        if post.video.is_some() {
            markers.push(Span::styled("  ▶ video", Style::default().fg(theme.accent)));
        }
        if !markers.is_empty() {
            lines.push(Line::from(markers));
        }
        if let Some(location) = &post.location {
            lines.push(Line::from(Span::styled(
                format!("  ⌖ {}", location.name),
                Style::default().fg(theme.text_dim),
            )));
        }

        // Action bar
        lines.push(Line::from(Span::styled(
            format!("  ♥ {}  💬 {}", post.likes.len(), post.replies.len()),
            Style::default().fg(theme.text_dim),
        )));
        lines.push(Line::from(""));

        items.push(ListItem::new(lines));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.highlight_bg));

    frame.render_stateful_widget(list, area, &mut app.feed_state.list_state);
}
