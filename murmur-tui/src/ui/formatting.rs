use chrono::{DateTime, Utc};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::theme::ThemeColors;

/// Format a timestamp as a coarse "time ago" label
pub fn format_relative_time(timestamp: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*timestamp);
    let seconds = elapsed.num_seconds();

    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    let days = elapsed.num_days();
    if days < 7 {
        return format!("{}d ago", days);
    }
    if days < 365 {
        return format!("{}w ago", days / 7);
    }
    format!("{}y ago", days / 365)
}

/// Format post text with wrapping and @mention highlighting
pub fn format_post_text(
    content: &str,
    theme: &ThemeColors,
    max_width: usize,
) -> Vec<Line<'static>> {
    let mut lines = vec![];
    let wrap_width = max_width.saturating_sub(4).max(8);

    for line in content.lines() {
        let wrapped = textwrap::wrap(line, wrap_width);

        for wrapped_line in wrapped {
            let mut spans = vec![Span::raw("  ")]; // Indent

            for (i, word) in wrapped_line.split(' ').enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                if word.starts_with('@') {
                    spans.push(Span::styled(
                        word.to_string(),
                        Style::default()
                            .fg(theme.primary)
                            .add_modifier(Modifier::BOLD),
                    ));
                } else {
                    spans.push(Span::styled(
                        word.to_string(),
                        Style::default().fg(theme.text),
                    ));
                }
            }

            lines.push(Line::from(spans));
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(""));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn relative_time_buckets() {
        let now = base();
        assert_eq!(format_relative_time(&(now - Duration::seconds(30)), now), "just now");
        assert_eq!(format_relative_time(&(now - Duration::minutes(5)), now), "5m ago");
        assert_eq!(format_relative_time(&(now - Duration::hours(3)), now), "3h ago");
        assert_eq!(format_relative_time(&(now - Duration::days(2)), now), "2d ago");
        assert_eq!(format_relative_time(&(now - Duration::days(21)), now), "3w ago");
        assert_eq!(format_relative_time(&(now - Duration::days(800)), now), "2y ago");
    }

    #[test]
    fn post_text_wraps_to_width() {
        let theme = test_theme();
        let lines = format_post_text("one two three four five six seven eight", &theme, 20);
        assert!(lines.len() > 1);
    }

    #[test]
    fn empty_text_still_yields_a_line() {
        let theme = test_theme();
        assert_eq!(format_post_text("", &theme, 40).len(), 1);
    }

    fn test_theme() -> ThemeColors {
        use ratatui::style::Color;
        ThemeColors {
            primary: Color::Blue,
            accent: Color::Magenta,
            text: Color::White,
            text_dim: Color::Gray,
            background: Color::Black,
            border: Color::Gray,
            success: Color::Green,
            error: Color::Red,
            highlight_bg: Color::DarkGray,
        }
    }
}
