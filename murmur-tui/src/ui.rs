// UI module - split into cohesive submodules for maintainability
pub mod theme;
mod feed;
mod formatting;
mod modals;
mod post_detail;
mod profile;

// Re-export main render function
pub use self::render_main::render;

// Main render logic
mod render_main {
    use ratatui::{
        layout::Alignment,
        style::{Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Clear, Paragraph},
        Frame,
    };

    use super::theme::get_theme_colors;
    use super::{feed, modals, post_detail, profile};
    use crate::app::{App, Route};

    /// Render the UI
    pub fn render(app: &mut App, frame: &mut Frame) {
        let area = frame.area();

        let theme = get_theme_colors(app);

        frame.render_widget(Clear, area);

        let background = Block::default().style(Style::default().bg(theme.background));
        frame.render_widget(background, area);

        const MIN_WIDTH: u16 = 50;
        const MIN_HEIGHT: u16 = 16;

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let warning = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Terminal Too Small",
                    Style::default()
                        .fg(theme.error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Minimum size: {}x{}", MIN_WIDTH, MIN_HEIGHT),
                    Style::default().fg(theme.text),
                )),
                Line::from(Span::styled(
                    format!("Current size: {}x{}", area.width, area.height),
                    Style::default().fg(theme.text_dim),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.error)),
            );

            frame.render_widget(warning, area);
            return;
        }

        match app.route {
            Route::Feed => feed::render(app, frame, area),
            Route::PostDetail(_) => post_detail::render(app, frame, area),
            Route::Profile(_) => profile::render(app, frame, area),
        }

        // Overlays, innermost last
        modals::render_viewer(app, frame);
        modals::render_delete_confirm(app, frame);
        modals::render_toast(app, frame);
    }
}
