//! Status panel: configured API URL and the last health probe.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme::{self, Theme};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let status = &app.status;
    let palette = Theme::default();

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("System Status", theme::accent_bold())),
        Line::from(""),
        Line::from(vec![
            Span::styled("API URL:    ", theme::muted()),
            Span::styled(status.api_base_url.as_str(), theme::text()),
        ]),
    ];

    let health = match (&status.health, status.checking) {
        (_, true) => Span::styled("checking...", theme::warning()),
        (Some(h), false) => Span::styled(
            h.to_string(),
            ratatui::style::Style::default().fg(palette.health_color(h)),
        ),
        (None, false) => Span::styled("not checked yet", theme::muted()),
    };
    lines.push(Line::from(vec![
        Span::styled("API Health: ", theme::muted()),
        health,
    ]));

    if let Some(at) = status.last_checked {
        lines.push(Line::from(vec![
            Span::styled("Checked at: ", theme::muted()),
            Span::styled(at.format("%H:%M:%S").to_string(), theme::neutral()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("[r]efresh", theme::muted())));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
