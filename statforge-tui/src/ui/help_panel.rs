//! Help panel: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-4", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "q / Ctrl+C", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1: Status");
    key(&mut lines, "r", "Re-check API health");
    lines.push(Line::from(""));

    section(&mut lines, "Panels 2 and 3: Raw Data Explorer");
    key(&mut lines, "i or /", "Edit the input (Enter fetches, Esc stops editing)");
    key(&mut lines, "f / Enter", "Fetch with the current input");
    key(&mut lines, "c", "Clear the input");
    key(&mut lines, "j / k", "Switch between metadata and data tables");
    key(&mut lines, "h / l", "Previous / next page of the focused table");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 4: Help (this panel)");
    key(&mut lines, "e", "Open error history overlay");

    f.render_widget(Paragraph::new(lines), area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
