//! Panels 2 and 3: raw data explorers for Statistics Canada and the Bank of
//! Canada.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{ExplorerState, Source, TableFocus};
use crate::theme::{self, Theme};
use crate::ui::table_view;

struct Labels {
    heading: &'static str,
    hint: &'static str,
    input: &'static str,
    placeholder: &'static str,
    data: &'static str,
}

fn labels(source: Source) -> Labels {
    match source {
        Source::StatCan => Labels {
            heading: "Statistics Canada WDS",
            hint: "Enter Vector IDs (e.g. v41690973 for CPI) to inspect the raw API response.",
            input: "Vector IDs (comma separated)",
            placeholder: "v41690973, v41690914",
            data: "Data Points (Last 5 Years)",
        },
        Source::Boc => Labels {
            heading: "Bank of Canada Valet",
            hint: "Enter a Series Name (e.g. FXUSDCAD) to inspect the raw API response.",
            input: "Series Name",
            placeholder: "FXUSDCAD",
            data: "Observations (Last 5 Years)",
        },
    }
}

pub fn render(f: &mut Frame, area: Rect, explorer: &ExplorerState) {
    let labels = labels(explorer.source);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Percentage(40),
            Constraint::Min(5),
        ])
        .split(area);

    let header = vec![
        Line::from(Span::styled(labels.heading, theme::accent_bold())),
        Line::from(Span::styled(labels.hint, theme::muted())),
    ];
    f.render_widget(Paragraph::new(header), chunks[0]);

    render_input(f, chunks[1], explorer, &labels);

    let palette = Theme::default();
    let status = Paragraph::new(Span::styled(
        explorer.status.as_str(),
        Style::default().fg(palette.status_line_color(&explorer.status)),
    ));
    f.render_widget(status, chunks[2]);

    table_view::render(
        f,
        chunks[3],
        "Metadata",
        &explorer.meta,
        explorer.focus == TableFocus::Meta,
    );
    table_view::render(
        f,
        chunks[4],
        labels.data,
        &explorer.data,
        explorer.focus == TableFocus::Data,
    );
}

fn render_input(f: &mut Frame, area: Rect, explorer: &ExplorerState, labels: &Labels) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(explorer.editing))
        .title(format!(" {} ", labels.input))
        .title_style(theme::panel_title(explorer.editing));

    let line = if explorer.input.is_empty() && !explorer.editing {
        Line::from(vec![
            Span::styled(labels.placeholder, theme::muted()),
            Span::styled("   [i]edit [f]etch [j/k]table [h/l]page", theme::muted()),
        ])
    } else {
        let mut spans = vec![Span::styled(explorer.input.as_str(), theme::text())];
        if explorer.editing {
            spans.push(Span::styled(
                "_",
                theme::accent().add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        Line::from(spans)
    };

    f.render_widget(Paragraph::new(line).block(block), area);
}
