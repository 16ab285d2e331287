//! Paginated rendering of a [`PagedTable`].

use ratatui::layout::{Constraint, Rect};
use ratatui::style::Modifier;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::PagedTable;
use crate::theme;

/// Widest a single column may grow before its cells are cut.
const MAX_COLUMN_WIDTH: usize = 40;

pub fn render(f: &mut Frame, area: Rect, title: &str, paged: &PagedTable, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(
            " {title} ({} rows) page {}/{} ",
            paged.table.len(),
            paged.page + 1,
            paged.page_count()
        ))
        .title_style(theme::panel_title(focused));

    if paged.table.columns.is_empty() {
        let empty = Paragraph::new(Span::styled("No data.", theme::muted())).block(block);
        f.render_widget(empty, area);
        return;
    }

    let widths: Vec<Constraint> = paged
        .table
        .column_widths()
        .into_iter()
        .map(|w| Constraint::Length(w.min(MAX_COLUMN_WIDTH) as u16))
        .collect();

    let header = Row::new(
        paged
            .table
            .columns
            .iter()
            .map(|c| Cell::from(c.as_str()).style(theme::accent().add_modifier(Modifier::BOLD))),
    );

    let rows = paged.rows().iter().map(|cells| {
        Row::new(cells.iter().map(|s| Cell::from(s.to_string()).style(theme::text())))
    });

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(block);
    f.render_widget(table, area);
}
