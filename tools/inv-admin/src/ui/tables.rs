//! Tab bodies: data tables and the bulk operations panel.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Row as TableRow, Table, TableState},
    Frame,
};

use crate::domain::App;
use crate::view::{Row, TableView};

/// Render a table model, or its placeholder centred in the block.
pub fn render_table(frame: &mut Frame, area: Rect, block: Block, table: &TableView, selected: usize) {
    let placeholder = table.rows.iter().find_map(|row| match row {
        Row::Placeholder { text, .. } => Some(text),
        Row::Data { .. } => None,
    });

    if let Some(text) = placeholder {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let paragraph = Paragraph::new(Span::styled(
            text.to_string(),
            Style::default().fg(Color::DarkGray),
        ))
        .centered();
        frame.render_widget(paragraph, inner);
        return;
    }

    let header = TableRow::new(table.headers.iter().copied()).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows = table.rows.iter().filter_map(|row| match row {
        Row::Data { cells, .. } => Some(TableRow::new(cells.iter().map(|c| c.to_string()))),
        Row::Placeholder { .. } => None,
    });

    let table_widget = Table::new(rows, column_widths(table))
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(table_widget, area, &mut state);
}

fn column_widths(table: &TableView) -> Vec<Constraint> {
    table
        .headers
        .iter()
        .map(|header| match *header {
            "ID" => Constraint::Length(6),
            "Price" | "Quantity" | "Action" => Constraint::Length(10),
            "Date" => Constraint::Length(20),
            "Status" => Constraint::Length(12),
            _ => Constraint::Fill(1),
        })
        .collect()
}

/// Bulk tab: the three password-gated operations and current reference counts.
pub fn render_bulk_panel(frame: &mut Frame, area: Rect, block: Block, app: &App) {
    let key = Style::default().fg(Color::Yellow);
    let dim = Style::default().fg(Color::DarkGray);

    let lines = vec![
        Line::from(Span::styled(
            "Password-protected operations",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![Span::styled("  [x] ", key), Span::raw("Delete all objects")]),
        Line::from(vec![Span::styled("  [z] ", key), Span::raw("Delete all objects in a zone")]),
        Line::from(vec![
            Span::styled("  [c] ", key),
            Span::raw("Delete all objects in a category"),
        ]),
        Line::from(vec![Span::styled("  [k] ", key), Span::raw("Add a category")]),
        Line::raw(""),
        Line::from(Span::styled(
            format!(
                "  {} objects, {} zones, {} categories",
                app.objects.len(),
                app.reference.zones.len(),
                app.reference.categories.len()
            ),
            dim,
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
