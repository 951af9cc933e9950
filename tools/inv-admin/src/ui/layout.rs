//! Main layout orchestration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  INVENTORY ADMIN   Objects │ Zones │ History │ Bulk    [?]Help  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ✔ Object added successfully                                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ID  Name  Description  Zone  Category  Price  Quantity  Status │
//! │  ...                                                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  [a] Add  [e] Edit  [d] Delete  [r] Refresh  [q] Quit           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::domain::{AlertKind, App, AppState, Tab};

use super::{modal, tables, widgets};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let alert_rows = app.alerts.len() as u16;

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),          // Header + tabs
            Constraint::Length(alert_rows), // Alerts
            Constraint::Min(5),             // Body
            Constraint::Length(3),          // Footer (keybinds)
        ])
        .split(frame.area());

    render_header(frame, main_chunks[0], app);
    render_alerts(frame, main_chunks[1], app);
    render_body(frame, main_chunks[2], app);
    render_footer(frame, main_chunks[3], app.tabs.active());

    if let Some(dialog) = &app.modal {
        modal::render(frame, dialog);
    }

    if app.state == AppState::Help {
        widgets::render_help_overlay(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18),
            Constraint::Min(20),
            Constraint::Length(22),
        ])
        .split(inner);

    let title = Paragraph::new(Span::styled(
        " INVENTORY ADMIN ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, chunks[0]);

    let titles = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("{} {}", i + 1, tab.title()));
    let tabs = Tabs::new(titles)
        .select(app.tabs.active().index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[1]);

    let status = match app.last_refresh {
        Some(time) => format!("Refreshed {} ", time.format("%H:%M:%S")),
        None => "No data ".to_string(),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(status, Style::default().fg(Color::DarkGray))).right_aligned(),
        chunks[2],
    );
}

fn render_alerts(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }

    let lines: Vec<Line> = app
        .alerts
        .alerts()
        .map(|alert| {
            let (icon, color) = match alert.kind {
                AlertKind::Success => ("✔", Color::Green),
                AlertKind::Info => ("ℹ", Color::Cyan),
                AlertKind::Danger => ("✖", Color::Red),
            };
            Line::from(vec![
                Span::styled(format!(" {} ", icon), Style::default().fg(color)),
                Span::styled(crate::view::CellText::new(&alert.message).to_string(), Style::default().fg(color)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let active = app.tabs.active();
    let block = Block::default()
        .title(format!(" {} ", active.title()))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    match app.table(active) {
        Some(table) => tables::render_table(frame, area, block, table, app.selected_row()),
        None => tables::render_bulk_panel(frame, area, block, app),
    }
}

fn render_footer(frame: &mut Frame, area: Rect, active: Tab) {
    let key = Style::default().fg(Color::Yellow);
    let mut keybinds = vec![
        Span::styled("[1-4]", key),
        Span::raw(" Tab  "),
        Span::styled("[↑↓]", key),
        Span::raw(" Select  "),
    ];

    let actions: &[(&str, &str)] = match active {
        Tab::Objects => &[
            ("[a]", " Add  "),
            ("[e]", " Edit  "),
            ("[d]", " Delete  "),
            ("[k]", " Category  "),
        ],
        Tab::Zones => &[("[a]", " Add  "), ("[d]", " Delete  ")],
        Tab::History => &[],
        Tab::Bulk => &[
            ("[x]", " All  "),
            ("[z]", " By Zone  "),
            ("[c]", " By Category  "),
            ("[k]", " New Category  "),
        ],
    };
    for (k, label) in actions {
        keybinds.push(Span::styled(*k, key));
        keybinds.push(Span::raw(*label));
    }

    keybinds.extend([
        Span::styled("[r]", key),
        Span::raw(" Refresh  "),
        Span::styled("[?]", key),
        Span::raw(" Help  "),
        Span::styled("[q]", key),
        Span::raw(" Quit"),
    ]);

    let footer = Paragraph::new(Line::from(keybinds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .centered();

    frame.render_widget(footer, area);
}
