//! Form and confirmation dialogs.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Confirm, Form, Modal};

use super::widgets::centered_rect;

pub fn render(frame: &mut Frame, modal: &Modal) {
    match modal {
        Modal::Form(form) => render_form(frame, form),
        Modal::Confirm(confirm) => render_confirm(frame, confirm),
    }
}

fn dialog_block(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn render_form(frame: &mut Frame, form: &Form) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = Vec::with_capacity(form.fields.len() + 4);
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let marker = if focused { "> " } else { "  " };
        let value = if field.is_select() {
            format!("◀ {} ▶", field.display())
        } else if focused {
            format!("{}_", field.display())
        } else {
            field.display()
        };
        let value_style = if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:<16}", field.label), Style::default().fg(Color::Cyan)),
            Span::styled(value, value_style),
        ]));
    }

    lines.push(Line::raw(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(Span::styled(
        "  [Enter] Submit  [Tab] Next  [←/→] Change  [Esc] Cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(dialog_block(&form.title, Color::Cyan));
    frame.render_widget(paragraph, area);
}

fn render_confirm(frame: &mut Frame, confirm: &Confirm) {
    let area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::raw(""),
        Line::from(Span::raw(format!("  {}", confirm.message))),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y] ", Style::default().fg(Color::Yellow)),
            Span::raw("Yes  "),
            Span::styled("[n] ", Style::default().fg(Color::Yellow)),
            Span::raw("No"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(dialog_block("Confirm", Color::Red));
    frame.render_widget(paragraph, area);
}
