//! Help overlay widget.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;

const SECTIONS: [(&str, &[(&str, &str)]); 4] = [
    (
        "Navigation",
        &[
            ("1-4", "Select tab"),
            ("←/→", "Previous / next tab"),
            ("↑/↓", "Move row selection"),
            ("r", "Refresh active tab"),
        ],
    ),
    (
        "Objects & Zones",
        &[
            ("a", "Add object / zone"),
            ("e", "Edit selected object"),
            ("d", "Delete selected row"),
            ("k", "Add category"),
        ],
    ),
    (
        "Bulk Operations",
        &[
            ("x", "Delete all objects"),
            ("z", "Delete objects in a zone"),
            ("c", "Delete objects in a category"),
        ],
    ),
    (
        "Dialogs",
        &[
            ("Tab", "Next field (Shift-Tab: previous)"),
            ("←/→", "Change selection"),
            ("Enter", "Submit"),
            ("y / n", "Confirm / cancel"),
            ("Esc", "Cancel"),
        ],
    ),
];

/// Render a centered help overlay.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 80, frame.area());

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let key_style = Style::default().fg(Color::Yellow);
    let heading_style = Style::default().add_modifier(Modifier::BOLD);

    let mut help_text = vec![
        Line::from(Span::styled(
            "INVENTORY ADMIN HELP",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];

    for (heading, bindings) in SECTIONS {
        help_text.push(Line::from(Span::styled(heading, heading_style)));
        for (key, action) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<8}", key), key_style),
                Span::raw(*action),
            ]));
        }
        help_text.push(Line::raw(""));
    }

    help_text.push(Line::from(vec![
        Span::styled("  q/Esc   ", key_style),
        Span::raw("Quit"),
    ]));
    help_text.push(Line::raw(""));
    help_text.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, popup_area);
}
