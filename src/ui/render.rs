use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use super::app::{App, Focus, InputMode};
use super::theme;
use super::util::format_total;
use crate::ledger::Ledger;
use crate::notify::Notifier;

/// Rows taken by everything except the table body.
pub(crate) const CHROME_HEIGHT: u16 = 1 + 3 + 1 + 1 + 1 + 3;

pub(crate) fn render(f: &mut Frame, app: &App, ledger: &Ledger, notifier: &Notifier) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(3), // Form
            Constraint::Min(5),    // Transactions
            Constraint::Length(1), // Total
            Constraint::Length(1), // Notice bar
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], app, ledger);
    super::screens::form::render(f, chunks[1], app, ledger);
    super::screens::transactions::render(f, chunks[2], app, ledger);
    render_total(f, chunks[3], ledger);
    render_notice_bar(f, chunks[4], app, notifier);
    render_status_bar(f, chunks[5], app, ledger);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let mode = if ledger.is_editing() { "EDITING" } else { "NEW" };
    let line = Line::from(vec![
        Span::styled(
            " Transaction Tracker ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {mode} "), theme::dim_style()),
        Span::styled(format!(" {}", app.endpoint), Style::default().fg(theme::OVERLAY)),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::HEADER_BG)),
        area,
    );
}

fn render_total(f: &mut Frame, area: Rect, ledger: &Ledger) {
    let total = ledger.total();
    let style = match total {
        Some(t) if t >= Decimal::ZERO => theme::revenue_style(),
        Some(_) => theme::expense_style(),
        None => Style::default().fg(theme::YELLOW),
    };
    let line = Line::from(vec![
        Span::styled(" Total: ", theme::dim_style()),
        Span::styled(format_total(total), style.add_modifier(Modifier::BOLD)),
    ]);
    f.render_widget(Paragraph::new(line).right_aligned(), area);
}

fn render_notice_bar(f: &mut Frame, area: Rect, app: &App, notifier: &Notifier) {
    let line = if app.input_mode == InputMode::Confirm {
        Line::from(vec![
            Span::styled(
                format!(" {}", app.confirm_message),
                Style::default().fg(theme::YELLOW),
            ),
            Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
        ])
    } else if let Some(label) = app.busy {
        Line::from(Span::styled(format!(" {label}"), Style::default().fg(theme::YELLOW)))
    } else if let Some(notice) = notifier.current() {
        let older = notifier.notices().len().saturating_sub(1);
        let mut spans = vec![
            Span::styled(format!(" {} ", notice.level), theme::notice_style(notice.level)),
            Span::styled(format!(" {}", notice.message), theme::command_bar_style()),
        ];
        if older > 0 {
            spans.push(Span::styled(format!("  (+{older})"), theme::dim_style()));
        }
        Line::from(spans)
    } else {
        Line::from(Span::styled(" Press ? for help", theme::dim_style()))
    };

    let bar = Paragraph::new(line).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Confirm => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::RED)
            .add_modifier(Modifier::BOLD),
    };

    let info = format!(" {} txns", ledger.transactions().len());

    let right = match (app.focus, ledger.is_editing()) {
        (Focus::List, _) => " e edit | D delete | r reload | Tab form | ? help ",
        (Focus::Form(_), true) => " Enter update | Esc cancel | Tab next ",
        (Focus::Form(_), false) => " Enter add | Tab next | Ctrl-t today ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

const HELP_KEYS: &[(&str, &[(&str, &str)])] = &[
    (
        " Form",
        &[
            ("Tab / Shift-Tab", "Next / previous field"),
            ("Enter", "Add, or update when editing"),
            ("Space, Left/Right", "Toggle expense / revenue"),
            ("Ctrl-t", "Fill today's date"),
            ("Esc", "Cancel edit, go to list"),
        ],
    ),
    (
        " List",
        &[
            ("j/k or Up/Down", "Move cursor"),
            ("g / G", "Top / bottom"),
            ("Ctrl-d / Ctrl-u", "Half page down / up"),
            ("e or Enter", "Edit transaction"),
            ("D or Delete", "Delete transaction"),
            ("a", "New transaction"),
            ("r", "Reload from server"),
        ],
    ),
    (
        " General",
        &[("?", "This help"), ("q (list), Ctrl-q", "Quit")],
    ),
];

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(Span::styled(
            " Transaction Tracker Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (section, keys) in HELP_KEYS {
        help_text.push(Line::from(Span::styled(
            *section,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, desc) in *keys {
            help_text.push(Line::from(Span::styled(
                format!("  {key:<20} {desc}"),
                theme::normal_style(),
            )));
        }
        help_text.push(Line::from(""));
    }

    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    // Center the popup, clamped to terminal size
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 60.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
