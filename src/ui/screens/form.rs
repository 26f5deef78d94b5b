use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ledger::{FormField, Ledger};
use crate::models::TransactionKind;
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),    // Description
            Constraint::Length(14), // Amount
            Constraint::Length(14), // Date
            Constraint::Length(13), // Type
            Constraint::Length(26), // Action
        ])
        .split(area);

    for (i, field) in FormField::all().iter().enumerate() {
        render_field(f, chunks[i], app, ledger, *field);
    }
    render_action(f, chunks[4], app, ledger);
}

fn render_field(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger, field: FormField) {
    let focused = app.focused_field() == Some(field);
    let form = ledger.form();

    let content = match field {
        FormField::Kind => {
            let style = match form.kind {
                TransactionKind::Expense => theme::expense_style(),
                TransactionKind::Revenue => theme::revenue_style(),
            };
            Line::from(vec![
                Span::styled("‹ ", theme::dim_style()),
                Span::styled(form.kind.to_string(), style),
                Span::styled(" ›", theme::dim_style()),
            ])
        }
        _ => {
            let value = form.value(field);
            if value.is_empty() && !focused {
                Line::from(Span::styled(placeholder(field), theme::dim_style()))
            } else {
                Line::from(Span::styled(value, theme::normal_style()))
            }
        }
    };

    let title_style = if focused {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        theme::dim_style()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(focused))
        .title(Span::styled(format!(" {field} "), title_style));

    f.render_widget(Paragraph::new(content).block(block), area);

    if focused && field != FormField::Kind {
        let len = form.value(field).chars().count() as u16;
        let x = (area.x + 1 + len).min(area.x + area.width.saturating_sub(2));
        f.set_cursor_position((x, area.y + 1));
    }
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Description => "Description",
        FormField::Amount => "0.00",
        FormField::Date => "YYYY-MM-DD",
        FormField::Kind => "",
    }
}

fn render_action(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let line = if let Some(label) = app.busy {
        Line::from(Span::styled(label, Style::default().fg(theme::YELLOW)))
    } else if ledger.is_editing() {
        Line::from(vec![
            Span::styled("⏎ Update", Style::default().fg(theme::GREEN)),
            Span::styled("  Esc Cancel", theme::dim_style()),
        ])
    } else {
        Line::from(Span::styled("⏎ Add Transaction", Style::default().fg(theme::ACCENT)))
    };

    let title = if ledger.is_editing() { " Editing " } else { " New " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(false))
        .title(Span::styled(title, theme::dim_style()));
    f.render_widget(Paragraph::new(line).block(block), area);
}
