use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::api::PAGE_SIZE;
use crate::ledger::Ledger;
use crate::ui::app::{App, Focus};
use crate::ui::theme;
use crate::ui::util::{format_transaction_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let focused = app.focus == Focus::List;
    let transactions = ledger.transactions();

    if transactions.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No transactions yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Fill in the form and press Enter, or r to reload",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(focused))
            .title(Span::styled(
                " Transactions (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Description", "Type", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let editing_id = ledger.editing().map(|t| t.id.as_str());

    let rows: Vec<Row> = transactions
        .iter()
        .enumerate()
        .skip(app.cursor.scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let is_cursor = focused && i == app.cursor.index;
            let is_editing = editing_id == Some(txn.id.as_str());

            let amount_style = if txn.is_expense() {
                theme::expense_style()
            } else {
                theme::revenue_style()
            };

            let date_cell = if is_editing {
                format!("\u{270e} {}", txn.date)
            } else {
                format!("  {}", txn.date)
            };

            let style = if is_cursor {
                theme::selected_style()
            } else if is_editing {
                Style::default().fg(theme::YELLOW)
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(date_cell),
                Cell::from(truncate(&txn.description, 48)),
                Cell::from(Span::styled(txn.kind.to_string(), amount_style)),
                Cell::from(Span::styled(format_transaction_amount(txn), amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(9),
        Constraint::Length(16),
    ];

    let count = if transactions.len() >= PAGE_SIZE {
        format!("{} shown, first page", transactions.len())
    } else {
        transactions.len().to_string()
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(focused))
            .title(Span::styled(
                format!(" Transactions ({count}) "),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
