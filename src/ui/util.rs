use rust_decimal::Decimal;

use crate::models::{Transaction, TransactionKind};

/// Two decimal places with thousands separators, sign before the `$`.
/// e.g. `-1234.5` → `"-$1,234.50"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let rounded = val.round_dp(2);
    let formatted = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if rounded < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Formatted total, or a marker when the sum overflowed.
pub(crate) fn format_total(total: Option<Decimal>) -> String {
    total.map_or_else(|| "overflow".to_string(), format_amount)
}

/// Row amount: revenue gets a `+`, expenses a `-`.
pub(crate) fn format_transaction_amount(txn: &Transaction) -> String {
    let magnitude = format_amount(txn.amount.abs());
    match txn.kind {
        TransactionKind::Revenue => format!("+{magnitude}"),
        TransactionKind::Expense => format!("-{magnitude}"),
    }
}

/// Truncate to `max` visible characters, appending "…" if cut.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Cursor over the transaction table plus the first visible row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ListCursor {
    pub(crate) index: usize,
    pub(crate) scroll: usize,
}

impl ListCursor {
    /// One row down; the window follows once the cursor passes its last row.
    pub(crate) fn down(&mut self, len: usize, page: usize) {
        if self.index + 1 >= len {
            return;
        }
        self.index += 1;
        let page = page.max(1);
        if self.index >= self.scroll + page {
            self.scroll = self.index + 1 - page;
        }
    }

    pub(crate) fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.scroll = self.scroll.min(self.index);
    }

    /// Half a page at a time, for Ctrl-d.
    pub(crate) fn half_page_down(&mut self, len: usize, page: usize) {
        for _ in 0..page / 2 {
            self.down(len, page);
        }
    }

    pub(crate) fn half_page_up(&mut self, page: usize) {
        for _ in 0..page / 2 {
            self.up();
        }
    }

    pub(crate) fn top(&mut self) {
        *self = Self::default();
    }

    /// Last row, with the window ending on it. No-op for an empty table.
    pub(crate) fn bottom(&mut self, len: usize, page: usize) {
        if let Some(last) = len.checked_sub(1) {
            self.index = last;
            self.scroll = last.saturating_sub(page.saturating_sub(1));
        }
    }

    /// Pull the cursor back inside a table that shrank to `len` rows.
    pub(crate) fn clamp(&mut self, len: usize) {
        match len.checked_sub(1) {
            None => self.top(),
            Some(last) => {
                self.index = self.index.min(last);
                self.scroll = self.scroll.min(self.index);
            }
        }
    }
}
