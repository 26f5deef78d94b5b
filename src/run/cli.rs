use std::path::Path;

use anyhow::{Context, Result};

use crate::api::TransactionApi;
use crate::ledger::{Controller, Outcome};
use crate::models::{Transaction, TransactionKind};
use crate::notify::Level;
use crate::ui::util::{format_total, format_transaction_amount, truncate};

/// Commands that need neither configuration nor the network.
/// Returns true when one was handled.
pub(crate) fn handle_offline(args: &[String]) -> bool {
    match args.get(1).map(String::as_str) {
        Some("--help" | "-h" | "help") => {
            print_usage();
            true
        }
        Some("--version" | "-V" | "version") => {
            println!("txtrack {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => false,
    }
}

pub(crate) async fn as_cli<A: TransactionApi>(
    args: &[String],
    controller: &mut Controller<A>,
) -> Result<()> {
    match args[1].as_str() {
        "list" | "ls" => cli_list(controller).await,
        "total" => cli_total(controller).await,
        "add" => cli_add(&args[2..], controller).await,
        "update" => cli_update(&args[2..], controller).await,
        "delete" | "rm" => cli_delete(&args[2..], controller).await,
        "export" => cli_export(&args[2..], controller).await,
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("TxTrack — transaction tracker for a GraphQL backend");
    println!();
    println!("Usage: txtrack [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                       Launch interactive TUI");
    println!("  list                                         List transactions and the total");
    println!("  total                                        Print the running total");
    println!("  add <date> <amount> <type> <description>     Record a transaction");
    println!("  update <id> <date> <amount> <type> <desc>    Replace a transaction");
    println!("  delete <id>                                  Delete a transaction");
    println!("  export [path]                                Export transactions to CSV");
    println!("  --help, -h                                   Show this help");
    println!("  --version, -V                                Show version");
    println!();
    println!("<type> is expense or revenue.");
    println!("Environment: TXTRACK_API_URL, TXTRACK_API_KEY, TXTRACK_LOG (optional)");
}

/// Print queued notices, errors to stderr.
fn flush_notices<A: TransactionApi>(controller: &mut Controller<A>) {
    for notice in controller.notifier_mut().drain() {
        match notice.level {
            Level::Error => eprintln!("{}", notice.message),
            Level::Success | Level::Info => println!("{}", notice.message),
        }
    }
}

/// Map an outcome to the process result, printing notices first.
fn finish<A: TransactionApi>(
    outcome: Outcome,
    controller: &mut Controller<A>,
    skipped: &str,
) -> Result<()> {
    let rejected = controller.notifier().count(Level::Error) > 0;
    flush_notices(controller);
    match outcome {
        Outcome::Done => Ok(()),
        Outcome::Skipped if rejected => anyhow::bail!("Nothing was sent"),
        Outcome::Skipped => anyhow::bail!("{skipped}"),
        Outcome::Failed => anyhow::bail!("Request failed (see log for details)"),
    }
}

async fn load<A: TransactionApi>(controller: &mut Controller<A>) -> Result<()> {
    let outcome = controller.refresh().await;
    finish(outcome, controller, "Server returned no transaction collection")
}

async fn cli_list<A: TransactionApi>(controller: &mut Controller<A>) -> Result<()> {
    load(controller).await?;
    let ledger = controller.ledger();
    if ledger.transactions().is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!("{:<12} {:<32} {:<8} {:>16}  ID", "Date", "Description", "Type", "Amount");
    println!("{}", "─".repeat(80));
    for txn in ledger.transactions() {
        println!(
            "{:<12} {:<32} {:<8} {:>16}  {}",
            txn.date,
            truncate(&txn.description, 32),
            txn.kind.as_str(),
            format_transaction_amount(txn),
            txn.id,
        );
    }
    println!("{}", "─".repeat(80));
    println!("Total: {}", format_total(ledger.total()));
    Ok(())
}

async fn cli_total<A: TransactionApi>(controller: &mut Controller<A>) -> Result<()> {
    load(controller).await?;
    println!("{}", format_total(controller.ledger().total()));
    Ok(())
}

/// Fields shared by `add` and `update`: `<date> <amount> <type> <description...>`.
#[derive(Debug, PartialEq)]
pub(crate) struct FieldArgs {
    pub(crate) date: String,
    pub(crate) amount: String,
    pub(crate) kind: TransactionKind,
    pub(crate) description: String,
}

pub(crate) fn parse_field_args(args: &[String]) -> Result<FieldArgs> {
    if args.len() < 4 {
        anyhow::bail!("Expected <date> <amount> <type> <description>");
    }
    let kind = TransactionKind::parse(&args[2]).ok_or_else(|| {
        anyhow::anyhow!("Unknown type '{}' (expected expense or revenue)", args[2])
    })?;
    Ok(FieldArgs {
        date: args[0].clone(),
        amount: args[1].clone(),
        kind,
        description: args[3..].join(" "),
    })
}

fn fill_form<A: TransactionApi>(controller: &mut Controller<A>, fields: FieldArgs) {
    let form = controller.ledger_mut().form_mut();
    form.date = fields.date;
    form.amount = fields.amount;
    form.kind = fields.kind;
    form.description = fields.description;
}

async fn cli_add<A: TransactionApi>(args: &[String], controller: &mut Controller<A>) -> Result<()> {
    let fields = parse_field_args(args)
        .context("Usage: txtrack add <date> <amount> <expense|revenue> <description>")?;
    fill_form(controller, fields);
    let outcome = controller.create().await;
    finish(outcome, controller, "Description, amount and date are required")?;

    if let Some(txn) = controller.ledger().transactions().last() {
        println!("  {}", txn.id);
    }
    Ok(())
}

async fn cli_update<A: TransactionApi>(args: &[String], controller: &mut Controller<A>) -> Result<()> {
    let Some((id, rest)) = args.split_first() else {
        anyhow::bail!("Usage: txtrack update <id> <date> <amount> <expense|revenue> <description>");
    };
    let fields = parse_field_args(rest)
        .context("Usage: txtrack update <id> <date> <amount> <expense|revenue> <description>")?;

    load(controller).await?;
    if !controller.begin_edit(id) {
        anyhow::bail!("Transaction '{id}' not found");
    }
    fill_form(controller, fields);
    let outcome = controller.update().await;
    finish(outcome, controller, "Description, amount and date are required")
}

async fn cli_delete<A: TransactionApi>(args: &[String], controller: &mut Controller<A>) -> Result<()> {
    let Some(id) = args.first() else {
        anyhow::bail!("Usage: txtrack delete <id>");
    };
    let outcome = controller.delete(id).await;
    finish(outcome, controller, "Nothing was deleted")
}

async fn cli_export<A: TransactionApi>(args: &[String], controller: &mut Controller<A>) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            let today = chrono::Local::now().format("%Y-%m-%d");
            format!("{home}/txtrack-export-{today}.csv")
        });

    load(controller).await?;
    let count = write_csv(Path::new(&output_path), controller.ledger().transactions())?;
    if count == 0 {
        println!("No transactions to export");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

/// Write transactions as CSV, returning the number of rows written.
pub(crate) fn write_csv(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.write_record(["id", "date", "description", "type", "amount"])?;
    for txn in transactions {
        let amount = format!("{:.2}", txn.amount);
        wtr.write_record([
            txn.id.as_str(),
            txn.date.as_str(),
            txn.description.as_str(),
            txn.kind.as_str(),
            amount.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(transactions.len())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
