use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use crate::api::TransactionApi;
use crate::ledger::{Controller, FormField, Outcome};
use crate::models::TransactionKind;
use crate::ui::app::{App, Focus, InputMode, PendingAction};
use crate::ui::render::CHROME_HEIGHT;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// How often the screen redraws while idle, so notices can expire.
const TICK: Duration = Duration::from_millis(250);

pub(crate) async fn as_tui<A: TransactionApi>(
    controller: &mut Controller<A>,
    endpoint: &str,
) -> Result<()> {
    let mut app = App::new(endpoint);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, controller).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

async fn run_app<A: TransactionApi>(
    terminal: &mut Term,
    app: &mut App,
    controller: &mut Controller<A>,
) -> Result<()> {
    reload(terminal, app, controller).await?;

    while app.running {
        controller.notifier_mut().expire(Instant::now());
        draw(terminal, app, controller)?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, terminal, app, controller).await?,
                InputMode::Confirm => handle_confirm_input(key, terminal, app, controller).await?,
            }
        }
    }
    Ok(())
}

fn draw<A: TransactionApi>(terminal: &mut Term, app: &mut App, controller: &Controller<A>) -> Result<()> {
    terminal.draw(|f| {
        let content_height = f.area().height.saturating_sub(CHROME_HEIGHT) as usize;
        app.visible_rows = content_height.max(1);
        crate::ui::render::render(f, app, controller.ledger(), controller.notifier());
    })?;
    Ok(())
}

/// Throw away keys typed while a request was in flight, so a double
/// Enter or D does not fire the same request twice.
fn discard_pending_input() -> Result<()> {
    let mut dropped = 0;
    while event::poll(Duration::ZERO)? {
        event::read()?;
        dropped += 1;
    }
    if dropped > 0 {
        debug!(dropped, "discarded input received during request");
    }
    Ok(())
}

// ── Network actions ──────────────────────────────────────────

async fn reload<A: TransactionApi>(
    terminal: &mut Term,
    app: &mut App,
    controller: &mut Controller<A>,
) -> Result<()> {
    app.busy = Some("Loading transactions…");
    draw(terminal, app, controller)?;
    controller.refresh().await;
    app.busy = None;
    app.clamp_selection(controller.ledger().transactions().len());
    discard_pending_input()
}

async fn submit<A: TransactionApi>(
    terminal: &mut Term,
    app: &mut App,
    controller: &mut Controller<A>,
) -> Result<()> {
    let was_editing = controller.ledger().is_editing();
    app.busy = Some(if was_editing { "Saving…" } else { "Adding…" });
    draw(terminal, app, controller)?;
    let outcome = controller.submit().await;
    app.busy = None;

    if outcome == Outcome::Done {
        let len = controller.ledger().transactions().len();
        if was_editing {
            app.focus = Focus::List;
            app.clamp_selection(len);
        } else {
            app.focus = Focus::Form(FormField::Description);
            app.cursor.bottom(len, app.visible_rows);
        }
    }
    discard_pending_input()
}

async fn delete<A: TransactionApi>(
    id: &str,
    terminal: &mut Term,
    app: &mut App,
    controller: &mut Controller<A>,
) -> Result<()> {
    app.busy = Some("Deleting…");
    draw(terminal, app, controller)?;
    controller.delete(id).await;
    app.busy = None;
    app.clamp_selection(controller.ledger().transactions().len());
    discard_pending_input()
}

// ── Input handlers ───────────────────────────────────────────

async fn handle_normal_input<A: TransactionApi>(
    key: KeyEvent,
    terminal: &mut Term,
    app: &mut App,
    controller: &mut Controller<A>,
) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        app.running = false;
        return Ok(());
    }

    match app.focus {
        Focus::Form(field) => handle_form_input(key, field, terminal, app, controller).await,
        Focus::List => handle_list_input(key, terminal, app, controller).await,
    }
}

async fn handle_form_input<A: TransactionApi>(
    key: KeyEvent,
    field: FormField,
    terminal: &mut Term,
    app: &mut App,
    controller: &mut Controller<A>,
) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Enter => submit(terminal, app, controller).await?,
        KeyCode::Esc => {
            if controller.ledger().is_editing() {
                controller.cancel_edit();
            }
            app.focus = Focus::List;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.focus = if field == FormField::Kind {
                Focus::List
            } else {
                Focus::Form(field.next())
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus = if field == FormField::Description {
                Focus::List
            } else {
                Focus::Form(field.prev())
            };
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if field == FormField::Kind => {
            let form = controller.ledger_mut().form_mut();
            form.kind = form.kind.toggled();
        }
        KeyCode::Char('e') if field == FormField::Kind => {
            controller.ledger_mut().form_mut().kind = TransactionKind::Expense;
        }
        KeyCode::Char('r') if field == FormField::Kind => {
            controller.ledger_mut().form_mut().kind = TransactionKind::Revenue;
        }
        KeyCode::Char('t') if ctrl && field == FormField::Date => {
            controller.ledger_mut().form_mut().date =
                chrono::Local::now().format("%Y-%m-%d").to_string();
        }
        KeyCode::Char(c) if !ctrl => {
            if let Some(buf) = controller.ledger_mut().form_mut().text_mut(field) {
                buf.push(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(buf) = controller.ledger_mut().form_mut().text_mut(field) {
                buf.pop();
            }
        }
        _ => {}
    }
    Ok(())
}

async fn handle_list_input<A: TransactionApi>(
    key: KeyEvent,
    terminal: &mut Term,
    app: &mut App,
    controller: &mut Controller<A>,
) -> Result<()> {
    let len = controller.ledger().transactions().len();
    let page = app.visible_rows.max(1);

    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => app.cursor.down(len, page),
        KeyCode::Char('k') | KeyCode::Up => app.cursor.up(),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.cursor.half_page_down(len, page);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.cursor.half_page_up(page);
        }
        KeyCode::Char('g') => app.cursor.top(),
        KeyCode::Char('G') => app.cursor.bottom(len, page),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = selected_id(app, controller) {
                if controller.begin_edit(&id) {
                    app.focus = Focus::Form(FormField::Description);
                }
            }
        }
        KeyCode::Char('D') | KeyCode::Delete => {
            if let Some(txn) = controller.ledger().transactions().get(app.cursor.index) {
                let message = format!("Delete '{}' ({})?", txn.description, txn.date);
                app.confirm(
                    PendingAction::DeleteTransaction {
                        id: txn.id.clone(),
                        description: txn.description.clone(),
                    },
                    message,
                );
            }
        }
        KeyCode::Char('a') => {
            if controller.ledger().is_editing() {
                controller.cancel_edit();
            }
            app.focus = Focus::Form(FormField::Description);
        }
        KeyCode::Char('r') => reload(terminal, app, controller).await?,
        KeyCode::Esc => {
            if controller.ledger().is_editing() {
                controller.cancel_edit();
            }
        }
        KeyCode::Tab => app.focus = Focus::Form(FormField::Description),
        KeyCode::BackTab => app.focus = Focus::Form(FormField::Kind),
        _ => {}
    }
    Ok(())
}

async fn handle_confirm_input<A: TransactionApi>(
    key: KeyEvent,
    terminal: &mut Term,
    app: &mut App,
    controller: &mut Controller<A>,
) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let action = app.pending_action.take();
            app.clear_confirm();
            if let Some(PendingAction::DeleteTransaction { id, description }) = action {
                debug!(%id, %description, "delete confirmed");
                delete(&id, terminal, app, controller).await?;
            }
        }
        _ => {
            // Any other key = cancel
            app.clear_confirm();
        }
    }
    Ok(())
}

fn selected_id<A: TransactionApi>(app: &App, controller: &Controller<A>) -> Option<String> {
    controller
        .ledger()
        .transactions()
        .get(app.cursor.index)
        .map(|t| t.id.clone())
}
