mod cli;
mod tui;

pub(crate) use cli::{as_cli, handle_offline};
pub(crate) use tui::as_tui;
