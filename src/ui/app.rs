use super::util::ListCursor;
use crate::ledger::FormField;

/// Which part of the screen receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Form(FormField),
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: String, description: String },
}

/// Terminal-only state. Transactions, the form and notices live in the controller.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) focus: Focus,
    pub(crate) input_mode: InputMode,
    pub(crate) show_help: bool,
    pub(crate) endpoint: String,

    pub(crate) cursor: ListCursor,

    /// Label shown while a request is outstanding.
    pub(crate) busy: Option<&'static str>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(endpoint: impl Into<String>) -> Self {
        Self {
            running: true,
            focus: Focus::Form(FormField::Description),
            input_mode: InputMode::Normal,
            show_help: false,
            endpoint: endpoint.into(),

            cursor: ListCursor::default(),

            busy: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn focused_field(&self) -> Option<FormField> {
        match self.focus {
            Focus::Form(field) => Some(field),
            Focus::List => None,
        }
    }

    /// Keep the cursor inside a list of `len` rows after it shrinks.
    pub(crate) fn clamp_selection(&mut self, len: usize) {
        self.cursor.clamp(len);
    }

    pub(crate) fn confirm(&mut self, action: PendingAction, message: String) {
        self.pending_action = Some(action);
        self.confirm_message = message;
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn clear_confirm(&mut self) {
        self.pending_action = None;
        self.confirm_message.clear();
        self.input_mode = InputMode::Normal;
    }
}
