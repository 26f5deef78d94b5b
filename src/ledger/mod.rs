mod controller;
mod state;

pub(crate) use controller::{Controller, Outcome};
pub(crate) use state::{Form, FormError, FormField, Ledger, LedgerEvent};


#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
