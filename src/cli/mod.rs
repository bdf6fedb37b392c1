//! Terminal shell over the ledger store: interactive with prompts, or
//! line-by-line from stdin in script mode.

pub mod commands;
pub mod core;
pub mod forms;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod ui;

pub use shell::{run_cli, run_script};
