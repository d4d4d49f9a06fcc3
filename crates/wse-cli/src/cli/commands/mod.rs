//! CLI command handlers.

mod run;

pub use run::run_export;
#[cfg(test)]
pub(crate) use run::{run_export_with, write_summary};
