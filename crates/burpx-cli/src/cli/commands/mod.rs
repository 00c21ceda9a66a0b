//! CLI command handlers, one per file.

mod completions;
mod extract;
mod man;

pub use completions::run_completions;
pub use extract::run_extract;
pub use man::run_man;

#[cfg(test)]
pub(crate) use extract::effective_options;
