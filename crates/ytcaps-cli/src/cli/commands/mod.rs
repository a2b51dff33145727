//! CLI command handlers.

mod list;

pub use list::run_list;
#[cfg(test)]
pub use list::source_from_config;
