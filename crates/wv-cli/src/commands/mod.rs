//! CLI subcommand implementations.

pub mod check;
mod util;
pub mod week;
