//! CLI command implementations.

pub mod args;
pub mod output;

pub mod counties;
pub mod export;
pub mod info;
pub mod link;
pub mod resolve;
pub mod search;

pub use args::{Cli, Commands};
pub use output::Output;
