//! Command-line interface module.

mod args;
pub mod generate;
pub mod inspect;
pub mod plan;

pub use args::{Cli, Commands, GenerateArgs};
