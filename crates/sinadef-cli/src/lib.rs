//! # SINADEF CLI
//!
//! Command-line front end: parses arguments, loads configuration, runs the
//! chart pipeline and maps failures to process exit codes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod args;
pub mod error;
pub mod runner;

pub use args::*;
pub use error::*;
pub use runner::*;
