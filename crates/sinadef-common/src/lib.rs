//! # SINADEF Common
//!
//! Shared types, errors, logging, and utilities for the SINADEF overlay tools.
//!
//! Every other crate in the workspace builds on the record and series types
//! defined here, and reports failures through [`SinadefError`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{Result, SinadefError};
pub use logging::{init_logging, LoggingConfig};
pub use types::*;
pub use utils::*;
