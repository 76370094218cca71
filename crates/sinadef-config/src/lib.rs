//! # SINADEF Config
//!
//! Configuration management for the SINADEF overlay tools.
//!
//! This crate provides the configuration schema with its defaults, YAML
//! loading with environment overrides, and validation. The resolved
//! [`EngineSettings`] are what the series engine consumes for a run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod settings;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use settings::*;
pub use validator::*;
