//! # SINADEF Series
//!
//! The aggregation and year-alignment engine.
//!
//! Records flow through a fixed sequence of pure stages:
//! [`loader`] → [`filter`] → [`counter`] → [`smoother`] → [`segmenter`] →
//! [`axis`]. [`pipeline::ChartPipeline`] runs that sequence once per chart,
//! and the [`ChartRenderer`] implementations turn the result into images.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod axis;
pub mod counter;
pub mod export;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod renderer;
pub mod segmenter;
pub mod smoother;
pub mod traits;

pub use axis::*;
pub use counter::*;
pub use export::*;
pub use filter::*;
pub use loader::*;
pub use pipeline::*;
pub use renderer::*;
pub use segmenter::*;
pub use smoother::*;
pub use traits::*;
