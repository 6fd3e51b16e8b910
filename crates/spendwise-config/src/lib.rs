//! # SpendWise Config
//!
//! Type-safe configuration for the SpendWise chart renderer.
//!
//! Configuration is read from YAML, overridden from the environment, and
//! validated before any data is touched. The defaults reproduce the fixed
//! input and output locations the charts have always used.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
