//! Populate a plain struct from a configuration file, environment variables
//! and command-line arguments.
//!
//! Fields are registered through [`Options`]. Each [`Field`] may name a
//! short flag, a long flag, an environment variable and a position, and may be
//! marked required. [`parse`] binds command-line arguments only; [`Config`]
//! (or [`load`]) layers file, environment and arguments, later sources
//! overriding earlier ones.

mod args;
pub mod config;
mod convert;
mod descriptor;
mod error;
pub mod help;
mod options;

pub use args::parse;
pub use config::{load, Config};
pub use error::{ConfigError, ErrorKind, Origin, ValueError};
pub use options::{Field, Options, ScalarKind, Slot, ValueKind};
