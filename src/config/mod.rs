//! Layered configuration loading: file, then environment, then arguments.

mod builder;
mod env;
mod file;

pub use builder::{load, Config};
