//! The `rill` binary's driver: argument parsing, pipeline orchestration,
//! and error reporting (§6, §10.1, §10.4).

pub mod config;
pub mod driver;
pub mod error;

pub use config::{Cli, Config};
pub use driver::Session;
pub use error::DriverError;
