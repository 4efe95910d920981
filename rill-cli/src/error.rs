//! Host-level error types (§7 "Host-level error types", §10.3).
//!
//! These are distinct from the evaluated language's own `Error` value:
//! a missing source file or an unparseable program never reaches the
//! evaluator at all.

use std::io;
use std::path::PathBuf;

use rill_util::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("could not read {}: {source}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing failed with {} error(s)", .0.len())]
    ParseFailed(Vec<Diagnostic>),
}
