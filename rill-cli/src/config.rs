//! Command-line surface and the plain `Config` it collapses into (§10.4).
//!
//! `Cli` is the clap-derived argument struct; nothing downstream of
//! `Session::new` touches clap directly — arguments are parsed once into
//! a plain struct, then threaded through the pipeline.

use std::path::PathBuf;

use clap::Parser;

/// A tree-walking interpreter for the rill scripting language.
#[derive(Parser, Debug)]
#[command(name = "rill")]
#[command(author = "Rill Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run a rill script", long_about = None)]
pub struct Cli {
    /// Path to the source file to run
    pub path: PathBuf,

    /// Raise logging verbosity; repeat for more (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print the token stream to stderr before evaluating
    #[arg(long)]
    pub dump_tokens: bool,

    /// Print the parsed AST to stderr before evaluating
    #[arg(long)]
    pub dump_ast: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    pub verbose: u8,
    pub dump_tokens: bool,
    pub dump_ast: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            path: cli.path,
            verbose: cli.verbose,
            dump_tokens: cli.dump_tokens,
            dump_ast: cli.dump_ast,
        }
    }
}

impl Config {
    /// Default filter absent `RUST_LOG`: warn, raised by repeated `-v`.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
