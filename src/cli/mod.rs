//! # CLI Module
//!
//! Command-line interface of the `handlergen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate the dispatch file of a handler module:
//!
//! ```bash
//! handlergen generate --input src/handlers
//! ```
//!
//! Options:
//! - `--input <DIR>` - Module directory (required)
//! - `--output <FILE>` - Destination (default: `<DIR>/<dir name>.gen.rs`)
//! - `--config <FILE>` - Generator config (default: `<DIR>/handlergen.toml` if present)
//! - `--module-name <NAME>` / `--setup-fn <NAME>` - Override naming
//! - `--dry-run` - Print the file instead of writing it
//! - `--fmt` - Run rustfmt on the result
//!
//! Command-line flags take precedence over the config file. The global
//! `--verbose` flag switches logging to debug level with source locations.
//!
//! ### `inspect`
//!
//! Print the classified handlers of a module as JSON or YAML:
//!
//! ```bash
//! handlergen inspect --input src/handlers --format yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use handlergen::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```
//!
//! ## Build Integration
//!
//! Committing the generated file keeps builds free of a generation step; a
//! CI job can run `handlergen generate` and fail on `git diff`.

mod commands;


pub use commands::{generate_options, inspect, run_cli, Cli, Commands, InspectFormat};
