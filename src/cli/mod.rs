//! # Command-Line Interface
//!
//! A thin front end over the library for editors and scripts.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Id | Tracking IDs | `id generate`, `id validate`, `id url`, `id qr` |
//! | Schedule | Publish lifecycle | `schedule status`, `schedule check` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! newstrack --verbose id generate --count 5
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod id;
mod output;
mod schedule;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
