//! Expose ltdoc's build pipeline for integration tests and the `xtask`
//! helper. The binary in `main.rs` is the supported entry point.
pub mod cli;
pub mod driver;
pub mod error;
pub mod output;
pub mod validate;
