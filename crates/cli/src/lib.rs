//! CLI internals for the `extlaunch` binary.
//!
//! Exposed as a library so argument parsing and error mapping can be tested
//! without spawning the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
