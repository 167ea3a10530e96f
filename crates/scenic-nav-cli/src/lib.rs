//! Scenic navigation CLI library.
//!
//! Data-file resolution and output rendering shared by the binary's
//! subcommands.

pub mod data;
pub mod output;
