//! Mock metric sources for testing.
//!
//! `MockFs` simulates `/proc` and `/sys` in memory for the Linux readers;
//! `MockSource` scripts whole samples for the collector and history engine.

mod filesystem;
mod scenarios;
mod source;

pub use filesystem::MockFs;
pub use source::{MockSource, process};
