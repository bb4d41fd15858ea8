//! sysview - live terminal dashboard for local system resources.
//!
//! This library provides the pieces wired together by the `sysview` binary:
//! - `collector` - metrics adapter over `sysinfo` and `/proc`/`/sys`
//! - `history` - rolling history, rates and peaks across samples
//! - `view` - pure panel composition (no ratatui dependency)
//! - `tui` - interaction state machine, render loop and drawing

pub mod collector;
pub mod config;
pub mod fmt;
pub mod history;
pub mod model;
pub mod provider;
pub mod rates;
pub mod theme;
pub mod tui;
pub mod view;
