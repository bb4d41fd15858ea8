//! Terminal user interface.
//!
//! A single cooperative loop: poll one key, sample unless paused, draw
//! one frame from the enriched snapshot, sleep out the interval.

mod app;
mod event;
mod input;
mod render;
pub mod state;
mod style;

pub use app::App;
pub use event::{CrosstermKeys, KeySource, ScriptedKeys};
pub use input::{KeyAction, handle_key};
pub use render::{RenderContext, bar_text, render};
pub use state::{InteractionState, Overlay};
