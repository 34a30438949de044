//! Core types for the starlit star field.
//!
//! Holds the complete [`Config`] the engine runs with, the partial
//! [`ConfigPatch`] callers hand in, and the [`Merge`] rules that fold one
//! into the other.

mod config;
mod direction;
mod merge;
mod patch;

pub use config::{Config, SizeClass, SizeSpec, DEFAULT_BACKGROUND};
pub use direction::Direction;
pub use merge::Merge;
pub use patch::{ConfigPatch, SizePatch};
