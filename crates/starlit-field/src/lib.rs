//! Animated star field rendering.
//!
//! A [`StarField`] owns a set of blinking, drifting [`Star`]s and paints
//! them onto a [`Surface`] once per frame. The host page, the drawing
//! surface and the frame scheduler are collaborators behind the traits in
//! [`host`], so the same engine drives a terminal canvas or a test double.

mod bootstrap;
mod canvas;
mod color;
mod field;
mod frame;
pub mod host;
mod star;

#[cfg(test)]
mod testing;

pub use bootstrap::{bootstrap, bootstrap_seeded};
pub use canvas::PixelCanvas;
pub use color::{Paint, Rgba, apply_opacity, hsl_to_rgb, parse_color};
pub use field::StarField;
pub use frame::FrameLoop;
pub use host::{Container, Document, Size, Surface};
pub use star::Star;
