//! quickdraw — a p5-style immediate-mode 2D sketching layer.
//!
//! Sketches draw through [`Graphics`], which tracks fill/stroke styles, a
//! bounded transform stack, and the canvas, and decomposes every shape into
//! the primitives of a [`RenderBackend`]. [`Runner`] replays a sketch's
//! `setup` every frame, so one-time drawing stays visible on a backend that
//! retains nothing between frames.

pub mod color;
pub mod config;
pub mod describe;
pub mod transform;

mod canvas;
mod error;
mod graphics;
mod shape_buffer;
mod sketch;

pub use quickdraw_renderer as renderer;
pub use quickdraw_renderer::{Color, Point, Rect, RenderBackend, Triangle, Vector};

pub use crate::color::{parse_color, ChannelMaxes, ColorMode};
pub use crate::config::{CanvasConfig, SketchConfig, WindowConfig};
pub use crate::describe::TextOutputMode;
pub use crate::error::{Error, Result};
pub use crate::graphics::{AngleMode, ArcMode, Graphics};
pub use crate::sketch::{Runner, Sketch};
pub use crate::transform::{Transform, TransformStack, MAX_STACK_DEPTH};

#[cfg(feature = "renderer-skia")]
pub use quickdraw_renderer_skia as skia;

pub const PI: f32 = std::f32::consts::PI;
pub const TWO_PI: f32 = 2.0 * PI;
pub const HALF_PI: f32 = PI * 0.5;
