//! The rendering backend abstraction.
//!
//! A backend is an immediate-mode rasterizer: it retains no geometry between
//! frames, only the transient draw state (color, transform, viewport) that
//! primitives are submitted under. The sketching layer sitting on top of this
//! trait decomposes every high-level shape into the primitives below.

pub use glam;

use glam::Vec2;

/// A point in logical (projected) coordinates.
pub type Point = Vec2;
/// Points and vectors are the same thing with different names.
pub type Vector = Vec2;

/// A triangle, wound in submission order. Backends must not assume a winding
/// direction.
pub type Triangle = [Point; 3];

/// A rectangle, made up of a position and size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
   pub position: Point,
   pub size: Vector,
}

impl Rect {
   pub fn new(position: Point, size: Vector) -> Self {
      Self { position, size }
   }

   pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
      Self::new(Point::new(x, y), Vector::new(width, height))
   }

   pub fn x(&self) -> f32 {
      self.position.x
   }

   pub fn y(&self) -> f32 {
      self.position.y
   }

   pub fn width(&self) -> f32 {
      self.size.x
   }

   pub fn height(&self) -> f32 {
      self.size.y
   }

   pub fn left(&self) -> f32 {
      self.x()
   }

   pub fn top(&self) -> f32 {
      self.y()
   }

   pub fn right(&self) -> f32 {
      self.x() + self.width()
   }

   pub fn bottom(&self) -> f32 {
      self.y() + self.height()
   }

   pub fn center_x(&self) -> f32 {
      self.x() + self.width() / 2.0
   }

   pub fn center_y(&self) -> f32 {
      self.y() + self.height() / 2.0
   }
}

/// A straight-alpha RGBA color. Channels are in the range 0.0..=1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
   pub r: f32,
   pub g: f32,
   pub b: f32,
   pub a: f32,
}

impl Color {
   pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
   pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
   pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

   pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
      Self { r, g, b, a: 1.0 }
   }

   pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
      Self { r, g, b, a }
   }

   pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
      Self::from_rgba8(r, g, b, 255)
   }

   pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
      Self::rgba(
         r as f32 / 255.0,
         g as f32 / 255.0,
         b as f32 / 255.0,
         a as f32 / 255.0,
      )
   }

   /// Returns the color quantized to 8 bits per channel.
   pub fn to_rgba8(self) -> [u8; 4] {
      fn quantize(channel: f32) -> u8 {
         (channel.clamp(0.0, 1.0) * 255.0).round() as u8
      }
      [
         quantize(self.r),
         quantize(self.g),
         quantize(self.b),
         quantize(self.a),
      ]
   }
}

impl Default for Color {
   fn default() -> Self {
      Self::WHITE
   }
}

/// An immediate-mode rendering backend.
///
/// Transforms compose locally: of two operations issued in sequence, the later
/// one applies closer to the geometry. This matches what a transform stack on
/// top of the backend expects when it replays translate/rotate/scale in order.
pub trait RenderBackend {
   /// Begins a new frame, resetting the color, transform, viewport, and
   /// projection to their defaults.
   fn begin_frame(&mut self);

   /// Finishes the frame, flushing any batched primitives.
   fn end_frame(&mut self) -> anyhow::Result<()>;

   /// The size of the rendering surface, in pixels.
   fn surface_size(&self) -> (u32, u32);

   /// Restricts output to the given pixel rectangle of the surface.
   fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

   /// Maps logical coordinates onto the current viewport. With
   /// `top < bottom`, the Y axis points down.
   fn project(&mut self, left: f32, right: f32, top: f32, bottom: f32);

   /// Sets the color applied to all subsequent primitives.
   fn set_color(&mut self, color: Color);

   /// Fills the current viewport with the current color, ignoring the
   /// transform.
   fn clear(&mut self);

   fn push_transform(&mut self);
   /// Popping with no saved transforms is a no-op.
   fn pop_transform(&mut self);
   fn translate(&mut self, translation: Vector);
   /// The angle is in radians.
   fn rotate(&mut self, angle: f32);
   fn scale(&mut self, scale: Vector);

   fn fill_rect(&mut self, rect: Rect);
   fn fill_triangles(&mut self, triangles: &[Triangle]);
   /// Draws a hairline between two points. Thick lines are tessellated into
   /// triangles by the caller.
   fn line(&mut self, a: Point, b: Point);
   /// Draws a single pixel-sized dot.
   fn point(&mut self, position: Point);
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn color_quantization_round_trips() {
      let color = Color::from_rgba8(70, 130, 180, 255);
      assert_eq!(color.to_rgba8(), [70, 130, 180, 255]);
   }

   #[test]
   fn color_quantization_clamps() {
      let color = Color::rgba(-0.5, 1.5, 0.5, 2.0);
      assert_eq!(color.to_rgba8(), [0, 255, 128, 255]);
   }

   #[test]
   fn rect_accessors() {
      let rect = Rect::from_xywh(10.0, 20.0, 30.0, 40.0);
      assert_eq!(rect.right(), 40.0);
      assert_eq!(rect.bottom(), 60.0);
      assert_eq!(rect.center_x(), 25.0);
      assert_eq!(rect.center_y(), 40.0);
   }
}
