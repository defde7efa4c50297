//! The sketching facade: all drawing state, and the decomposition of shape
//! calls into backend primitives.

use quickdraw_renderer::{Color, Point, Rect, RenderBackend, Vector};

use crate::canvas::Canvas;
use crate::color::{channels_to_color, parse_color, ChannelMaxes, ColorMode};
use crate::describe::{ShapeTracker, TextOutputMode};
use crate::shape_buffer::{self, ShapeBuffer};
use crate::transform::TransformStack;

/// Stroke weights up to this many units are drawn as backend hairlines;
/// anything thicker is tessellated into triangles.
const HAIRLINE_WEIGHT: f32 = 1.0;

/// How angles passed to `rotate` and `arc` are interpreted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AngleMode {
   Radians,
   Degrees,
}

/// How an arc's outline is closed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArcMode {
   /// The arc alone.
   Open,
   /// The arc plus the chord between its endpoints.
   Chord,
   /// The arc plus both radii, pizza-slice style.
   Pie,
}

/// The drawing context handed to sketches. Owns the backend and every piece
/// of sketch-visible state.
pub struct Graphics<B: RenderBackend> {
   backend: B,
   fill_color: Color,
   fill_enabled: bool,
   stroke_color: Color,
   stroke_enabled: bool,
   stroke_weight: f32,
   angle_mode: AngleMode,
   color_mode: ColorMode,
   maxes: ChannelMaxes,
   transforms: TransformStack,
   canvas: Canvas,
   tracker: ShapeTracker,
   buffer: ShapeBuffer,
}

impl<B: RenderBackend> Graphics<B> {
   pub fn new(backend: B) -> Self {
      Self {
         backend,
         fill_color: Color::WHITE,
         fill_enabled: true,
         stroke_color: Color::BLACK,
         stroke_enabled: true,
         stroke_weight: 1.0,
         angle_mode: AngleMode::Radians,
         color_mode: ColorMode::Rgb,
         maxes: ChannelMaxes::default(),
         transforms: TransformStack::new(),
         canvas: Canvas::new(),
         tracker: ShapeTracker::new(),
         buffer: ShapeBuffer::new(),
      }
   }

   pub fn backend(&self) -> &B {
      &self.backend
   }

   pub fn backend_mut(&mut self) -> &mut B {
      &mut self.backend
   }

   pub fn into_backend(self) -> B {
      self.backend
   }

   //
   // Canvas
   //

   /// Creates the canvas, centered in the surface. Idempotent, so it's safe
   /// in setup code that gets replayed every frame.
   pub fn create_canvas(&mut self, width: i32, height: i32) {
      let surface = self.backend.surface_size();
      if self.canvas.create(surface, width, height) {
         self.apply_canvas_view();
      }
   }

   /// Creates the canvas at an explicit position within the surface.
   pub fn create_canvas_at(&mut self, width: i32, height: i32, x: i32, y: i32) {
      let surface = self.backend.surface_size();
      if self.canvas.create_at(surface, width, height, x, y) {
         self.apply_canvas_view();
      }
   }

   pub fn width(&self) -> u32 {
      self.canvas.width(self.backend.surface_size())
   }

   pub fn height(&self) -> u32 {
      self.canvas.height(self.backend.surface_size())
   }

   pub fn window_width(&self) -> u32 {
      self.backend.surface_size().0
   }

   pub fn window_height(&self) -> u32 {
      self.backend.surface_size().1
   }

   fn apply_canvas_view(&mut self) {
      let surface = self.backend.surface_size();
      let (x, y, width, height) = self.canvas.viewport(surface);
      self.backend.viewport(x, y, width, height);
      self.backend.project(0.0, width as f32, 0.0, height as f32);
   }

   //
   // Colors
   //

   /// Builds a color from channels interpreted under the current color mode.
   pub fn color(&self, v1: f32, v2: f32, v3: f32) -> Color {
      channels_to_color(self.color_mode, self.maxes, v1, v2, v3, self.maxes.alpha)
   }

   pub fn color_with_alpha(&self, v1: f32, v2: f32, v3: f32, alpha: f32) -> Color {
      channels_to_color(self.color_mode, self.maxes, v1, v2, v3, alpha)
   }

   pub fn fill(&mut self, v1: f32, v2: f32, v3: f32) {
      self.fill_with_alpha(v1, v2, v3, self.maxes.alpha);
   }

   pub fn fill_with_alpha(&mut self, v1: f32, v2: f32, v3: f32, alpha: f32) {
      self.fill_color(self.color_with_alpha(v1, v2, v3, alpha));
   }

   pub fn fill_color(&mut self, color: Color) {
      self.fill_color = color;
      self.fill_enabled = true;
   }

   /// Sets the fill from a color string. Unparsable strings leave the fill
   /// untouched.
   pub fn fill_str(&mut self, string: &str) {
      match parse_color(string) {
         Ok(color) => self.fill_color(color),
         Err(error) => log::warn!("fill ignored: {}", error),
      }
   }

   pub fn no_fill(&mut self) {
      self.fill_enabled = false;
   }

   pub fn stroke(&mut self, v1: f32, v2: f32, v3: f32) {
      self.stroke_with_alpha(v1, v2, v3, self.maxes.alpha);
   }

   pub fn stroke_with_alpha(&mut self, v1: f32, v2: f32, v3: f32, alpha: f32) {
      self.stroke_color(self.color_with_alpha(v1, v2, v3, alpha));
   }

   pub fn stroke_color(&mut self, color: Color) {
      self.stroke_color = color;
      self.stroke_enabled = true;
   }

   /// Sets the stroke from a color string. Unparsable strings leave the
   /// stroke untouched.
   pub fn stroke_str(&mut self, string: &str) {
      match parse_color(string) {
         Ok(color) => self.stroke_color(color),
         Err(error) => log::warn!("stroke ignored: {}", error),
      }
   }

   pub fn no_stroke(&mut self) {
      self.stroke_enabled = false;
   }

   pub fn stroke_weight(&mut self, weight: f32) {
      self.stroke_weight = weight;
   }

   pub fn angle_mode(&mut self, mode: AngleMode) {
      self.angle_mode = mode;
   }

   /// Sets the color mode, resetting the channel maxima to the mode's
   /// conventional defaults.
   pub fn color_mode(&mut self, mode: ColorMode) {
      self.color_mode = mode;
      self.maxes = ChannelMaxes::for_mode(mode);
   }

   pub fn color_mode_range(&mut self, mode: ColorMode, max1: f32, max2: f32, max3: f32, max_alpha: f32) {
      self.color_mode = mode;
      self.maxes = ChannelMaxes {
         v1: max1,
         v2: max2,
         v3: max3,
         alpha: max_alpha,
      };
   }

   /// Clears the canvas with a color built from the current color mode.
   pub fn background(&mut self, v1: f32, v2: f32, v3: f32) {
      self.background_color(self.color(v1, v2, v3));
   }

   pub fn background_color(&mut self, color: Color) {
      self.backend.set_color(color);
      self.backend.clear();
   }

   /// Clears the canvas with a parsed color string. Unparsable strings clear
   /// nothing.
   pub fn background_str(&mut self, string: &str) {
      match parse_color(string) {
         Ok(color) => self.background_color(color),
         Err(error) => log::warn!("background ignored: {}", error),
      }
   }

   //
   // Transforms
   //

   pub fn push(&mut self) {
      self.transforms.push();
   }

   pub fn pop(&mut self) {
      self.transforms.pop();
   }

   pub fn translate(&mut self, x: f32, y: f32) {
      self.transforms.translate(Vector::new(x, y));
   }

   /// Rotates by an angle in the current angle mode.
   pub fn rotate(&mut self, angle: f32) {
      let angle = self.to_radians(angle);
      self.transforms.rotate(angle);
   }

   pub fn scale(&mut self, scale: f32) {
      self.scale_xy(scale, scale);
   }

   pub fn scale_xy(&mut self, x: f32, y: f32) {
      self.transforms.scale(Vector::new(x, y));
   }

   pub fn transforms(&self) -> &TransformStack {
      &self.transforms
   }

   fn to_radians(&self, angle: f32) -> f32 {
      match self.angle_mode {
         AngleMode::Radians => angle,
         AngleMode::Degrees => angle.to_radians(),
      }
   }

   //
   // Shapes
   //

   pub fn point(&mut self, x: f32, y: f32) {
      if !self.stroke_enabled {
         return;
      }
      self.apply_transform();
      self.backend.set_color(self.stroke_color);
      if self.stroke_weight <= HAIRLINE_WEIGHT {
         self.backend.point(Point::new(x, y));
      } else {
         self.buffer.clear();
         self.buffer.fill_circle(Point::new(x, y), self.stroke_weight / 2.0);
         self.backend.fill_triangles(self.buffer.triangles());
      }
      self.restore_transform();
   }

   pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
      if !self.stroke_enabled {
         return;
      }
      self.apply_transform();
      self.stroke_path(&[Point::new(x1, y1), Point::new(x2, y2)], false);
      self.restore_transform();
   }

   pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
      // Squares get tracked under their own name by square().
      if width != height {
         self.track("rectangle", x, y, width, height);
      }
      self.apply_transform();
      if self.fill_enabled {
         self.backend.set_color(self.fill_color);
         self.backend.fill_rect(Rect::from_xywh(x, y, width, height));
      }
      self.stroke_path(
         &[
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
         ],
         true,
      );
      self.restore_transform();
   }

   pub fn square(&mut self, x: f32, y: f32, size: f32) {
      self.track("square", x, y, size, size);
      self.rect(x, y, size, size);
   }

   pub fn circle(&mut self, x: f32, y: f32, diameter: f32) {
      self.track("circle", x, y, diameter, diameter);
      self.ellipse(x, y, diameter, diameter);
   }

   pub fn ellipse(&mut self, x: f32, y: f32, width: f32, height: f32) {
      if width != height {
         self.track("ellipse", x, y, width, height);
      }
      let center = Point::new(x, y);
      let radii = Vector::new(width / 2.0, height / 2.0);
      self.apply_transform();
      if self.fill_enabled {
         self.backend.set_color(self.fill_color);
         self.buffer.clear();
         self.buffer.fill_ellipse(center, radii);
         self.backend.fill_triangles(self.buffer.triangles());
      }
      if self.stroke_enabled {
         let outline = shape_buffer::ellipse_outline(center, radii);
         self.stroke_path(&outline, true);
      }
      self.restore_transform();
   }

   pub fn triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
      let a = Point::new(x1, y1);
      let b = Point::new(x2, y2);
      let c = Point::new(x3, y3);
      let min = a.min(b).min(c);
      let max = a.max(b).max(c);
      self.track("triangle", min.x, min.y, max.x - min.x, max.y - min.y);
      self.apply_transform();
      if self.fill_enabled {
         self.backend.set_color(self.fill_color);
         self.buffer.clear();
         self.buffer.push_triangle(a, b, c);
         self.backend.fill_triangles(self.buffer.triangles());
      }
      self.stroke_path(&[a, b, c], true);
      self.restore_transform();
   }

   pub fn quad(
      &mut self,
      x1: f32,
      y1: f32,
      x2: f32,
      y2: f32,
      x3: f32,
      y3: f32,
      x4: f32,
      y4: f32,
   ) {
      let a = Point::new(x1, y1);
      let b = Point::new(x2, y2);
      let c = Point::new(x3, y3);
      let d = Point::new(x4, y4);
      let min = a.min(b).min(c).min(d);
      let max = a.max(b).max(c).max(d);
      self.track("quad", min.x, min.y, max.x - min.x, max.y - min.y);
      self.apply_transform();
      if self.fill_enabled {
         self.backend.set_color(self.fill_color);
         self.buffer.clear();
         self.buffer.push_triangle(a, b, c);
         self.buffer.push_triangle(a, c, d);
         self.backend.fill_triangles(self.buffer.triangles());
      }
      self.stroke_path(&[a, b, c, d], true);
      self.restore_transform();
   }

   pub fn arc(&mut self, x: f32, y: f32, width: f32, height: f32, start: f32, stop: f32) {
      self.arc_with_mode(x, y, width, height, start, stop, ArcMode::Chord);
   }

   pub fn arc_with_mode(
      &mut self,
      x: f32,
      y: f32,
      width: f32,
      height: f32,
      start: f32,
      stop: f32,
      mode: ArcMode,
   ) {
      let start = self.to_radians(start);
      let stop = self.to_radians(stop);
      let sweep = stop - start;
      let center = Point::new(x, y);
      let radii = Vector::new(width / 2.0, height / 2.0);
      self.apply_transform();
      if self.fill_enabled {
         self.backend.set_color(self.fill_color);
         self.buffer.clear();
         self.buffer.fill_arc(center, radii, start, sweep);
         self.backend.fill_triangles(self.buffer.triangles());
      }
      if self.stroke_enabled {
         let mut outline = shape_buffer::arc_outline(center, radii, start, sweep);
         match mode {
            ArcMode::Open => self.stroke_path(&outline, false),
            ArcMode::Chord => self.stroke_path(&outline, true),
            ArcMode::Pie => {
               outline.push(center);
               self.stroke_path(&outline, true);
            }
         }
      }
      self.restore_transform();
   }

   //
   // Text output
   //

   /// Enables the screen-reader-only canvas description.
   pub fn text_output(&mut self) {
      self.text_output_mode(TextOutputMode::Fallback);
   }

   pub fn text_output_mode(&mut self, mode: TextOutputMode) {
      self.tracker.enable(mode);
   }

   /// The description of the current frame's tracked shapes.
   pub fn canvas_description(&self) -> String {
      self.tracker.description(self.width(), self.height())
   }

   /// Prints the canvas description to the enabled output stream.
   pub fn describe_canvas(&self) {
      self.tracker.print(self.width(), self.height());
   }

   //
   // Frame lifecycle, driven by the runner
   //

   pub(crate) fn begin_frame(&mut self) {
      self.backend.begin_frame();
      self.apply_canvas_view();
      self.tracker.begin_frame();
   }

   pub(crate) fn end_frame(&mut self) -> anyhow::Result<()> {
      self.backend.end_frame()
   }

   //
   // Internals
   //

   fn apply_transform(&mut self) {
      let transform = *self.transforms.current();
      transform.apply(&mut self.backend);
   }

   fn restore_transform(&mut self) {
      let transform = *self.transforms.current();
      transform.restore(&mut self.backend);
   }

   /// Submits a path outline with the current stroke settings: hairlines for
   /// small weights, mitered triangle strips for everything thicker.
   fn stroke_path(&mut self, points: &[Point], closed: bool) {
      if !self.stroke_enabled || self.stroke_weight <= 0.0 {
         return;
      }
      self.backend.set_color(self.stroke_color);
      if self.stroke_weight <= HAIRLINE_WEIGHT {
         for pair in points.windows(2) {
            self.backend.line(pair[0], pair[1]);
         }
         if closed && points.len() > 2 {
            self.backend.line(points[points.len() - 1], points[0]);
         }
      } else {
         self.buffer.clear();
         self.buffer.stroke_polyline(points, closed, self.stroke_weight);
         self.backend.fill_triangles(self.buffer.triangles());
      }
   }

   fn track(&mut self, kind: &'static str, x: f32, y: f32, width: f32, height: f32) {
      self.tracker.track(
         kind,
         x,
         y,
         width,
         height,
         self.fill_color,
         self.stroke_color,
         self.fill_enabled,
         self.stroke_enabled,
      );
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   /// Counts backend calls instead of rasterizing anything.
   #[derive(Default)]
   struct RecordingBackend {
      pushes: usize,
      pops: usize,
      rects: usize,
      triangles: usize,
      lines: usize,
      points: usize,
      clears: usize,
   }

   impl RenderBackend for RecordingBackend {
      fn begin_frame(&mut self) {}

      fn end_frame(&mut self) -> anyhow::Result<()> {
         Ok(())
      }

      fn surface_size(&self) -> (u32, u32) {
         (640, 480)
      }

      fn viewport(&mut self, _x: i32, _y: i32, _width: u32, _height: u32) {}

      fn project(&mut self, _left: f32, _right: f32, _top: f32, _bottom: f32) {}

      fn set_color(&mut self, _color: Color) {}

      fn clear(&mut self) {
         self.clears += 1;
      }

      fn push_transform(&mut self) {
         self.pushes += 1;
      }

      fn pop_transform(&mut self) {
         self.pops += 1;
      }

      fn translate(&mut self, _translation: Vector) {}

      fn rotate(&mut self, _angle: f32) {}

      fn scale(&mut self, _scale: Vector) {}

      fn fill_rect(&mut self, _rect: Rect) {
         self.rects += 1;
      }

      fn fill_triangles(&mut self, triangles: &[quickdraw_renderer::Triangle]) {
         self.triangles += triangles.len();
      }

      fn line(&mut self, _a: Point, _b: Point) {
         self.lines += 1;
      }

      fn point(&mut self, _position: Point) {
         self.points += 1;
      }
   }

   fn graphics() -> Graphics<RecordingBackend> {
      Graphics::new(RecordingBackend::default())
   }

   #[test]
   fn shapes_balance_the_backend_transform_stack() {
      let mut g = graphics();
      g.translate(10.0, 10.0);
      g.rotate(1.0);
      g.rect(0.0, 0.0, 10.0, 20.0);
      g.circle(0.0, 0.0, 10.0);
      g.line(0.0, 0.0, 5.0, 5.0);
      g.point(1.0, 1.0);
      g.arc(0.0, 0.0, 10.0, 10.0, 0.0, 1.0);
      let backend = g.into_backend();
      assert!(backend.pushes > 0);
      assert_eq!(backend.pushes, backend.pops);
   }

   #[test]
   fn identity_transform_skips_the_backend_stack() {
      let mut g = graphics();
      g.rect(0.0, 0.0, 10.0, 20.0);
      let backend = g.into_backend();
      assert_eq!(backend.pushes, 0);
      assert_eq!(backend.pops, 0);
   }

   #[test]
   fn disabled_paints_submit_nothing() {
      let mut g = graphics();
      g.no_fill();
      g.no_stroke();
      g.rect(0.0, 0.0, 10.0, 20.0);
      g.ellipse(0.0, 0.0, 10.0, 20.0);
      g.line(0.0, 0.0, 5.0, 5.0);
      g.point(1.0, 1.0);
      g.triangle(0.0, 0.0, 5.0, 0.0, 0.0, 5.0);
      let backend = g.into_backend();
      assert_eq!(backend.rects, 0);
      assert_eq!(backend.triangles, 0);
      assert_eq!(backend.lines, 0);
      assert_eq!(backend.points, 0);
   }

   #[test]
   fn hairline_rect_strokes_four_lines() {
      let mut g = graphics();
      g.no_fill();
      g.rect(0.0, 0.0, 10.0, 20.0);
      let backend = g.into_backend();
      assert_eq!(backend.lines, 4);
      assert_eq!(backend.rects, 0);
   }

   #[test]
   fn thick_strokes_are_tessellated() {
      let mut g = graphics();
      g.no_fill();
      g.stroke_weight(8.0);
      g.line(0.0, 0.0, 10.0, 0.0);
      let backend = g.into_backend();
      assert_eq!(backend.lines, 0);
      assert!(backend.triangles >= 2);
   }

   #[test]
   fn zero_weight_strokes_nothing() {
      let mut g = graphics();
      g.stroke_weight(0.0);
      g.line(0.0, 0.0, 10.0, 0.0);
      let backend = g.into_backend();
      assert_eq!(backend.lines, 0);
      assert_eq!(backend.triangles, 0);
   }

   #[test]
   fn tracking_quirks_match_shape_names() {
      let mut g = graphics();
      g.text_output();
      g.square(0.0, 0.0, 10.0);
      g.circle(0.0, 0.0, 10.0);
      g.rect(0.0, 0.0, 10.0, 20.0);
      let description = g.canvas_description();
      assert!(description.contains("containing 3 shapes"));
      assert!(description.contains("square"));
      assert!(description.contains("circle"));
      assert!(description.contains("rectangle"));
      assert!(!description.contains("ellipse"));
   }

   #[test]
   fn background_clears() {
      let mut g = graphics();
      g.background(220.0, 220.0, 220.0);
      assert_eq!(g.into_backend().clears, 1);
   }

   #[test]
   fn invalid_color_strings_leave_state_alone() {
      let mut g = graphics();
      g.fill_str("#not-a-color");
      g.stroke_str("nonexistent");
      g.background_str("#12345");
      let backend = g.into_backend();
      assert_eq!(backend.clears, 0);
   }
}
