//! Text output: a screen-reader-friendly description of what's on the canvas.
//!
//! When enabled, shape calls record what they drew, and the tracker can
//! produce a plain-language summary of the frame. The heuristics here are
//! deliberately coarse; they describe, they don't measure.

use std::fmt::Write;

use quickdraw_renderer::Color;

/// How many shapes a frame's description covers at most. Later shapes go
/// undescribed.
pub const MAX_TRACKED_SHAPES: usize = 256;

/// Where the description ends up when printed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextOutputMode {
   /// Screen-reader-only output, printed to stderr.
   Fallback,
   /// Visible output, printed to stdout.
   Label,
}

#[derive(Clone, Copy, Debug)]
struct TrackedShape {
   kind: &'static str,
   x: f32,
   y: f32,
   width: f32,
   height: f32,
   fill: Color,
   stroke: Color,
   fill_enabled: bool,
   stroke_enabled: bool,
}

pub(crate) struct ShapeTracker {
   mode: Option<TextOutputMode>,
   shapes: heapless::Vec<TrackedShape, MAX_TRACKED_SHAPES>,
}

impl ShapeTracker {
   pub fn new() -> Self {
      Self {
         mode: None,
         shapes: heapless::Vec::new(),
      }
   }

   pub fn is_enabled(&self) -> bool {
      self.mode.is_some()
   }

   /// Enables text output. Enabling twice is a no-op; the first mode wins.
   pub fn enable(&mut self, mode: TextOutputMode) {
      if self.mode.is_some() {
         return;
      }
      self.mode = Some(mode);
      self.shapes.clear();
      match mode {
         TextOutputMode::Label => {
            println!("Text output accessibility mode enabled (LABEL mode - visible output)")
         }
         TextOutputMode::Fallback => eprintln!(
            "Text output accessibility mode enabled (FALLBACK mode - screen reader only)"
         ),
      }
   }

   /// Starts a fresh frame; descriptions always reflect the current frame.
   pub fn begin_frame(&mut self) {
      self.shapes.clear();
   }

   #[allow(clippy::too_many_arguments)]
   pub fn track(
      &mut self,
      kind: &'static str,
      x: f32,
      y: f32,
      width: f32,
      height: f32,
      fill: Color,
      stroke: Color,
      fill_enabled: bool,
      stroke_enabled: bool,
   ) {
      if self.mode.is_none() {
         return;
      }
      let _ = self.shapes.push(TrackedShape {
         kind,
         x,
         y,
         width,
         height,
         fill,
         stroke,
         fill_enabled,
         stroke_enabled,
      });
   }

   /// Builds the frame description for a canvas of the given size.
   pub fn description(&self, canvas_width: u32, canvas_height: u32) -> String {
      let mut text = String::new();
      let _ = writeln!(
         text,
         "Canvas description: {} by {} pixels canvas containing {} shapes:",
         canvas_width,
         canvas_height,
         self.shapes.len(),
      );
      for (i, shape) in self.shapes.iter().enumerate() {
         let color = color_name(if shape.fill_enabled { shape.fill } else { shape.stroke });
         let location = location_description(
            shape.x,
            shape.y,
            canvas_width as f32,
            canvas_height as f32,
         );
         let area = area_percentage(
            shape.width,
            shape.height,
            canvas_width as f32,
            canvas_height as f32,
         );
         let _ = writeln!(
            text,
            "Shape {}: {} {} at {} covering {:.1}% of canvas",
            i + 1,
            color,
            shape.kind,
            location,
            area,
         );
      }
      text
   }

   /// Prints the description to the stream the output mode selects.
   pub fn print(&self, canvas_width: u32, canvas_height: u32) {
      let mode = match self.mode {
         Some(mode) => mode,
         None => return,
      };
      let description = self.description(canvas_width, canvas_height);
      match mode {
         TextOutputMode::Label => println!("{}", description),
         TextOutputMode::Fallback => eprintln!("{}", description),
      }
   }
}

/// A coarse name for a color: exact primaries first, then grays by
/// brightness.
fn color_name(color: Color) -> &'static str {
   let Color { r, g, b, .. } = color;
   if r == 1.0 && g == 0.0 && b == 0.0 {
      return "red";
   }
   if r == 0.0 && g == 1.0 && b == 0.0 {
      return "green";
   }
   if r == 0.0 && g == 0.0 && b == 1.0 {
      return "blue";
   }
   if r == 1.0 && g == 1.0 && b == 0.0 {
      return "yellow";
   }
   if r == 1.0 && g == 0.0 && b == 1.0 {
      return "magenta";
   }
   if r == 0.0 && g == 1.0 && b == 1.0 {
      return "cyan";
   }
   if r == 1.0 && g == 1.0 && b == 1.0 {
      return "white";
   }
   if r == 0.0 && g == 0.0 && b == 0.0 {
      return "black";
   }
   if r > 0.4 && g > 0.4 && b > 0.4 {
      return "light gray";
   }
   if r < 0.3 && g < 0.3 && b < 0.3 {
      return "dark gray";
   }
   "colored"
}

/// Splits the canvas into a 3x3 grid of named regions, with a center bias.
fn location_description(x: f32, y: f32, canvas_width: f32, canvas_height: f32) -> &'static str {
   let center_x = canvas_width / 2.0;
   let center_y = canvas_height / 2.0;
   let threshold = 50.0;

   if (x - center_x).abs() < threshold && (y - center_y).abs() < threshold {
      "center"
   } else if x < center_x / 2.0 {
      if y < center_y / 2.0 {
         "top left"
      } else if y > center_y * 1.5 {
         "bottom left"
      } else {
         "left"
      }
   } else if x > center_x * 1.5 {
      if y < center_y / 2.0 {
         "top right"
      } else if y > center_y * 1.5 {
         "bottom right"
      } else {
         "right"
      }
   } else if y < center_y / 2.0 {
      "top"
   } else if y > center_y * 1.5 {
      "bottom"
   } else {
      "middle"
   }
}

/// The share of the canvas the shape's bounding box covers, in percent.
fn area_percentage(width: f32, height: f32, canvas_width: f32, canvas_height: f32) -> f32 {
   if canvas_width <= 0.0 || canvas_height <= 0.0 {
      return 0.0;
   }
   (width * height) / (canvas_width * canvas_height) * 100.0
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn color_names() {
      assert_eq!(color_name(Color::rgb(1.0, 0.0, 0.0)), "red");
      assert_eq!(color_name(Color::rgb(1.0, 1.0, 1.0)), "white");
      assert_eq!(color_name(Color::rgb(0.8, 0.8, 0.8)), "light gray");
      assert_eq!(color_name(Color::rgb(0.1, 0.1, 0.1)), "dark gray");
      assert_eq!(color_name(Color::rgb(0.9, 0.2, 0.1)), "colored");
   }

   #[test]
   fn locations() {
      assert_eq!(location_description(200.0, 150.0, 400.0, 300.0), "center");
      assert_eq!(location_description(10.0, 10.0, 400.0, 300.0), "top left");
      assert_eq!(location_description(390.0, 290.0, 400.0, 300.0), "bottom right");
      assert_eq!(location_description(200.0, 10.0, 400.0, 300.0), "top");
      assert_eq!(location_description(10.0, 150.0, 400.0, 300.0), "left");
   }

   #[test]
   fn area_percentages() {
      assert_eq!(area_percentage(40.0, 30.0, 400.0, 300.0), 1.0);
      assert_eq!(area_percentage(10.0, 10.0, 0.0, 300.0), 0.0);
   }

   #[test]
   fn disabled_tracker_records_nothing() {
      let mut tracker = ShapeTracker::new();
      tracker.track(
         "rectangle",
         0.0,
         0.0,
         10.0,
         10.0,
         Color::WHITE,
         Color::BLACK,
         true,
         true,
      );
      assert!(tracker.description(100, 100).contains("containing 0 shapes"));
   }

   #[test]
   fn descriptions_list_shapes() {
      let mut tracker = ShapeTracker::new();
      tracker.enable(TextOutputMode::Fallback);
      tracker.track(
         "rectangle",
         10.0,
         10.0,
         40.0,
         30.0,
         Color::rgb(1.0, 0.0, 0.0),
         Color::BLACK,
         true,
         true,
      );
      let description = tracker.description(400, 300);
      assert!(description.contains("400 by 300 pixels canvas containing 1 shapes"));
      assert!(description.contains("Shape 1: red rectangle at top left covering 1.0% of canvas"));
   }

   #[test]
   fn stroke_color_describes_unfilled_shapes() {
      let mut tracker = ShapeTracker::new();
      tracker.enable(TextOutputMode::Fallback);
      tracker.track(
         "circle",
         200.0,
         150.0,
         50.0,
         50.0,
         Color::WHITE,
         Color::rgb(0.0, 0.0, 1.0),
         false,
         true,
      );
      assert!(tracker.description(400, 300).contains("blue circle at center"));
   }
}
