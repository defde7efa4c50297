//! Scratch geometry the facade decomposes shapes into before submission.
//!
//! Curved outlines become polylines here, and thick strokes become triangle
//! strips with mitered joints. Everything is accumulated into one reusable
//! buffer so a shape call does at most one triangle submission per paint
//! (fill, stroke).

use std::f32::consts::TAU;

use quickdraw_renderer::{Point, Triangle, Vector};
use smallvec::SmallVec;

/// Maximum chordal deviation of a tessellated curve, in logical units.
const CURVE_TOLERANCE: f32 = 0.25;
const MIN_SEGMENTS: usize = 12;
const MAX_SEGMENTS: usize = 96;

/// Stroke joints sharper than this many half-widths get beveled instead of
/// mitered.
const MITER_LIMIT: f32 = 4.0;

/// Vertices closer together than this are considered the same point.
const EPSILON: f32 = 1e-5;

/// Picks how many segments an ellipse outline needs so the largest chordal
/// deviation stays under [`CURVE_TOLERANCE`].
pub fn ellipse_segment_count(radii: Vector) -> usize {
   let radius = radii.x.abs().max(radii.y.abs());
   if radius <= CURVE_TOLERANCE {
      return MIN_SEGMENTS;
   }
   let step = (1.0 - CURVE_TOLERANCE / radius).acos();
   let count = (TAU / step).ceil() as usize;
   count.clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

/// Like [`ellipse_segment_count`], scaled down by the fraction of the full
/// turn an arc covers. Always at least 2.
pub fn arc_segment_count(radii: Vector, sweep: f32) -> usize {
   let full = ellipse_segment_count(radii) as f32;
   let fraction = (sweep.abs() / TAU).min(1.0);
   ((full * fraction).ceil() as usize).max(2)
}

/// The points of an ellipse outline, exclusive of the wrap-around point.
pub fn ellipse_outline(center: Point, radii: Vector) -> SmallVec<[Point; 64]> {
   let segments = ellipse_segment_count(radii);
   (0..segments)
      .map(|i| {
         let angle = i as f32 / segments as f32 * TAU;
         arc_point(center, radii, angle)
      })
      .collect()
}

/// The points of an arc outline, inclusive of both endpoints.
pub fn arc_outline(center: Point, radii: Vector, start: f32, sweep: f32) -> SmallVec<[Point; 64]> {
   let segments = arc_segment_count(radii, sweep);
   (0..=segments)
      .map(|i| {
         let angle = start + i as f32 / segments as f32 * sweep;
         arc_point(center, radii, angle)
      })
      .collect()
}

fn arc_point(center: Point, radii: Vector, angle: f32) -> Point {
   center + Vector::new(angle.cos() * radii.x, angle.sin() * radii.y)
}

pub struct ShapeBuffer {
   triangles: SmallVec<[Triangle; 32]>,
}

impl ShapeBuffer {
   pub fn new() -> Self {
      Self {
         triangles: SmallVec::new(),
      }
   }

   pub fn clear(&mut self) {
      self.triangles.clear();
   }

   pub fn triangles(&self) -> &[Triangle] {
      &self.triangles
   }

   /// Appends a triangle, skipping degenerate ones and flipping winding where
   /// needed so overlapping geometry can't cancel under a winding fill rule.
   pub fn push_triangle(&mut self, a: Point, b: Point, c: Point) {
      let doubled_area = (b - a).perp_dot(c - a);
      if !doubled_area.is_finite() || doubled_area.abs() <= EPSILON * EPSILON {
         return;
      }
      if doubled_area < 0.0 {
         self.triangles.push([a, c, b]);
      } else {
         self.triangles.push([a, b, c]);
      }
   }

   /// Fan-fills a convex outline around a center point. Consecutive outline
   /// points pair up with the center; the last segment wraps around.
   pub fn fill_fan(&mut self, center: Point, outline: &[Point], wrap: bool) {
      if outline.len() < 2 {
         return;
      }
      for pair in outline.windows(2) {
         self.push_triangle(center, pair[0], pair[1]);
      }
      if wrap {
         self.push_triangle(center, outline[outline.len() - 1], outline[0]);
      }
   }

   pub fn fill_ellipse(&mut self, center: Point, radii: Vector) {
      let outline = ellipse_outline(center, radii);
      self.fill_fan(center, &outline, true);
   }

   /// Fan-fills an arc from its center, for every arc mode.
   pub fn fill_arc(&mut self, center: Point, radii: Vector, start: f32, sweep: f32) {
      let outline = arc_outline(center, radii, start, sweep);
      self.fill_fan(center, &outline, false);
   }

   pub fn fill_circle(&mut self, center: Point, radius: f32) {
      self.fill_ellipse(center, Vector::new(radius, radius));
   }

   /// Expands a polyline into a triangle strip of the given width, with
   /// mitered joints (beveled past the miter limit) and butt caps on open
   /// ends.
   pub fn stroke_polyline(&mut self, points: &[Point], closed: bool, weight: f32) {
      let half = weight / 2.0;
      if half <= 0.0 {
         return;
      }

      // Collapse consecutive duplicates; joint normals need distinct points.
      let mut path: SmallVec<[Point; 64]> = SmallVec::new();
      for &point in points {
         if path.last().map_or(true, |&last| last.distance_squared(point) > EPSILON) {
            path.push(point);
         }
      }
      let mut closed = closed;
      if closed && path.len() > 1 {
         if path[0].distance_squared(path[path.len() - 1]) <= EPSILON {
            path.pop();
         }
      }
      if path.len() < 2 {
         return;
      }
      if path.len() < 3 {
         closed = false;
      }

      // One quad per segment, offset along the segment normal.
      let segments = if closed { path.len() } else { path.len() - 1 };
      for i in 0..segments {
         let a = path[i];
         let b = path[(i + 1) % path.len()];
         let normal = segment_normal(a, b) * half;
         self.push_triangle(a + normal, b + normal, b - normal);
         self.push_triangle(a + normal, b - normal, a - normal);
      }

      // Joint geometry: a triangle to fill the outer gap between adjacent
      // quads, and a miter tip on top of it while within the miter limit.
      let joints = if closed { path.len() } else { path.len() - 2 };
      for j in 0..joints {
         let i = if closed { j } else { j + 1 };
         let prev = path[(i + path.len() - 1) % path.len()];
         let here = path[i];
         let next = path[(i + 1) % path.len()];
         self.stroke_joint(prev, here, next, half);
      }
   }

   fn stroke_joint(&mut self, prev: Point, here: Point, next: Point, half: f32) {
      let direction_in = normalize(here - prev);
      let direction_out = normalize(next - here);
      let turn = direction_in.perp_dot(direction_out);
      if turn.abs() <= EPSILON {
         // Collinear (or fully reversed); the segment quads already cover it.
         return;
      }
      let normal_in = perp(direction_in);
      let normal_out = perp(direction_out);
      // The outer side of the bend is opposite the turn direction.
      let side = if turn > 0.0 { -1.0 } else { 1.0 };

      let outer_in = here + normal_in * (half * side);
      let outer_out = here + normal_out * (half * side);
      self.push_triangle(here, outer_in, outer_out);

      let bisector = normalize(normal_in + normal_out);
      let cos_half_angle = bisector.dot(normal_in);
      if cos_half_angle > 1.0 / MITER_LIMIT {
         let tip = here + bisector * (half / cos_half_angle * side);
         self.push_triangle(outer_in, tip, outer_out);
      }
   }
}

impl Default for ShapeBuffer {
   fn default() -> Self {
      Self::new()
   }
}

fn normalize(v: Vector) -> Vector {
   let length = v.length();
   if length <= EPSILON {
      Vector::ZERO
   } else {
      v / length
   }
}

/// The left-hand perpendicular.
fn perp(v: Vector) -> Vector {
   Vector::new(-v.y, v.x)
}

fn segment_normal(a: Point, b: Point) -> Vector {
   perp(normalize(b - a))
}
