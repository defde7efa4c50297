//! Shape rendering tests.
//!
//! These drive the facade over the software backend and assert on pixels,
//! sampling well inside shape interiors to stay clear of anti-aliased edges.

use quickdraw::skia::SoftwareBackend;
use quickdraw::{Graphics, HALF_PI};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

/// A 100x100 context with a white background.
fn graphics() -> Graphics<SoftwareBackend> {
   let _ = simple_logger::SimpleLogger::new().init();
   let backend = SoftwareBackend::new(100, 100).expect("backend creation should succeed");
   let mut graphics = Graphics::new(backend);
   graphics.background(255.0, 255.0, 255.0);
   graphics
}

fn pixel(graphics: &Graphics<SoftwareBackend>, x: u32, y: u32) -> [u8; 4] {
   graphics.backend().pixel(x, y).expect("pixel should be inside the surface")
}

#[test]
fn background_fills_the_surface() {
   let mut g = graphics();
   g.background(255.0, 0.0, 0.0);
   assert_eq!(pixel(&g, 0, 0), RED);
   assert_eq!(pixel(&g, 50, 50), RED);
   assert_eq!(pixel(&g, 99, 99), RED);
}

#[test]
fn filled_rect_covers_its_interior() {
   let mut g = graphics();
   g.fill(255.0, 0.0, 0.0);
   g.no_stroke();
   g.rect(10.0, 10.0, 30.0, 30.0);
   assert_eq!(pixel(&g, 25, 25), RED);
   assert_eq!(pixel(&g, 11, 11), RED);
   assert_eq!(pixel(&g, 60, 60), WHITE);
}

#[test]
fn no_fill_leaves_the_interior_untouched() {
   let mut g = graphics();
   g.no_fill();
   g.no_stroke();
   g.rect(10.0, 10.0, 30.0, 30.0);
   assert_eq!(pixel(&g, 25, 25), WHITE);
}

#[test]
fn hairline_rect_outline_touches_the_edges() {
   let mut g = graphics();
   g.no_fill();
   g.stroke(0.0, 0.0, 255.0);
   g.rect(10.0, 10.0, 30.0, 30.0);
   // The hairline runs along the edge; its interior stays empty.
   assert_ne!(pixel(&g, 25, 10), WHITE);
   assert_eq!(pixel(&g, 25, 25), WHITE);
}

#[test]
fn circle_covers_its_radius() {
   let mut g = graphics();
   g.fill(255.0, 0.0, 0.0);
   g.no_stroke();
   g.circle(50.0, 50.0, 40.0);
   assert_eq!(pixel(&g, 50, 50), RED);
   assert_eq!(pixel(&g, 50, 35), RED);
   assert_eq!(pixel(&g, 65, 50), RED);
   // Radius is 20; (50, 25) lies 25 units out.
   assert_eq!(pixel(&g, 50, 25), WHITE);
}

#[test]
fn ellipse_respects_both_radii() {
   let mut g = graphics();
   g.fill(0.0, 0.0, 255.0);
   g.no_stroke();
   g.ellipse(50.0, 50.0, 60.0, 20.0);
   assert_eq!(pixel(&g, 70, 50), BLUE);
   // Inside the wide radius, outside the narrow one.
   assert_eq!(pixel(&g, 50, 65), WHITE);
}

#[test]
fn triangle_fills_its_interior() {
   let mut g = graphics();
   g.fill(255.0, 0.0, 0.0);
   g.no_stroke();
   g.triangle(50.0, 10.0, 90.0, 90.0, 10.0, 90.0);
   assert_eq!(pixel(&g, 50, 60), RED);
   assert_eq!(pixel(&g, 12, 12), WHITE);
}

#[test]
fn quad_fills_both_halves() {
   let mut g = graphics();
   g.fill(255.0, 0.0, 0.0);
   g.no_stroke();
   g.quad(20.0, 20.0, 80.0, 20.0, 80.0, 80.0, 20.0, 80.0);
   assert_eq!(pixel(&g, 30, 30), RED);
   assert_eq!(pixel(&g, 70, 70), RED);
}

#[test]
fn thick_line_has_width() {
   let mut g = graphics();
   g.stroke(0.0, 0.0, 255.0);
   g.stroke_weight(9.0);
   g.line(20.0, 50.0, 80.0, 50.0);
   assert_eq!(pixel(&g, 50, 50), BLUE);
   assert_eq!(pixel(&g, 50, 53), BLUE);
   assert_eq!(pixel(&g, 50, 47), BLUE);
   // Outside the half-width band, and beyond the butt cap.
   assert_eq!(pixel(&g, 50, 40), WHITE);
   assert_eq!(pixel(&g, 12, 50), WHITE);
}

#[test]
fn thick_outline_miters_fill_the_corner() {
   let mut g = graphics();
   g.no_fill();
   g.stroke(0.0, 0.0, 255.0);
   g.stroke_weight(8.0);
   g.rect(30.0, 30.0, 40.0, 40.0);
   // The mitered corner square extends half a weight diagonally outward.
   assert_eq!(pixel(&g, 27, 27), BLUE);
   assert_eq!(pixel(&g, 73, 73), BLUE);
   assert_eq!(pixel(&g, 24, 24), WHITE);
   // Dead center stays hollow.
   assert_eq!(pixel(&g, 50, 50), WHITE);
}

#[test]
fn thick_point_is_a_dot() {
   let mut g = graphics();
   g.stroke(0.0, 0.0, 255.0);
   g.stroke_weight(10.0);
   g.point(50.0, 50.0);
   assert_eq!(pixel(&g, 50, 50), BLUE);
   assert_eq!(pixel(&g, 53, 50), BLUE);
   assert_eq!(pixel(&g, 58, 50), WHITE);
}

#[test]
fn no_stroke_suppresses_lines_and_points() {
   let mut g = graphics();
   g.no_stroke();
   g.line(20.0, 50.0, 80.0, 50.0);
   g.point(50.0, 20.0);
   assert_eq!(pixel(&g, 50, 50), WHITE);
   assert_eq!(pixel(&g, 50, 20), WHITE);
}

#[test]
fn arc_fan_fills_its_sector() {
   let mut g = graphics();
   g.fill(255.0, 0.0, 0.0);
   g.no_stroke();
   // From 0 to HALF_PI: the +x/+y quadrant (y points down).
   g.arc(50.0, 50.0, 60.0, 60.0, 0.0, HALF_PI);
   assert_eq!(pixel(&g, 60, 60), RED);
   assert_eq!(pixel(&g, 60, 40), WHITE);
   assert_eq!(pixel(&g, 40, 60), WHITE);
}

#[test]
fn pie_arc_outline_reaches_the_center() {
   let mut g = graphics();
   g.no_fill();
   g.stroke(0.0, 0.0, 255.0);
   g.stroke_weight(5.0);
   g.arc_with_mode(50.0, 50.0, 60.0, 60.0, 0.0, HALF_PI, quickdraw::ArcMode::Pie);
   // Radius legs pass through the center and the two endpoints.
   assert_eq!(pixel(&g, 50, 50), BLUE);
   assert_eq!(pixel(&g, 65, 50), BLUE);
   assert_eq!(pixel(&g, 50, 65), BLUE);
}

#[test]
fn surfaces_encode_to_png() {
   let mut g = graphics();
   g.background(255.0, 0.0, 0.0);
   let png = g.backend().encode_png().expect("encoding should succeed");
   assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
}

#[test]
fn open_arc_outline_skips_the_chord() {
   let mut g = graphics();
   g.no_fill();
   g.stroke(0.0, 0.0, 255.0);
   g.stroke_weight(5.0);
   g.arc_with_mode(50.0, 50.0, 60.0, 60.0, 0.0, HALF_PI, quickdraw::ArcMode::Open);
   // On the arc itself (45 degrees, radius 30).
   assert_eq!(pixel(&g, 71, 71), BLUE);
   // The chord midpoint between (80, 50) and (50, 80) stays empty.
   assert_eq!(pixel(&g, 65, 65), WHITE);
}
