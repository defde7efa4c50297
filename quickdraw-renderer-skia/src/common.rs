use quickdraw_renderer::{Color, Triangle};
use tiny_skia::{Paint, Path, PathBuilder, Shader};

pub(crate) fn to_skia_color(color: Color) -> tiny_skia::Color {
   tiny_skia::Color::from_rgba(
      color.r.clamp(0.0, 1.0),
      color.g.clamp(0.0, 1.0),
      color.b.clamp(0.0, 1.0),
      color.a.clamp(0.0, 1.0),
   )
   .unwrap_or_else(|| tiny_skia::Color::from_rgba8(0, 0, 0, 255))
}

pub(crate) fn solid_paint(color: Color) -> Paint<'static> {
   Paint {
      shader: Shader::SolidColor(to_skia_color(color)),
      anti_alias: true,
      ..Paint::default()
   }
}

/// Builds one path out of a batch of triangles. Returns `None` for an empty
/// batch or one that collapses to nothing.
pub(crate) fn triangles_to_path(triangles: &[Triangle]) -> Option<Path> {
   let mut builder = PathBuilder::new();
   for triangle in triangles {
      builder.move_to(triangle[0].x, triangle[0].y);
      builder.line_to(triangle[1].x, triangle[1].y);
      builder.line_to(triangle[2].x, triangle[2].y);
      builder.close();
   }
   builder.finish()
}

pub(crate) fn rect_to_path(x: f32, y: f32, width: f32, height: f32) -> Option<Path> {
   // Negative sizes flip around the origin corner.
   let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
   let (y, height) = if height < 0.0 { (y + height, -height) } else { (y, height) };
   let rect = tiny_skia::Rect::from_xywh(x, y, width, height)?;
   Some(PathBuilder::from_rect(rect))
}
