use quickdraw_renderer::{Color, Point, Rect, RenderBackend, Triangle, Vector};
use tiny_skia::{ClipMask, FillRule, PathBuilder, Stroke, Transform};

use crate::common::*;
use crate::state::State;
use crate::SoftwareBackend;

impl SoftwareBackend {
   /// Rebuilds the logical-to-pixel transform and the viewport clip after the
   /// viewport or projection changed.
   pub(crate) fn reset_view(&mut self) {
      let (vx, vy, vw, vh) = self.viewport;
      let (left, right, top, bottom) = self.projection;

      let scale_x = vw as f32 / (right - left);
      let scale_y = vh as f32 / (bottom - top);
      self.base_transform = Transform::from_row(
         scale_x,
         0.0,
         0.0,
         scale_y,
         vx as f32 - left * scale_x,
         vy as f32 - top * scale_y,
      );

      self.clip = if self.viewport == (0, 0, self.pixmap.width(), self.pixmap.height()) {
         None
      } else {
         let mut mask = ClipMask::new();
         let path = rect_to_path(vx as f32, vy as f32, vw as f32, vh as f32);
         match path {
            Some(path) => {
               let _ = mask.set_path(
                  self.pixmap.width(),
                  self.pixmap.height(),
                  &path,
                  FillRule::Winding,
                  false,
               );
               Some(mask)
            }
            None => None,
         }
      };
   }

   fn total_transform(&self) -> Transform {
      self.base_transform.pre_concat(self.transform)
   }
}

impl RenderBackend for SoftwareBackend {
   fn begin_frame(&mut self) {
      self.color = Color::WHITE;
      self.transform = Transform::identity();
      self.saved.clear();
      self.viewport = (0, 0, self.pixmap.width(), self.pixmap.height());
      self.projection = (
         0.0,
         self.pixmap.width() as f32,
         0.0,
         self.pixmap.height() as f32,
      );
      self.reset_view();
   }

   fn end_frame(&mut self) -> anyhow::Result<()> {
      // Everything is rasterized eagerly; there is nothing to flush.
      Ok(())
   }

   fn surface_size(&self) -> (u32, u32) {
      (self.pixmap.width(), self.pixmap.height())
   }

   fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
      if width == 0 || height == 0 {
         log::warn!("ignoring zero-area viewport");
         return;
      }
      self.viewport = (x, y, width, height);
      // Like the projection default, logical coordinates follow the viewport
      // until project() says otherwise.
      self.projection = (0.0, width as f32, 0.0, height as f32);
      self.reset_view();
   }

   fn project(&mut self, left: f32, right: f32, top: f32, bottom: f32) {
      if right == left || bottom == top {
         log::warn!("ignoring zero-area projection");
         return;
      }
      self.projection = (left, right, top, bottom);
      self.reset_view();
   }

   fn set_color(&mut self, color: Color) {
      self.color = color;
   }

   fn clear(&mut self) {
      let (vx, vy, vw, vh) = self.viewport;
      if self.clip.is_none() {
         self.pixmap.fill(to_skia_color(self.color));
      } else if let Some(path) = rect_to_path(vx as f32, vy as f32, vw as f32, vh as f32) {
         self.pixmap.fill_path(
            &path,
            &solid_paint(self.color),
            FillRule::Winding,
            Transform::identity(),
            None,
         );
      }
   }

   fn push_transform(&mut self) {
      self.saved.push(State {
         transform: self.transform,
      });
   }

   fn pop_transform(&mut self) {
      if let Some(state) = self.saved.pop() {
         self.transform = state.transform;
      }
   }

   fn translate(&mut self, translation: Vector) {
      self.transform =
         self.transform.pre_concat(Transform::from_translate(translation.x, translation.y));
   }

   fn rotate(&mut self, angle: f32) {
      let (sin, cos) = angle.sin_cos();
      self.transform = self.transform.pre_concat(Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0));
   }

   fn scale(&mut self, scale: Vector) {
      self.transform = self.transform.pre_concat(Transform::from_scale(scale.x, scale.y));
   }

   fn fill_rect(&mut self, rect: Rect) {
      if let Some(path) = rect_to_path(rect.x(), rect.y(), rect.width(), rect.height()) {
         self.pixmap.fill_path(
            &path,
            &solid_paint(self.color),
            FillRule::Winding,
            self.total_transform(),
            self.clip.as_ref(),
         );
      }
   }

   fn fill_triangles(&mut self, triangles: &[Triangle]) {
      if let Some(path) = triangles_to_path(triangles) {
         self.pixmap.fill_path(
            &path,
            &solid_paint(self.color),
            FillRule::Winding,
            self.total_transform(),
            self.clip.as_ref(),
         );
      }
   }

   fn line(&mut self, a: Point, b: Point) {
      if a == b {
         self.point(a);
         return;
      }
      let mut builder = PathBuilder::new();
      builder.move_to(a.x, a.y);
      builder.line_to(b.x, b.y);
      if let Some(path) = builder.finish() {
         self.pixmap.stroke_path(
            &path,
            &solid_paint(self.color),
            &Stroke::default(),
            self.total_transform(),
            self.clip.as_ref(),
         );
      }
   }

   fn point(&mut self, position: Point) {
      if let Some(path) = rect_to_path(position.x - 0.5, position.y - 0.5, 1.0, 1.0) {
         self.pixmap.fill_path(
            &path,
            &solid_paint(self.color),
            FillRule::Winding,
            self.total_transform(),
            self.clip.as_ref(),
         );
      }
   }
}
