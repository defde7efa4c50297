//! A software rasterizer backend built on tiny-skia.
//!
//! This backend renders into an owned pixmap, which makes it usable both for
//! headless rendering and as the surface that integration tests poke pixels
//! out of.

use quickdraw_renderer::Color;
use tiny_skia::{ClipMask, Pixmap, Transform};

mod common;
mod rendering;
mod snapshot;
mod state;

use crate::state::State;

pub struct SoftwareBackend {
   pixmap: Pixmap,
   color: Color,
   // Logical-to-pixel mapping derived from the viewport and projection.
   base_transform: Transform,
   transform: Transform,
   saved: Vec<State>,
   viewport: (i32, i32, u32, u32),
   projection: (f32, f32, f32, f32),
   clip: Option<ClipMask>,
}

impl SoftwareBackend {
   /// Creates a backend rendering to a `width` by `height` surface.
   pub fn new(width: u32, height: u32) -> anyhow::Result<Self> {
      let pixmap = Pixmap::new(width, height)
         .ok_or_else(|| anyhow::anyhow!("surface size must be non-zero"))?;
      let mut backend = Self {
         pixmap,
         color: Color::WHITE,
         base_transform: Transform::identity(),
         transform: Transform::identity(),
         saved: Vec::new(),
         viewport: (0, 0, width, height),
         projection: (0.0, width as f32, 0.0, height as f32),
         clip: None,
      };
      backend.reset_view();
      Ok(backend)
   }

   pub fn width(&self) -> u32 {
      self.pixmap.width()
   }

   pub fn height(&self) -> u32 {
      self.pixmap.height()
   }

   /// The raw premultiplied pixel data of the surface.
   pub fn data(&self) -> &[u8] {
      self.pixmap.data()
   }
}
