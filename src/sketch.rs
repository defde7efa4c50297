//! The sketch trait and the frame runner.

use quickdraw_renderer::RenderBackend;

use crate::config::SketchConfig;
use crate::graphics::Graphics;

/// A sketch: a one-time setup routine and a per-frame draw routine.
///
/// Note that on an immediate-mode backend, "one-time" describes intent, not
/// execution: the runner replays `setup` every frame so whatever it draws
/// stays on screen. Keep heavy non-drawing initialization out of it, or guard
/// it yourself.
pub trait Sketch<B: RenderBackend> {
   fn setup(&mut self, graphics: &mut Graphics<B>);

   fn draw(&mut self, graphics: &mut Graphics<B>) {
      let _ = graphics;
   }
}

/// Drives a sketch over a backend, one `frame()` call at a time. The window
/// and event loop, if any, stay with the host application.
pub struct Runner<S, B: RenderBackend> {
   sketch: S,
   graphics: Graphics<B>,
   frame_count: u64,
}

impl<S, B> Runner<S, B>
where
   S: Sketch<B>,
   B: RenderBackend,
{
   pub fn new(sketch: S, backend: B) -> Self {
      Self {
         sketch,
         graphics: Graphics::new(backend),
         frame_count: 0,
      }
   }

   /// Like [`new`][Self::new], but applies the configured canvas before the
   /// first frame.
   pub fn with_config(sketch: S, backend: B, config: &SketchConfig) -> Self {
      let mut runner = Self::new(sketch, backend);
      if let Some(canvas) = &config.canvas {
         runner.graphics.create_canvas(canvas.width, canvas.height);
      }
      runner
   }

   /// Renders a single frame.
   ///
   /// The backend retains nothing between frames, so the setup routine is
   /// re-executed on every one of them before `draw` runs; this is what keeps
   /// a sketch that only draws in `setup` visible.
   pub fn frame(&mut self) -> anyhow::Result<()> {
      self.graphics.begin_frame();
      self.sketch.setup(&mut self.graphics);
      self.sketch.draw(&mut self.graphics);
      self.graphics.end_frame()?;
      self.frame_count += 1;
      Ok(())
   }

   /// How many frames have completed so far.
   pub fn frame_count(&self) -> u64 {
      self.frame_count
   }

   pub fn graphics(&self) -> &Graphics<B> {
      &self.graphics
   }

   pub fn graphics_mut(&mut self) -> &mut Graphics<B> {
      &mut self.graphics
   }

   pub fn sketch(&self) -> &S {
      &self.sketch
   }

   pub fn into_graphics(self) -> Graphics<B> {
      self.graphics
   }
}
