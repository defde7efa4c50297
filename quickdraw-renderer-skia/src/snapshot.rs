use std::io::Cursor;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};

use crate::SoftwareBackend;

impl SoftwareBackend {
   /// Reads back a single surface pixel as straight-alpha RGBA. Returns `None`
   /// outside the surface.
   pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
      let pixel = self.pixmap.pixel(x, y)?.demultiply();
      Some([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()])
   }

   /// Encodes the surface to PNG data.
   pub fn encode_png(&self) -> anyhow::Result<Vec<u8>> {
      let width = self.pixmap.width();
      let height = self.pixmap.height();
      let mut data = Vec::with_capacity((width * height * 4) as usize);
      for pixel in self.pixmap.pixels() {
         let pixel = pixel.demultiply();
         data.extend_from_slice(&[pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()]);
      }

      let mut bytes: Vec<u8> = Vec::new();
      match PngEncoder::new(Cursor::new(&mut bytes)).write_image(
         &data,
         width,
         height,
         ColorType::Rgba8,
      ) {
         Ok(()) => (),
         Err(error) => {
            log::error!("error while encoding: {}", error);
            return Err(error.into());
         }
      }
      Ok(bytes)
   }

   /// Encodes the surface to PNG and writes it out to `path`.
   pub fn save_png(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
      let bytes = self.encode_png()?;
      std::fs::write(path, bytes)?;
      Ok(())
   }
}
