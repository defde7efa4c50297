//! Sketch configuration.
//!
//! ## Note for adding new keys
//!
//! New keys added to the config _must_ use `#[serde(default)]` to maintain compatibility with
//! older configs. These keys will be added to the user's configuration automatically.

use std::path::Path;

use serde::{Deserialize, Serialize};

fn default_title() -> String {
   "quickdraw sketch".to_owned()
}

/// Window settings. The library doesn't open windows itself; the host
/// application reads these when it creates the rendering surface.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WindowConfig {
   pub width: u32,
   pub height: u32,
   #[serde(default = "default_title")]
   pub title: String,
}

impl Default for WindowConfig {
   fn default() -> Self {
      Self {
         width: 640,
         height: 480,
         title: default_title(),
      }
   }
}

/// An optional canvas, created by the runner before the first frame.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct CanvasConfig {
   pub width: i32,
   pub height: i32,
}

/// A sketch's `sketch.toml` file.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SketchConfig {
   #[serde(default)]
   pub window: WindowConfig,
   #[serde(default)]
   pub canvas: Option<CanvasConfig>,
}

impl SketchConfig {
   /// Loads the config file at `path`.
   ///
   /// If the file doesn't exist, it's created with values inherited from
   /// `SketchConfig::default`.
   pub fn load_or_create(path: &Path) -> anyhow::Result<Self> {
      if !path.is_file() {
         let config = Self::default();
         config.save(path)?;
         Ok(config)
      } else {
         let file = std::fs::read_to_string(path)?;
         let config: Self = match toml::from_str(&file) {
            Ok(config) => config,
            Err(error) => {
               log::error!("error while deserializing config file: {}", error);
               log::error!("falling back to default config");
               return Ok(Self::default());
            }
         };
         // Preemptively save the config to the disk if any new keys have been added.
         config.save(path)?;
         Ok(config)
      }
   }

   /// Saves the configuration to `path`.
   pub fn save(&self, path: &Path) -> anyhow::Result<()> {
      if let Some(parent) = path.parent() {
         std::fs::create_dir_all(parent)?;
      }
      std::fs::write(path, toml::to_string(self)?)?;
      Ok(())
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn missing_file_is_created_with_defaults() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("sketch.toml");
      let config = SketchConfig::load_or_create(&path).unwrap();
      assert!(path.is_file());
      assert_eq!(config.window.width, 640);
      assert_eq!(config.window.height, 480);
      assert!(config.canvas.is_none());
   }

   #[test]
   fn round_trips() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("sketch.toml");
      let mut config = SketchConfig::default();
      config.window.title = "orbits".to_owned();
      config.canvas = Some(CanvasConfig {
         width: 400,
         height: 300,
      });
      config.save(&path).unwrap();
      let loaded = SketchConfig::load_or_create(&path).unwrap();
      assert_eq!(loaded.window.title, "orbits");
      assert_eq!(loaded.canvas.unwrap().width, 400);
   }

   #[test]
   fn unparsable_files_fall_back_to_defaults() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("sketch.toml");
      std::fs::write(&path, "[window\nwidth = what").unwrap();
      let config = SketchConfig::load_or_create(&path).unwrap();
      assert_eq!(config.window.width, 640);
   }

   #[test]
   fn missing_keys_inherit_defaults() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("sketch.toml");
      std::fs::write(&path, "[window]\nwidth = 800\nheight = 600").unwrap();
      let config = SketchConfig::load_or_create(&path).unwrap();
      assert_eq!(config.window.width, 800);
      assert_eq!(config.window.title, "quickdraw sketch");
   }
}
