use thiserror::Error;

/// Errors reported by the sketching layer.
#[derive(Debug, Error)]
pub enum Error {
   /// A `#`-prefixed color string whose digits or length don't form one of
   /// the supported hex layouts (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`).
   #[error("invalid hex color {0:?}")]
   InvalidHexColor(String),
   /// A color string that isn't hex and doesn't match any known color name.
   #[error("unknown color name {0:?}")]
   UnknownColorName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
