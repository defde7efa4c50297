//! Color parsing and color-mode interpretation.
//!
//! Sketches specify colors as channel triples interpreted under the current
//! color mode and its per-channel maxima, or as strings (hex codes and a
//! subset of the CSS named colors). Internally everything becomes a
//! straight-alpha RGBA [`Color`].

use quickdraw_renderer::Color;

use crate::error::{Error, Result};

/// The color names sketches commonly reach for. Values are 24-bit RGB.
static NAMED_COLORS: phf::Map<&'static str, u32> = phf::phf_map! {
   "steelblue" => 0x4682b4,
   "red" => 0xff0000,
   "green" => 0x008000,
   "blue" => 0x0000ff,
   "white" => 0xffffff,
   "black" => 0x000000,
   "gray" => 0x808080,
   "grey" => 0x808080,
   "yellow" => 0xffff00,
   "orange" => 0xffa500,
   "purple" => 0x800080,
   "pink" => 0xffc0cb,
};

/// How channel triples passed to fill/stroke/background are interpreted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColorMode {
   Rgb,
   Hsb,
   Hsl,
}

/// The maxima channel inputs are scaled by, settable per sketch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelMaxes {
   pub v1: f32,
   pub v2: f32,
   pub v3: f32,
   pub alpha: f32,
}

impl ChannelMaxes {
   /// The conventional maxima for a mode: 255 across the board for RGB,
   /// 360/100/100/100 for the hue-based modes.
   pub fn for_mode(mode: ColorMode) -> Self {
      match mode {
         ColorMode::Rgb => Self {
            v1: 255.0,
            v2: 255.0,
            v3: 255.0,
            alpha: 255.0,
         },
         ColorMode::Hsb | ColorMode::Hsl => Self {
            v1: 360.0,
            v2: 100.0,
            v3: 100.0,
            alpha: 100.0,
         },
      }
   }
}

impl Default for ChannelMaxes {
   fn default() -> Self {
      Self::for_mode(ColorMode::Rgb)
   }
}

/// Interprets a channel triple + alpha under the given mode and maxima.
pub(crate) fn channels_to_color(
   mode: ColorMode,
   maxes: ChannelMaxes,
   v1: f32,
   v2: f32,
   v3: f32,
   alpha: f32,
) -> Color {
   let alpha = (alpha / maxes.alpha).clamp(0.0, 1.0);
   match mode {
      ColorMode::Rgb => Color::rgba(
         (v1 / maxes.v1).clamp(0.0, 1.0),
         (v2 / maxes.v2).clamp(0.0, 1.0),
         (v3 / maxes.v3).clamp(0.0, 1.0),
         alpha,
      ),
      ColorMode::Hsb => {
         let (h, s, b) = normalized_hue_channels(maxes, v1, v2, v3);
         hsb_to_rgb(h, s, b, alpha)
      }
      ColorMode::Hsl => {
         let (h, s, l) = normalized_hue_channels(maxes, v1, v2, v3);
         hsl_to_rgb(h, s, l, alpha)
      }
   }
}

fn normalized_hue_channels(maxes: ChannelMaxes, v1: f32, v2: f32, v3: f32) -> (f32, f32, f32) {
   // Hue wraps around its range instead of clamping.
   let h = (v1 / maxes.v1).rem_euclid(1.0);
   let s = (v2 / maxes.v2).clamp(0.0, 1.0);
   let v = (v3 / maxes.v3).clamp(0.0, 1.0);
   (h, s, v)
}

/// Hue/saturation/brightness, all in 0..=1, to RGBA.
fn hsb_to_rgb(h: f32, s: f32, b: f32, alpha: f32) -> Color {
   let sector = h * 6.0;
   let i = sector.floor();
   let f = sector - i;
   let p = b * (1.0 - s);
   let q = b * (1.0 - s * f);
   let t = b * (1.0 - s * (1.0 - f));
   let (r, g, bl) = match (i as i32).rem_euclid(6) {
      0 => (b, t, p),
      1 => (q, b, p),
      2 => (p, b, t),
      3 => (p, q, b),
      4 => (t, p, b),
      _ => (b, p, q),
   };
   Color::rgba(r, g, bl, alpha)
}

/// Hue/saturation/lightness, all in 0..=1, to RGBA.
fn hsl_to_rgb(h: f32, s: f32, l: f32, alpha: f32) -> Color {
   let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
   let sector = h * 6.0;
   let x = c * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
   let m = l - c / 2.0;
   let (r, g, b) = match (sector.floor() as i32).rem_euclid(6) {
      0 => (c, x, 0.0),
      1 => (x, c, 0.0),
      2 => (0.0, c, x),
      3 => (0.0, x, c),
      4 => (x, 0.0, c),
      _ => (c, 0.0, x),
   };
   Color::rgba(r + m, g + m, b + m, alpha)
}

/// Parses a color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, or a named
/// color (case-insensitive).
pub fn parse_color(string: &str) -> Result<Color> {
   if string.starts_with('#') {
      parse_hex_color(string)
   } else {
      let name = string.to_ascii_lowercase();
      match NAMED_COLORS.get(name.as_str()) {
         Some(&rgb) => Ok(from_rgb_u32(rgb)),
         None => Err(Error::UnknownColorName(string.to_owned())),
      }
   }
}

fn from_rgb_u32(rgb: u32) -> Color {
   Color::from_rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

fn parse_hex_color(string: &str) -> Result<Color> {
   let error = || Error::InvalidHexColor(string.to_owned());

   let digits: Vec<u8> = string[1..]
      .bytes()
      .map(|byte| match byte {
         b'0'..=b'9' => Ok(byte - b'0'),
         b'a'..=b'f' => Ok(byte - b'a' + 10),
         b'A'..=b'F' => Ok(byte - b'A' + 10),
         _ => Err(error()),
      })
      .collect::<Result<_>>()?;

   // Shorthand digits duplicate into both nibbles, #abc == #aabbcc.
   let wide = |digit: u8| digit * 16 + digit;
   let (r, g, b, a) = match digits[..] {
      [r, g, b] => (wide(r), wide(g), wide(b), 255),
      [r, g, b, a] => (wide(r), wide(g), wide(b), wide(a)),
      [r1, r0, g1, g0, b1, b0] => (r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, 255),
      [r1, r0, g1, g0, b1, b0, a1, a0] => {
         (r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, a1 * 16 + a0)
      }
      _ => return Err(error()),
   };
   Ok(Color::from_rgba8(r, g, b, a))
}
