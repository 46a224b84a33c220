//! Colors as the 2D canvas understands them.
//!
//! [`Rgb`] is an 8-bit hue that serializes as `"#rrggbb"`; [`Rgba`] adds a
//! straight (non-premultiplied) alpha and renders to a CSS `rgba(...)` string
//! for `fillStyle`/`strokeStyle`.

use crate::error::BackdropError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Color with straight alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgb {
    /// The teal used for nodes and connections (`#2dd4bf`).
    pub const TEAL: Rgb = Rgb::new(45, 212, 191);

    /// Near-black page background (`#05050a`).
    pub const NIGHT: Rgb = Rgb::new(5, 5, 10);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `"#2dd4bf"` or `"2dd4bf"`, case insensitive.
    pub fn from_hex(hex: &str) -> Result<Rgb, BackdropError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(BackdropError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| BackdropError::InvalidColor(format!("'{hex}': {e}")))
        };
        Ok(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Attaches an alpha, clamped to [0, 1].
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            rgb: self,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

impl Rgba {
    /// CSS color string, e.g. `rgba(45, 212, 191, 0.5)`.
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teal_round_trips_through_hex() {
        assert_eq!(Rgb::TEAL.to_hex(), "#2dd4bf");
        assert_eq!(Rgb::from_hex("#2DD4BF").unwrap(), Rgb::TEAL);
        assert_eq!(Rgb::from_hex("2dd4bf").unwrap(), Rgb::TEAL);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#ééé").is_err());
    }

    #[test]
    fn node_fill_css_matches_canvas_style() {
        assert_eq!(Rgb::TEAL.with_alpha(0.5).to_css(), "rgba(45, 212, 191, 0.5)");
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Rgb::TEAL.with_alpha(1.7).alpha, 1.0);
        assert_eq!(Rgb::TEAL.with_alpha(-0.2).alpha, 0.0);
    }

    #[test]
    fn serde_uses_hex_string() {
        let json = serde_json::to_string(&Rgb::NIGHT).unwrap();
        assert_eq!(json, "\"#05050a\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::NIGHT);
        assert!(serde_json::from_str::<Rgb>("\"nope\"").is_err());
    }
}
