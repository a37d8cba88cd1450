//! The `Rgb` color type and its conversions.
//!
//! The core works with a single 8-bit-per-channel RGB representation.
//! Hex rendering ("#rrggbb") exists only at the serde boundary for
//! human-readable parameter objects; nothing in the core keeps a
//! precomputed display string alongside the channel values.

use crate::error::FractalError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque RGB color with 8-bit channels.
///
/// Serializes as a hex string `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Constructs a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `FractalError::InvalidColor` if the input is not a 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Rgb, FractalError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(FractalError::InvalidColor(format!(
                "expected 6 hex digits, got {}",
                hex.len()
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| FractalError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| FractalError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| FractalError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Rgb { r, g, b })
    }

    /// Formats the color as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear per-channel interpolation toward `other`.
    ///
    /// `t` is clamped to [0, 1] (NaN treated as 0). Exact at both endpoints:
    /// `lerp(o, 0.0) == self` and `lerp(o, 1.0) == o`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let channel = |a: u8, b: u8| -> u8 {
            let v = f64::from(a) + t * (f64::from(b) - f64::from(a));
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
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

    // -- Hex parsing tests --

    #[test]
    fn from_hex_parses_red_with_hash() {
        assert_eq!(Rgb::from_hex("#ff0000").unwrap(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn from_hex_parses_green_without_hash() {
        assert_eq!(Rgb::from_hex("00ff00").unwrap(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        assert_eq!(
            Rgb::from_hex("#FF00AA").unwrap(),
            Rgb::from_hex("#ff00aa").unwrap()
        );
    }

    #[test]
    fn from_hex_returns_error_for_invalid_hex() {
        assert!(Rgb::from_hex("#gggggg").is_err());
        assert!(Rgb::from_hex("#fff").is_err()); // too short
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#ff00ff00").is_err()); // too long
    }

    #[test]
    fn from_hex_to_hex_round_trip() {
        let original = "#c0ffee";
        assert_eq!(Rgb::from_hex(original).unwrap().to_hex(), original);
    }

    #[test]
    fn to_hex_known_colors() {
        assert_eq!(Rgb::new(255, 0, 0).to_hex(), "#ff0000");
        assert_eq!(Rgb::WHITE.to_hex(), "#ffffff");
        assert_eq!(Rgb::BLACK.to_hex(), "#000000");
        assert_eq!(Rgb::new(0x80, 0x40, 0x20).to_hex(), "#804020");
    }

    // -- Interpolation tests --

    #[test]
    fn lerp_is_exact_at_endpoints() {
        let a = Rgb::new(10, 200, 35);
        let b = Rgb::new(250, 3, 90);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn lerp_midpoint_rounds_per_channel() {
        let a = Rgb::new(0, 0, 100);
        let b = Rgb::new(200, 255, 0);
        let mid = a.lerp(b, 0.5);
        assert_eq!(mid, Rgb::new(100, 128, 50));
    }

    #[test]
    fn lerp_clamps_t_out_of_range() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(40, 50, 60);
        assert_eq!(a.lerp(b, -1.5), a);
        assert_eq!(a.lerp(b, 2.5), b);
    }

    #[test]
    fn lerp_treats_nan_as_start() {
        let a = Rgb::new(1, 2, 3);
        let b = Rgb::new(200, 200, 200);
        assert_eq!(a.lerp(b, f64::NAN), a);
    }

    // -- Serde tests --

    #[test]
    fn rgb_serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#ff0000\"");
    }

    #[test]
    fn rgb_deserializes_from_hex_string() {
        let green: Rgb = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(green, Rgb::new(0, 255, 0));
    }

    #[test]
    fn rgb_deserialize_rejects_invalid_hex() {
        let result: Result<Rgb, _> = serde_json::from_str("\"not-a-color\"");
        assert!(result.is_err());
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hex_round_trip_is_lossless(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
                let original = Rgb { r, g, b };
                let parsed = Rgb::from_hex(&original.to_hex()).unwrap();
                prop_assert_eq!(parsed, original);
            }

            #[test]
            fn lerp_stays_between_channel_bounds(
                r0 in 0u8..=255, g0 in 0u8..=255, b0 in 0u8..=255,
                r1 in 0u8..=255, g1 in 0u8..=255, b1 in 0u8..=255,
                t in 0.0f64..=1.0,
            ) {
                let a = Rgb::new(r0, g0, b0);
                let b = Rgb::new(r1, g1, b1);
                let c = a.lerp(b, t);
                prop_assert!(c.r >= a.r.min(b.r) && c.r <= a.r.max(b.r));
                prop_assert!(c.g >= a.g.min(b.g) && c.g <= a.g.max(b.g));
                prop_assert!(c.b >= a.b.min(b.b) && c.b <= a.b.max(b.b));
            }
        }
    }
}
