//! Color model: RGB values, hex derivation, captured samples.

use serde::{Deserialize, Serialize};

/// RGB color value read from the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create color from hex string (e.g., "#FF0000" or "FF0000").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self { r, g, b })
    }

    /// Convert to uppercase hex string (e.g., "#FF8000").
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// One accepted click: screen coordinates and the color sampled there.
///
/// Immutable once created; a later accepted click replaces the whole
/// sample (last-write-wins, no history kept).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSample {
    pub x: i32,
    pub y: i32,
    pub rgb: Rgb,
}

impl ColorSample {
    pub fn new(x: i32, y: i32, rgb: Rgb) -> Self {
        Self { x, y, rgb }
    }

    /// Uppercase `#RRGGBB` for display.
    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }
}

/// Screen-space rectangle whose clicks are never treated as samples.
///
/// The frontend reports the Pause control's bounds in screen coordinates
/// so that clicking "Pause" does not itself get sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionZone {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ExclusionZone {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Whether the point falls within the zone (edges inclusive).
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && x <= self.x + self.width as i32
            && y >= self.y
            && y <= self.y + self.height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex() {
        let color = Rgb::from_hex("#FF0000").unwrap();
        assert_eq!(color.r, 255);
        assert_eq!(color.g, 0);
        assert_eq!(color.b, 0);

        let color = Rgb::from_hex("00FF00").unwrap();
        assert_eq!(color.r, 0);
        assert_eq!(color.g, 255);
        assert_eq!(color.b, 0);

        assert!(Rgb::from_hex("#FFF").is_none());
        assert!(Rgb::from_hex("#GGGGGG").is_none());
    }

    #[test]
    fn test_rgb_to_hex_uppercase_padded() {
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "#000000");
        assert_eq!(Rgb::new(255, 255, 255).to_hex(), "#FFFFFF");
        assert_eq!(Rgb::new(18, 52, 86).to_hex(), "#123456");
        assert_eq!(Rgb::new(255, 128, 0).to_hex(), "#FF8000");
        assert_eq!(Rgb::new(1, 2, 3).to_hex(), "#010203");
    }

    #[test]
    fn test_sample_hex() {
        let sample = ColorSample::new(10, 20, Rgb::new(34, 111, 201));
        assert_eq!(sample.hex(), "#226FC9");
    }

    #[test]
    fn test_exclusion_zone_contains() {
        let zone = ExclusionZone::new(100, 50, 80, 30);
        assert!(zone.contains(100, 50));
        assert!(zone.contains(180, 80));
        assert!(zone.contains(140, 65));
        assert!(!zone.contains(99, 65));
        assert!(!zone.contains(181, 65));
        assert!(!zone.contains(140, 49));
        assert!(!zone.contains(140, 81));
    }
}
