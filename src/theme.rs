//! Streak palette - white heads fading into an emerald accent

use serde::{Deserialize, Serialize};

/// Plain 8-bit RGB triple, serialized as `[r, g, b]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha channel
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            rgb: self,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// RGB colour with a floating alpha in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    /// CSS colour string, e.g. `rgba(16, 185, 129, 0.5)`
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

pub mod colors {
    use super::Rgb;

    // === Streaks ===
    pub const HEAD: Rgb = Rgb::new(255, 255, 255);   // #FFFFFF - head and glow core
    pub const ACCENT: Rgb = Rgb::new(16, 185, 129);  // #10B981 - emerald tail / halo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_formatting() {
        assert_eq!(colors::ACCENT.with_alpha(0.5).to_css(), "rgba(16, 185, 129, 0.5)");
        assert_eq!(colors::HEAD.with_alpha(0.0).to_css(), "rgba(255, 255, 255, 0)");
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(colors::HEAD.with_alpha(1.7).alpha, 1.0);
        assert_eq!(colors::HEAD.with_alpha(-0.2).alpha, 0.0);
    }

    #[test]
    fn test_rgb_json_is_array() {
        let json = serde_json::to_string(&colors::ACCENT).unwrap();
        assert_eq!(json, "[16,185,129]");
        let back: Rgb = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(back, Rgb::new(1, 2, 3));
    }
}
