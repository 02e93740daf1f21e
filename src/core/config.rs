//! Streak field tunables
//!
//! Every field has a default matching the stock meteor-shower look, so an
//! empty JSON object `{}` is a valid configuration.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::theme::{colors, Rgb};

/// Default number of streaks in the pool
pub const DEFAULT_PARTICLE_COUNT: usize = 20;

/// Distance past the left/bottom viewport edge at which a streak is recycled
pub const DEFAULT_EXIT_MARGIN: f64 = 200.0;

/// Shadow blur (px) of the accent halo around each head
pub const DEFAULT_GLOW_BLUR: f64 = 10.0;

/// Half-open sampling range `[min, max)`, serialized as `[min, max]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Uniform sample from `[min, max)`. A degenerate, NaN or unbounded
    /// span yields `min`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if !(self.min < self.max) || !(self.max - self.min).is_finite() {
            return self.min;
        }
        rng.gen_range(self.min..self.max)
    }

    /// Half-open membership test
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

impl From<[f64; 2]> for Span {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<Span> for [f64; 2] {
    fn from(s: Span) -> Self {
        [s.min, s.max]
    }
}

/// Configuration of a streak field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreakConfig {
    /// Fixed pool size
    pub particle_count: usize,
    /// Pixels per frame
    pub speed_range: Span,
    /// Tail extent in pixels along each axis
    pub length_range: Span,
    /// Stroke width in pixels
    pub thickness_range: Span,
    /// Alpha of the stroke and the head glow
    pub opacity_range: Span,
    pub accent_color: Rgb,
    pub exit_margin: f64,
    pub glow_blur: f64,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            speed_range: Span::new(2.0, 5.0),
            length_range: Span::new(100.0, 180.0),
            thickness_range: Span::new(1.0, 2.5),
            opacity_range: Span::new(0.4, 0.8),
            accent_color: colors::ACCENT,
            exit_margin: DEFAULT_EXIT_MARGIN,
            glow_blur: DEFAULT_GLOW_BLUR,
        }
    }
}

/// Reasons a configuration is rejected
#[derive(Debug)]
pub enum ConfigError {
    /// Malformed JSON or wrong field types
    Parse(serde_json::Error),
    /// Pool must hold at least one streak
    EmptyPool,
    /// A range has a non-finite bound or `min > max`
    BadRange { field: &'static str, span: Span },
    /// A range allows values outside what the field can represent
    OutOfDomain { field: &'static str, span: Span },
    /// A scalar is negative or non-finite
    BadScalar { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {}", e),
            ConfigError::EmptyPool => write!(f, "particleCount must be greater than 0"),
            ConfigError::BadRange { field, span } => {
                write!(f, "{} [{}, {}] is not a valid range", field, span.min, span.max)
            }
            ConfigError::OutOfDomain { field, span } => {
                write!(f, "{} [{}, {}] is out of bounds", field, span.min, span.max)
            }
            ConfigError::BadScalar { field, value } => {
                write!(f, "{} must be a finite non-negative number, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl StreakConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: StreakConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyPool);
        }

        let ranges = [
            ("speedRange", self.speed_range),
            ("lengthRange", self.length_range),
            ("thicknessRange", self.thickness_range),
            ("opacityRange", self.opacity_range),
        ];
        for (field, span) in ranges {
            if !span.min.is_finite() || !span.max.is_finite() || span.min > span.max {
                return Err(ConfigError::BadRange { field, span });
            }
        }

        // Streaks must move and be visible
        for &(field, span) in &ranges[..3] {
            if span.min <= 0.0 {
                return Err(ConfigError::OutOfDomain { field, span });
            }
        }
        if self.opacity_range.min < 0.0 || self.opacity_range.max > 1.0 {
            return Err(ConfigError::OutOfDomain {
                field: "opacityRange",
                span: self.opacity_range,
            });
        }

        for (field, value) in [("exitMargin", self.exit_margin), ("glowBlur", self.glow_blur)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::BadScalar { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_is_valid() {
        let config = StreakConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count, 20);
        assert_eq!(config.accent_color, Rgb::new(16, 185, 129));
    }

    #[test]
    fn test_empty_json_yields_defaults() {
        let config = StreakConfig::from_json("{}").unwrap();
        assert_eq!(config, StreakConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config =
            StreakConfig::from_json(r#"{"particleCount": 5, "speedRange": [1.0, 1.5]}"#).unwrap();
        assert_eq!(config.particle_count, 5);
        assert_eq!(config.speed_range, Span::new(1.0, 1.5));
        assert_eq!(config.length_range, Span::new(100.0, 180.0));
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(
            StreakConfig::from_json(r#"{"particleCount": 0}"#),
            Err(ConfigError::EmptyPool)
        ));
        assert!(matches!(
            StreakConfig::from_json(r#"{"lengthRange": [180.0, 100.0]}"#),
            Err(ConfigError::BadRange { field: "lengthRange", .. })
        ));
        assert!(matches!(
            StreakConfig::from_json(r#"{"speedRange": [0.0, 3.0]}"#),
            Err(ConfigError::OutOfDomain { field: "speedRange", .. })
        ));
        assert!(matches!(
            StreakConfig::from_json(r#"{"opacityRange": [0.5, 1.5]}"#),
            Err(ConfigError::OutOfDomain { field: "opacityRange", .. })
        ));
        assert!(matches!(
            StreakConfig::from_json(r#"{"exitMargin": -1.0}"#),
            Err(ConfigError::BadScalar { field: "exitMargin", .. })
        ));
        assert!(matches!(
            StreakConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_span_sample_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let span = Span::new(2.0, 5.0);
        for _ in 0..1000 {
            assert!(span.contains(span.sample(&mut rng)));
        }
        // Degenerate span is a constant
        assert_eq!(Span::new(3.0, 3.0).sample(&mut rng), 3.0);
    }

    #[test]
    fn test_span_sample_non_finite_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(8);
        assert!(Span::new(f64::NAN, 5.0).sample(&mut rng).is_nan());
        assert_eq!(Span::new(2.0, f64::NAN).sample(&mut rng), 2.0);
        assert_eq!(Span::new(0.0, f64::INFINITY).sample(&mut rng), 0.0);
        // Finite bounds whose width overflows
        assert_eq!(Span::new(-1e308, 1.5 * 1e308).sample(&mut rng), -1e308);
    }

    #[test]
    fn test_rejects_nan_range() {
        let config = StreakConfig {
            speed_range: Span::new(f64::NAN, 5.0),
            ..StreakConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadRange { field: "speedRange", .. })
        ));
    }
}
