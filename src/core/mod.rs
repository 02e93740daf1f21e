//! Platform-agnostic core module - shared between the browser background and CLI

pub mod config;
pub mod field;
pub mod renderer;
pub mod stats;
pub mod streak;
pub mod surface;

pub use config::{ConfigError, Span, StreakConfig};
pub use field::{FrameReport, StreakField};
pub use renderer::StreakRenderer;
pub use stats::{FpsCounter, FrameStats};
pub use streak::{Edge, SpawnKind, Streak, Vec2, Viewport};
pub use surface::{ColorStop, DrawCommand, DrawSurface, Glow, GradientLine, RecordingSurface};
