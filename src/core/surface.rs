//! Drawing surface abstraction
//!
//! The field emits a small set of primitives per frame. The browser backend
//! maps them onto `CanvasRenderingContext2d`; `RecordingSurface` keeps them
//! in memory for the CLI and tests.

use super::streak::{Vec2, Viewport};
use crate::theme::{Rgb, Rgba};

/// Gradient colour stop, `offset` in [0, 1] along the segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Round-capped line stroked with a linear gradient from `from` to `to`
#[derive(Clone, Debug, PartialEq)]
pub struct GradientLine {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f64,
    pub stops: [ColorStop; 3],
}

/// Filled circle with a blurred halo
#[derive(Clone, Debug, PartialEq)]
pub struct Glow {
    pub center: Vec2,
    pub radius: f64,
    pub fill: Rgba,
    pub blur: f64,
    pub blur_color: Rgb,
}

/// Target of a streak field render
pub trait DrawSurface {
    /// Match the backing buffer to the viewport
    fn resize(&mut self, viewport: Viewport);

    /// Erase the whole surface
    fn clear(&mut self);

    fn stroke_gradient_line(&mut self, line: &GradientLine);

    fn fill_glow(&mut self, glow: &Glow);
}

/// One recorded draw call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Line(GradientLine),
    Glow(Glow),
}

/// In-memory surface: tracks its size and the commands of the latest frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    /// Commands since the last `clear`
    commands: Vec<DrawCommand>,
    /// Total `clear` calls (one per frame)
    clears: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Draw calls of the most recent frame, starting with its `Clear`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clears(&self) -> u64 {
        self.clears
    }
}

impl DrawSurface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) {
        // Canvas dimensions are integral; fractional CSS sizes truncate
        self.width = viewport.width as u32;
        self.height = viewport.height as u32;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.clears += 1;
    }

    fn stroke_gradient_line(&mut self, line: &GradientLine) {
        self.commands.push(DrawCommand::Line(line.clone()));
    }

    fn fill_glow(&mut self, glow: &Glow) {
        self.commands.push(DrawCommand::Glow(glow.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::colors;

    #[test]
    fn test_recording_surface_keeps_latest_frame() {
        let mut surface = RecordingSurface::new();
        surface.resize(Viewport::new(800.5, 600.0));
        assert_eq!((surface.width(), surface.height()), (800, 600));

        let glow = Glow {
            center: Vec2::new(1.0, 2.0),
            radius: 3.0,
            fill: colors::HEAD.with_alpha(0.5),
            blur: 10.0,
            blur_color: colors::ACCENT,
        };

        surface.clear();
        surface.fill_glow(&glow);
        surface.fill_glow(&glow);
        assert_eq!(surface.commands().len(), 3);

        surface.clear();
        surface.fill_glow(&glow);
        assert_eq!(surface.commands(), &[DrawCommand::Clear, DrawCommand::Glow(glow)]);
        assert_eq!(surface.clears(), 2);
    }
}
