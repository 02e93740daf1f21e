//! Fixed-size streak pool
//!
//! The pool is sized once from the config and never grows or shrinks: a
//! streak that leaves the screen is overwritten in place by a fresh
//! edge-spawned one.

use rand::Rng;
use tracing::{debug, trace};

use super::config::StreakConfig;
use super::streak::{SpawnKind, Streak, Viewport};
use super::surface::{ColorStop, DrawSurface, Glow, GradientLine};
use crate::theme::colors;

/// Gradient offset where the white head gives way to the accent colour
const HEAD_STOP: f64 = 0.1;
/// Glow radius relative to stroke thickness
const GLOW_SCALE: f64 = 1.5;

/// What happened during one frame
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Pool indices replaced this frame, in pool order
    pub recycled: Vec<usize>,
}

/// Pool of streaks plus the random source used to respawn them
pub struct StreakField<R> {
    streaks: Vec<Streak>,
    viewport: Viewport,
    config: StreakConfig,
    rng: R,
}

impl<R: Rng> StreakField<R> {
    /// Populate `config.particle_count` streaks with the interior distribution
    pub fn new(config: StreakConfig, viewport: Viewport, mut rng: R) -> Self {
        let streaks = (0..config.particle_count)
            .map(|_| Streak::spawn(&mut rng, &config, SpawnKind::Interior, viewport))
            .collect();
        debug!(
            count = config.particle_count,
            width = viewport.width,
            height = viewport.height,
            "Streak field populated"
        );
        Self {
            streaks,
            viewport,
            config,
            rng,
        }
    }

    /// Build a field around an existing pool
    pub fn with_streaks(
        streaks: Vec<Streak>,
        config: StreakConfig,
        viewport: Viewport,
        rng: R,
    ) -> Self {
        Self {
            streaks,
            viewport,
            config,
            rng,
        }
    }

    /// Render one frame to `surface`, then advance and recycle every streak.
    pub fn frame<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> FrameReport {
        let mut report = FrameReport::default();
        surface.clear();

        for idx in 0..self.streaks.len() {
            let streak = &mut self.streaks[idx];
            surface.stroke_gradient_line(&gradient_line(streak, &self.config));
            surface.fill_glow(&head_glow(streak, &self.config));

            streak.advance();

            if streak.has_exited(self.viewport, self.config.exit_margin) {
                *streak = Streak::spawn(&mut self.rng, &self.config, SpawnKind::Edge, self.viewport);
                report.recycled.push(idx);
            }
        }

        if !report.recycled.is_empty() {
            trace!(recycled = ?report.recycled, "Streaks recycled");
        }
        report
    }

    /// Change the viewport. In-flight positions are left untouched; the new
    /// size only affects exit checks and future spawns.
    pub fn resize(&mut self, viewport: Viewport) {
        debug!(width = viewport.width, height = viewport.height, "Streak field resized");
        self.viewport = viewport;
    }
}

impl<R> StreakField<R> {
    pub fn streaks(&self) -> &[Streak] {
        &self.streaks
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &StreakConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.streaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streaks.is_empty()
    }
}

/// White head fading into the accent colour, then out to transparent
fn gradient_line(streak: &Streak, config: &StreakConfig) -> GradientLine {
    let alpha = streak.opacity();
    GradientLine {
        from: streak.position,
        to: streak.tail(),
        width: streak.thickness(),
        stops: [
            ColorStop {
                offset: 0.0,
                color: colors::HEAD.with_alpha(alpha),
            },
            ColorStop {
                offset: HEAD_STOP,
                color: config.accent_color.with_alpha(alpha),
            },
            ColorStop {
                offset: 1.0,
                color: config.accent_color.with_alpha(0.0),
            },
        ],
    }
}

fn head_glow(streak: &Streak, config: &StreakConfig) -> Glow {
    Glow {
        center: streak.position,
        radius: streak.thickness() * GLOW_SCALE,
        fill: colors::HEAD.with_alpha(streak.opacity()),
        blur: config.glow_blur,
        blur_color: config.accent_color,
    }
}
