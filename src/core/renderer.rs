//! Streak field renderer - binds a field to a drawing surface
//!
//! Platform front-ends own the scheduling (animation frames in the browser,
//! a tokio interval natively) and call `frame()` / `resize()` from it.

use rand::Rng;
use tracing::{debug, info, warn};

use super::config::StreakConfig;
use super::field::{FrameReport, StreakField};
use super::stats::{FpsCounter, FrameStats};
use super::streak::Viewport;
use super::surface::DrawSurface;

pub struct StreakRenderer<S, R> {
    field: StreakField<R>,
    surface: S,
    stats: FrameStats,
    fps: FpsCounter,
}

impl<S: DrawSurface, R: Rng> StreakRenderer<S, R> {
    /// Size the surface and populate the pool.
    ///
    /// Returns None when no surface could be acquired: the effect is then
    /// simply absent.
    pub fn mount(
        surface: Option<S>,
        viewport: Viewport,
        config: StreakConfig,
        rng: R,
    ) -> Option<Self> {
        let Some(mut surface) = surface else {
            warn!("No 2D drawing surface available, streak field disabled");
            return None;
        };

        surface.resize(viewport);
        let field = StreakField::new(config, viewport, rng);
        info!(
            streaks = field.len(),
            width = viewport.width,
            height = viewport.height,
            "Streak renderer mounted"
        );

        Some(Self {
            field,
            surface,
            stats: FrameStats::default(),
            fps: FpsCounter::new(),
        })
    }

    /// Draw and advance one frame
    pub fn frame(&mut self) -> FrameReport {
        let report = self.field.frame(&mut self.surface);
        self.stats.frames += 1;
        self.stats.recycled += report.recycled.len() as u64;
        self.fps.tick();
        report
    }

    /// Apply new viewport dimensions to the surface. Called on every resize
    /// event, without debouncing.
    pub fn resize(&mut self, viewport: Viewport) {
        debug!(width = viewport.width, height = viewport.height, "Viewport resized");
        self.surface.resize(viewport);
        self.field.resize(viewport);
        self.stats.resizes += 1;
    }
}

impl<S, R> StreakRenderer<S, R> {
    pub fn field(&self) -> &StreakField<R> {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn fps(&self) -> f64 {
        self.fps.fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::streak::Vec2;
    use crate::core::surface::RecordingSurface;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mount(view: Viewport) -> StreakRenderer<RecordingSurface, StdRng> {
        StreakRenderer::mount(
            Some(RecordingSurface::new()),
            view,
            StreakConfig::default(),
            StdRng::seed_from_u64(99),
        )
        .expect("surface provided")
    }

    #[test]
    fn test_missing_surface_is_noop() {
        let renderer: Option<StreakRenderer<RecordingSurface, StdRng>> = StreakRenderer::mount(
            None,
            Viewport::new(1920.0, 1080.0),
            StreakConfig::default(),
            StdRng::seed_from_u64(0),
        );
        assert!(renderer.is_none());
    }

    #[test]
    fn test_mount_sizes_surface_and_populates() {
        let renderer = mount(Viewport::new(1920.0, 1080.0));
        assert_eq!(renderer.surface().width(), 1920);
        assert_eq!(renderer.surface().height(), 1080);
        assert_eq!(renderer.field().len(), 20);
        // Nothing drawn before the first frame
        assert_eq!(renderer.surface().clears(), 0);
    }

    #[test]
    fn test_frames_draw_full_pool() {
        let mut renderer = mount(Viewport::new(1280.0, 720.0));
        for _ in 0..10 {
            renderer.frame();
        }
        // Clear + (line, glow) per streak
        assert_eq!(renderer.surface().commands().len(), 1 + 2 * 20);
        assert_eq!(renderer.surface().clears(), 10);
        assert_eq!(renderer.stats().frames, 10);
    }

    #[test]
    fn test_resize_propagates_to_surface_only() {
        let mut renderer = mount(Viewport::new(1920.0, 1080.0));
        renderer.frame();
        let before: Vec<Vec2> = renderer.field().streaks().iter().map(|s| s.position).collect();

        renderer.resize(Viewport::new(1024.0, 768.0));
        renderer.resize(Viewport::new(390.0, 844.0));

        assert_eq!(renderer.surface().width(), 390);
        assert_eq!(renderer.surface().height(), 844);
        assert_eq!(renderer.field().viewport(), Viewport::new(390.0, 844.0));
        let after: Vec<Vec2> = renderer.field().streaks().iter().map(|s| s.position).collect();
        assert_eq!(before, after);
        assert_eq!(renderer.stats().resizes, 2);
    }

    #[test]
    fn test_stats_count_recycles() {
        let mut renderer = mount(Viewport::new(640.0, 480.0));
        let mut recycled = 0;
        for _ in 0..1000 {
            recycled += renderer.frame().recycled.len() as u64;
        }
        assert_eq!(renderer.stats().recycled, recycled);
        assert!(recycled > 0);
    }
}
