//! Streak particle record and spawn distributions
//!
//! - Vec2 / Viewport: plain geometry
//! - Streak: one meteor (position + fixed visual parameters)
//! - SpawnKind: interior (initial fill) vs edge (recycle) placement

use rand::Rng;
use serde::Serialize;

use super::config::{Span, StreakConfig};

/// Top-edge spawns land this far above the viewport: y in [-200, -100)
const TOP_SPAWN_Y: Span = Span::new(-200.0, -100.0);
/// Right-edge spawns land this far past the right edge: x in [W+100, W+200)
const RIGHT_SPAWN_OFFSET: Span = Span::new(100.0, 200.0);

// ============================================================================
// Geometry
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Drawing surface dimensions in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and positive
    pub fn is_valid(&self) -> bool {
        [self.width, self.height]
            .iter()
            .all(|d| d.is_finite() && *d > 0.0)
    }
}

// ============================================================================
// Spawn distributions
// ============================================================================

/// Placement strategy for a new streak
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnKind {
    /// Initial population: anywhere on or around the screen so the first
    /// frame is already full.
    Interior,
    /// Recycling: just outside the top or right edge.
    Edge,
}

/// Which edge an edge-spawned streak entered from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
}

impl Edge {
    /// Position bounds of this edge for the given viewport, as (x, y) spans
    pub fn bounds(self, viewport: Viewport) -> (Span, Span) {
        let Viewport { width: w, height: h } = viewport;
        match self {
            Edge::Top => (Span::new(0.0, 1.5 * w), TOP_SPAWN_Y),
            Edge::Right => (
                Span::new(w + RIGHT_SPAWN_OFFSET.min, w + RIGHT_SPAWN_OFFSET.max),
                Span::new(-0.2 * h, h),
            ),
        }
    }

    /// Edge whose spawn region contains `p`, if any
    pub fn containing(p: Vec2, viewport: Viewport) -> Option<Edge> {
        [Edge::Top, Edge::Right].into_iter().find(|edge| {
            let (xs, ys) = edge.bounds(viewport);
            xs.contains(p.x) && ys.contains(p.y)
        })
    }
}

/// Interior spawn bounds, as (x, y) spans
pub fn interior_bounds(viewport: Viewport) -> (Span, Span) {
    let Viewport { width: w, height: h } = viewport;
    (Span::new(-0.2 * w, 1.3 * w), Span::new(-0.5 * h, h))
}

/// Pick a spawn position
pub fn spawn_position<R: Rng>(rng: &mut R, kind: SpawnKind, viewport: Viewport) -> Vec2 {
    let (xs, ys) = match kind {
        SpawnKind::Interior => interior_bounds(viewport),
        SpawnKind::Edge => {
            let edge = if rng.gen_bool(0.5) { Edge::Top } else { Edge::Right };
            edge.bounds(viewport)
        }
    };
    Vec2::new(xs.sample(rng), ys.sample(rng))
}

// ============================================================================
// Streak
// ============================================================================

/// One meteor. Only `position` changes after creation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Streak {
    pub position: Vec2,
    /// Pixels per frame along each axis
    speed: f64,
    length: f64,
    thickness: f64,
    opacity: f64,
}

impl Streak {
    pub fn new(position: Vec2, speed: f64, length: f64, thickness: f64, opacity: f64) -> Self {
        Self {
            position,
            speed,
            length,
            thickness,
            opacity,
        }
    }

    /// Create a streak with parameters drawn from `config`
    pub fn spawn<R: Rng>(
        rng: &mut R,
        config: &StreakConfig,
        kind: SpawnKind,
        viewport: Viewport,
    ) -> Self {
        let position = spawn_position(rng, kind, viewport);
        Self {
            position,
            speed: config.speed_range.sample(rng),
            length: config.length_range.sample(rng),
            thickness: config.thickness_range.sample(rng),
            opacity: config.opacity_range.sample(rng),
        }
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    #[inline]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Tail end: up and to the right of the head
    #[inline]
    pub fn tail(&self) -> Vec2 {
        Vec2::new(self.position.x + self.length, self.position.y - self.length)
    }

    /// Move one frame: left and down by `speed`
    #[inline]
    pub fn advance(&mut self) {
        self.position.x -= self.speed;
        self.position.y += self.speed;
    }

    /// Past the left edge or below the bottom edge by more than `margin`
    #[inline]
    pub fn has_exited(&self, viewport: Viewport, margin: f64) -> bool {
        self.position.x < -margin || self.position.y > viewport.height + margin
    }
}
