//! Frame counters for the periodic stats log

use crate::time::now_seconds;

/// Rolling frames-per-second over the last 60 frames
pub struct FpsCounter {
    frames: Vec<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(61),
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(now_seconds());
    }

    /// Record a frame at `now` (seconds)
    pub fn tick_at(&mut self, now: f64) {
        self.frames.push(now);
        if self.frames.len() > 60 {
            self.frames.remove(0);
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.first(), self.frames.last()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / elapsed
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Running totals since mount
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub recycled: u64,
    pub resizes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.fps(), 0.0);

        fps.tick_at(1.0);
        assert_eq!(fps.fps(), 0.0);

        // 31 frames over 0.5s -> 60 fps
        for i in 1..=30 {
            fps.tick_at(1.0 + i as f64 / 60.0);
        }
        assert!((fps.fps() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_fps_window_is_bounded() {
        let mut fps = FpsCounter::new();
        // Slow start then fast frames; only the last 60 count
        fps.tick_at(0.0);
        for i in 0..100 {
            fps.tick_at(10.0 + i as f64 / 120.0);
        }
        assert!((fps.fps() - 120.0).abs() < 1e-6);
    }
}
