//! Headless CLI driver for the streak field
//!
//! Runs the simulation against an in-memory surface at a fixed frame rate
//! and logs periodic stats.
//!
//! Run with: cargo run --features cli --bin streak-cli

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use parking_lot::Mutex;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::ops::ControlFlow;
    use std::sync::Arc;
    use std::time::Duration;
    use streak_field::core::{RecordingSurface, StreakConfig, StreakRenderer, Viewport};
    use streak_field::native::NativeFrameLoop;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,streak_field=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
        match std::env::var(key) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(key, value = %raw, "Unparseable value, using default");
                default
            }),
            Err(_) => default,
        }
    }

    let width: f64 = env_or("STREAK_WIDTH", 1920.0);
    let height: f64 = env_or("STREAK_HEIGHT", 1080.0);
    let max_frames: u64 = env_or("STREAK_FRAMES", 600);
    let fps = env_or::<u32>("STREAK_FPS", 60).max(1);
    let snapshot = std::env::var("STREAK_SNAPSHOT").is_ok();

    let config = match std::env::var("STREAK_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)?;
            let config = StreakConfig::from_json(&json)?;
            info!(path = %path, "Loaded streak config");
            config
        }
        Err(_) => StreakConfig::default(),
    };

    let rng = match std::env::var("STREAK_SEED") {
        Ok(seed) => StdRng::seed_from_u64(seed.parse()?),
        Err(_) => StdRng::from_entropy(),
    };

    let viewport = Viewport::new(width, height);
    if !viewport.is_valid() {
        return Err(format!(
            "invalid viewport {}x{}: STREAK_WIDTH and STREAK_HEIGHT must be finite and positive",
            width, height
        )
        .into());
    }
    let renderer = StreakRenderer::mount(Some(RecordingSurface::new()), viewport, config, rng)
        .ok_or("surface unavailable")?;
    let renderer = Arc::new(Mutex::new(renderer));

    let renderer_clone = renderer.clone();
    let mut frame_loop =
        NativeFrameLoop::start(Duration::from_secs_f64(1.0 / fps as f64), move || {
            let mut renderer = renderer_clone.lock();
            renderer.frame();
            if max_frames > 0 && renderer.stats().frames >= max_frames {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

    let mut stats_interval = tokio::time::interval(Duration::from_secs(1));
    let mut last_recycled = 0u64;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted");
                break;
            }
            _ = stats_interval.tick() => {
                let renderer = renderer.lock();
                let stats = renderer.stats();
                info!(
                    frames = stats.frames,
                    streaks = renderer.field().len(),
                    recycled = stats.recycled,
                    "/sec" = stats.recycled - last_recycled,
                    fps = format!("{:.1}", renderer.fps()),
                    "stats"
                );
                last_recycled = stats.recycled;
                if !frame_loop.state().is_running() {
                    break;
                }
            }
        }
    }

    frame_loop.stop();

    let renderer = renderer.lock();
    let stats = renderer.stats();
    info!(frames = stats.frames, recycled = stats.recycled, "Done");

    if snapshot {
        println!("{}", serde_json::to_string_pretty(renderer.field().streaks())?);
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
