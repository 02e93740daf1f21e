//! Streak field - animated meteor-shower background
//!
//! A fixed pool of glowing diagonal streaks drawn once per display frame:
//! - `core`: platform-agnostic simulation, config and drawing primitives
//! - `web`: canvas surface and animation-frame loop (feature `wasm`)
//! - `native`: tokio-driven frame loop for the headless CLI (feature `cli`)

pub mod core;
pub mod loop_state;
pub mod theme;
pub mod time;

#[cfg(all(not(target_arch = "wasm32"), feature = "cli"))]
pub mod native;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod web;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod start {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();

        // Initialize tracing for browser console
        tracing_wasm::set_as_global_default();
    }
}
