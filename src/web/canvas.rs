//! `DrawSurface` backed by a 2D canvas context

use std::f64::consts::TAU;

use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::core::{DrawSurface, Glow, GradientLine, Viewport};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Bind to the canvas' 2D context. None if the context is unavailable.
    pub fn acquire(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }
}

impl DrawSurface for CanvasSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width as u32);
        self.canvas.set_height(viewport.height as u32);
    }

    fn clear(&mut self) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn stroke_gradient_line(&mut self, line: &GradientLine) {
        let gradient = self
            .ctx
            .create_linear_gradient(line.from.x, line.from.y, line.to.x, line.to.y);
        for stop in &line.stops {
            if let Err(e) = gradient.add_color_stop(stop.offset as f32, &stop.color.to_css()) {
                trace!(?e, "Rejected gradient stop");
            }
        }

        self.ctx.set_stroke_style_canvas_gradient(&gradient);
        self.ctx.set_line_width(line.width);
        self.ctx.set_line_cap("round");
        self.ctx.begin_path();
        self.ctx.move_to(line.from.x, line.from.y);
        self.ctx.line_to(line.to.x, line.to.y);
        self.ctx.stroke();
    }

    fn fill_glow(&mut self, glow: &Glow) {
        // Shadow settings must not leak into the next streak's stroke
        self.ctx.save();
        self.ctx.set_shadow_blur(glow.blur);
        self.ctx.set_shadow_color(&glow.blur_color.with_alpha(1.0).to_css());
        self.ctx.set_fill_style_str(&glow.fill.to_css());
        self.ctx.begin_path();
        if self
            .ctx
            .arc(glow.center.x, glow.center.y, glow.radius, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
        self.ctx.restore();
    }
}
