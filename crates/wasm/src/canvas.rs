//! `Surface` over a browser `CanvasRenderingContext2d`.

use std::f64::consts::TAU;

use glam::DVec2;
use neural_backdrop_core::{Rgba, Surface};
use web_sys::CanvasRenderingContext2d;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        // arc() throws only for a negative radius.
        if let Err(e) = self.ctx.arc(center.x, center.y, radius, 0.0, TAU) {
            log::debug!("skipping circle at {center}: {e:?}");
            return;
        }
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }
}
