//! Canvas 2D painter for the splash particles

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{paint, placed_outline};
use crate::error::{Result, SiteError};
use crate::splash::{ParticleField, ParticleKind};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Fails with [`SiteError::NoContext`] when the browser won't hand out a 2d context
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(SiteError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SiteError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the CSS viewport size
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    /// Clear and redraw every particle in its current state
    pub fn draw<R: rand::Rng>(&self, field: &ParticleField<R>) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);

        // Batch by kind so the glow state is set twice per frame, not per particle
        for kind in [ParticleKind::Fire, ParticleKind::Ice] {
            let paint = paint(kind);
            self.ctx.set_shadow_color(paint.glow);
            self.ctx.set_shadow_blur(paint.glow_blur);

            for particle in field.particles().iter().filter(|p| p.kind == kind) {
                let points = placed_outline(particle);
                let Some((first, rest)) = points.split_first() else {
                    continue;
                };
                self.ctx.set_fill_style_str(&paint.fill_style(particle.alpha));
                self.ctx.begin_path();
                self.ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    self.ctx.line_to(p.x as f64, p.y as f64);
                }
                self.ctx.close_path();
                self.ctx.fill();
            }
        }
    }
}
