//! Software [`Surface`] over an RGBA buffer.
//!
//! Pixels are stored premultiplied in `f32` and composited source-over, the
//! same model a 2D canvas uses. Edges get one pixel of analytic coverage so
//! thin, faint links still show up at their configured opacity.

use glam::DVec2;
use neural_backdrop_core::error::BackdropError;
use neural_backdrop_core::{Rgb, Rgba, Surface};

/// An in-memory canvas.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    /// Premultiplied RGBA in [0, 1], row-major.
    data: Vec<[f32; 4]>,
}

impl PixelSurface {
    /// Creates a transparent surface.
    ///
    /// Returns `BackdropError::InvalidDimensions` for a zero side or when
    /// `width * height` overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, BackdropError> {
        let invalid = || BackdropError::InvalidDimensions {
            width: width as f64,
            height: height as f64,
        };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let len = width.checked_mul(height).ok_or_else(invalid)?;
        Ok(Self {
            width,
            height,
            data: vec![[0.0; 4]; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Coverage-weighted opacity at `(x, y)`, 0 outside the surface.
    pub fn alpha_at(&self, x: usize, y: usize) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.data[y * self.width + x][3]
    }

    /// Whether nothing has been painted since the last clear.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|p| p[3] == 0.0)
    }

    /// Straight-alpha RGBA8 bytes, `width * height * 4` long.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data
            .iter()
            .flat_map(|&[r, g, b, a]| {
                if a <= 0.0 {
                    return [0, 0, 0, 0];
                }
                [to_byte(r / a), to_byte(g / a), to_byte(b / a), to_byte(a)]
            })
            .collect()
    }

    /// Opaque RGBA8 bytes with the surface composited over `background`.
    pub fn composite_over(&self, background: Rgb) -> Vec<u8> {
        let bg = [
            background.r as f32 / 255.0,
            background.g as f32 / 255.0,
            background.b as f32 / 255.0,
        ];
        self.data
            .iter()
            .flat_map(|&[r, g, b, a]| {
                let keep = 1.0 - a;
                [
                    to_byte(r + bg[0] * keep),
                    to_byte(g + bg[1] * keep),
                    to_byte(b + bg[2] * keep),
                    255,
                ]
            })
            .collect()
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba, coverage: f64) {
        let a = (color.alpha * coverage.clamp(0.0, 1.0)) as f32;
        if a <= 0.0 {
            return;
        }
        let src = [
            color.rgb.r as f32 / 255.0 * a,
            color.rgb.g as f32 / 255.0 * a,
            color.rgb.b as f32 / 255.0 * a,
            a,
        ];
        let dst = &mut self.data[y * self.width + x];
        for (d, s) in dst.iter_mut().zip(src) {
            *d = (s + *d * (1.0 - a)).min(1.0);
        }
    }

    /// Paints every pixel in the clipped box `[lo, hi]` whose center gets
    /// non-zero coverage from `coverage(center)`.
    fn paint_box<F>(&mut self, lo: DVec2, hi: DVec2, color: Rgba, coverage: F)
    where
        F: Fn(DVec2) -> f64,
    {
        for y in span(lo.y, hi.y, self.height) {
            for x in span(lo.x, hi.x, self.width) {
                let center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let c = coverage(center);
                if c > 0.0 {
                    self.blend(x, y, color, c);
                }
            }
        }
    }
}

/// Pixel indices in `[floor(lo), ceil(hi))`, clipped to `[0, limit)`.
/// NaN bounds produce an empty range.
fn span(lo: f64, hi: f64, limit: usize) -> std::ops::Range<usize> {
    let start = lo.floor().max(0.0) as usize;
    let end = (hi.ceil().max(0.0) as usize).min(limit);
    start.min(end)..end
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let t = ((p - a).dot(ab) / ab.length_squared()).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Surface for PixelSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        for py in span(y, y + height, self.height) {
            for px in span(x, x + width, self.width) {
                self.data[py * self.width + px] = [0.0; 4];
            }
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        if radius.is_nan() || radius <= 0.0 || !center.is_finite() {
            return;
        }
        let reach = DVec2::splat(radius + 1.0);
        self.paint_box(center - reach, center + reach, color, |p| {
            (radius - p.distance(center) + 0.5).clamp(0.0, 1.0)
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        // Butt caps: a zero-length segment covers nothing.
        if from == to || width.is_nan() || width <= 0.0 || !from.is_finite() || !to.is_finite() {
            return;
        }
        let half = width / 2.0;
        let reach = DVec2::splat(half + 1.0);
        self.paint_box(from.min(to) - reach, from.max(to) + reach, color, |p| {
            (half - distance_to_segment(p, from, to) + 0.5).clamp(0.0, 1.0)
        });
    }
}
