use crate::computing::{Assembly, Color, Couple, Float, Primitive, Triangles, C_ZERO};

use wizdraw::stroke;
use wizdraw::fill;

use vek::vec::Vec2;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use rgb::RGBA8;

use core::fmt;
use alloc::{vec, vec::Vec, boxed::Box};

use RenderError::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderError {
    EmptyCanvas,
    CanvasTooSmall,
    UnknownArgument,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyCanvas => f.write_str("canvas has no pixels"),
            CanvasTooSmall => f.write_str("pixel buffer is smaller than the canvas"),
            UnknownArgument => f.write_str("no argument with that name"),
        }
    }
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Figure coordinates to normalized device coordinates:
/// `scale * (v + translate)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub scale: Couple,
    pub translate: Couple,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        scale: Couple::new(1.0, 1.0),
        translate: C_ZERO,
    };

    pub fn new(scale: Couple, translate: Couple) -> Self {
        Self { scale, translate }
    }

    pub fn apply(&self, v: Couple) -> Couple {
        (v + self.translate) * self.scale
    }
}

#[derive(Debug, Clone, Copy)]
struct Triangle {
    /// points
    p: [Couple; 3],
    // cached vectors used for fast weighting
    v: [Couple; 2],
}

impl Triangle {
    /// `None` for zero-area (or non-finite) triangles.
    fn new(p: [Couple; 3]) -> Option<Self> {
        let v0 = Couple::new(p[1].x - p[0].x, p[1].y - p[0].y);
        let v1 = Couple::new(p[2].x - p[0].x, p[2].y - p[0].y);
        let cross = v0.x * v1.y - v1.x * v0.y;
        if cross == 0.0 || !cross.is_finite() {
            return None;
        }
        let den = 1.0 / cross;
        let v0 = Couple::new(v0.x * den, v0.y * den);
        let v1 = Couple::new(v1.x * den, v1.y * den);
        Some(Self { p, v: [v0, v1] })
    }

    fn contains(&self, pt: Couple) -> bool {
        let v2_x = pt.x - self.p[0].x;
        let v2_y = pt.y - self.p[0].y;
        let v = v2_x * self.v[1].y - v2_y * self.v[1].x;
        let w = v2_y * self.v[0].x - v2_x * self.v[0].y;
        let u = 1.0 - v - w;
        u >= 0.0 && v >= 0.0 && w >= 0.0
    }

    fn min(&self) -> Couple {
        let [a, b, c] = self.p;
        Couple::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y))
    }

    fn max(&self) -> Couple {
        let [a, b, c] = self.p;
        Couple::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y))
    }
}

/// Half-open pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

impl Bounds {
    const EMPTY: Self = Self { x0: usize::MAX, y0: usize::MAX, x1: 0, y1: 0 };

    fn union(self, other: Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

pub struct Canvas {
    width: usize,
    height: usize,
    line_width: Float,
    /// coverage of the stroke or polygon being drawn; all zero between primitives
    mask: Box<[u8]>,
    /// one bit per sub-sample, for triangle assemblies; all zero between primitives
    samples: Box<[u64]>,
    projected: Vec<Couple>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(EmptyCanvas);
        }

        Ok(Self {
            width,
            height,
            line_width: 1.0,
            mask: vec![0; width * height].into_boxed_slice(),
            samples: vec![0; width * height].into_boxed_slice(),
            projected: Vec::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn line_width(&self) -> Float {
        self.line_width
    }

    pub fn set_line_width(&mut self, line_width: Float) {
        self.line_width = line_width;
    }

    fn check(&self, dst: &[RGBA8], stride: usize) -> RenderResult<()> {
        let needed = (self.height - 1)
            .checked_mul(stride)
            .and_then(|n| n.checked_add(self.width));
        match needed {
            Some(needed) if stride >= self.width && dst.len() >= needed => Ok(()),
            _ => Err(CanvasTooSmall),
        }
    }

    pub fn clear(&self, dst: &mut [RGBA8], stride: usize, color: Color) -> RenderResult<()> {
        self.check(dst, stride)?;
        let color = opaque(color);
        let mut i = 0;
        for _ in 0..self.height {
            dst[i..][..self.width].fill(color);
            i += stride;
        }
        Ok(())
    }

    /// Normalized device coordinates to pixels, y pointing down.
    pub fn to_pixel(&self, ndc: Couple) -> Couple {
        Couple::new(
            (ndc.x + 1.0) * 0.5 * self.width as Float,
            (1.0 - ndc.y) * 0.5 * self.height as Float,
        )
    }

    /// Draws every primitive in order over the current content of `dst`.
    ///
    /// Triangle assemblies are sampled on an `SSAA` x `SSAA` grid per pixel
    /// (at most 8 x 8); strokes and polygons go through wizdraw.
    pub fn render<const SSAA: usize, const SSAA_SQ: usize>(
        &mut self,
        primitives: &[Primitive],
        transform: Transform,
        dst: &mut [RGBA8],
        stride: usize,
    ) -> RenderResult<()> {
        self.check(dst, stride)?;
        debug_assert!(SSAA * SSAA <= 64);

        let mask_size = Vec2::new(self.width, self.height);
        let full = Bounds {
            x0: 0,
            y0: 0,
            x1: self.width,
            y1: self.height,
        };

        for primitive in primitives {
            let color = opaque(primitive.color);

            self.projected.clear();
            for vertex in &primitive.vertices {
                let point = self.to_pixel(transform.apply(*vertex));
                self.projected.push(point);
            }

            match primitive.assembly {
                Assembly::TriangleStrip | Assembly::TriangleFan => {
                    let triangles = Triangles::new(primitive.assembly, &self.projected);
                    let bounds = cover::<SSAA>(&mut self.samples, self.width, self.height, triangles);
                    flush_samples::<SSAA>(&mut self.samples, self.width, dst, stride, bounds, color);
                }
                Assembly::Polygon => {
                    if self.projected.len() < 3 {
                        continue;
                    }
                    self.projected.push(self.projected[0]);
                    fill::<SSAA, SSAA_SQ>(&self.projected, &mut self.mask, mask_size);
                    flush(&mut self.mask, self.width, dst, stride, full, color);
                }
                Assembly::LineStrip => {
                    if self.projected.len() < 2 {
                        continue;
                    }
                    stroke::<SSAA>(&self.projected, &mut self.mask, mask_size, self.line_width);
                    flush(&mut self.mask, self.width, dst, stride, full, color);
                }
                Assembly::Lines => {
                    for pair in self.projected.chunks_exact(2) {
                        stroke::<SSAA>(pair, &mut self.mask, mask_size, self.line_width);
                        flush(&mut self.mask, self.width, dst, stride, full, color);
                    }
                }
            }
        }

        log::trace!("rendered {} primitives", primitives.len());
        Ok(())
    }
}

/// Sets one bit per sub-sample covered by any of the triangles, so pixels
/// split between neighbours of a strip or fan end up fully covered.
/// Returns the touched area.
fn cover<const SSAA: usize>(samples: &mut [u64], w: usize, h: usize, triangles: Triangles) -> Bounds {
    let mut touched = Bounds::EMPTY;
    let sub = 1.0 / SSAA as Float;

    for points in triangles {
        let triangle = match Triangle::new(points) {
            Some(t) => t,
            None => continue,
        };

        let (lo, hi) = (triangle.min(), triangle.max());
        let bounds = Bounds {
            x0: (lo.x.floor().max(0.0) as usize).min(w),
            y0: (lo.y.floor().max(0.0) as usize).min(h),
            x1: (hi.x.ceil().max(0.0) as usize).min(w),
            y1: (hi.y.ceil().max(0.0) as usize).min(h),
        };
        if bounds.x0 == bounds.x1 || bounds.y0 == bounds.y1 {
            continue;
        }

        for y in bounds.y0..bounds.y1 {
            for x in bounds.x0..bounds.x1 {
                let mut bits = 0u64;
                for sy in 0..SSAA {
                    for sx in 0..SSAA {
                        let point = Couple::new(
                            x as Float + (sx as Float + 0.5) * sub,
                            y as Float + (sy as Float + 0.5) * sub,
                        );
                        if triangle.contains(point) {
                            bits |= 1u64 << (sy * SSAA + sx);
                        }
                    }
                }
                samples[y * w + x] |= bits;
            }
        }

        touched = touched.union(bounds);
    }

    touched
}

fn flush_samples<const SSAA: usize>(
    samples: &mut [u64],
    w: usize,
    dst: &mut [RGBA8],
    stride: usize,
    bounds: Bounds,
    color: RGBA8,
) {
    let count = (SSAA * SSAA) as u32;
    for y in bounds.y0..bounds.y1 {
        let line = y * stride;
        let row = &mut samples[y * w..][bounds.x0..bounds.x1];
        for (x, bits) in (bounds.x0..bounds.x1).zip(row.iter_mut()) {
            if *bits != 0 {
                let q = (bits.count_ones() * 255 / count) as u8;
                blend_pixel(&mut dst[line + x], color, q);
                *bits = 0;
            }
        }
    }
}

/// Blends `color` through the mask inside `bounds`, then zeroes the mask there.
fn flush(mask: &mut [u8], w: usize, dst: &mut [RGBA8], stride: usize, bounds: Bounds, color: RGBA8) {
    for y in bounds.y0..bounds.y1 {
        let line = y * stride;
        let row = &mut mask[y * w..][bounds.x0..bounds.x1];
        for (x, q) in (bounds.x0..bounds.x1).zip(row.iter_mut()) {
            if *q != 0 {
                blend_pixel(&mut dst[line + x], color, *q);
                *q = 0;
            }
        }
    }
}

pub fn opaque(color: Color) -> RGBA8 {
    let channel = |c: Float| (c.max(0.0).min(1.0) * 255.0).round() as u8;
    RGBA8::new(channel(color.r), channel(color.g), channel(color.b), 255)
}

#[inline(always)]
pub fn blend_pixel(dst_pixel: &mut RGBA8, src_pixel: RGBA8, mask_alpha: u8) {
    if src_pixel.a == 255 && mask_alpha == 255 {
        *dst_pixel = src_pixel;
    } else {
        let src_alpha = ((src_pixel.a as u32) * (mask_alpha as u32)) / 255;
        let u8_max = u8::MAX as u32;
        let dst_alpha = u8_max - src_alpha;

        let for_each = |src, dst: &mut _| {
            let src_scaled = (src as u32) * src_alpha;
            let dst_scaled = (*dst as u32) * dst_alpha;
            *dst = ((src_scaled + dst_scaled) / u8_max) as u8;
        };

        for_each(src_pixel.r, &mut dst_pixel.r);
        for_each(src_pixel.g, &mut dst_pixel.g);
        for_each(src_pixel.b, &mut dst_pixel.b);
        for_each(src_pixel.a, &mut dst_pixel.a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::computing::{arc, circle, filled_wedge, Curve, BLACK, WHITE};

    const W: usize = 64;
    const H: usize = 64;

    fn blank() -> (Canvas, Vec<RGBA8>) {
        let canvas = Canvas::new(W, H).unwrap();
        let mut dst = vec![RGBA8::default(); W * H];
        canvas.clear(&mut dst, W, WHITE).unwrap();
        (canvas, dst)
    }

    #[test]
    fn triangle_rejects_zero_area() {
        let p = Couple::new(1.0, 1.0);
        assert!(Triangle::new([p, p, Couple::new(2.0, 2.0)]).is_none());
        assert!(Triangle::new([C_ZERO, Couple::new(1.0, 1.0), Couple::new(2.0, 2.0)]).is_none());
    }

    #[test]
    fn triangle_contains_either_winding() {
        let a = Couple::new(0.0, 0.0);
        let b = Couple::new(4.0, 0.0);
        let c = Couple::new(0.0, 4.0);
        let inside = Couple::new(1.0, 1.0);
        let outside = Couple::new(3.0, 3.0);
        for t in [Triangle::new([a, b, c]).unwrap(), Triangle::new([a, c, b]).unwrap()] {
            assert!(t.contains(inside));
            assert!(!t.contains(outside));
        }
    }

    #[test]
    fn transform_scales_after_translating() {
        let t = Transform::new(Couple::new(0.25, 0.25), Couple::new(-3.5, -3.3));
        let p = t.apply(Couple::new(0.5, 0.3));
        assert!((p - Couple::new(-0.75, -0.75)).magnitude() < 1e-6);
    }

    #[test]
    fn ndc_maps_onto_pixels() {
        let (canvas, _) = blank();
        assert_eq!(canvas.to_pixel(Couple::new(-1.0, 1.0)), C_ZERO);
        assert_eq!(canvas.to_pixel(Couple::new(1.0, -1.0)), Couple::new(W as Float, H as Float));
        assert_eq!(canvas.to_pixel(C_ZERO), Couple::new(32.0, 32.0));
    }

    #[test]
    fn filled_fan_paints_its_inside_only() {
        let (mut canvas, mut dst) = blank();
        let disc = arc(C_ZERO, 0.5, 0.0, 2.0 * core::f32::consts::PI, false, BLACK, true);
        canvas.render::<2, 4>(&[disc], Transform::IDENTITY, &mut dst, W).unwrap();
        assert_eq!(dst[32 * W + 32], RGBA8::new(0, 0, 0, 255));
        assert_eq!(dst[2 * W + 2], RGBA8::new(255, 255, 255, 255));
        // coverage is left clean for the next primitive
        assert!(canvas.samples.iter().all(|bits| *bits == 0));
        assert!(canvas.mask.iter().all(|q| *q == 0));
    }

    #[test]
    fn degenerate_wedge_draws_nothing() {
        let (mut canvas, mut dst) = blank();
        let curve = Curve {
            start: Couple::new(0.1, 0.1),
            ctrl: Couple::new(0.1, 0.1),
            end: Couple::new(0.1, 0.1),
        };
        let wedge = filled_wedge(&curve, curve.start, 100, BLACK);
        canvas.render::<2, 4>(&[wedge], Transform::IDENTITY, &mut dst, W).unwrap();
        assert!(dst.iter().all(|p| *p == RGBA8::new(255, 255, 255, 255)));
    }

    #[test]
    fn short_polygons_are_skipped() {
        let (mut canvas, mut dst) = blank();
        let dot = circle(C_ZERO, 0.5, 2, BLACK);
        canvas.render::<2, 4>(&[dot], Transform::IDENTITY, &mut dst, W).unwrap();
        assert!(dst.iter().all(|p| *p == RGBA8::new(255, 255, 255, 255)));
    }

    #[test]
    fn undersized_buffers_are_rejected() {
        let (mut canvas, _) = blank();
        let mut small = vec![RGBA8::default(); W * H - 1];
        assert_eq!(canvas.clear(&mut small, W, WHITE), Err(CanvasTooSmall));
        let mut dst = vec![RGBA8::default(); W * H];
        assert_eq!(canvas.render::<1, 1>(&[], Transform::IDENTITY, &mut dst, W - 1), Err(CanvasTooSmall));
        assert_eq!(Canvas::new(0, 10).err(), Some(EmptyCanvas));
    }

    #[test]
    fn huge_strides_are_rejected() {
        let (canvas, mut dst) = blank();
        assert_eq!(canvas.clear(&mut dst, usize::MAX, WHITE), Err(CanvasTooSmall));
        assert_eq!(canvas.clear(&mut dst, usize::MAX / 2, WHITE), Err(CanvasTooSmall));
    }

    #[test]
    fn stride_leaves_padding_untouched() {
        let (canvas, _) = blank();
        let stride = W + 3;
        let mut dst = vec![RGBA8::default(); stride * H];
        canvas.clear(&mut dst, stride, WHITE).unwrap();
        assert_eq!(dst[W], RGBA8::default());
        assert_eq!(dst[stride], RGBA8::new(255, 255, 255, 255));
    }

    #[test]
    fn blending_mixes_with_background() {
        let mut pixel = RGBA8::new(255, 255, 255, 255);
        blend_pixel(&mut pixel, RGBA8::new(0, 0, 0, 255), 128);
        assert_eq!(pixel, RGBA8::new(127, 127, 127, 255));
        assert_eq!(opaque(Color { r: 0.6431, g: 0.6039, b: 0.5373 }), RGBA8::new(164, 154, 137, 255));
    }
}
