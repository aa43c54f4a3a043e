use core::f32::consts::TAU;
use alloc::vec::Vec;

use vek::bezier::QuadraticBezier2;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use rgb::RGB;

pub type Float = f32;
pub type Couple = vek::vec::repr_c::vec2::Vec2<Float>;
pub type Curve = QuadraticBezier2<Float>;
pub type Color = RGB<Float>;
pub const C_ZERO: Couple = Couple::new(0.0, 0.0);

/// Arcs are always sampled with this many segments (101 rim points).
pub const ARC_SEGMENTS: usize = 100;

/// Default sampling of every curve-bounded fill.
pub const CURVE_SEGMENTS: usize = 100;

pub const BLACK: Color = RGB { r: 0.0, g: 0.0, b: 0.0 };
pub const WHITE: Color = RGB { r: 1.0, g: 1.0, b: 1.0 };

/// How consecutive vertices of a [`Primitive`] are assembled.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Assembly {
    /// every window of three vertices is a triangle
    TriangleStrip,
    /// the first vertex is shared by every triangle
    TriangleFan,
    /// convex outline, filled
    Polygon,
    /// open polyline
    LineStrip,
    /// independent segments, two vertices each
    Lines,
}

impl Assembly {
    pub fn is_filled(self) -> bool {
        match self {
            Assembly::TriangleStrip => true,
            Assembly::TriangleFan => true,
            Assembly::Polygon => true,
            Assembly::LineStrip => false,
            Assembly::Lines => false,
        }
    }

    pub fn as_text(self) -> &'static str {
        match self {
            Assembly::TriangleStrip => "TriangleStrip",
            Assembly::TriangleFan => "TriangleFan",
            Assembly::Polygon => "Polygon",
            Assembly::LineStrip => "LineStrip",
            Assembly::Lines => "Lines",
        }
    }
}

/// One draw call worth of vertices, in figure coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub assembly: Assembly,
    pub color: Color,
    pub vertices: Vec<Couple>,
}

impl Primitive {
    pub fn with_capacity(assembly: Assembly, color: Color, capacity: usize) -> Self {
        Self {
            assembly,
            color,
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Triangles described by a strip, fan or polygon; nothing for lines.
    pub fn triangles(&self) -> Triangles<'_> {
        Triangles::new(self.assembly, &self.vertices)
    }
}

pub struct Triangles<'a> {
    assembly: Assembly,
    vertices: &'a [Couple],
    next: usize,
}

impl<'a> Triangles<'a> {
    pub fn new(assembly: Assembly, vertices: &'a [Couple]) -> Self {
        Self {
            assembly,
            vertices,
            next: 0,
        }
    }
}

impl<'a> Iterator for Triangles<'a> {
    type Item = [Couple; 3];

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.vertices;
        let i = self.next;
        if !self.assembly.is_filled() || i + 2 >= v.len() {
            return None;
        }
        self.next += 1;
        Some(match self.assembly {
            Assembly::TriangleStrip => [v[i], v[i + 1], v[i + 2]],
            _ => [v[0], v[i + 1], v[i + 2]],
        })
    }
}

/// `i / segments`, with zero segments collapsing onto t = 0.
fn parameter(i: usize, segments: usize) -> Float {
    match segments {
        0 => 0.0,
        n => i as Float / n as Float,
    }
}

/// Point on `curve` at `t`; exact at both ends.
pub fn bezier_point(curve: &Curve, t: Float) -> Couple {
    curve.evaluate(t)
}

/// `start + (end - start) t`; equal end points give `start` for every t.
pub fn line_point(start: Couple, end: Couple, t: Float) -> Couple {
    Couple::new(
        start.x + (end.x - start.x) * t,
        start.y + (end.y - start.y) * t,
    )
}

/// Region between a curve and a straight edge, one curve sample and one
/// line sample per step.
pub fn filled_band(curve: &Curve, line: [Couple; 2], segments: usize, color: Color) -> Primitive {
    let mut strip = Primitive::with_capacity(Assembly::TriangleStrip, color, 2 * (segments + 1));
    for i in 0..=segments {
        let t = parameter(i, segments);
        strip.vertices.push(bezier_point(curve, t));
        strip.vertices.push(line_point(line[0], line[1], t));
    }
    strip
}

/// Triangular area bounded by the curve on one side and by the straight
/// edge from the curve start to `tip` on the other.
pub fn filled_wedge(curve: &Curve, tip: Couple, segments: usize, color: Color) -> Primitive {
    filled_band(curve, [curve.start, tip], segments, color)
}

/// Curves hanging down to a horizontal floor, interleaved into a single
/// strip: for each step, every curve contributes its sample and the
/// sample projected on the floor.
pub fn curtain(curves: &[Curve], floor: Float, segments: usize, color: Color) -> Primitive {
    let capacity = 2 * curves.len() * (segments + 1);
    let mut strip = Primitive::with_capacity(Assembly::TriangleStrip, color, capacity);
    for i in 0..=segments {
        let t = parameter(i, segments);
        for curve in curves {
            let p = bezier_point(curve, t);
            strip.vertices.push(p);
            strip.vertices.push(Couple::new(p.x, floor));
        }
    }
    strip
}

pub fn circle(center: Couple, radius: Float, segments: usize, color: Color) -> Primitive {
    let mut polygon = Primitive::with_capacity(Assembly::Polygon, color, segments);
    for i in 0..segments {
        let theta = TAU * parameter(i, segments);
        let (sin, cos) = theta.sin_cos();
        polygon.vertices.push(Couple::new(center.x + radius * cos, center.y + radius * sin));
    }
    polygon
}

pub fn bezier_outline(curve: &Curve, segments: usize, color: Color) -> Primitive {
    let mut strip = Primitive::with_capacity(Assembly::LineStrip, color, segments + 1);
    for i in 0..=segments {
        strip.vertices.push(bezier_point(curve, parameter(i, segments)));
    }
    strip
}

/// Samples `ARC_SEGMENTS + 1` rim points from `start_angle`, stepping by
/// `(end_angle - start_angle) / ARC_SEGMENTS`, negated when `clockwise`.
///
/// Outlines are line strips; fills are fans anchored at the center.
pub fn arc(
    center: Couple,
    radius: Float,
    start_angle: Float,
    end_angle: Float,
    clockwise: bool,
    color: Color,
    fill: bool,
) -> Primitive {
    let mut step = (end_angle - start_angle) / ARC_SEGMENTS as Float;
    if clockwise {
        step = -step;
    }

    let mut primitive = match fill {
        true => {
            let mut fan = Primitive::with_capacity(Assembly::TriangleFan, color, ARC_SEGMENTS + 2);
            fan.vertices.push(center);
            fan
        },
        false => Primitive::with_capacity(Assembly::LineStrip, color, ARC_SEGMENTS + 1),
    };

    for i in 0..=ARC_SEGMENTS {
        let angle = start_angle + step * i as Float;
        let (sin, cos) = angle.sin_cos();
        primitive.vertices.push(Couple::new(center.x + radius * cos, center.y + radius * sin));
    }

    primitive
}

pub fn polyline(points: &[Couple], color: Color) -> Primitive {
    Primitive {
        assembly: Assembly::LineStrip,
        color,
        vertices: points.to_vec(),
    }
}

/// Independent segments; a trailing odd point is dropped.
pub fn segments(points: &[Couple], color: Color) -> Primitive {
    let even = points.len() - points.len() % 2;
    Primitive {
        assembly: Assembly::Lines,
        color,
        vertices: points[..even].to_vec(),
    }
}
