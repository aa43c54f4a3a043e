use crate::computing::{self, Color, Couple, Curve, Float, Primitive, CURVE_SEGMENTS};

/// Curve-bounded fill closed by a straight edge from the curve start to `tip`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Wedge {
    pub curve: Curve,
    pub tip: Couple,
}

/// Curve-bounded fill closed by an arbitrary straight edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Band {
    pub curve: Curve,
    pub line: [Couple; 2],
}

/// Two flanks hanging down to a shared floor line.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Curtain {
    pub flanks: [Curve; 2],
    pub floor: Float,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub center: Couple,
    pub radius: Float,
    pub segments: usize,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Outline {
    pub curve: Curve,
    pub segments: usize,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Arc {
    pub center: Couple,
    pub radius: Float,
    pub start_angle: Float,
    pub end_angle: Float,
    pub clockwise: bool,
    pub fill: bool,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    Wedge(Wedge),
    Band(Band),
    Curtain(Curtain),
    Circle(Circle),
    Outline(Outline),
    Arc(Arc),
    Polyline(&'static [Couple]),
    Segments(&'static [Couple]),
}

impl Shape {
    pub fn emit(&self, color: Color) -> Primitive {
        match self {
            Shape::Wedge(w) => computing::filled_wedge(&w.curve, w.tip, CURVE_SEGMENTS, color),
            Shape::Band(b) => computing::filled_band(&b.curve, b.line, CURVE_SEGMENTS, color),
            Shape::Curtain(c) => computing::curtain(&c.flanks, c.floor, CURVE_SEGMENTS, color),
            Shape::Circle(c) => computing::circle(c.center, c.radius, c.segments, color),
            Shape::Outline(o) => computing::bezier_outline(&o.curve, o.segments, color),
            Shape::Arc(a) => computing::arc(
                a.center,
                a.radius,
                a.start_angle,
                a.end_angle,
                a.clockwise,
                color,
                a.fill,
            ),
            Shape::Polyline(points) => computing::polyline(points, color),
            Shape::Segments(points) => computing::segments(points, color),
        }
    }

    pub fn as_text(&self) -> &'static str {
        match self {
            Shape::Wedge(_) => "Wedge",
            Shape::Band(_) => "Band",
            Shape::Curtain(_) => "Curtain",
            Shape::Circle(_) => "Circle",
            Shape::Outline(_) => "Outline",
            Shape::Arc(a) if a.fill => "FilledArc",
            Shape::Arc(_) => "Arc",
            Shape::Polyline(_) => "Polyline",
            Shape::Segments(_) => "Segments",
        }
    }
}
