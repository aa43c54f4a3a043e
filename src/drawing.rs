use crate::computing::{Color, Couple, Curve, Primitive, BLACK};
use crate::primitive::{Arc, Band, Circle, Curtain, Outline, Shape, Wedge};

use core::f32::consts::PI;
use alloc::vec::Vec;

use rgb::RGB;

/// Palette slot, resolved to a concrete color when the scene is tessellated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Ink {
    Body,
    Shade,
    Black,
}

impl Ink {
    pub fn as_text(self) -> &'static str {
        match self {
            Ink::Body => "Body",
            Ink::Shade => "Shade",
            Ink::Black => "Black",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub body: Color,
    pub shade: Color,
    pub black: Color,
}

impl Palette {
    pub fn resolve(&self, ink: Ink) -> Color {
        match ink {
            Ink::Body => self.body,
            Ink::Shade => self.shade,
            Ink::Black => self.black,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            body: RGB { r: 0.6431, g: 0.6039, b: 0.5373 },
            shade: RGB { r: 0.2549, g: 0.2431, b: 0.2196 },
            black: BLACK,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Instruction {
    pub shape: Shape,
    pub ink: Ink,
}

/// A named group of instructions, drawn in order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Part {
    pub name: &'static str,
    pub instructions: &'static [Instruction],
}

impl Part {
    pub fn tessellate(&self, palette: &Palette, dst: &mut Vec<Primitive>) {
        for instruction in self.instructions {
            dst.push(instruction.shape.emit(palette.resolve(instruction.ink)));
        }
    }
}

const fn curve(start: (f32, f32), ctrl: (f32, f32), end: (f32, f32)) -> Curve {
    Curve {
        start: Couple::new(start.0, start.1),
        ctrl: Couple::new(ctrl.0, ctrl.1),
        end: Couple::new(end.0, end.1),
    }
}

const fn arc(x: f32, y: f32, radius: f32, angles: (f32, f32), clockwise: bool, fill: bool) -> Shape {
    Shape::Arc(Arc {
        center: Couple::new(x, y),
        radius,
        start_angle: angles.0,
        end_angle: angles.1,
        clockwise,
        fill,
    })
}

const fn ink(shape: Shape, ink: Ink) -> Instruction {
    Instruction { shape, ink }
}

const LOWER_HALF: (f32, f32) = (PI, 2.0 * PI);
const LEFT_HALF: (f32, f32) = (1.5 * PI, 0.5 * PI);

pub const BODY: Part = Part {
    name: "body",
    instructions: &[
        ink(Shape::Curtain(Curtain {
            flanks: [
                curve((-0.26, 0.6), (-0.36, 0.1), (-0.3, -0.4)),
                curve((0.26, 0.6), (0.36, 0.1), (0.3, -0.4)),
            ],
            floor: -0.5,
        }), Ink::Body),
        // haunch contours
        ink(arc(0.323, -0.05, 0.05, LEFT_HALF, false, true), Ink::Shade),
        ink(arc(0.321, -0.152, 0.05, LEFT_HALF, false, true), Ink::Shade),
    ],
};

pub const HEAD: Part = Part {
    name: "head",
    instructions: &[
        ink(arc(-0.085, 0.6, 0.04, LOWER_HALF, false, true), Ink::Shade),
        ink(arc(0.0, 0.6, 0.04, LOWER_HALF, false, true), Ink::Shade),
        ink(arc(0.08, 0.6, 0.04, LOWER_HALF, false, true), Ink::Shade),
    ],
};

pub const EARS: Part = Part {
    name: "ears",
    instructions: &[
        ink(Shape::Wedge(Wedge {
            curve: curve((-0.2, 0.8), (-0.26, 0.62), (-0.26, 0.60)),
            tip: Couple::new(-0.12233, 0.59843),
        }), Ink::Body),
        ink(Shape::Wedge(Wedge {
            curve: curve((0.2, 0.8), (0.26, 0.62), (0.26, 0.60)),
            tip: Couple::new(0.11565, 0.59803),
        }), Ink::Body),
    ],
};

const WINK: [Couple; 3] = [
    Couple::new(0.16785, 0.45472),
    Couple::new(0.1, 0.4),
    Couple::new(0.16216, 0.37008),
];

pub const EYES: Part = Part {
    name: "eyes",
    instructions: &[
        ink(Shape::Polyline(&WINK), Ink::Black),
        ink(Shape::Circle(Circle {
            center: Couple::new(-0.15789, 0.39961),
            radius: 0.03703,
            segments: 72,
        }), Ink::Black),
    ],
};

pub const MOUTH: Part = Part {
    name: "mouth",
    instructions: &[
        ink(arc(0.05, 0.27, 0.05, LOWER_HALF, false, false), Ink::Shade),
        ink(arc(-0.05, 0.27, 0.05, LOWER_HALF, false, false), Ink::Shade),
    ],
};

const WHISKER_SEGMENTS: [Couple; 8] = [
    Couple::new(-0.25036, 0.32677),
    Couple::new(-0.33997, 0.35827),
    Couple::new(-0.24751, 0.37205),
    Couple::new(-0.33713, 0.41142),
    Couple::new(0.25178, 0.32283),
    Couple::new(0.34566, 0.3563),
    Couple::new(0.25178, 0.37008),
    Couple::new(0.33997, 0.39961),
];

pub const WHISKERS: Part = Part {
    name: "whiskers",
    instructions: &[
        ink(Shape::Segments(&WHISKER_SEGMENTS), Ink::Black),
    ],
};

pub const TAIL: Part = Part {
    name: "tail",
    instructions: &[
        ink(Shape::Band(Band {
            curve: curve((0.3, -0.4), (0.45, -0.35), (0.6, -0.4)),
            line: [Couple::new(0.3, -0.5), Couple::new(0.6, -0.5)],
        }), Ink::Body),
        // tip
        ink(arc(0.6, -0.45, 0.05, (0.5 * PI, 1.5 * PI), true, true), Ink::Shade),
    ],
};

const PAW_CURL: (f32, f32) = (1.2 * PI, 2.2 * PI);

pub const HANDS: Part = Part {
    name: "hands",
    instructions: &[
        ink(Shape::Outline(Outline {
            curve: curve((0.17, 0.0), (0.15, 0.05), (0.17, 0.1)),
            segments: 100,
        }), Ink::Black),
        ink(Shape::Outline(Outline {
            curve: curve((-0.23, 0.0), (-0.24, 0.05), (-0.22, 0.1)),
            segments: 100,
        }), Ink::Black),
        ink(arc(0.19, 0.1, 0.04, PAW_CURL, true, false), Ink::Black),
        ink(arc(-0.2, 0.1, 0.04, PAW_CURL, true, false), Ink::Black),
    ],
};

pub const FEET: Part = Part {
    name: "feet",
    instructions: &[
        ink(arc(-0.31, -0.451, 0.05, LEFT_HALF, false, true), Ink::Body),
        ink(arc(-0.31, -0.451, 0.05, LEFT_HALF, false, false), Ink::Black),
        ink(arc(0.15, -0.46, 0.06, (1.2 * PI, 2.1 * PI), true, false), Ink::Black),
    ],
};

/// Back to front: body and head first, appendages and face details after.
pub const CAT: [Part; 9] = [BODY, HEAD, EARS, EYES, MOUTH, WHISKERS, TAIL, HANDS, FEET];

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    parts: Vec<Part>,
}

impl Scene {
    pub fn cat() -> Self {
        Self { parts: CAT.to_vec() }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Every primitive of every part, in drawing order.
    pub fn tessellate(&self, palette: &Palette) -> Vec<Primitive> {
        let count = self.parts.iter().map(|p| p.instructions.len()).sum();
        let mut primitives = Vec::with_capacity(count);
        for part in &self.parts {
            part.tessellate(palette, &mut primitives);
        }
        primitives
    }

    pub fn log_parts(&self) {
        log::info!(    "|   PART   | INDEX |   SHAPE   |  INK  |");

        for part in &self.parts {
            for (i, instruction) in part.instructions.iter().enumerate() {
                let shape = instruction.shape.as_text();
                let ink = instruction.ink.as_text();
                log::info!("| {:^8} | {:^5} | {:^9} | {:^5} |", part.name, i, shape, ink);
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::cat()
    }
}
