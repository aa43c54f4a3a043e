#![no_std]
extern crate alloc;

pub mod computing;
pub mod primitive;
pub mod drawing;
pub mod rendering;
pub mod animation;
pub mod stage;

#[cfg(test)]
mod tests;

#[doc(inline)]
pub use {
    computing::Couple,
    computing::Primitive,
    drawing::Scene,
    rendering::Canvas,
    rendering::RenderError,
    rendering::RenderResult,
    animation::Patrol,
    animation::Phase,
    animation::Scheduler,
    animation::Timeline,
    stage::Settings,
    stage::Stage,
};
