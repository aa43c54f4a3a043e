use crate::*;
use crate::drawing::Palette;
use crate::rendering::opaque;

use alloc::{vec, vec::Vec};

use rgb::{ComponentBytes, RGBA8};

const SIDE: usize = 200;

/// The figure drawn 1:1 in NDC around the canvas center.
fn centered_stage() -> Stage {
    let mut stage = Stage::new(Settings {
        size: (SIDE, SIDE),
        ..Settings::default()
    }).unwrap();
    stage.set_argument("scale", Couple::new(1.0, 1.0)).unwrap();
    stage.set_argument("start", Couple::new(0.0, 0.0)).unwrap();
    stage
}

fn pixel(frame: &[RGBA8], x: usize, y: usize) -> RGBA8 {
    frame[y * SIDE + x]
}

#[test]
fn redraw_paints_the_figure_over_the_background() {
    let mut stage = centered_stage();
    let mut frame = vec![RGBA8::default(); stage.frame_len()];
    stage.redraw(&mut frame).unwrap();

    let palette = Palette::default();
    let white = RGBA8::new(255, 255, 255, 255);

    assert_eq!(pixel(&frame, 5, 5), white);
    assert_eq!(pixel(&frame, 195, 5), white);
    // belly
    assert_eq!(pixel(&frame, 100, 110), opaque(palette.body));
    // tail, right of the body
    assert_eq!(pixel(&frame, 145, 145), opaque(palette.body));
    // middle head lobe, drawn over the body
    assert_eq!(pixel(&frame, 100, 42), opaque(palette.shade));
}

#[test]
fn redraw_follows_the_patrol() {
    let mut stage = Stage::new(Settings {
        size: (SIDE, SIDE),
        ..Settings::default()
    }).unwrap();
    let body = opaque(Palette::default().body);
    let mut frame = vec![RGBA8::default(); stage.frame_len()];

    // bottom left corner: the belly sits at (12.5, 182.5)
    stage.redraw(&mut frame).unwrap();
    assert_eq!(pixel(&frame, 12, 182), body);

    let mut timeline = Timeline::new();
    for _ in 0..64 {
        assert!(timeline.next_tick());
        stage.tick(&mut timeline);
    }
    assert_eq!(stage.patrol().phase(), Phase::Descend);

    // top left corner: the belly moved up by 6.3 * 0.25 NDC
    stage.redraw(&mut frame).unwrap();
    assert_eq!(pixel(&frame, 12, 182), RGBA8::new(255, 255, 255, 255));
    assert_eq!(pixel(&frame, 12, 25), body);
}

#[test]
fn run_produces_one_frame_per_tick() {
    let mut stage = Stage::new(Settings {
        size: (64, 64),
        ..Settings::default()
    }).unwrap();
    let mut timeline = Timeline::new();
    let mut phases = Vec::new();

    let frames = stage.run(&mut timeline, 70, |frame, patrol| {
        assert_eq!(frame.len(), 64 * 64);
        phases.push(patrol.phase());
        Ok(())
    }).unwrap();

    assert_eq!(frames, 70);
    assert_eq!(phases[62], Phase::Climb);
    assert_eq!(phases[63], Phase::Descend);
    assert_eq!(timeline.now(), 69 * animation::TICK_PERIOD);
}

#[test]
fn stopped_stage_draws_the_armed_tick_only() {
    let mut stage = Stage::new(Settings {
        size: (32, 32),
        ..Settings::default()
    }).unwrap();
    stage.patrol_mut().stop();
    let start = stage.patrol().position();

    let mut timeline = Timeline::new();
    let frames = stage.run(&mut timeline, 10, |_, _| Ok(())).unwrap();

    assert_eq!(frames, 1);
    assert!(timeline.is_idle());
    assert_eq!(stage.patrol().position(), start + Phase::Climb.velocity());
}

#[test]
fn frame_errors_abort_the_run() {
    let mut stage = Stage::new(Settings {
        size: (16, 16),
        ..Settings::default()
    }).unwrap();
    let mut timeline = Timeline::new();
    let result = stage.run(&mut timeline, 10, |_, _| Err(RenderError::CanvasTooSmall));
    assert_eq!(result, Err(RenderError::CanvasTooSmall));
}

#[test]
fn named_arguments() {
    let mut stage = Stage::new(Settings::default()).unwrap();
    assert_eq!(stage.get_argument("size"), Some(Couple::new(2000.0, 2000.0)));
    assert_eq!(stage.get_argument("position"), Some(animation::START));
    assert_eq!(stage.get_argument("colour"), None);

    stage.set_argument("size", Couple::new(300.0, 100.0)).unwrap();
    assert_eq!(stage.frame_len(), 300 * 100);
    assert_eq!(stage.settings().size, (300, 100));

    stage.set_argument("start", Couple::new(1.0, 2.0)).unwrap();
    assert_eq!(stage.patrol().position(), Couple::new(1.0, 2.0));
    assert_eq!(stage.patrol().phase(), Phase::Climb);

    assert_eq!(stage.set_argument("size", Couple::new(0.0, 5.0)), Err(RenderError::EmptyCanvas));
    assert_eq!(stage.set_argument("speed", Couple::new(1.0, 1.0)), Err(RenderError::UnknownArgument));
}

#[test]
fn short_buffers_are_rejected() {
    let mut stage = centered_stage();
    let mut frame = vec![RGBA8::default(); stage.frame_len() - 1];
    assert_eq!(stage.redraw(&mut frame), Err(RenderError::CanvasTooSmall));
}

#[test]
fn frames_encode_as_png() {
    let mut stage = centered_stage();
    let mut frame = vec![RGBA8::default(); stage.frame_len()];
    stage.redraw(&mut frame).unwrap();

    let mut png_buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_buf, SIDE as u32, SIDE as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(frame.as_bytes()).unwrap();
    }

    assert_eq!(&png_buf[..8], b"\x89PNG\r\n\x1a\n");
}
