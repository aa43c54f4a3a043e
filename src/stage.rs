use crate::animation::{Patrol, Scheduler, Timeline, START, TICK_PERIOD};
use crate::computing::{Color, Couple, Float, Primitive, WHITE};
use crate::drawing::{Palette, Scene};
use crate::rendering::{Canvas, RenderError, RenderResult, Transform};

use core::time::Duration;
use alloc::{vec, vec::Vec};

use rgb::RGBA8;

/// Compiled-in configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub title: &'static str,
    /// canvas size in pixels
    pub size: (usize, usize),
    pub scale: Couple,
    pub start: Couple,
    pub tick_period: Duration,
    /// stroke width in pixels
    pub line_width: Float,
    pub background: Color,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Cat with Integrated Ears",
            size: (2000, 2000),
            scale: Couple::new(0.25, 0.25),
            start: START,
            tick_period: TICK_PERIOD,
            line_width: 1.0,
            background: WHITE,
            palette: Palette::default(),
        }
    }
}

/// Owns the patrol state and the renderer; the window side only calls
/// [`Stage::tick`] from its timer and [`Stage::redraw`] from its paint
/// callback.
pub struct Stage {
    settings: Settings,
    scene: Scene,
    patrol: Patrol,
    canvas: Canvas,
    primitives: Vec<Primitive>,
}

impl Stage {
    pub fn new(settings: Settings) -> RenderResult<Self> {
        Self::with_scene(settings, Scene::cat())
    }

    pub fn with_scene(settings: Settings, scene: Scene) -> RenderResult<Self> {
        let (w, h) = settings.size;
        let mut canvas = Canvas::new(w, h)?;
        canvas.set_line_width(settings.line_width);

        // the figure never changes shape, only its transform does
        let primitives = scene.tessellate(&settings.palette);
        let patrol = Patrol::new(settings.start).with_period(settings.tick_period);

        Ok(Self {
            settings,
            scene,
            patrol,
            canvas,
            primitives,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn patrol(&self) -> &Patrol {
        &self.patrol
    }

    pub fn patrol_mut(&mut self) -> &mut Patrol {
        &mut self.patrol
    }

    /// Pixels needed by [`Stage::redraw`].
    pub fn frame_len(&self) -> usize {
        self.canvas.width() * self.canvas.height()
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.settings.scale, self.patrol.position())
    }

    pub fn tick<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.patrol.tick(scheduler);
    }

    /// Clears `dst` and draws the whole figure at the current position.
    pub fn redraw(&mut self, dst: &mut [RGBA8]) -> RenderResult<()> {
        let stride = self.canvas.width();
        self.canvas.clear(dst, stride, self.settings.background)?;
        let transform = self.transform();
        self.canvas.render::<4, 16>(&self.primitives, transform, dst, stride)
    }

    /// Runs at most `ticks` ticks on `timeline`, handing every redrawn frame
    /// to `on_frame`. Returns the number of frames produced.
    pub fn run<F>(&mut self, timeline: &mut Timeline, ticks: usize, mut on_frame: F) -> RenderResult<usize>
    where
        F: FnMut(&[RGBA8], &Patrol) -> RenderResult<()>,
    {
        let mut frame = vec![RGBA8::default(); self.frame_len()];
        let mut frames = 0;

        for _ in 0..ticks {
            if !timeline.next_tick() {
                log::debug!("patrol stopped at {:?}", timeline.now());
                break;
            }

            self.tick(timeline);

            if timeline.take_redraw() {
                self.redraw(&mut frame)?;
                on_frame(&frame, &self.patrol)?;
                frames += 1;
            }
        }

        Ok(frames)
    }

    pub fn get_argument(&self, name: &str) -> Option<Couple> {
        match name {
            "size" => {
                let (w, h) = self.settings.size;
                Some(Couple::new(w as Float, h as Float))
            },
            "scale" => Some(self.settings.scale),
            "start" => Some(self.settings.start),
            "position" => Some(self.patrol.position()),
            _ => None,
        }
    }

    /// `size` reallocates the canvas, `start` restarts the patrol from
    /// there, `scale` applies from the next redraw.
    pub fn set_argument(&mut self, name: &str, value: Couple) -> RenderResult<()> {
        match name {
            "size" => {
                let size = (value.x as usize, value.y as usize);
                if size != self.settings.size {
                    let mut canvas = Canvas::new(size.0, size.1)?;
                    canvas.set_line_width(self.settings.line_width);
                    self.canvas = canvas;
                    self.settings.size = size;
                }
            },
            "scale" => self.settings.scale = value,
            "start" => {
                self.settings.start = value;
                self.patrol = Patrol::new(value).with_period(self.settings.tick_period);
            },
            _ => return Err(RenderError::UnknownArgument),
        }

        Ok(())
    }

    pub fn log_settings(&self) {
        let s = &self.settings;
        log::info!("{}: {}x{} px, scale {}, tick {:?}", s.title, s.size.0, s.size.1, s.scale.x, s.tick_period);
        self.scene.log_parts();
    }
}
