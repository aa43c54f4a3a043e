use crate::computing::Couple;

use core::time::Duration;

/// ~60 Hz
pub const TICK_PERIOD: Duration = Duration::from_millis(16);

/// The bottom left corner the patrol starts from.
pub const START: Couple = Couple::new(-3.5, -3.3);

/// One leg of the patrol path.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// straight up the left edge
    Climb,
    /// diagonal down to the bottom middle
    Descend,
    /// diagonal up to the top right
    Ascend,
    /// straight down the right edge
    Drop,
    /// back left along the bottom
    Return,
}

impl Phase {
    pub fn index(self) -> u8 {
        match self {
            Phase::Climb => 0,
            Phase::Descend => 1,
            Phase::Ascend => 2,
            Phase::Drop => 3,
            Phase::Return => 4,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Phase::Climb => Phase::Descend,
            Phase::Descend => Phase::Ascend,
            Phase::Ascend => Phase::Drop,
            Phase::Drop => Phase::Return,
            Phase::Return => Phase::Climb,
        }
    }

    /// Displacement applied on every tick.
    pub fn velocity(self) -> Couple {
        match self {
            Phase::Climb => Couple::new(0.0, 0.1),
            Phase::Descend => Couple::new(0.014, -0.024),
            Phase::Ascend => Couple::new(0.013, 0.023),
            Phase::Drop => Couple::new(0.0, -0.1),
            Phase::Return => Couple::new(-0.05, 0.0),
        }
    }

    /// The clamped position if `p` satisfies this phase's exit condition.
    pub fn exit(self, p: Couple) -> Option<Couple> {
        match self {
            Phase::Climb if p.y >= 3.0 => Some(Couple::new(p.x, 3.0)),
            Phase::Descend if p.y <= -2.9 && p.x >= -0.07 => Some(Couple::new(-0.07, -2.9)),
            Phase::Ascend if p.y >= 3.0 && p.x >= 3.3 => Some(Couple::new(3.3, 3.0)),
            Phase::Drop if p.y <= -3.3 => Some(Couple::new(p.x, -3.3)),
            Phase::Return if p.x <= -3.5 => Some(Couple::new(-3.5, p.y)),
            _ => None,
        }
    }

    pub fn as_text(self) -> &'static str {
        match self {
            Phase::Climb => "Climb",
            Phase::Descend => "Descend",
            Phase::Ascend => "Ascend",
            Phase::Drop => "Drop",
            Phase::Return => "Return",
        }
    }
}

/// Whatever runs the callbacks: a window toolkit, a frame loop, a test.
pub trait Scheduler {
    fn request_redraw(&mut self);

    /// Arms the next tick `delay` from now.
    fn schedule_tick(&mut self, delay: Duration);
}

/// Position driver walking the five phases forever while active.
///
/// A new patrol expects its first tick to be armed already, the way a
/// toolkit fires an initial zero-delay timer.
#[derive(Debug, Clone, PartialEq)]
pub struct Patrol {
    position: Couple,
    phase: Phase,
    active: bool,
    /// a tick is scheduled and has not fired yet
    armed: bool,
    period: Duration,
}

impl Patrol {
    pub fn new(start: Couple) -> Self {
        Self {
            position: start,
            phase: Phase::Climb,
            active: true,
            armed: true,
            period: TICK_PERIOD,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn position(&self) -> Couple {
        self.position
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Moves one step along the current phase; returns the new phase on
    /// a transition.
    pub fn advance(&mut self) -> Option<Phase> {
        self.position += self.phase.velocity();

        let clamped = self.phase.exit(self.position)?;
        let from = self.phase;
        self.position = clamped;
        self.phase = from.next();

        log::debug!(
            "{} -> {} at ({}, {})",
            from.as_text(),
            self.phase.as_text(),
            clamped.x,
            clamped.y,
        );

        Some(self.phase)
    }

    /// Timer callback: advance, ask for a redraw, then re-arm while active.
    ///
    /// A tick armed before [`Patrol::stop`] still moves and redraws once;
    /// only the re-arm is skipped.
    pub fn tick<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.armed = false;

        self.advance();
        log::trace!("tick: {} ({}, {})", self.phase.as_text(), self.position.x, self.position.y);

        scheduler.request_redraw();
        if self.active {
            scheduler.schedule_tick(self.period);
            self.armed = true;
        }
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Re-arms the timer unless a tick is still pending, so a scheduler
    /// never holds two ticks for the same patrol.
    pub fn resume<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.active {
            return;
        }

        self.active = true;
        if !self.armed {
            scheduler.schedule_tick(self.period);
            self.armed = true;
        }
    }
}

impl Default for Patrol {
    fn default() -> Self {
        Self::new(START)
    }
}

/// Virtual clock holding at most one pending tick, for headless runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    now: Duration,
    due: Option<Duration>,
    redraw: bool,
}

impl Timeline {
    /// The first tick is due immediately.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            due: Some(Duration::ZERO),
            redraw: false,
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn due(&self) -> Option<Duration> {
        self.due
    }

    /// Jumps to the pending tick and consumes it.
    pub fn next_tick(&mut self) -> bool {
        match self.due.take() {
            Some(at) => {
                self.now = at;
                true
            },
            None => false,
        }
    }

    pub fn take_redraw(&mut self) -> bool {
        core::mem::replace(&mut self.redraw, false)
    }

    pub fn is_idle(&self) -> bool {
        self.due.is_none() && !self.redraw
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for Timeline {
    fn request_redraw(&mut self) {
        self.redraw = true;
    }

    fn schedule_tick(&mut self, delay: Duration) {
        self.due = Some(self.now + delay);
    }
}
