use crate::hal::time::{Delay, Instant, Milliseconds, Now};
use std::{cell::Cell, rc::Rc};

/// A point on the simulated clock, in milliseconds since test start.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SimInstant(pub u32);

impl Instant for SimInstant {}

// Wrapping like the real timer, so tests can park the clock next to
// the u32 boundary and step across it.
impl core::ops::Sub for SimInstant {
    type Output = Milliseconds;
    fn sub(self, rhs: Self) -> Milliseconds { Milliseconds(self.0.wrapping_sub(rhs.0)) }
}

impl core::ops::Add<Milliseconds> for SimInstant {
    type Output = Self;
    fn add(self, rhs: Milliseconds) -> Self { SimInstant(self.0.wrapping_add(rhs.0)) }
}

/// Simulated clock shared between everything in a test. It implements
/// both `Now` and `Delay`: a blocking delay simply advances the clock,
/// so a debounce that sleeps 50 ms really costs 50 simulated
/// milliseconds as seen by the scheduler.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now_ms: Rc<Cell<u32>>,
}

impl SimClock {
    pub fn new() -> Self { Self::default() }

    pub fn advance(&self, duration: Milliseconds) {
        self.now_ms.set(self.now_ms.get().wrapping_add(duration.0));
    }

    pub fn elapsed_ms(&self) -> u32 { self.now_ms.get() }
}

impl Now for SimClock {
    type I = SimInstant;
    fn now(&self) -> SimInstant { SimInstant(self.now_ms.get()) }
}

impl Delay for SimClock {
    fn delay_ms(&mut self, duration: Milliseconds) { self.advance(duration); }
}
