//! # Status LED sequencing
//!
//! Cycles the three-color LED red, green, blue; each color holds for
//! 300 ms and is followed by 300 ms of dark before the next one. At
//! most one color pin is ever asserted.
use crate::hal::gpio::OutputPin;
use crate::hal::time::Milliseconds;
use crate::sched::{Task, TaskTable};

/// Half-phase duration: lit for one, dark for the next.
pub const PHASE_DELAY: Milliseconds = Milliseconds(300);

/// Which color is (or is about to be) lit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum LedPhase {
    Red,
    Green,
    Blue,
}

impl LedPhase {
    pub fn next(self) -> Self {
        match self {
            LedPhase::Red => LedPhase::Green,
            LedPhase::Green => LedPhase::Blue,
            LedPhase::Blue => LedPhase::Red,
        }
    }
}

/// The LED task: owns the three color pins. Suspension freezes it at
/// whatever half-phase it is in; resuming continues from there, there
/// is no reset.
pub struct LedSequencer<P: OutputPin> {
    red: P,
    green: P,
    blue: P,
    phase: LedPhase,
    lit: bool,
}

impl<P: OutputPin> LedSequencer<P> {
    /// Takes the three color pins and blanks them all.
    pub fn new(mut red: P, mut green: P, mut blue: P) -> Self {
        red.set_low();
        green.set_low();
        blue.set_low();
        Self { red, green, blue, phase: LedPhase::Red, lit: false }
    }

    pub fn phase(&self) -> LedPhase { self.phase }

    pub fn is_lit(&self) -> bool { self.lit }

    /// One half-phase: light the current color, or blank it and move
    /// on to the next. Only the current color's pin is ever touched,
    /// so exactly one output is asserted while lit and none while dark.
    pub fn step(&mut self) {
        if self.lit {
            self.current_pin().set_low();
            self.lit = false;
            self.phase = self.phase.next();
        } else {
            self.current_pin().set_high();
            self.lit = true;
        }
    }

    fn current_pin(&mut self) -> &mut P {
        match self.phase {
            LedPhase::Red => &mut self.red,
            LedPhase::Green => &mut self.green,
            LedPhase::Blue => &mut self.blue,
        }
    }
}

impl<P: OutputPin> Task for LedSequencer<P> {
    fn run(&mut self, _table: &mut TaskTable) -> Milliseconds {
        self.step();
        PHASE_DELAY
    }
}
