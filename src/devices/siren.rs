//! # Siren waveform generation
//!
//! A triangular frequency sweep with an asymmetric cadence: climb from
//! the floor to the ceiling in fixed steps, fall back down, then hold
//! a longer pause before the next climb. The pause is what turns a
//! symmetric triangle wave into the familiar "whoop".
use crate::error::Error;
use crate::hal::pwm::{DutyCycle, Pwm, PwmParams};
use crate::hal::time::{Hertz, Milliseconds, U32Ext};
use crate::sched::{Task, TaskTable};

/// Sweep direction; flips at the bounds, never resets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Direction {
    Ascending,
    Descending,
}

/// Sweep parameters. The defaults reproduce the stock siren: 400 Hz to
/// 1000 Hz in 10 Hz steps, one step every 10 ms, 100 ms extra pause at
/// the bottom of each cycle, 50% duty throughout.
#[derive(Clone, Copy, Debug)]
pub struct SweepConfig {
    pub floor: Hertz,
    pub ceiling: Hertz,
    pub step: Hertz,
    pub step_delay: Milliseconds,
    pub cycle_pause: Milliseconds,
    pub duty: DutyCycle,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            floor: 400.hz(),
            ceiling: 1000.hz(),
            step: 10.hz(),
            step_delay: 10.ms(),
            cycle_pause: 100.ms(),
            duty: DutyCycle(50),
        }
    }
}

/// The siren task: owns its sweep state and the PWM slice. Nothing
/// else touches the PWM peripheral.
pub struct Siren<P: Pwm> {
    pwm: P,
    counter_clock: Hertz,
    config: SweepConfig,
    frequency: Hertz,
    direction: Direction,
}

impl<P: Pwm> Siren<P> {
    /// Builds a siren after validating the sweep against the counter
    /// clock. Both endpoints must yield a non-zero PWM period and the
    /// step must land exactly on both bounds; anything else is a
    /// configuration error caught here, before the hardware is ever
    /// programmed.
    pub fn new(pwm: P, counter_clock: Hertz, config: SweepConfig) -> Result<Self, Error> {
        if config.floor.0 == 0 || config.floor >= config.ceiling {
            return Err(Error::ConfigurationError("siren sweep range is empty or inverted"));
        }
        if config.step.0 == 0 || (config.ceiling.0 - config.floor.0) % config.step.0 != 0 {
            return Err(Error::ConfigurationError("sweep step does not divide the sweep range"));
        }
        PwmParams::from_frequency(counter_clock, config.floor, config.duty)?;
        PwmParams::from_frequency(counter_clock, config.ceiling, config.duty)?;
        Ok(Self {
            pwm,
            counter_clock,
            config,
            frequency: config.floor,
            direction: Direction::Ascending,
        })
    }

    pub fn frequency(&self) -> Hertz { self.frequency }

    pub fn direction(&self) -> Direction { self.direction }

    /// Emits the current frequency, then advances the sweep by one
    /// step. Returns the delay before the next step; the pass that
    /// emits the floor frequency at the end of a descent returns the
    /// step delay plus the cycle pause.
    pub fn step(&mut self) -> Milliseconds {
        match PwmParams::from_frequency(self.counter_clock, self.frequency, self.config.duty) {
            Ok(params) => self.pwm.set(params),
            // The bounds were validated at construction, so a failure
            // here cannot happen; skip the emit rather than feed the
            // slice a zero period.
            Err(_) => fw_warn!("skipped unrepresentable siren frequency {=u32} Hz", self.frequency.0),
        }
        self.advance()
    }

    fn advance(&mut self) -> Milliseconds {
        match self.direction {
            Direction::Ascending => {
                if self.frequency >= self.config.ceiling {
                    self.direction = Direction::Descending;
                    self.frequency = Hertz(self.frequency.0 - self.config.step.0);
                } else {
                    self.frequency = Hertz(self.frequency.0 + self.config.step.0);
                }
                self.config.step_delay
            }
            Direction::Descending => {
                if self.frequency <= self.config.floor {
                    self.direction = Direction::Ascending;
                    self.config.step_delay + self.config.cycle_pause
                } else {
                    self.frequency = Hertz(self.frequency.0 - self.config.step.0);
                    self.config.step_delay
                }
            }
        }
    }
}

impl<P: Pwm> Task for Siren<P> {
    fn run(&mut self, _table: &mut TaskTable) -> Milliseconds { self.step() }
}
