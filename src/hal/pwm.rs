//! # PWM slice interface
//!
//! The register-level counter math lives here as pure arithmetic, so
//! the siren's waveform stepping stays unit-testable without hardware.
//! The port programs the resulting values into the actual slice.
use crate::error::Error;
use crate::hal::time::Hertz;

/// Duty cycle as an integer percentage of the PWM period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DutyCycle(pub u8);

/// Counter top (`wrap`) and compare level for one PWM slice, ready to
/// be programmed into the hardware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PwmParams {
    pub wrap: u32,
    pub level: u32,
}

impl PwmParams {
    /// Derives the counter values that make a slice output `target`.
    ///
    /// `wrap` is the truncated ratio of counter clock to target
    /// frequency, and the compare level truncates in turn, so the
    /// error in frequency and duty is bounded by one counter tick --
    /// inaudible on a siren. A target too fast for the counter clock
    /// would yield a zero period and is rejected here, before it can
    /// turn into a divide-by-zero or a dead output at runtime.
    pub fn from_frequency(
        counter_clock: Hertz,
        target: Hertz,
        duty: DutyCycle,
    ) -> Result<Self, Error> {
        if target.0 == 0 {
            return Err(Error::ConfigurationError("PWM target frequency is zero"));
        }
        if duty.0 > 100 {
            return Err(Error::ConfigurationError("PWM duty cycle exceeds 100%"));
        }
        let wrap = counter_clock.0 / target.0;
        if wrap == 0 {
            return Err(Error::ConfigurationError(
                "PWM target frequency exceeds the counter clock",
            ));
        }
        let level = (wrap as u64 * duty.0 as u64 / 100) as u32;
        Ok(Self { wrap, level })
    }
}

/// Interface to a PWM slice driving a single output pin.
pub trait Pwm {
    fn set(&mut self, params: PwmParams);
}

#[cfg(test)]
mod tests {
    use super::*;

    // 125 MHz system clock behind a divide-by-4.
    const COUNTER_CLOCK: Hertz = Hertz(31_250_000);

    #[test]
    fn counter_values_for_the_sweep_endpoints() {
        let params = PwmParams::from_frequency(COUNTER_CLOCK, Hertz(400), DutyCycle(50)).unwrap();
        assert_eq!(params.wrap, 78_125);
        assert_eq!(params.level, 39_062); // truncated, one tick under half

        let params = PwmParams::from_frequency(COUNTER_CLOCK, Hertz(1000), DutyCycle(50)).unwrap();
        assert_eq!(params.wrap, 31_250);
        assert_eq!(params.level, 15_625);
    }

    #[test]
    fn zero_period_is_rejected_not_computed() {
        let too_fast = Hertz(COUNTER_CLOCK.0 * 2);
        assert_eq!(
            PwmParams::from_frequency(COUNTER_CLOCK, too_fast, DutyCycle(50)),
            Err(Error::ConfigurationError(
                "PWM target frequency exceeds the counter clock"
            ))
        );
    }

    #[test]
    fn degenerate_targets_are_rejected() {
        assert!(PwmParams::from_frequency(COUNTER_CLOCK, Hertz(0), DutyCycle(50)).is_err());
        assert!(PwmParams::from_frequency(COUNTER_CLOCK, Hertz(400), DutyCycle(101)).is_err());
    }

    #[test]
    fn full_and_zero_duty_hit_the_period_bounds() {
        let full = PwmParams::from_frequency(COUNTER_CLOCK, Hertz(1000), DutyCycle(100)).unwrap();
        assert_eq!(full.level, full.wrap);
        let silent = PwmParams::from_frequency(COUNTER_CLOCK, Hertz(1000), DutyCycle(0)).unwrap();
        assert_eq!(silent.level, 0);
    }
}
