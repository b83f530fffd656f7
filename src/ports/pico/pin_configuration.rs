//! Pin assignment and hardware bindings for the Raspberry Pi Pico.
//!
//! LED red/green/blue on GPIO 13/11/12, buttons A/B on GPIO 5/6 with
//! the internal pull-up (pressed reads low), buzzer on GPIO 21, which
//! belongs to PWM slice 2 channel B.
use crate::hal::{gpio, pwm, time};
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::{InputPin as _, OutputPin as _};
use embedded_hal::PwmPin;
use rp2040_hal::{
    fugit::MicrosDurationU64,
    gpio::{DynPinId, FunctionSioInput, FunctionSioOutput, Pin, PullDown, PullUp},
    pwm::{FreeRunning, Pwm2, Slice},
    timer::{Instant, Timer},
};

/// System clock of the RP2040, feeding the PWM counters.
pub const SYSTEM_CLOCK: time::Hertz = time::Hertz(125_000_000);

/// Fixed divider applied to the buzzer's PWM slice.
pub const PWM_CLOCK_DIVIDER: u8 = 4;

/// Counter clock seen by the buzzer slice: 125 MHz / 4 = 31.25 MHz.
pub const PWM_COUNTER_CLOCK: time::Hertz = time::Hertz(SYSTEM_CLOCK.0 / PWM_CLOCK_DIVIDER as u32);

type OutPin = Pin<DynPinId, FunctionSioOutput, PullDown>;
type InPin = Pin<DynPinId, FunctionSioInput, PullUp>;

/// A push-pull output bound to one LED color.
pub struct BoardOutput(pub OutPin);

impl gpio::OutputPin for BoardOutput {
    fn set_low(&mut self) { let _ = self.0.set_low(); }

    fn set_high(&mut self) { let _ = self.0.set_high(); }
}

/// A pull-up button input.
pub struct BoardInput(pub InPin);

impl gpio::InputPin for BoardInput {
    fn is_high(&self) -> bool { self.0.is_high().unwrap_or(true) }

    fn is_low(&self) -> bool { self.0.is_low().unwrap_or(false) }
}

/// The buzzer's PWM slice. The RP2040 counter top is 16 bits, so the
/// 32-bit values from the pure counter math are clamped on the way in;
/// at the siren's frequencies they fit comfortably above ~477 Hz and
/// saturate (flattening pitch, not faulting) below that.
pub struct BuzzerPwm(pub Slice<Pwm2, FreeRunning>);

impl pwm::Pwm for BuzzerPwm {
    fn set(&mut self, params: pwm::PwmParams) {
        self.0.set_top(params.wrap.min(u16::MAX as u32) as u16);
        self.0.channel_b.set_duty(params.level.min(u16::MAX as u32) as u16);
    }
}

/// The RP2040 64-bit microsecond timer as the scheduler's clock.
#[derive(Clone, Copy)]
pub struct BoardClock(pub Timer);

#[derive(Clone, Copy)]
pub struct BoardInstant(pub Instant);

impl time::Instant for BoardInstant {}

impl core::ops::Sub for BoardInstant {
    type Output = time::Milliseconds;
    fn sub(self, rhs: Self) -> time::Milliseconds {
        let millis = self
            .0
            .checked_duration_since(rhs.0)
            .map_or(0, |duration| duration.to_millis());
        time::Milliseconds(millis as u32)
    }
}

impl core::ops::Add<time::Milliseconds> for BoardInstant {
    type Output = Self;
    fn add(self, rhs: time::Milliseconds) -> Self {
        BoardInstant(self.0 + MicrosDurationU64::millis(rhs.0 as u64))
    }
}

impl time::Now for BoardClock {
    type I = BoardInstant;
    fn now(&self) -> BoardInstant { BoardInstant(self.0.get_counter()) }
}

/// Blocking delays off the same timer; cheap to copy, so every button
/// gets its own instance.
#[derive(Clone, Copy)]
pub struct BoardDelay(pub Timer);

impl time::Delay for BoardDelay {
    fn delay_ms(&mut self, duration: time::Milliseconds) { self.0.delay_ms(duration.0); }
}
