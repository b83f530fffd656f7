//! # Debounced button input
//!
//! Mechanical switches chatter; a single physical press can read as a
//! burst of edges. This reader reports one confirmed press-and-release
//! event per physical press, and nothing else.
use crate::hal::gpio::InputPin;
use crate::hal::time::{Delay, Milliseconds};

/// Settling time before a press is trusted.
pub const SETTLE_DELAY: Milliseconds = Milliseconds(50);

/// Poll interval while waiting for the button to be released, short
/// enough to feel instant, long enough not to peg the processor.
const RELEASE_POLL: Milliseconds = Milliseconds(1);

/// One pull-up push button. Pressed reads low.
pub struct Button<P: InputPin, D: Delay> {
    pin: P,
    delay: D,
}

impl<P: InputPin, D: Delay> Button<P, D> {
    pub fn new(pin: P, delay: D) -> Self { Self { pin, delay } }

    /// Returns `true` exactly once per physical press-release cycle.
    ///
    /// An unasserted pin, or a press that bounces back inside the
    /// settle window, returns `false` immediately. A settled press
    /// blocks until the button is released before reporting, so a
    /// press is never reported while still held and can never toggle
    /// twice off one contact. While one button is held, the owning
    /// task makes no progress and the other button goes unchecked --
    /// an accepted limitation of this reader, not a bug.
    pub fn poll(&mut self) -> bool {
        if self.pin.is_high() {
            return false;
        }
        self.delay.delay_ms(SETTLE_DELAY);
        if self.pin.is_high() {
            // Contact bounce, not a press.
            return false;
        }
        while self.pin.is_low() {
            self.delay.delay_ms(RELEASE_POLL);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::doubles::{gpio::MockInputPin, time::SimClock};

    fn button(pin: &MockInputPin, clock: &SimClock) -> Button<MockInputPin, SimClock> {
        Button::new(pin.clone(), clock.clone())
    }

    #[test]
    fn an_idle_button_reports_nothing_and_costs_nothing() {
        let pin = MockInputPin::new();
        let clock = SimClock::new();
        let mut button = button(&pin, &clock);

        assert!(!button.poll());
        assert_eq!(clock.elapsed_ms(), 0);
    }

    #[test]
    fn a_press_shorter_than_the_settle_window_is_noise() {
        let pin = MockInputPin::new();
        let clock = SimClock::new();
        let mut button = button(&pin, &clock);

        // Low on first read, back high by the settle re-read.
        pin.queue_levels(&[false, true]);
        assert!(!button.poll());
        assert_eq!(clock.elapsed_ms(), SETTLE_DELAY.0);
    }

    #[test]
    fn a_settled_press_reports_exactly_once() {
        let pin = MockInputPin::new();
        let clock = SimClock::new();
        let mut button = button(&pin, &clock);

        pin.queue_press(0);
        assert!(button.poll());
        // The press was consumed; nothing further to report.
        assert!(!button.poll());
    }

    #[test]
    fn a_press_held_arbitrarily_long_still_reports_once() {
        let pin = MockInputPin::new();
        let clock = SimClock::new();
        let mut button = button(&pin, &clock);

        // Held for 500 release polls past the settle window.
        pin.queue_press(500);
        assert!(button.poll());
        assert!(!button.poll());
        // The reader blocked for the whole hold.
        assert!(clock.elapsed_ms() >= SETTLE_DELAY.0 + 500);
    }
}
