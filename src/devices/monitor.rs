//! # Button-driven task control
//!
//! The highest-priority task in the firmware. It scans the two
//! buttons every 100 ms; a confirmed press on button A pauses or
//! resumes the LED task, button B does the same for the siren. The
//! controlled tasks never find out: suspension happens entirely in the
//! scheduler's table, keyed by the handles this monitor holds.
use crate::devices::button::Button;
use crate::hal::gpio::InputPin;
use crate::hal::time::{Delay, Milliseconds};
use crate::sched::{Task, TaskHandle, TaskTable};

/// Pause between button scans, bounding how much processor time input
/// checking consumes.
pub const SCAN_DELAY: Milliseconds = Milliseconds(100);

/// Tracks whether this controller has suspended its target. The
/// monitor is the single writer; one press flips it exactly once.
#[derive(Clone, Copy, Debug)]
struct Toggle {
    target: TaskHandle,
    suspended: bool,
}

impl Toggle {
    fn new(target: TaskHandle) -> Self { Self { target, suspended: false } }

    fn flip(&mut self, table: &mut TaskTable) {
        self.suspended = !self.suspended;
        if self.suspended {
            table.suspend(self.target);
        } else {
            table.resume(self.target);
        }
    }
}

/// The button monitor task.
pub struct ButtonMonitor<A: InputPin, B: InputPin, D: Delay> {
    led_button: Button<A, D>,
    siren_button: Button<B, D>,
    led: Option<Toggle>,
    siren: Option<Toggle>,
}

impl<A: InputPin, B: InputPin, D: Delay> ButtonMonitor<A, B, D> {
    pub fn new(led_button: Button<A, D>, siren_button: Button<B, D>) -> Self {
        Self { led_button, siren_button, led: None, siren: None }
    }

    /// Points the monitor at the two tasks it controls. The handles
    /// are non-owning; the scheduler keeps the tasks themselves.
    pub fn control(&mut self, led: TaskHandle, siren: TaskHandle) {
        self.led = Some(Toggle::new(led));
        self.siren = Some(Toggle::new(siren));
    }

    pub fn led_suspended(&self) -> bool {
        self.led.map_or(false, |toggle| toggle.suspended)
    }

    pub fn siren_suspended(&self) -> bool {
        self.siren.map_or(false, |toggle| toggle.suspended)
    }

    /// One scan pass. The two checks run back to back but are
    /// logically independent; only the blocking wait-for-release
    /// inside a single button's debounce can delay the other check.
    fn scan(&mut self, table: &mut TaskTable) {
        if self.led_button.poll() {
            if let Some(toggle) = self.led.as_mut() {
                toggle.flip(table);
            }
        }
        if self.siren_button.poll() {
            if let Some(toggle) = self.siren.as_mut() {
                toggle.flip(table);
            }
        }
    }
}

impl<A: InputPin, B: InputPin, D: Delay> Task for ButtonMonitor<A, B, D> {
    fn run(&mut self, table: &mut TaskTable) -> Milliseconds {
        self.scan(table);
        SCAN_DELAY
    }
}
