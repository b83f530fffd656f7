//! # Simple GPIO interface
//!
//! Separate interfaces to Input and Output pins, implemented by the
//! port for whatever pin types the board's HAL exposes.
//!
//! The LED color pins are outputs; the two buttons are inputs with an
//! internal pull-up, so a pressed button reads low.

/// Interface to a writable pin.
pub trait OutputPin {
    fn set_low(&mut self);
    fn set_high(&mut self);
}

/// Interface to a readable pin.
pub trait InputPin {
    fn is_high(&self) -> bool;
    fn is_low(&self) -> bool;
}
