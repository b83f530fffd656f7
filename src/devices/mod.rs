//! Business logic for the firmware's three tasks, generic over the
//! `hal` traits. Board specifics (pins, clocks, PWM slices) are
//! handled in the `ports` module.

pub mod button;
pub mod monitor;
pub mod sequencer;
pub mod siren;
