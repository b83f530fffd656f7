//! Hardware doubles for host-side tests. Shared-handle fakes, so a
//! test can keep a clone of a pin or clock that has been moved into a
//! device under test.

pub mod gpio;
pub mod pwm;
pub mod time;
