//! Error type for the firmware as a whole.

/// Failure modes of the klaxon firmware.
///
/// Configuration errors cover anything that must be rejected before it
/// reaches hardware (a PWM period of zero, a full task table). They
/// only ever surface during startup, before the scheduler runs.
/// Programming faults such as an unregistered task handle are asserted
/// in development builds rather than carried as values; in steady
/// state the firmware has no recoverable runtime errors at all.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Error {
    ConfigurationError(&'static str),
}
