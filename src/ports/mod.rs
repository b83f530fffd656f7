//! Full project ports for specific boards. A port binds the `hal`
//! traits to a real HAL, fixes the pin map and priorities, and
//! assembles the three tasks around the scheduler.

#[cfg(feature = "pico")]
port!(pico: [firmware, pin_configuration,]);
