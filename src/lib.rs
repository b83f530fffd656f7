//! # Klaxon Firmware Library
//!
//! This crate contains all functionality for the klaxon alarm
//! firmware in library form: a status LED sequencer, a PWM siren
//! waveform generator and a button monitor that can pause and resume
//! either of the other two, dispatched by a small priority scheduler.
//!
//! Everything here is generic over the interfaces in [`hal`]; board
//! specifics live in [`ports`], which means the whole task model runs
//! and is tested on the host against the doubles in `hal::doubles`.
#![cfg_attr(target_arch = "arm", no_std)]

extern crate static_assertions;

#[macro_use]
pub mod utilities {
    mod macros;
}

pub mod devices;
pub mod error;
pub mod hal;
pub mod ports;
pub mod sched;
