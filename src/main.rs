#![cfg_attr(test, allow(unused_attributes))]
#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]

#[cfg(all(target_arch = "arm", feature = "pico"))]
use defmt_rtt as _;
#[cfg(all(target_arch = "arm", feature = "pico"))]
use panic_probe as _;

/// Second stage bootloader, prepended so the RP2040 mask ROM can find
/// and launch the firmware from external flash.
#[cfg(all(target_arch = "arm", feature = "pico"))]
#[link_section = ".boot2"]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_W25Q080;

#[cfg(all(target_arch = "arm", feature = "pico"))]
#[cortex_m_rt::entry]
fn main() -> ! { klaxon_lib::ports::pico::firmware::run() }

// Host builds produce the library and its tests; the binary is only
// meaningful for a board target selected through a port feature.
#[cfg(not(target_arch = "arm"))]
fn main() {}
