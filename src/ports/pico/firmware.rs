//! Firmware assembly for the Raspberry Pi Pico: brings up clocks and
//! peripherals, builds the three tasks, and hands control to the
//! scheduler for good.
use super::pin_configuration::*;
use crate::devices::{
    button::Button,
    monitor::ButtonMonitor,
    sequencer::LedSequencer,
    siren::{Siren, SweepConfig},
};
use crate::sched::{Priority, Scheduler};
use rp2040_hal::{
    clocks::init_clocks_and_plls,
    gpio::Pins,
    pwm::Slices,
    timer::Timer,
    watchdog::Watchdog,
    Sio,
};

/// Crystal on the Pico board.
const XOSC_CRYSTAL_FREQ: u32 = 12_000_000;

/// Siren beats LED beats nothing; the button monitor outranks both so
/// input latency is never starved by the blink or sweep cadence.
const SIREN_PRIORITY: Priority = Priority(1);
const LED_PRIORITY: Priority = Priority(2);
const MONITOR_PRIORITY: Priority = Priority(3);

/// Entry point proper. Configuration failures here are startup
/// failures by definition; panicking is the report channel.
pub fn run() -> ! {
    let mut pac = rp2040_hal::pac::Peripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let Ok(clocks) = init_clocks_and_plls(
        XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    ) else {
        panic!("clock initialization failed");
    };

    let sio = Sio::new(pac.SIO);
    let pins = Pins::new(pac.IO_BANK0, pac.PADS_BANK0, sio.gpio_bank0, &mut pac.RESETS);
    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    // Buzzer PWM: slice 2 channel B behind the fixed divide-by-4.
    let slices = Slices::new(pac.PWM, &mut pac.RESETS);
    let mut slice = slices.pwm2;
    slice.set_div_int(PWM_CLOCK_DIVIDER);
    slice.set_div_frac(0);
    slice.channel_b.output_to(pins.gpio21);
    slice.enable();

    let mut led = LedSequencer::new(
        BoardOutput(pins.gpio13.into_push_pull_output().into_dyn_pin()),
        BoardOutput(pins.gpio11.into_push_pull_output().into_dyn_pin()),
        BoardOutput(pins.gpio12.into_push_pull_output().into_dyn_pin()),
    );

    let mut siren = match Siren::new(BuzzerPwm(slice), PWM_COUNTER_CLOCK, SweepConfig::default())
    {
        Ok(siren) => siren,
        Err(error) => panic!("rejected siren configuration: {:?}", error),
    };

    let mut monitor = ButtonMonitor::new(
        Button::new(
            BoardInput(pins.gpio5.into_pull_up_input().into_dyn_pin()),
            BoardDelay(timer),
        ),
        Button::new(
            BoardInput(pins.gpio6.into_pull_up_input().into_dyn_pin()),
            BoardDelay(timer),
        ),
    );

    let mut scheduler = Scheduler::new(BoardClock(timer));
    let led_handle = match scheduler.add("led", LED_PRIORITY, &mut led) {
        Ok(handle) => handle,
        Err(error) => panic!("failed to register LED task: {:?}", error),
    };
    let siren_handle = match scheduler.add("siren", SIREN_PRIORITY, &mut siren) {
        Ok(handle) => handle,
        Err(error) => panic!("failed to register siren task: {:?}", error),
    };
    monitor.control(led_handle, siren_handle);
    if let Err(error) = scheduler.add("buttons", MONITOR_PRIORITY, &mut monitor) {
        panic!("failed to register button monitor: {:?}", error);
    }

    fw_info!("-- Klaxon initialised, starting scheduler --");
    scheduler.run(BoardDelay(timer))
}
