//! Windowed watchdog
//!
//! Arms the IWDT in windowed mode and feeds it as soon as the counter has dropped below the
//! window value. Feeding earlier than that is rejected by the hardware.

#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_semihosting as _;

use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use iwdt_ddl::{
    pac,
    prelude::*,
    watchdog::{Action, ClockDivider, Config},
};

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();

    // The IWDT bus clock must already be running here.

    // 10 kHz / 32 = 312.5 Hz: about 6.5s until reset, feeding allowed in the last 3.3s.
    let config = Config::new(Action::ResetRunInSleep, ClockDivider::Div32, 0x800, 0x400).unwrap();
    let mut iwdt = dp.IWDT.constrain().configure(config).unwrap();
    hprintln!("iwdt armed, period {} ms", config.period().to_millis());

    let mut feeds: u32 = 0;
    loop {
        if iwdt.counter() < config.window() {
            iwdt.feed();
            feeds += 1;
            hprintln!("fed {} times", feeds);
        }
        cortex_m::asm::delay(10_000);
    }
}
