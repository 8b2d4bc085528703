//! Watchdog overflow without reset
//!
//! Configures the IWDT to flag an overflow instead of resetting, then polls the overflow flag.
//! Enable the IWDT line in the NVIC as well to get an interrupt.

#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_halt as _;

use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use iwdt_ddl::{
    pac,
    prelude::*,
    watchdog::{Action, Config},
};

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();

    let config = Config::from_timeout(500.millis(), Action::InterruptRunInSleep).unwrap();
    let mut iwdt = match dp.IWDT.constrain().configure(config) {
        Ok(iwdt) => iwdt,
        Err(e) => {
            hprintln!("{}", e);
            loop {
                cortex_m::asm::wfi();
            }
        }
    };

    loop {
        if iwdt.is_overflowed() {
            iwdt.clear_overflow();
            hprintln!("overflow, running: {}", iwdt.is_running());
        }
    }
}
