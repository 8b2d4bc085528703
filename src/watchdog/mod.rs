// Copyright 2026 The iwdt-ddl authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Independent watchdog
//!
//! The watchdog is configured exactly once. [`Iwdt::configure`] runs the unlock handshake and,
//! if every write is acknowledged within the poll budget, returns an armed driver. From then on
//! the watchdog can only be fed, stopped and queried. Reconfiguring needs a device reset.
//!
//! The bus clock of the IWDT must be enabled before calling [`Iwdt::configure`].

use core::fmt;

use crate::pac::{IWDT, SR};

mod budget;
mod config;
mod regs;
pub mod sequencer;

pub use budget::{Attempts, PollBudget};
pub use config::{Action, ClockDivider, Config, ConfigError, Mode, MAX_COUNT};
pub use regs::{Key, Registers, Status};
pub use sequencer::{Sequencer, Stage, State};

/// Error returned when arming the watchdog fails
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The peripheral did not acknowledge a configuration step within the poll budget.
    Timeout(Stage),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Timeout(stage) => write!(f, "watchdog timed out at {:?}", stage),
        }
    }
}

/// Not yet configured (type state)
pub struct Unconfigured;

/// Configured and counting (type state)
pub struct Armed {
    config: Config,
}

/// Independent watchdog driver
pub struct Iwdt<R, STATE = Unconfigured> {
    regs: R,
    state: STATE,
}

/// Extension trait to turn the IWDT token into a driver
pub trait IwdtExt {
    fn constrain(self) -> Iwdt<IWDT>;
}

impl IwdtExt for IWDT {
    fn constrain(self) -> Iwdt<IWDT> {
        Iwdt::new(self)
    }
}

impl<R: Registers> Iwdt<R, Unconfigured> {
    pub fn new(regs: R) -> Self {
        Iwdt {
            regs,
            state: Unconfigured,
        }
    }

    /// Arms the watchdog, allowing each acknowledgment wait [`Attempts::DEFAULT`] status reads.
    ///
    /// On error the driver is consumed: the hardware only reopens its configuration registers
    /// after a reset.
    pub fn configure(self, config: Config) -> Result<Iwdt<R, Armed>, Error> {
        self.configure_with(config, Attempts::DEFAULT)
    }

    /// Arms the watchdog with a custom budget for each acknowledgment wait.
    pub fn configure_with<B>(mut self, config: Config, budget: B) -> Result<Iwdt<R, Armed>, Error>
    where
        B: PollBudget + Clone,
    {
        Sequencer::new(&mut self.regs, config, budget).run()?;
        Ok(Iwdt {
            regs: self.regs,
            state: Armed { config },
        })
    }

    /// Releases the register access
    pub fn free(self) -> R {
        self.regs
    }
}

impl<R: Registers> Iwdt<R, Armed> {
    /// Reloads the counter.
    ///
    /// In windowed mode the hardware only accepts this once the counter has dropped below the
    /// window value.
    #[inline]
    pub fn feed(&mut self) {
        self.regs.write_key(Key::Reload);
    }

    /// Stops the counter.
    pub fn stop(&mut self) {
        self.regs.write_key(Key::StopFirst);
        self.regs.write_key(Key::StopSecond);
        #[cfg(feature = "defmt")]
        defmt::debug!("iwdt: stopped");
    }

    /// Whether the counter has reached zero since the flag was last cleared.
    #[inline]
    pub fn is_overflowed(&self) -> bool {
        self.regs.status().is_set(SR::OV)
    }

    /// Whether the down-counter is running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.regs.status().is_set(SR::RUN)
    }

    /// Clears the overflow flag. The other status bits are left alone.
    #[inline]
    pub fn clear_overflow(&mut self) {
        self.regs.clear_overflow();
    }

    /// Current value of the down-counter
    #[inline]
    pub fn counter(&self) -> u16 {
        self.regs.counter()
    }

    pub fn config(&self) -> &Config {
        &self.state.config
    }
}

impl<R: Registers> embedded_hal::watchdog::Watchdog for Iwdt<R, Armed> {
    fn feed(&mut self) {
        Iwdt::feed(self)
    }
}

impl<R: Registers> embedded_hal::watchdog::WatchdogDisable for Iwdt<R, Armed> {
    fn disable(&mut self) {
        self.stop()
    }
}
