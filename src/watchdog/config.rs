// Copyright 2026 The iwdt-ddl authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use core::fmt;

use tock_registers::fields::FieldValue;

use crate::pac::CR;
use crate::time::{MilliSeconds, LSI};

/// Largest value the 12-bit reload and window registers hold.
pub const MAX_COUNT: u16 = 0xFFF;

/// What the watchdog does when the counter reaches zero, and whether it keeps counting while the
/// core sleeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    ResetRunInSleep,
    InterruptRunInSleep,
    ResetPauseInSleep,
    InterruptPauseInSleep,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::ResetRunInSleep,
        Action::InterruptRunInSleep,
        Action::ResetPauseInSleep,
        Action::InterruptPauseInSleep,
    ];

    /// Whether overflow raises the IWDT interrupt rather than resetting the device.
    pub const fn interrupts(self) -> bool {
        matches!(
            self,
            Action::InterruptRunInSleep | Action::InterruptPauseInSleep
        )
    }

    /// Whether the counter pauses while the core sleeps.
    pub const fn pauses_in_sleep(self) -> bool {
        matches!(
            self,
            Action::ResetPauseInSleep | Action::InterruptPauseInSleep
        )
    }

    fn field(self) -> FieldValue<u32, CR::Register> {
        CR::IE.val(u32::from(self.interrupts())) + CR::PAUSE.val(u32::from(self.pauses_in_sleep()))
    }
}

/// Prescaler between the internal low-speed clock and the down-counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockDivider {
    Div4 = 0,
    Div8 = 1,
    Div16 = 2,
    Div32 = 3,
    Div64 = 4,
    Div128 = 5,
    Div256 = 6,
    Div512 = 7,
}

impl ClockDivider {
    /// All dividers, smallest first.
    pub const ALL: [ClockDivider; 8] = [
        ClockDivider::Div4,
        ClockDivider::Div8,
        ClockDivider::Div16,
        ClockDivider::Div32,
        ClockDivider::Div64,
        ClockDivider::Div128,
        ClockDivider::Div256,
        ClockDivider::Div512,
    ];

    /// The number of LSI cycles per counter tick.
    pub const fn divisor(self) -> u32 {
        4 << (self as u32)
    }

    fn field(self) -> FieldValue<u32, CR::Register> {
        CR::PRS.val(self as u32)
    }
}

/// Which configuration branch the sequencer takes, derived from the reload and window values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Feeds are only accepted once the counter has dropped below the window value.
    Windowed,
    /// Feeds are accepted at any time.
    FreeRunning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Reload value does not fit the 12-bit reload register.
    ReloadOutOfRange(u16),
    /// Window value does not fit the 12-bit window register.
    WindowOutOfRange(u16),
    /// No divider can express the requested timeout.
    TimeoutOutOfRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReloadOutOfRange(value) => {
                write!(f, "reload value {:#x} exceeds {:#x}", value, MAX_COUNT)
            }
            ConfigError::WindowOutOfRange(value) => {
                write!(f, "window value {:#x} exceeds {:#x}", value, MAX_COUNT)
            }
            ConfigError::TimeoutOutOfRange => f.write_str("timeout cannot be expressed"),
        }
    }
}

/// Watchdog configuration, applied once by [`Iwdt::configure`](super::Iwdt::configure).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    action: Action,
    divider: ClockDivider,
    reload: u16,
    window: u16,
}

impl Config {
    /// Creates a configuration. `reload` and `window` must both be at most [`MAX_COUNT`].
    ///
    /// A `window` below `reload` selects windowed mode, anything else free-running mode.
    pub fn new(
        action: Action,
        divider: ClockDivider,
        reload: u16,
        window: u16,
    ) -> Result<Self, ConfigError> {
        if reload > MAX_COUNT {
            return Err(ConfigError::ReloadOutOfRange(reload));
        }
        if window > MAX_COUNT {
            return Err(ConfigError::WindowOutOfRange(window));
        }
        Ok(Config {
            action,
            divider,
            reload,
            window,
        })
    }

    /// Creates a free-running configuration that expires no earlier than `timeout`.
    ///
    /// The smallest divider whose reload value fits in 12 bits is picked, which gives the finest
    /// resolution.
    pub fn from_timeout(timeout: MilliSeconds, action: Action) -> Result<Self, ConfigError> {
        let cycles = timeout
            .ticks()
            .checked_mul(LSI.raw())
            .map(|cycles| cycles / 1_000)
            .filter(|&cycles| cycles > 0)
            .ok_or(ConfigError::TimeoutOutOfRange)?;

        for divider in ClockDivider::ALL {
            let divisor = divider.divisor();
            // The counter underflows one tick after reaching zero.
            let reload = (cycles + divisor - 1) / divisor - 1;
            match cast::u16(reload) {
                Ok(reload) if reload <= MAX_COUNT => {
                    return Config::new(action, divider, reload, MAX_COUNT);
                }
                _ => continue,
            }
        }
        Err(ConfigError::TimeoutOutOfRange)
    }

    /// Replaces the window value.
    pub fn with_window(self, window: u16) -> Result<Self, ConfigError> {
        Config::new(self.action, self.divider, self.reload, window)
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn divider(&self) -> ClockDivider {
        self.divider
    }

    pub fn reload(&self) -> u16 {
        self.reload
    }

    pub fn window(&self) -> u16 {
        self.window
    }

    /// Windowed iff the window value is below the reload value.
    pub fn mode(&self) -> Mode {
        if self.window < self.reload {
            Mode::Windowed
        } else {
            Mode::FreeRunning
        }
    }

    /// Time from a feed until the counter underflows, rounded up to whole milliseconds.
    ///
    /// The counter counts `reload` down to zero and underflows on the next tick, so a period
    /// lasts `reload + 1` ticks.
    pub fn period(&self) -> MilliSeconds {
        // At most 0x1000 * 512 * 1000, well inside u32.
        let cycles = (u32::from(self.reload) + 1) * self.divider.divisor();
        let lsi = LSI.raw();
        MilliSeconds::from_ticks((cycles * 1_000 + lsi - 1) / lsi)
    }

    /// The control register value: action bits combined with the prescaler.
    pub fn control(&self) -> FieldValue<u32, CR::Register> {
        self.action.field() + self.divider.field()
    }
}
