// Copyright 2026 The iwdt-ddl authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use tock_registers::fields::FieldValue;
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::LocalRegisterCopy;

use super::config::MAX_COUNT;
use crate::pac::{ARR, CNT, CR, IWDT, KR, SR, WINR};

/// Snapshot of the status register.
pub type Status = LocalRegisterCopy<u32, SR::Register>;

/// Values accepted by the key register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Key {
    /// Starts the counter.
    Start = 0xCCCC,
    /// Opens the configuration registers for writing.
    Unlock = 0x5555,
    /// Reloads the counter. Also closes the configuration registers.
    Reload = 0xAAAA,
    /// First half of the stop sequence.
    StopFirst = 0x6666,
    /// Second half of the stop sequence.
    StopSecond = 0x9999,
}

impl Key {
    pub const ALL: [Key; 5] = [
        Key::Start,
        Key::Unlock,
        Key::Reload,
        Key::StopFirst,
        Key::StopSecond,
    ];

    pub const fn value(self) -> u16 {
        self as u16
    }

    /// The matching value of the key register field.
    pub fn field(self) -> FieldValue<u32, KR::Register> {
        match self {
            Key::Start => KR::KEY::Start,
            Key::Unlock => KR::KEY::Unlock,
            Key::Reload => KR::KEY::Reload,
            Key::StopFirst => KR::KEY::StopFirst,
            Key::StopSecond => KR::KEY::StopSecond,
        }
    }
}

/// Access to the IWDT registers.
///
/// Implemented for the [`IWDT`] token against the real hardware. Any other implementation is
/// expected to model the same register block, e.g. a simulated peripheral on the host.
pub trait Registers {
    /// Writes a key to the key register.
    fn write_key(&mut self, key: Key);

    /// Writes the whole control register.
    fn write_control(&mut self, control: FieldValue<u32, CR::Register>);

    /// Writes the 12-bit reload value.
    fn write_reload(&mut self, reload: u16);

    /// Writes the 12-bit window value.
    fn write_window(&mut self, window: u16);

    /// Reads the status register.
    fn status(&self) -> Status;

    /// Clears the latched overflow flag.
    fn clear_overflow(&mut self);

    /// Reads the current value of the down-counter.
    fn counter(&self) -> u16;
}

impl Registers for IWDT {
    #[inline]
    fn write_key(&mut self, key: Key) {
        self.kr.write(key.field());
    }

    #[inline]
    fn write_control(&mut self, control: FieldValue<u32, CR::Register>) {
        self.cr.write(control);
    }

    #[inline]
    fn write_reload(&mut self, reload: u16) {
        self.arr.write(ARR::ARR.val(u32::from(reload)));
    }

    #[inline]
    fn write_window(&mut self, window: u16) {
        self.winr.write(WINR::WINR.val(u32::from(window)));
    }

    #[inline]
    fn status(&self) -> Status {
        self.sr.extract()
    }

    #[inline]
    fn clear_overflow(&mut self) {
        // The remaining status bits are driven by hardware and ignore writes.
        self.sr.modify(SR::OV::CLEAR);
    }

    #[inline]
    fn counter(&self) -> u16 {
        cast::u16(self.cnt.read(CNT::CNT)).unwrap_or(MAX_COUNT)
    }
}
