// Copyright 2026 The iwdt-ddl authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Register-level access to the IWDT block.
//!
//! The layout follows the vendor register map. Fields are accessed through `tock-registers`
//! bitfield accessors, which perform masked reads and read-modify-writes against the named
//! register rather than overlaying structs on the raw words.

use core::marker::PhantomData;
use core::ops::Deref;
use core::sync::atomic::{AtomicBool, Ordering};

use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};
use tock_registers::{register_bitfields, register_structs};

/// Base address of the IWDT register block.
pub const IWDT_BASE: usize = 0x4000_3000;

register_structs! {
    /// Independent watchdog
    pub RegisterBlock {
        /// Key register.
        (0x00 => pub kr: WriteOnly<u32, KR::Register>),
        /// Control register. Write protected until the unlock key has been written.
        (0x04 => pub cr: ReadWrite<u32, CR::Register>),
        /// Reload register.
        (0x08 => pub arr: ReadWrite<u32, ARR::Register>),
        /// Down-counter.
        (0x0C => pub cnt: ReadOnly<u32, CNT::Register>),
        /// Window register.
        (0x10 => pub winr: ReadWrite<u32, WINR::Register>),
        /// Status register.
        (0x14 => pub sr: ReadWrite<u32, SR::Register>),
        (0x18 => @END),
    }
}

register_bitfields![u32,
    pub KR [
        KEY OFFSET(0) NUMBITS(16) [
            Start = 0xCCCC,
            Unlock = 0x5555,
            Reload = 0xAAAA,
            StopFirst = 0x6666,
            StopSecond = 0x9999
        ]
    ],
    pub CR [
        /// Prescaler applied to the internal low-speed clock.
        PRS OFFSET(0) NUMBITS(3) [
            Div4 = 0,
            Div8 = 1,
            Div16 = 2,
            Div32 = 3,
            Div64 = 4,
            Div128 = 5,
            Div256 = 6,
            Div512 = 7
        ],
        /// Raise the IWDT interrupt instead of resetting on overflow.
        IE OFFSET(5) NUMBITS(1) [],
        /// Pause counting while the core sleeps.
        PAUSE OFFSET(6) NUMBITS(1) []
    ],
    pub ARR [
        ARR OFFSET(0) NUMBITS(12) []
    ],
    pub CNT [
        CNT OFFSET(0) NUMBITS(12) []
    ],
    pub WINR [
        WINR OFFSET(0) NUMBITS(12) []
    ],
    pub SR [
        /// Control register write pending.
        CRF OFFSET(0) NUMBITS(1) [],
        /// Reload register write pending.
        ARRF OFFSET(1) NUMBITS(1) [],
        /// Window register write pending.
        WINRF OFFSET(2) NUMBITS(1) [],
        /// Counter overflowed. Latched; software writes 0 to clear.
        OV OFFSET(3) NUMBITS(1) [],
        /// Counter running.
        RUN OFFSET(4) NUMBITS(1) []
    ]
];

/// Owned token for the IWDT register block.
///
/// There is one watchdog in the device, so there is one token, handed out by
/// [`Peripherals::take`].
pub struct IWDT {
    _marker: PhantomData<*const ()>,
}

// NOTE(unsafe) the token only grants access to memory-mapped registers
unsafe impl Send for IWDT {}

impl IWDT {
    /// Pointer to the register block
    pub const PTR: *const RegisterBlock = IWDT_BASE as *const _;

    /// Return the pointer to the register block
    #[inline(always)]
    pub const fn ptr() -> *const RegisterBlock {
        Self::PTR
    }
}

impl Deref for IWDT {
    type Target = RegisterBlock;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        // NOTE(unsafe) the block lives at a fixed address for the whole program
        unsafe { &*Self::PTR }
    }
}

static TAKEN: AtomicBool = AtomicBool::new(false);

/// All the device peripherals covered by this crate
#[allow(non_snake_case)]
pub struct Peripherals {
    /// IWDT
    pub IWDT: IWDT,
}

impl Peripherals {
    /// Returns all the peripherals *once*
    #[inline]
    pub fn take() -> Option<Self> {
        critical_section::with(|_| {
            if TAKEN.load(Ordering::Relaxed) {
                None
            } else {
                Some(unsafe { Peripherals::steal() })
            }
        })
    }

    /// Unchecked version of `Peripherals::take`
    ///
    /// # Safety
    ///
    /// Each returned token aliases the same hardware block. The caller must make sure that no two
    /// drivers built from aliased tokens are used to configure the watchdog.
    #[inline]
    pub unsafe fn steal() -> Self {
        TAKEN.store(true, Ordering::Relaxed);
        Peripherals {
            IWDT: IWDT {
                _marker: PhantomData,
            },
        }
    }
}
