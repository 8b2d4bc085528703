// Copyright 2026 The iwdt-ddl authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time units

pub use fugit::{ExtU32, HertzU32 as Hertz, MillisDurationU32 as MilliSeconds, RateExtU32};

/// Frequency of the internal low-speed oscillator clocking the watchdog.
pub const LSI: Hertz = Hertz::from_raw(10_000);
