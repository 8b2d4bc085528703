// Copyright 2026 The iwdt-ddl authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub use crate::time::{ExtU32 as _, RateExtU32 as _};
pub use crate::watchdog::IwdtExt as _;
pub use embedded_hal::watchdog::{Watchdog as _, WatchdogDisable as _};
