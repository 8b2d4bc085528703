// Copyright 2026 The iwdt-ddl authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Independent watchdog driver for DDL-family microcontrollers
//!
//! This crate drives the independent watchdog (IWDT) found on Cortex-M0+ parts whose vendor
//! library is a DDL ("device driver layer"). The watchdog is clocked from a fixed 10 kHz internal
//! low-speed oscillator and is armed through a key-register handshake where every configuration
//! write has to be acknowledged by the peripheral before the next one may follow.
//!
//! The armed driver implements the [`embedded-hal`] watchdog traits.
//!
//! [`embedded-hal`]: https://crates.io/crates/embedded-hal
//!
//! # Usage
//!
//! The IWDT bus clock has to be enabled before the watchdog is configured, and if the configured
//! [`Action`](watchdog::Action) raises an interrupt, the interrupt line has to be enabled in the
//! NVIC by the application. Neither is done by this crate.
//!
//! ```no_run
//! use iwdt_ddl::{pac, prelude::*, watchdog::{Action, ClockDivider, Config}};
//!
//! let dp = pac::Peripherals::take().unwrap();
//!
//! // Reset after roughly 400ms, feeding allowed only in the last 100ms.
//! let config = Config::new(Action::ResetRunInSleep, ClockDivider::Div32, 125, 31).unwrap();
//! let mut iwdt = dp.IWDT.constrain().configure(config).unwrap();
//!
//! loop {
//!     // ...
//!     iwdt.feed();
//! }
//! ```
//!
//! ## Usage examples
//!
//! See the `demos` folder. They build for the target only, with `--features rt`.

#![cfg_attr(not(test), no_std)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod pac;
pub mod prelude;
pub mod time;
pub mod watchdog;
