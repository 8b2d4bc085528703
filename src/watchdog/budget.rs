// Copyright 2026 The iwdt-ddl authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Bounds how long the sequencer waits for the peripheral to acknowledge a write.
///
/// The sequencer takes a fresh clone of the budget for every wait. It checks [`expired`] before
/// each status read and calls [`tick`] after each read that did not satisfy the wait.
///
/// [`expired`]: PollBudget::expired
/// [`tick`]: PollBudget::tick
pub trait PollBudget {
    /// Records one unsuccessful poll.
    fn tick(&mut self);

    /// Whether the wait has to give up.
    fn expired(&self) -> bool;
}

/// A fixed number of status reads per wait.
///
/// This bounds the number of attempts, not wall-clock time, so the worst case blocking duration
/// scales with the core clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attempts {
    remaining: u32,
}

impl Attempts {
    /// 65535 status reads per wait.
    pub const DEFAULT: Attempts = Attempts::new(0xFFFF);

    pub const fn new(limit: u32) -> Self {
        Attempts { remaining: limit }
    }

    pub const fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Default for Attempts {
    fn default() -> Self {
        Attempts::DEFAULT
    }
}

impl PollBudget for Attempts {
    #[inline]
    fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    #[inline]
    fn expired(&self) -> bool {
        self.remaining == 0
    }
}
