// Copyright 2026 The iwdt-ddl authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration handshake.
//!
//! ```text
//! Unconfigured --keys--> UnlockPending --CR--> ActionWritten --ARR--> ReloadWritten
//!
//! ReloadWritten --WINR, wait WINRF--> WindowOrRunWritten --> Armed    (windowed)
//! ReloadWritten --wait RUN, reload--> WindowOrRunWritten --> Armed    (free-running)
//! ```
//!
//! Every wait that runs out of budget moves the sequencer to [`State::Failed`], which is final.

use super::budget::PollBudget;
use super::config::{Config, Mode};
use super::regs::{Key, Registers, Status};
use super::Error;
use crate::pac::SR;

/// The wait that ran out of budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Waiting for all pending flags after unlocking.
    UnlockPending,
    /// Waiting for the control register write.
    ActionWritten,
    /// Waiting for the reload register write.
    ReloadWritten,
    /// Waiting for the window register write.
    WindowWrite,
    /// Waiting for the counter to start running.
    RunWait,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Unconfigured,
    UnlockPending,
    ActionWritten,
    ReloadWritten,
    WindowOrRunWritten,
    Armed,
    Failed(Stage),
}

impl State {
    /// Whether no further transition is possible.
    pub fn is_final(&self) -> bool {
        matches!(self, State::Armed | State::Failed(_))
    }
}

/// Drives the configuration handshake one transition at a time.
pub struct Sequencer<'a, R, B> {
    regs: &'a mut R,
    config: Config,
    budget: B,
    state: State,
}

impl<'a, R, B> Sequencer<'a, R, B>
where
    R: Registers,
    B: PollBudget + Clone,
{
    /// `budget` is cloned afresh for every wait.
    pub fn new(regs: &'a mut R, config: Config, budget: B) -> Self {
        Sequencer {
            regs,
            config,
            budget,
            state: State::Unconfigured,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Performs the next transition and returns the new state. Does nothing once the state is
    /// final.
    pub fn advance(&mut self) -> State {
        let next = match self.state {
            State::Unconfigured => {
                self.regs.write_key(Key::Start);
                self.regs.write_key(Key::Unlock);
                Ok(State::UnlockPending)
            }
            State::UnlockPending => self.write_action(),
            State::ActionWritten => self.write_reload(),
            State::ReloadWritten => self.write_window_or_run(),
            State::WindowOrRunWritten => Ok(State::Armed),
            State::Armed | State::Failed(_) => return self.state,
        };

        let next = match next {
            Ok(state) => state,
            Err(Error::Timeout(stage)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("iwdt: timed out at {}", stage);
                State::Failed(stage)
            }
        };
        #[cfg(feature = "defmt")]
        defmt::trace!("iwdt: {} -> {}", self.state, next);
        self.state = next;
        next
    }

    /// Advances until the state is final.
    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            match self.advance() {
                State::Armed => return Ok(()),
                State::Failed(stage) => return Err(Error::Timeout(stage)),
                _ => {}
            }
        }
    }

    fn write_action(&mut self) -> Result<State, Error> {
        self.wait(Stage::UnlockPending, |status| {
            !status.is_set(SR::CRF) && !status.is_set(SR::ARRF) && !status.is_set(SR::WINRF)
        })?;
        self.regs.write_control(self.config.control());
        Ok(State::ActionWritten)
    }

    fn write_reload(&mut self) -> Result<State, Error> {
        self.wait(Stage::ActionWritten, |status| !status.is_set(SR::CRF))?;
        self.regs.write_reload(self.config.reload());
        Ok(State::ReloadWritten)
    }

    fn write_window_or_run(&mut self) -> Result<State, Error> {
        self.wait(Stage::ReloadWritten, |status| !status.is_set(SR::ARRF))?;
        match self.config.mode() {
            Mode::Windowed => {
                self.regs.write_window(self.config.window());
                self.wait(Stage::WindowWrite, |status| !status.is_set(SR::WINRF))?;
            }
            Mode::FreeRunning => {
                // Unlike the other waits this one is for a flag to become set.
                self.wait(Stage::RunWait, |status| status.is_set(SR::RUN))?;
                self.regs.write_key(Key::Reload);
            }
        }
        Ok(State::WindowOrRunWritten)
    }

    fn wait(&self, stage: Stage, done: impl Fn(Status) -> bool) -> Result<(), Error> {
        let mut budget = self.budget.clone();
        while !budget.expired() {
            if done(self.regs.status()) {
                return Ok(());
            }
            budget.tick();
        }
        Err(Error::Timeout(stage))
    }
}
