// Copyright 2026 The iwdt-ddl authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A simulated IWDT for host tests.
//!
//! Writes to CR, ARR and WINR raise the matching pending flag, which clears after `latency`
//! status reads unless the flag is marked sticky. Writing the start key sets RUN when
//! `runs_on_start` is true, either at once or after `run_delay` status reads.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use iwdt_ddl::pac::CR;
use iwdt_ddl::watchdog::{Key, Registers, Status};
use tock_registers::fields::FieldValue;

pub const CRF: u32 = 1 << 0;
pub const ARRF: u32 = 1 << 1;
pub const WINRF: u32 = 1 << 2;
pub const OV: u32 = 1 << 3;
pub const RUN: u32 = 1 << 4;

const PENDING: [u32; 3] = [CRF, ARRF, WINRF];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Write {
    Key(u16),
    Control(u32),
    Reload(u16),
    Window(u16),
    ClearOverflow,
}

#[derive(Debug, Default)]
pub struct State {
    pub writes: Vec<Write>,
    pub status: u32,
    pub status_reads: usize,
    pub counter: u16,
    latency: usize,
    sticky: u32,
    runs_on_start: bool,
    run_delay: usize,
    run_countdown: Option<usize>,
    countdown: [usize; 3],
}

impl State {
    fn raise(&mut self, flag: u32) {
        if self.latency > 0 || self.sticky & flag != 0 {
            self.status |= flag;
            if let Some(index) = PENDING.iter().position(|&f| f == flag) {
                self.countdown[index] = self.latency;
            }
        }
    }

    fn settle(&mut self) {
        for (index, &flag) in PENDING.iter().enumerate() {
            if self.status & flag == 0 || self.sticky & flag != 0 {
                continue;
            }
            self.countdown[index] = self.countdown[index].saturating_sub(1);
            if self.countdown[index] == 0 {
                self.status &= !flag;
            }
        }
        if let Some(reads) = self.run_countdown {
            if reads <= 1 {
                self.status |= RUN;
                self.run_countdown = None;
            } else {
                self.run_countdown = Some(reads - 1);
            }
        }
    }
}

/// Cloning shares the underlying state, so a test can keep one handle for inspection.
#[derive(Clone, Debug)]
pub struct SimIwdt {
    state: Rc<RefCell<State>>,
}

impl SimIwdt {
    /// Pending flags clear immediately and the counter runs once started.
    pub fn instant() -> Self {
        SimIwdt {
            state: Rc::new(RefCell::new(State {
                runs_on_start: true,
                ..State::default()
            })),
        }
    }

    /// Each pending flag stays set for `reads` status reads after the write that raised it.
    pub fn with_latency(reads: usize) -> Self {
        let sim = SimIwdt::instant();
        sim.state.borrow_mut().latency = reads;
        sim
    }

    /// The given flags never clear once raised.
    pub fn sticky(self, flags: u32) -> Self {
        self.state.borrow_mut().sticky |= flags;
        self
    }

    /// Status bits set before configuration starts.
    pub fn preset(self, flags: u32) -> Self {
        self.state.borrow_mut().status |= flags;
        self
    }

    /// RUN reads clear for the first `reads` status reads after the start key, then set.
    pub fn run_after(self, reads: usize) -> Self {
        self.state.borrow_mut().run_delay = reads;
        self
    }

    /// The counter never reports running.
    pub fn never_runs(self) -> Self {
        self.state.borrow_mut().runs_on_start = false;
        self
    }

    pub fn raise_overflow(&self) {
        self.state.borrow_mut().status |= OV;
    }

    pub fn set_counter(&self, value: u16) {
        self.state.borrow_mut().counter = value;
    }

    pub fn writes(&self) -> Vec<Write> {
        self.state.borrow().writes.clone()
    }

    pub fn status_reads(&self) -> usize {
        self.state.borrow().status_reads
    }

    pub fn status_bits(&self) -> u32 {
        self.state.borrow().status
    }

    pub fn clear_log(&self) {
        let mut state = self.state.borrow_mut();
        state.writes.clear();
        state.status_reads = 0;
    }
}

impl Registers for SimIwdt {
    fn write_key(&mut self, key: Key) {
        let mut state = self.state.borrow_mut();
        state.writes.push(Write::Key(key.value()));
        if key == Key::Start && state.runs_on_start {
            if state.run_delay == 0 {
                state.status |= RUN;
            } else {
                state.run_countdown = Some(state.run_delay);
            }
        }
    }

    fn write_control(&mut self, control: FieldValue<u32, CR::Register>) {
        let mut state = self.state.borrow_mut();
        state.writes.push(Write::Control(control.value));
        state.raise(CRF);
    }

    fn write_reload(&mut self, reload: u16) {
        let mut state = self.state.borrow_mut();
        state.writes.push(Write::Reload(reload));
        state.raise(ARRF);
    }

    fn write_window(&mut self, window: u16) {
        let mut state = self.state.borrow_mut();
        state.writes.push(Write::Window(window));
        state.raise(WINRF);
    }

    fn status(&self) -> Status {
        let mut state = self.state.borrow_mut();
        state.status_reads += 1;
        let snapshot = Status::new(state.status);
        state.settle();
        snapshot
    }

    fn clear_overflow(&mut self) {
        let mut state = self.state.borrow_mut();
        state.writes.push(Write::ClearOverflow);
        state.status &= !OV;
    }

    fn counter(&self) -> u16 {
        self.state.borrow().counter
    }
}
