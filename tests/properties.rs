// Copyright 2026 The iwdt-ddl authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

mod common;

use common::{SimIwdt, Write, CRF};
use iwdt_ddl::time::MilliSeconds;
use iwdt_ddl::watchdog::{
    Action, Attempts, ClockDivider, Config, Error, Iwdt, Mode, Stage, MAX_COUNT,
};
use proptest::prelude::*;

fn action() -> impl Strategy<Value = Action> {
    proptest::sample::select(Action::ALL.to_vec())
}

fn divider() -> impl Strategy<Value = ClockDivider> {
    proptest::sample::select(ClockDivider::ALL.to_vec())
}

proptest! {
    #[test]
    fn windowed_iff_window_below_reload(reload in 0..=MAX_COUNT, window in 0..=MAX_COUNT) {
        let config = Config::new(Action::ResetRunInSleep, ClockDivider::Div4, reload, window).unwrap();
        let expected = if window < reload { Mode::Windowed } else { Mode::FreeRunning };
        prop_assert_eq!(config.mode(), expected);
    }

    #[test]
    fn sequencer_writes_window_only_when_windowed(
        action in action(),
        divider in divider(),
        reload in 0..=MAX_COUNT,
        window in 0..=MAX_COUNT,
    ) {
        let sim = SimIwdt::instant();
        let config = Config::new(action, divider, reload, window).unwrap();

        Iwdt::new(sim.clone()).configure(config).unwrap();

        let writes = sim.writes();
        prop_assert_eq!(writes.len(), 5);
        prop_assert_eq!(&writes[..2], &[Write::Key(0xCCCC), Write::Key(0x5555)][..]);
        prop_assert_eq!(writes[2], Write::Control(config.control().value));
        prop_assert_eq!(writes[3], Write::Reload(reload));
        let last = if window < reload { Write::Window(window) } else { Write::Key(0xAAAA) };
        prop_assert_eq!(writes[4], last);
    }

    #[test]
    fn timeout_reads_exactly_the_budget(budget in 0u32..200) {
        let sim = SimIwdt::instant().sticky(CRF);
        let config = Config::new(Action::ResetRunInSleep, ClockDivider::Div4, 10, 0).unwrap();

        let result = Iwdt::new(sim.clone()).configure_with(config, Attempts::new(budget));

        if budget == 0 {
            prop_assert_eq!(result.err(), Some(Error::Timeout(Stage::UnlockPending)));
            prop_assert_eq!(sim.status_reads(), 0);
        } else {
            prop_assert_eq!(result.err(), Some(Error::Timeout(Stage::ActionWritten)));
            prop_assert_eq!(sim.status_reads(), 1 + budget as usize);
            prop_assert_eq!(sim.writes().len(), 3);
        }
    }

    #[test]
    fn control_value_encodes_action_and_divider(action in action(), divider in divider()) {
        let config = Config::new(action, divider, 1, 0).unwrap();
        let value = config.control().value;
        prop_assert_eq!(value & 0b111, divider as u32);
        prop_assert_eq!(value & (1 << 5) != 0, action.interrupts());
        prop_assert_eq!(value & (1 << 6) != 0, action.pauses_in_sleep());
        prop_assert_eq!(value & !0b110_0111, 0);
    }

    #[test]
    fn timeout_period_round_trip(ms in 1u32..=209_715) {
        let config = Config::from_timeout(MilliSeconds::millis(ms), Action::ResetRunInSleep).unwrap();
        let period = config.period().ticks();
        prop_assert!(period >= ms);
        // Longer by at most one tick of the chosen divider, rounded up.
        prop_assert!(period - ms <= config.divider().divisor() / 10 + 1);
        prop_assert_eq!(config.mode(), Mode::FreeRunning);
    }
}
