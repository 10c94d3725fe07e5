//! Property tests for the coil sequencer

use motorwing_core::config::Microsteps;
use motorwing_core::stepping::StepSequencer;
use motorwing_core::traits::{Direction, StepStyle};
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Backward)]
}

fn style() -> impl Strategy<Value = StepStyle> {
    prop_oneof![
        Just(StepStyle::Single),
        Just(StepStyle::Double),
        Just(StepStyle::Interleave),
        Just(StepStyle::Microstep),
    ]
}

fn microsteps() -> impl Strategy<Value = Microsteps> {
    prop_oneof![Just(Microsteps::Eight), Just(Microsteps::Sixteen)]
}

proptest! {
    #[test]
    fn position_stays_within_one_cycle(
        microsteps in microsteps(),
        start in 0u16..64,
        moves in proptest::collection::vec((direction(), style()), 0..200),
    ) {
        let mut seq = StepSequencer::with_position(microsteps, start);
        for (dir, style) in moves {
            let drive = seq.advance(dir, style);
            prop_assert!(drive.position < microsteps.cycle_len());
            prop_assert_eq!(drive.position, seq.position());
        }
    }

    #[test]
    fn microstep_forward_then_back_is_identity(
        microsteps in microsteps(),
        start in 0u16..64,
        count in 0usize..100,
    ) {
        let mut seq = StepSequencer::with_position(microsteps, start);
        let origin = seq.position();
        for _ in 0..count {
            seq.advance(Direction::Forward, StepStyle::Microstep);
        }
        for _ in 0..count {
            seq.advance(Direction::Backward, StepStyle::Microstep);
        }
        prop_assert_eq!(seq.position(), origin);
    }

    #[test]
    fn single_uses_one_coil_and_double_uses_two(
        microsteps in microsteps(),
        start in 0u16..64,
        dir in direction(),
    ) {
        let mut seq = StepSequencer::with_position(microsteps, start);
        let single = seq.advance(dir, StepStyle::Single);
        prop_assert_eq!(single.latch.0.count_ones(), 1);

        let double = seq.advance(dir, StepStyle::Double);
        prop_assert_eq!(double.latch.0.count_ones(), 2);
    }

    #[test]
    fn microstep_levels_stay_on_the_curve(
        microsteps in microsteps(),
        start in 0u16..64,
        dir in direction(),
    ) {
        let mut seq = StepSequencer::with_position(microsteps, start);
        let drive = seq.advance(dir, StepStyle::Microstep);
        let curve = motorwing_core::stepping::microstep_curve(microsteps);
        prop_assert!(curve.contains(&drive.level_a));
        prop_assert!(curve.contains(&drive.level_b));
        // The two coils are always in opposite halves of the quarter wave
        let n = microsteps.count() as usize;
        let ia = curve.iter().position(|&v| v == drive.level_a).unwrap();
        let ib = curve.iter().position(|&v| v == drive.level_b).unwrap();
        prop_assert_eq!(ia + ib, n);
    }
}
