//! # Property-Based Tests
//!
//! Invariants of the moves, the reducer and the HOMFLY solver over random
//! braid closures.

use proptest::collection::vec;
use proptest::prelude::*;
use skein_core::{Diagram, HomflyEngine, catalog};

/// A strand count and a braid word on it.
fn braid() -> impl Strategy<Value = (usize, Vec<i32>)> {
    (2usize..=4).prop_flat_map(|strands| {
        let generator = (1..strands as i32, any::<bool>())
            .prop_map(|(g, inverse)| if inverse { -g } else { g });
        (Just(strands), vec(generator, 1..8))
    })
}

fn closure(strands: usize, word: &[i32]) -> Diagram {
    catalog::from_braid_word(strands, word).expect("braid closure")
}

fn components(diagram: &Diagram) -> usize {
    diagram.stats().expect("stats").components
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every move on every crossing leaves a valid diagram.
    #[test]
    fn moves_preserve_arc_invariant((strands, word) in braid()) {
        let diagram = closure(strands, &word);
        for (c, _) in diagram.live_crossings() {
            let mut switched = diagram.clone();
            switched.swap_crossing(c).expect("swap");
            prop_assert!(switched.validate().is_ok());

            let mut smoothed = diagram.clone();
            smoothed.smooth_crossing(c).expect("smooth");
            prop_assert!(smoothed.validate().is_ok());

            let mut removed = diagram.clone();
            removed.remove_crossing(c).expect("remove");
            prop_assert!(removed.validate().is_ok());
        }
    }

    /// Swapping twice restores the diagram.
    #[test]
    fn swap_is_an_involution((strands, word) in braid()) {
        let diagram = closure(strands, &word);
        for (c, _) in diagram.live_crossings() {
            let mut twice = diagram.clone();
            twice.swap_crossing(c).expect("swap");
            twice.swap_crossing(c).expect("swap");
            prop_assert_eq!(&twice, &diagram);
        }
    }

    /// Smoothing closes exactly `4 - |distinct labels|` loops.
    #[test]
    fn smoothing_conserves_loops((strands, word) in braid()) {
        let diagram = closure(strands, &word);
        for (c, crossing) in diagram.live_crossings() {
            let mut smoothed = diagram.clone();
            let loops = smoothed.smooth_crossing(c).expect("smooth");
            prop_assert_eq!(loops, 4 - crossing.distinct_arcs());
            prop_assert_eq!(smoothed.num_unknots(), diagram.num_unknots() + loops);
            prop_assert_eq!(smoothed.live_count() + 1, diagram.live_count());
        }
    }

    /// Reduction terminates at a fixpoint and keeps the component count.
    #[test]
    fn reduction_reaches_fixpoint((strands, word) in braid()) {
        let diagram = closure(strands, &word);
        let mut reduced = diagram.clone();
        reduced.reduce_r1s(None).expect("reduce");
        prop_assert!(reduced.get_r1_crossing().expect("scan").is_none());
        prop_assert!(reduced.live_count() <= diagram.live_count());
        prop_assert_eq!(components(&reduced), components(&diagram));
    }

    /// Identical input yields identical output.
    #[test]
    fn homfly_is_deterministic((strands, word) in braid()) {
        let engine = HomflyEngine::default();
        let p = engine.compute(&closure(strands, &word)).expect("homfly");
        let q = engine.compute(&closure(strands, &word)).expect("homfly");
        prop_assert_eq!(p, q);
    }

    /// Conjugating the braid does not change the link.
    #[test]
    fn homfly_invariant_under_conjugation(
        (strands, word) in braid(),
        shift in 0usize..8,
    ) {
        let engine = HomflyEngine::default();
        let mut rotated = word.clone();
        rotated.rotate_left(shift % word.len());
        prop_assert_eq!(
            engine.compute(&closure(strands, &word)).expect("homfly"),
            engine.compute(&closure(strands, &rotated)).expect("homfly")
        );
    }

    /// Markov stabilization does not change the link.
    #[test]
    fn homfly_invariant_under_stabilization(
        (strands, word) in braid(),
        negative in any::<bool>(),
    ) {
        let engine = HomflyEngine::default();
        let mut stabilized = word.clone();
        let g = strands as i32;
        stabilized.push(if negative { -g } else { g });
        prop_assert_eq!(
            engine.compute(&closure(strands, &word)).expect("homfly"),
            engine.compute(&closure(strands + 1, &stabilized)).expect("homfly")
        );
    }

    /// The mirror image substitutes `l -> l^-1`.
    #[test]
    fn mirror_inverts_l((strands, word) in braid()) {
        let engine = HomflyEngine::default();
        let diagram = closure(strands, &word);
        let p = engine.compute(&diagram).expect("homfly");
        let q = engine.compute(&diagram.mirror()).expect("homfly");
        prop_assert_eq!(q, p.invert_l());
    }
}
