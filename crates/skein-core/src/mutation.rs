//! # Local Moves
//!
//! In-place rewrites of a single crossing.
//!
//! All moves are:
//! - Local: only the crossing itself and the far ends of its arcs change
//! - Label-preserving: no new arc labels are ever invented
//! - Invariant-preserving: every live label still sits on exactly two ports
//!
//! Smoothing and removal are the same port splice with a different internal
//! pairing. The pairing is unioned with the arcs that return to the crossing
//! itself; a closed cycle is a detached trivial loop, an open chain merges its
//! two outer arcs.

use crate::graph::Diagram;
use crate::primitives::PORTS_PER_CROSSING;
use crate::{ArcLabel, CrossingId, Port, SkeinError};
use std::collections::BTreeSet;

/// Internal pairing of the 0-resolution: `j` feeds `i1`, `i0` feeds `k`.
const SMOOTHING_PAIRS: [(Port, Port); 2] = [(Port::I1, Port::J), (Port::I0, Port::K)];

/// Internal pairing of a crossing erased outright: strands pass straight through.
const REMOVAL_PAIRS: [(Port, Port); 2] = [(Port::I0, Port::I1), (Port::J, Port::K)];

impl Diagram {
    /// Set the label at `(c, port)` and at the far end of its arc.
    ///
    /// The far end is located before anything changes.
    pub fn relabel_arc(
        &mut self,
        c: CrossingId,
        port: Port,
        new_label: ArcLabel,
    ) -> Result<(), SkeinError> {
        let (far, far_port) = self.neighbor_and_incoming_port(c, port)?;
        self.crossing_mut(c)?.set_arc(port, new_label);
        self.crossing_mut(far)?.set_arc(far_port, new_label);
        Ok(())
    }

    /// Exchange the over and under strands at `c` and flip its handedness.
    ///
    /// `i0 := j, i1 := k, j := i0, k := i1`. Applying it twice is the identity.
    pub fn swap_crossing(&mut self, c: CrossingId) -> Result<(), SkeinError> {
        self.crossing_mut(c)?.swap();
        Ok(())
    }

    /// Replace `c` by its 0-resolution. Returns the number of closed loops created.
    pub fn smooth_crossing(&mut self, c: CrossingId) -> Result<usize, SkeinError> {
        self.splice(c, SMOOTHING_PAIRS)
    }

    /// Erase `c`, joining each strand straight through. Returns the number of
    /// closed loops created.
    pub fn remove_crossing(&mut self, c: CrossingId) -> Result<usize, SkeinError> {
        self.splice(c, REMOVAL_PAIRS)
    }

    /// Swap every live crossing, producing the mirror image.
    #[must_use]
    pub fn mirror(&self) -> Self {
        let mut mirrored = self.clone();
        for crossing in mirrored.live_crossings_mut() {
            crossing.swap();
        }
        mirrored
    }

    fn splice(&mut self, c: CrossingId, pairs: [(Port, Port); 2]) -> Result<usize, SkeinError> {
        let crossing = *self.crossing(c)?;

        let mut group: [usize; PORTS_PER_CROSSING] = [0, 1, 2, 3];
        let mut returns_here = [false; PORTS_PER_CROSSING];
        for (a, b) in pairs {
            union(&mut group, a.slot(), b.slot());
        }
        for (n, a) in Port::ALL.into_iter().enumerate() {
            for b in Port::ALL.into_iter().skip(n + 1) {
                if crossing.arc(a) == crossing.arc(b) {
                    union(&mut group, a.slot(), b.slot());
                    returns_here[a.slot()] = true;
                    returns_here[b.slot()] = true;
                }
            }
        }

        let mut loops = 0;
        let roots: BTreeSet<usize> = group.iter().copied().collect();
        for root in roots {
            let ends: Vec<Port> = Port::ALL
                .into_iter()
                .filter(|p| group[p.slot()] == root && !returns_here[p.slot()])
                .collect();
            match ends.as_slice() {
                [] => loops += 1,
                [a, b] => {
                    let keep = crossing.arc(*a);
                    if crossing.arc(*b) != keep {
                        self.relabel_arc(c, *b, keep)?;
                    }
                }
                _ => {
                    return Err(SkeinError::InvalidDiagram(format!(
                        "splice at {} left {} open ends in one strand",
                        c,
                        ends.len()
                    )));
                }
            }
        }

        self.tombstone(c)?;
        self.add_unknots(loops);
        Ok(loops)
    }
}

/// Merge the groups of slots `a` and `b`.
fn union(group: &mut [usize; PORTS_PER_CROSSING], a: usize, b: usize) {
    let (from, to) = (group[b], group[a]);
    for g in group.iter_mut() {
        if *g == from {
            *g = to;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
