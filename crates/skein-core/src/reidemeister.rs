//! # Reidemeister-I Reduction
//!
//! Detects and eliminates kinks.
//!
//! Candidates are tested per crossing, in index order:
//!
//! 1. Self-loop: `i1`/`j` or `k`/`i0` already share a label.
//! 2. Both strands at the crossing lie on one closed strand: the monogon
//!    `i1 -> j` (or `k -> i0`) is a kink when every crossing strictly inside it
//!    is passed uniformly over or uniformly under.
//! 3. The two strands lie on different closed strands: the whole strand through
//!    the over side is split off when it passes over everywhere, including at
//!    the crossing itself, and symmetrically for the under side. A loop that is
//!    uniform everywhere except at the crossing is a genuine link and is kept.

use crate::graph::Diagram;
use crate::{CrossingId, CrossingType, Port, SkeinError};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A reducible crossing and the crossings enclosed by its loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct R1Candidate {
    pub crossing: CrossingId,
    pub path: Vec<CrossingId>,
}

impl Diagram {
    /// First reducible crossing in index order, if any.
    pub fn get_r1_crossing(&self) -> Result<Option<R1Candidate>, SkeinError> {
        let strands = self.strand_of_ports()?;

        for (c, crossing) in self.live_crossings() {
            if crossing.arc(Port::I1) == crossing.arc(Port::J)
                || crossing.arc(Port::K) == crossing.arc(Port::I0)
            {
                return Ok(Some(R1Candidate {
                    crossing: c,
                    path: Vec::new(),
                }));
            }

            let same_strand = strands.get(&(c, Port::I1)) == strands.get(&(c, Port::K));
            if same_strand {
                for (from, to) in [(Port::I1, Port::J), (Port::K, Port::I0)] {
                    let path = self.crossings_between(c, from, c, to, true)?;
                    if is_uniform(&path) {
                        return Ok(Some(candidate(c, &path)));
                    }
                }
            } else {
                let over = self.crossings_between(c, Port::I1, c, Port::I0, true)?;
                if over.iter().all(|(_, t)| *t == CrossingType::Over) {
                    return Ok(Some(candidate(c, &over)));
                }
                let under = self.crossings_between(c, Port::K, c, Port::J, true)?;
                if under.iter().all(|(_, t)| *t == CrossingType::Under) {
                    return Ok(Some(candidate(c, &under)));
                }
            }
        }

        Ok(None)
    }

    /// Eliminate kinks until none remain or `limit` reductions are done.
    ///
    /// Each reduction removes the enclosed crossings, then the crossing itself.
    /// Returns the number of reductions performed.
    pub fn reduce_r1s(&mut self, limit: Option<usize>) -> Result<usize, SkeinError> {
        let mut performed = 0;
        while limit.is_none_or(|max| performed < max) {
            let Some(found) = self.get_r1_crossing()? else {
                break;
            };
            trace!(crossing = %found.crossing, path = found.path.len(), "reidemeister-I elimination");
            for &inner in &found.path {
                self.remove_crossing(inner)?;
            }
            self.remove_crossing(found.crossing)?;
            performed += 1;
        }
        Ok(performed)
    }
}

fn is_uniform(path: &[(CrossingId, CrossingType)]) -> bool {
    path.windows(2).all(|w| w[0].1 == w[1].1)
}

fn candidate(c: CrossingId, path: &[(CrossingId, CrossingType)]) -> R1Candidate {
    R1Candidate {
        crossing: c,
        path: path.iter().map(|(id, _)| *id).collect(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Crossing;
    use crate::Handedness::{Left, Right};

    fn trefoil() -> Diagram {
        Diagram::new(vec![
            Crossing::from_raw([5, 0, 2, 3], Right),
            Crossing::from_raw([3, 4, 0, 1], Right),
            Crossing::from_raw([1, 2, 4, 5], Right),
        ])
        .expect("trefoil")
    }

    fn hopf() -> Diagram {
        Diagram::new(vec![
            Crossing::from_raw([1, 0, 3, 2], Right),
            Crossing::from_raw([2, 3, 0, 1], Right),
        ])
        .expect("hopf")
    }

    /// Hopf diagram with one crossing switched: two unlinked circles.
    fn split_pair() -> Diagram {
        Diagram::new(vec![
            Crossing::from_raw([3, 2, 1, 0], Left),
            Crossing::from_raw([2, 3, 0, 1], Right),
        ])
        .expect("split pair")
    }

    #[test]
    fn self_loop_is_a_candidate() {
        let diagram = Diagram::new(vec![Crossing::from_raw([0, 1, 1, 0], Right)])
            .expect("kink");
        let found = diagram.get_r1_crossing().expect("scan");
        assert_eq!(
            found,
            Some(R1Candidate {
                crossing: CrossingId(0),
                path: Vec::new(),
            })
        );
    }

    #[test]
    fn trefoil_has_no_kink() {
        assert_eq!(trefoil().get_r1_crossing().expect("scan"), None);
    }

    #[test]
    fn hopf_link_is_not_reduced() {
        let mut diagram = hopf();
        assert_eq!(diagram.get_r1_crossing().expect("scan"), None);
        assert_eq!(diagram.reduce_r1s(None).expect("reduce"), 0);
        assert_eq!(diagram.live_count(), 2);
    }

    #[test]
    fn split_circles_come_apart() {
        let mut diagram = split_pair();
        let found = diagram.get_r1_crossing().expect("scan").expect("candidate");
        assert_eq!(found.crossing, CrossingId(0));
        assert_eq!(found.path, vec![CrossingId(1)]);

        assert_eq!(diagram.reduce_r1s(None).expect("reduce"), 1);
        assert!(diagram.is_unlink());
        assert_eq!(diagram.num_unknots(), 2);
    }

    #[test]
    fn reduction_reaches_fixpoint() {
        let mut diagram = Diagram::new(vec![Crossing::from_raw([0, 1, 1, 0], Right)])
            .expect("kink");
        diagram.reduce_r1s(None).expect("reduce");
        assert_eq!(diagram.get_r1_crossing().expect("scan"), None);
        assert_eq!(diagram.num_unknots(), 1);
    }

    #[test]
    fn limit_caps_reductions() {
        let mut diagram = split_pair();
        assert_eq!(diagram.reduce_r1s(Some(0)).expect("reduce"), 0);
        assert_eq!(diagram.live_count(), 2);
    }

    #[test]
    fn uniform_path_check() {
        assert!(is_uniform(&[]));
        assert!(is_uniform(&[
            (CrossingId(1), CrossingType::Over),
            (CrossingId(2), CrossingType::Over)
        ]));
        assert!(!is_uniform(&[
            (CrossingId(1), CrossingType::Over),
            (CrossingId(2), CrossingType::Under)
        ]));
    }
}
