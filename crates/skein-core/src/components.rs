//! # Component Decomposition
//!
//! Recovers the closed strands ("knot paths") a diagram represents.
//!
//! Each strand is walked once from every unseen outgoing port, so two
//! rotations of the same cycle can never both be recorded. Every path is
//! then rotated to start at its smallest arc label and the paths are sorted
//! by that label, which makes the result independent of crossing order.

use crate::graph::Diagram;
use crate::{ArcLabel, CrossingId, Port, SkeinError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// =============================================================================
// PATH TYPES
// =============================================================================

/// One hop of a strand: the crossing it leaves, the exit port, and the arc taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathStep {
    pub crossing: CrossingId,
    pub exit: Port,
    pub arc: ArcLabel,
}

/// A closed strand of the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnotPath {
    steps: Vec<PathStep>,
}

impl KnotPath {
    /// Steps in travel order, starting at the base point.
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Smallest arc label on the strand; the path starts on it.
    #[must_use]
    pub fn base_arc(&self) -> Option<ArcLabel> {
        self.steps.first().map(|s| s.arc)
    }

    /// Distinct crossings the strand passes through.
    #[must_use]
    pub fn crossings(&self) -> BTreeSet<CrossingId> {
        self.steps.iter().map(|s| s.crossing).collect()
    }
}

impl fmt::Display for KnotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, step) in self.steps.iter().enumerate() {
            if n > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}.{}[{}]", step.crossing, step.exit, step.arc)?;
        }
        Ok(())
    }
}

/// Size summary of a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramStats {
    pub live_crossings: usize,
    pub arcs: usize,
    /// Closed strands through live crossings plus detached loops.
    pub components: usize,
    pub unknots: usize,
}

// =============================================================================
// DECOMPOSITION
// =============================================================================

impl Diagram {
    /// Set of live arc labels.
    #[must_use]
    pub fn get_arcs(&self) -> BTreeSet<ArcLabel> {
        self.live_crossings()
            .flat_map(|(_, c)| c.arcs())
            .collect()
    }

    /// Number of live arcs.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.get_arcs().len()
    }

    /// Every closed strand through the live crossings.
    pub fn get_knot_paths(&self) -> Result<Vec<KnotPath>, SkeinError> {
        let bound = self.walk_bound();
        let mut seen: BTreeSet<(CrossingId, Port)> = BTreeSet::new();
        let mut paths = Vec::new();

        for (id, _) in self.live_crossings() {
            for start in Port::OUTGOING {
                if seen.contains(&(id, start)) {
                    continue;
                }
                let mut steps = Vec::new();
                let mut current = (id, start);
                while seen.insert(current) {
                    if steps.len() > bound {
                        return Err(SkeinError::InvalidDiagram(format!(
                            "strand from {}.{} does not close",
                            id, start
                        )));
                    }
                    steps.push(PathStep {
                        crossing: current.0,
                        exit: current.1,
                        arc: self.port_arc(current.0, current.1)?,
                    });
                    let (next, incoming) = self.neighbor_and_incoming_port(current.0, current.1)?;
                    current = (next, incoming.continuation());
                }
                if current != (id, start) {
                    return Err(SkeinError::InvalidDiagram(format!(
                        "strand from {}.{} merges into another strand at {}.{}",
                        id, start, current.0, current.1
                    )));
                }
                paths.push(rotate_to_base(steps));
            }
        }

        paths.sort_by_key(KnotPath::base_arc);
        Ok(paths)
    }

    /// Map every live port to the index of the strand through it.
    ///
    /// Indices refer to the output of [`Diagram::get_knot_paths`].
    pub fn strand_of_ports(&self) -> Result<BTreeMap<(CrossingId, Port), usize>, SkeinError> {
        let mut map = BTreeMap::new();
        for (index, path) in self.get_knot_paths()?.iter().enumerate() {
            for step in path.steps() {
                map.insert((step.crossing, step.exit), index);
                map.insert((step.crossing, step.exit.continuation()), index);
            }
        }
        Ok(map)
    }

    /// Crossing, arc and component counts.
    pub fn stats(&self) -> Result<DiagramStats, SkeinError> {
        let strands = self.get_knot_paths()?.len();
        Ok(DiagramStats {
            live_crossings: self.live_count(),
            arcs: self.arc_count(),
            components: strands.saturating_add(self.num_unknots()),
            unknots: self.num_unknots(),
        })
    }
}

/// Rotate a cycle so the step carrying the smallest arc comes first.
fn rotate_to_base(mut steps: Vec<PathStep>) -> KnotPath {
    let start = steps
        .iter()
        .enumerate()
        .min_by_key(|(_, s)| s.arc)
        .map_or(0, |(n, _)| n);
    steps.rotate_left(start);
    KnotPath { steps }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Crossing;
    use crate::Handedness::Right;

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

    #[test]
    fn trefoil_is_one_strand() {
        let paths = trefoil().get_knot_paths().expect("paths");
        assert_eq!(paths.len(), 1);
        let path = &paths[0];
        assert_eq!(path.len(), 6);
        assert_eq!(path.base_arc(), Some(ArcLabel(0)));
        let arcs: Vec<u32> = path.steps().iter().map(|s| s.arc.value()).collect();
        assert_eq!(arcs, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn hopf_link_has_two_strands() {
        let paths = hopf().get_knot_paths().expect("paths");
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].base_arc(), Some(ArcLabel(0)));
        assert_eq!(paths[1].base_arc(), Some(ArcLabel(2)));
        assert_eq!(
            paths[1].steps()[0],
            PathStep {
                crossing: CrossingId(0),
                exit: Port::K,
                arc: ArcLabel(2),
            }
        );
    }

    #[test]
    fn strand_map_covers_every_port() {
        let diagram = hopf();
        let map = diagram.strand_of_ports().expect("map");
        assert_eq!(map.len(), 8);
        assert_eq!(map.get(&(CrossingId(0), Port::I0)), Some(&0));
        assert_eq!(map.get(&(CrossingId(0), Port::J)), Some(&1));
    }

    #[test]
    fn stats_count_components() {
        let stats = hopf().stats().expect("stats");
        assert_eq!(stats.live_crossings, 2);
        assert_eq!(stats.arcs, 4);
        assert_eq!(stats.components, 2);

        let unlink = Diagram::unlink(3).stats().expect("stats");
        assert_eq!(unlink.components, 3);
        assert_eq!(unlink.arcs, 0);
    }

    #[test]
    fn smoothing_changes_component_count() {
        let mut diagram = trefoil();
        diagram.smooth_crossing(CrossingId(0)).expect("smooth");
        assert_eq!(diagram.get_knot_paths().expect("paths").len(), 2);
    }

    #[test]
    fn path_display_lists_hops() {
        let paths = hopf().get_knot_paths().expect("paths");
        assert_eq!(paths[0].to_string(), "c0.i1[0] -> c1.k[1]");
    }
}
