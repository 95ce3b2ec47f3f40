//! # Crossing Graph
//!
//! The diagram storage for the skein CORE, plus the port traversal primitives
//! every higher operation is built on.
//!
//! A diagram is an arena of crossing records addressed by stable index.
//! Arc adjacency is never stored as a reverse index: the far end of an arc is
//! recovered by looking for the one other live port carrying the same label.
//! Removed crossings stay in the arena as an explicit `CrossingState::Removed`
//! so indices never shift.

use crate::primitives::{MAX_INPUT_CROSSINGS, PORTS_PER_CROSSING};
use crate::{ArcLabel, CrossingId, CrossingType, Handedness, Port, SkeinError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// CROSSING RECORD
// =============================================================================

/// A 4-valent vertex: four port -> arc assignments and a handedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crossing {
    arcs: [ArcLabel; PORTS_PER_CROSSING],
    handedness: Handedness,
}

impl Crossing {
    /// Create a crossing from its four arc labels in `i0, i1, j, k` order.
    #[must_use]
    pub const fn new(
        i0: ArcLabel,
        i1: ArcLabel,
        j: ArcLabel,
        k: ArcLabel,
        handedness: Handedness,
    ) -> Self {
        Self {
            arcs: [i0, i1, j, k],
            handedness,
        }
    }

    /// Create a crossing from raw label values in `i0, i1, j, k` order.
    #[must_use]
    pub const fn from_raw(arcs: [u32; 4], handedness: Handedness) -> Self {
        Self::new(
            ArcLabel(arcs[0]),
            ArcLabel(arcs[1]),
            ArcLabel(arcs[2]),
            ArcLabel(arcs[3]),
            handedness,
        )
    }

    /// Arc label held at a port.
    #[must_use]
    pub const fn arc(&self, port: Port) -> ArcLabel {
        self.arcs[port.slot()]
    }

    /// All four labels in `i0, i1, j, k` order.
    #[must_use]
    pub const fn arcs(&self) -> [ArcLabel; PORTS_PER_CROSSING] {
        self.arcs
    }

    #[must_use]
    pub const fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Number of distinct labels among the four ports.
    #[must_use]
    pub fn distinct_arcs(&self) -> usize {
        let mut seen = self.arcs;
        seen.sort_unstable();
        1 + seen.windows(2).filter(|w| w[0] != w[1]).count()
    }

    pub(crate) fn set_arc(&mut self, port: Port, label: ArcLabel) {
        self.arcs[port.slot()] = label;
    }

    /// Exchange over and under strands: `i0, i1, j, k := j, k, i0, i1`.
    pub(crate) fn swap(&mut self) {
        let [i0, i1, j, k] = self.arcs;
        self.arcs = [j, k, i0, i1];
        self.handedness = self.handedness.opposite();
    }
}

/// Slot state of a crossing in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrossingState {
    Live(Crossing),
    /// Eliminated by a rewrite; contributes nothing to arcs or traversal.
    Removed,
}

impl CrossingState {
    /// The live record, if any.
    #[must_use]
    pub const fn live(&self) -> Option<&Crossing> {
        match self {
            CrossingState::Live(crossing) => Some(crossing),
            CrossingState::Removed => None,
        }
    }
}

// =============================================================================
// DIAGRAM
// =============================================================================

/// A knot diagram: crossing arena, detached trivial loops, and a name.
///
/// Value semantics: `Clone` is a deep copy, and every recursive skein branch
/// owns its own `Diagram`, so a rewrite on one branch can never be seen by a
/// sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    crossings: Vec<CrossingState>,
    num_unknots: usize,
    label: String,
}

impl Diagram {
    /// Build a diagram from crossing records and validate it.
    ///
    /// An empty crossing list is the crossingless unknot.
    pub fn new(crossings: Vec<Crossing>) -> Result<Self, SkeinError> {
        if crossings.len() > MAX_INPUT_CROSSINGS {
            return Err(SkeinError::InvalidDiagram(format!(
                "{} crossings exceeds the maximum of {}",
                crossings.len(),
                MAX_INPUT_CROSSINGS
            )));
        }
        let num_unknots = usize::from(crossings.is_empty());
        let diagram = Self {
            crossings: crossings.into_iter().map(CrossingState::Live).collect(),
            num_unknots,
            label: String::new(),
        };
        diagram.validate()?;
        Ok(diagram)
    }

    /// Build a diagram from label quadruples and a parallel handedness list.
    pub fn from_parts(
        arcs: Vec<[ArcLabel; PORTS_PER_CROSSING]>,
        handedness: Vec<Handedness>,
    ) -> Result<Self, SkeinError> {
        if arcs.len() != handedness.len() {
            return Err(SkeinError::InvalidDiagram(format!(
                "{} crossings but {} handedness entries",
                arcs.len(),
                handedness.len()
            )));
        }
        let crossings = arcs
            .into_iter()
            .zip(handedness)
            .map(|(a, h)| Crossing::new(a[0], a[1], a[2], a[3], h))
            .collect();
        Self::new(crossings)
    }

    /// The crossingless diagram of `n` disjoint trivial loops.
    #[must_use]
    pub fn unlink(n: usize) -> Self {
        Self {
            crossings: Vec::new(),
            num_unknots: n,
            label: String::new(),
        }
    }

    /// Attach a diagnostic name.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Diagnostic name of this diagram.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of detached trivial loops already proven separable.
    #[must_use]
    pub const fn num_unknots(&self) -> usize {
        self.num_unknots
    }

    pub(crate) fn add_unknots(&mut self, n: usize) {
        self.num_unknots = self.num_unknots.saturating_add(n);
    }

    /// Number of slots, live or removed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.crossings.len()
    }

    /// True when the arena has no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crossings.is_empty()
    }

    /// Number of live crossings.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.crossings.iter().filter(|s| s.live().is_some()).count()
    }

    /// True once every crossing has been eliminated.
    #[must_use]
    pub fn is_unlink(&self) -> bool {
        self.live_count() == 0
    }

    /// Raw slot states in index order.
    #[must_use]
    pub fn states(&self) -> &[CrossingState] {
        &self.crossings
    }

    /// Live crossings in ascending index order.
    pub fn live_crossings(&self) -> impl Iterator<Item = (CrossingId, &Crossing)> + '_ {
        self.crossings
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.live().map(|c| (CrossingId(i), c)))
    }

    /// True if `c` names a live crossing.
    #[must_use]
    pub fn is_live(&self, c: CrossingId) -> bool {
        self.crossings
            .get(c.index())
            .is_some_and(|s| s.live().is_some())
    }

    /// Read a live crossing.
    pub fn crossing(&self, c: CrossingId) -> Result<&Crossing, SkeinError> {
        match self.crossings.get(c.index()) {
            None => Err(SkeinError::UnknownCrossing(c)),
            Some(CrossingState::Removed) => Err(SkeinError::RemovedCrossing(c)),
            Some(CrossingState::Live(crossing)) => Ok(crossing),
        }
    }

    pub(crate) fn crossing_mut(&mut self, c: CrossingId) -> Result<&mut Crossing, SkeinError> {
        match self.crossings.get_mut(c.index()) {
            None => Err(SkeinError::UnknownCrossing(c)),
            Some(CrossingState::Removed) => Err(SkeinError::RemovedCrossing(c)),
            Some(CrossingState::Live(crossing)) => Ok(crossing),
        }
    }

    pub(crate) fn live_crossings_mut(&mut self) -> impl Iterator<Item = &mut Crossing> + '_ {
        self.crossings.iter_mut().filter_map(|s| match s {
            CrossingState::Live(crossing) => Some(crossing),
            CrossingState::Removed => None,
        })
    }

    pub(crate) fn tombstone(&mut self, c: CrossingId) -> Result<(), SkeinError> {
        self.crossing(c)?;
        if let Some(slot) = self.crossings.get_mut(c.index()) {
            *slot = CrossingState::Removed;
        }
        Ok(())
    }

    /// Handedness of a live crossing.
    pub fn handedness(&self, c: CrossingId) -> Result<Handedness, SkeinError> {
        Ok(self.crossing(c)?.handedness())
    }

    /// Arc label at `(c, port)`.
    pub fn port_arc(&self, c: CrossingId, port: Port) -> Result<ArcLabel, SkeinError> {
        Ok(self.crossing(c)?.arc(port))
    }

    /// Every live port holding each label, in deterministic order.
    #[must_use]
    pub fn arc_ports(&self) -> BTreeMap<ArcLabel, Vec<(CrossingId, Port)>> {
        let mut map: BTreeMap<ArcLabel, Vec<(CrossingId, Port)>> = BTreeMap::new();
        for (id, crossing) in self.live_crossings() {
            for port in Port::ALL {
                map.entry(crossing.arc(port)).or_default().push((id, port));
            }
        }
        map
    }

    /// Largest label held by any live port.
    #[must_use]
    pub fn max_arc(&self) -> Option<ArcLabel> {
        self.live_crossings()
            .flat_map(|(_, c)| c.arcs())
            .max()
    }

    /// Check the arc invariant over all live crossings.
    ///
    /// Every live label occurs at exactly two live ports, and joins an
    /// outgoing port (`i1`, `k`) to an incoming port (`i0`, `j`).
    pub fn validate(&self) -> Result<(), SkeinError> {
        for (arc, ports) in self.arc_ports() {
            if let [(crossing, port)] = ports.as_slice() {
                return Err(SkeinError::DanglingArc {
                    crossing: *crossing,
                    port: *port,
                    arc,
                });
            }
            if ports.len() != 2 {
                return Err(SkeinError::InvalidDiagram(format!(
                    "arc {} appears at {} ports",
                    arc,
                    ports.len()
                )));
            }
            let outgoing = ports.iter().filter(|(_, p)| p.is_outgoing()).count();
            if outgoing != 1 {
                return Err(SkeinError::InvalidDiagram(format!(
                    "arc {} joins {}.{} to {}.{} against the strand orientation",
                    arc, ports[0].0, ports[0].1, ports[1].0, ports[1].1
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// PORT TRAVERSAL
// =============================================================================

impl Diagram {
    /// Find the port at the other end of the arc leaving `(c, port)`.
    ///
    /// The far end may be on `c` itself when the arc closes straight back.
    pub fn neighbor_and_incoming_port(
        &self,
        c: CrossingId,
        port: Port,
    ) -> Result<(CrossingId, Port), SkeinError> {
        let arc = self.port_arc(c, port)?;
        let mut found = None;
        for (id, crossing) in self.live_crossings() {
            for other in Port::ALL {
                if (id, other) == (c, port) || crossing.arc(other) != arc {
                    continue;
                }
                if found.is_some() {
                    return Err(SkeinError::InvalidDiagram(format!(
                        "arc {} at {}.{} has more than one far end",
                        arc, c, port
                    )));
                }
                found = Some((id, other));
            }
        }
        found.ok_or(SkeinError::DanglingArc {
            crossing: c,
            port,
            arc,
        })
    }

    /// Walk from `(c1, port1)` to `(c2, port2)`, listing the crossings passed.
    ///
    /// Each visited crossing is classified by how the traveling strand passes
    /// it. The destination itself is not listed. Without `force_to_far_end`
    /// the walk ends at the first arrival at `c2` through any port; with it
    /// the walk only ends on arrival through `port2`, and earlier touches of
    /// `c2` are listed like any other crossing. Use the forced form when
    /// `c1 == c2`.
    pub fn crossings_between(
        &self,
        c1: CrossingId,
        port1: Port,
        c2: CrossingId,
        port2: Port,
        force_to_far_end: bool,
    ) -> Result<Vec<(CrossingId, CrossingType)>, SkeinError> {
        self.crossing(c2)?;
        let bound = self.walk_bound();
        let mut visited = Vec::new();
        let mut current = (c1, port1);

        for _ in 0..bound {
            let (next, incoming) = self.neighbor_and_incoming_port(current.0, current.1)?;
            if next == c2 && (!force_to_far_end || incoming == port2) {
                return Ok(visited);
            }
            let exit = incoming.continuation();
            visited.push((next, CrossingType::from_exit(exit)));
            current = (next, exit);
        }

        Err(SkeinError::InvalidDiagram(format!(
            "walk from {}.{} never reached {}.{}",
            c1, port1, c2, port2
        )))
    }

    /// Longest possible walk before a strand must have closed.
    pub(crate) fn walk_bound(&self) -> usize {
        self.live_count()
            .saturating_mul(PORTS_PER_CROSSING)
            .saturating_mul(2)
            .saturating_add(2)
    }
}

// =============================================================================
// TESTS
// =============================================================================
