//! # Core Type Definitions
//!
//! This module contains all core types for the skein engine:
//! - Crossing and arc identifiers (`CrossingId`, `ArcLabel`)
//! - Port naming and the continuation map (`Port`)
//! - Crossing sign and traversal classification (`Handedness`, `CrossingType`)
//! - Error types (`SkeinError`)
//!
//! ## Determinism Guarantees
//!
//! All identifiers in this module:
//! - Use integer values only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Stable index of a crossing inside a diagram.
///
/// Crossings are never re-indexed: a removed crossing keeps its slot, so a
/// `CrossingId` means the same vertex for the whole lifetime of a diagram and
/// of every branch cloned from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrossingId(pub usize);

impl CrossingId {
    /// Get the raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CrossingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Label of one strand segment (arc) of the diagram.
///
/// A live label appears at exactly two live ports, one outgoing and one
/// incoming. Both may sit on the same crossing when the arc closes directly
/// back on itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArcLabel(pub u32);

impl ArcLabel {
    /// Get the raw label value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The label immediately after this one, if it fits.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for ArcLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// PORTS
// =============================================================================

/// One of the four labeled ports of a crossing.
///
/// `I0`/`I1` are the two ends of the strand passing over, `J`/`K` the two ends
/// of the strand passing under. Over strands run `I0 -> I1` and under strands
/// run `J -> K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Port {
    #[serde(rename = "i0")]
    I0,
    #[serde(rename = "i1")]
    I1,
    #[serde(rename = "j")]
    J,
    #[serde(rename = "k")]
    K,
}

impl Port {
    /// All ports in storage order.
    pub const ALL: [Port; 4] = [Port::I0, Port::I1, Port::J, Port::K];

    /// Ports a strand leaves a crossing through.
    pub const OUTGOING: [Port; 2] = [Port::I1, Port::K];

    /// Slot of this port inside a crossing record.
    #[must_use]
    pub const fn slot(self) -> usize {
        match self {
            Port::I0 => 0,
            Port::I1 => 1,
            Port::J => 2,
            Port::K => 3,
        }
    }

    /// The port the same physical strand exits through when it enters here.
    ///
    /// `I0 <-> I1`, `J <-> K`.
    #[must_use]
    pub const fn continuation(self) -> Port {
        match self {
            Port::I0 => Port::I1,
            Port::I1 => Port::I0,
            Port::J => Port::K,
            Port::K => Port::J,
        }
    }

    /// True for the ports of the over strand.
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Port::I0 | Port::I1)
    }

    /// True for the ports a strand leaves through (`I1`, `K`).
    #[must_use]
    pub const fn is_outgoing(self) -> bool {
        matches!(self, Port::I1 | Port::K)
    }

    /// Lowercase port name as used in input files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Port::I0 => "i0",
            Port::I1 => "i1",
            Port::J => "j",
            Port::K => "k",
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// HANDEDNESS & CROSSING TYPE
// =============================================================================

/// Sign of a crossing. `Right` is the positive crossing `L+` of the skein relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// The other sign.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handedness::Left => f.write_str("left"),
            Handedness::Right => f.write_str("right"),
        }
    }
}

/// How a traveling strand passes an intermediate crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossingType {
    Over,
    Under,
}

impl CrossingType {
    /// Classify a visit by the port the strand exits through.
    #[must_use]
    pub const fn from_exit(exit: Port) -> Self {
        if exit.is_over() {
            CrossingType::Over
        } else {
            CrossingType::Under
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the skein engine.
///
/// - No silent failures: an absent intermediate result would corrupt the
///   algebraic solve, so every failure is returned to the caller
/// - The CORE never panics; all errors propagate through `Result`
#[derive(Debug, Error)]
pub enum SkeinError {
    /// Malformed arc/port bookkeeping.
    #[error("Invalid diagram: {0}")]
    InvalidDiagram(String),

    /// An arc label that appears nowhere else in the diagram.
    #[error("Dangling arc {arc} at {crossing}.{port}")]
    DanglingArc {
        crossing: CrossingId,
        port: Port,
        arc: ArcLabel,
    },

    /// Operation attempted on a tombstoned crossing.
    #[error("Crossing {0} has been removed")]
    RemovedCrossing(CrossingId),

    /// Crossing index past the end of the diagram.
    #[error("Unknown crossing: {0}")]
    UnknownCrossing(CrossingId),

    /// No distinguished crossing remains on a branch that still has crossings.
    #[error("No distinguished crossing left on branch {branch}")]
    ExhaustedCrossings { branch: String },

    /// The skein recursion went deeper than its configured bound.
    #[error("Recursion limit {limit} exceeded on branch {branch}")]
    RecursionLimitExceeded { limit: usize, branch: String },

    /// Negative power of a polynomial that is not a unit.
    #[error("Polynomial is not invertible: {0}")]
    NonInvertible(String),

    /// A coefficient or exponent left its integer range.
    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A configuration file could not be used.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl SkeinError {
    /// True for the diagram-consistency family (`InvalidDiagram`, `DanglingArc`).
    #[must_use]
    pub fn is_invalid_diagram(&self) -> bool {
        matches!(
            self,
            SkeinError::InvalidDiagram(_) | SkeinError::DanglingArc { .. }
        )
    }

    /// True for failures a batch driver may record and skip.
    ///
    /// Both are fatal within a single computation.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SkeinError::ExhaustedCrossings { .. } | SkeinError::RecursionLimitExceeded { .. }
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuation_is_an_involution() {
        for port in Port::ALL {
            assert_eq!(port.continuation().continuation(), port);
            assert_ne!(port.continuation(), port);
        }
    }

    #[test]
    fn continuation_keeps_strand_level() {
        for port in Port::ALL {
            assert_eq!(port.is_over(), port.continuation().is_over());
            assert_ne!(port.is_outgoing(), port.continuation().is_outgoing());
        }
    }

    #[test]
    fn slots_are_distinct() {
        let slots: Vec<_> = Port::ALL.iter().map(|p| p.slot()).collect();
        assert_eq!(slots, vec![0, 1, 2, 3]);
    }

    #[test]
    fn crossing_type_from_exit() {
        assert_eq!(CrossingType::from_exit(Port::I1), CrossingType::Over);
        assert_eq!(CrossingType::from_exit(Port::I0), CrossingType::Over);
        assert_eq!(CrossingType::from_exit(Port::K), CrossingType::Under);
    }

    #[test]
    fn handedness_opposite() {
        assert_eq!(Handedness::Left.opposite(), Handedness::Right);
        assert_eq!(Handedness::Right.opposite().opposite(), Handedness::Right);
    }

    #[test]
    fn arc_label_next_saturates_to_none() {
        assert_eq!(ArcLabel(4).next(), Some(ArcLabel(5)));
        assert_eq!(ArcLabel(u32::MAX).next(), None);
    }

    #[test]
    fn error_families() {
        let dangling = SkeinError::DanglingArc {
            crossing: CrossingId(0),
            port: Port::J,
            arc: ArcLabel(3),
        };
        assert!(dangling.is_invalid_diagram());
        assert!(!dangling.is_recoverable());

        let limit = SkeinError::RecursionLimitExceeded {
            limit: 4,
            branch: "root".to_string(),
        };
        assert!(limit.is_recoverable());
        assert!(!SkeinError::RemovedCrossing(CrossingId(1)).is_recoverable());
    }

    #[test]
    fn port_serde_names() {
        assert_eq!(Port::I0.name(), "i0");
        assert_eq!(Port::K.to_string(), "k");
    }
}
