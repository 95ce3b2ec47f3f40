//! # Diagram Input
//!
//! Serde shapes for diagram descriptions.
//!
//! A crossing is either the four-port form `{i0, i1, j, k}` or the legacy
//! three-port form `{i, j, k}` where the over strand keeps one label `i` on
//! both sides. Legacy crossings are normalized in input order: `i1` gets a
//! fresh label and the one other incoming port holding `i` is moved onto it.
//!
//! ```json
//! {
//!   "name": "trefoil",
//!   "crossings": [{"i0": 5, "i1": 0, "j": 2, "k": 3}, ...],
//!   "handedness": ["right", "right", "right"]
//! }
//! ```

use crate::graph::Diagram;
use crate::primitives::PORTS_PER_CROSSING;
use crate::{ArcLabel, CrossingId, Handedness, Port, SkeinError};
use serde::{Deserialize, Serialize};

/// One crossing as written in an input file.
///
/// Keys outside the chosen form are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CrossingRepr", into = "CrossingRepr")]
pub enum CrossingSpec {
    Full { i0: u32, i1: u32, j: u32, k: u32 },
    Legacy { i: u32, j: u32, k: u32 },
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FullPorts {
    i0: u32,
    i1: u32,
    j: u32,
    k: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct LegacyPorts {
    i: u32,
    j: u32,
    k: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CrossingRepr {
    Full(FullPorts),
    Legacy(LegacyPorts),
}

impl From<CrossingRepr> for CrossingSpec {
    fn from(repr: CrossingRepr) -> Self {
        match repr {
            CrossingRepr::Full(FullPorts { i0, i1, j, k }) => CrossingSpec::Full { i0, i1, j, k },
            CrossingRepr::Legacy(LegacyPorts { i, j, k }) => CrossingSpec::Legacy { i, j, k },
        }
    }
}

impl From<CrossingSpec> for CrossingRepr {
    fn from(spec: CrossingSpec) -> Self {
        match spec {
            CrossingSpec::Full { i0, i1, j, k } => CrossingRepr::Full(FullPorts { i0, i1, j, k }),
            CrossingSpec::Legacy { i, j, k } => CrossingRepr::Legacy(LegacyPorts { i, j, k }),
        }
    }
}

impl CrossingSpec {
    fn max_label(&self) -> u32 {
        match *self {
            CrossingSpec::Full { i0, i1, j, k } => i0.max(i1).max(j).max(k),
            CrossingSpec::Legacy { i, j, k } => i.max(j).max(k),
        }
    }
}

/// A complete diagram description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramSpec {
    #[serde(default)]
    pub name: String,
    pub crossings: Vec<CrossingSpec>,
    pub handedness: Vec<Handedness>,
    /// Extra detached trivial loops.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub unknots: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl DiagramSpec {
    /// Describe the live crossings of `diagram` in four-port form.
    #[must_use]
    pub fn from_diagram(name: impl Into<String>, diagram: &Diagram) -> Self {
        let (crossings, handedness) = diagram
            .live_crossings()
            .map(|(_, c)| {
                let [i0, i1, j, k] = c.arcs().map(ArcLabel::value);
                (CrossingSpec::Full { i0, i1, j, k }, c.handedness())
            })
            .unzip();
        let unknots = if diagram.is_unlink() && diagram.num_unknots() == 1 {
            0
        } else {
            diagram.num_unknots()
        };
        Self {
            name: name.into(),
            crossings,
            handedness,
            unknots,
        }
    }

    /// Normalize and validate into a diagram.
    pub fn into_diagram(self) -> Result<Diagram, SkeinError> {
        if self.crossings.len() != self.handedness.len() {
            return Err(SkeinError::InvalidDiagram(format!(
                "{} crossings but {} handedness entries",
                self.crossings.len(),
                self.handedness.len()
            )));
        }
        let rows = normalize(&self.crossings)?;
        let base = if rows.is_empty() && self.unknots > 0 {
            Diagram::unlink(self.unknots)
        } else {
            let mut diagram = Diagram::from_parts(rows, self.handedness)?;
            diagram.add_unknots(self.unknots);
            diagram
        };
        Ok(base.with_label(self.name))
    }
}

/// Rewrite every crossing into four-port label rows.
fn normalize(specs: &[CrossingSpec]) -> Result<Vec<[ArcLabel; PORTS_PER_CROSSING]>, SkeinError> {
    let mut fresh = specs
        .iter()
        .map(CrossingSpec::max_label)
        .max()
        .and_then(|m| m.checked_add(1))
        .map_or(ArcLabel(0), ArcLabel);

    let mut rows: Vec<[ArcLabel; PORTS_PER_CROSSING]> = specs
        .iter()
        .map(|spec| match *spec {
            CrossingSpec::Full { i0, i1, j, k } => [i0, i1, j, k].map(ArcLabel),
            CrossingSpec::Legacy { i, j, k } => [i, i, j, k].map(ArcLabel),
        })
        .collect();

    for (n, spec) in specs.iter().enumerate() {
        let CrossingSpec::Legacy { i, .. } = *spec else {
            continue;
        };
        let over = ArcLabel(i);
        let others: Vec<(usize, Port)> = rows
            .iter()
            .enumerate()
            .flat_map(|(m, row)| [Port::I0, Port::J].map(|p| (m, p, row[p.slot()])))
            .filter(|&(m, p, label)| label == over && (m, p) != (n, Port::I0))
            .map(|(m, p, _)| (m, p))
            .collect();

        let (m, port) = match others.as_slice() {
            [only] => *only,
            [] => {
                return Err(SkeinError::DanglingArc {
                    crossing: CrossingId(n),
                    port: Port::I0,
                    arc: over,
                });
            }
            _ => {
                return Err(SkeinError::InvalidDiagram(format!(
                    "legacy over arc {} at c{} has {} incoming ends",
                    over,
                    n,
                    others.len()
                )));
            }
        };

        rows[n][Port::I1.slot()] = fresh;
        rows[m][port.slot()] = fresh;
        fresh = fresh
            .next()
            .ok_or_else(|| SkeinError::InvalidDiagram("arc labels exhausted".to_string()))?;
    }

    Ok(rows)
}

// =============================================================================
// TESTS
// =============================================================================
