//! # Diagram Catalog
//!
//! Standard diagrams used as fixtures, plus braid closures.
//!
//! Braid words use the usual signed generator notation on `strands` strands:
//! `g` is `sigma_g` (right-handed, the left strand passing over) and `-g` its
//! inverse. Strands that no generator touches close up into detached loops.

use crate::formats::{CrossingSpec, DiagramSpec};
use crate::graph::{Crossing, Diagram};
use crate::{Handedness, SkeinError};

/// Names accepted by [`by_name`]; `<n>` is a non-negative integer.
pub const CATALOG_NAMES: [&str; 6] = [
    "unknot",
    "unlink-<n>",
    "trefoil",
    "figure-eight",
    "hopf",
    "torus-2-<n>",
];

/// The crossingless unknot.
#[must_use]
pub fn unknot() -> Diagram {
    Diagram::unlink(1).with_label("unknot")
}

/// `n` disjoint trivial loops.
#[must_use]
pub fn unlink(n: usize) -> Diagram {
    Diagram::unlink(n).with_label(format!("unlink-{}", n))
}

/// The right-handed trefoil on three crossings.
pub fn trefoil() -> Result<Diagram, SkeinError> {
    Ok(Diagram::new(vec![
        Crossing::from_raw([5, 0, 2, 3], Handedness::Right),
        Crossing::from_raw([3, 4, 0, 1], Handedness::Right),
        Crossing::from_raw([1, 2, 4, 5], Handedness::Right),
    ])?
    .with_label("trefoil"))
}

/// The figure-eight knot, from its three-port description.
pub fn figure_eight() -> Result<Diagram, SkeinError> {
    DiagramSpec {
        name: "figure-eight".to_string(),
        crossings: vec![
            CrossingSpec::Legacy { i: 2, j: 3, k: 0 },
            CrossingSpec::Legacy { i: 3, j: 0, k: 1 },
            CrossingSpec::Legacy { i: 0, j: 1, k: 2 },
            CrossingSpec::Legacy { i: 1, j: 2, k: 3 },
        ],
        handedness: vec![
            Handedness::Left,
            Handedness::Right,
            Handedness::Left,
            Handedness::Right,
        ],
        unknots: 0,
    }
    .into_diagram()
}

/// The positive Hopf link.
pub fn hopf_link() -> Result<Diagram, SkeinError> {
    Ok(Diagram::new(vec![
        Crossing::from_raw([1, 0, 3, 2], Handedness::Right),
        Crossing::from_raw([2, 3, 0, 1], Handedness::Right),
    ])?
    .with_label("hopf"))
}

/// Closure of `sigma_1^n` on two strands: the `(2, n)` torus link.
pub fn torus_2(n: usize) -> Result<Diagram, SkeinError> {
    let word = vec![1; n];
    Ok(from_braid_word(2, &word)?.with_label(format!("torus-2-{}", n)))
}

/// Closure of a braid word.
pub fn from_braid_word(strands: usize, word: &[i32]) -> Result<Diagram, SkeinError> {
    let width = u32::try_from(strands)
        .ok()
        .filter(|w| *w > 0)
        .ok_or_else(|| SkeinError::InvalidDiagram(format!("{} strands", strands)))?;
    if word.is_empty() {
        return Ok(Diagram::unlink(strands).with_label("braid"));
    }

    let mut current: Vec<u32> = (0..width).collect();
    let mut touched = vec![false; strands];
    let mut next = width;
    let mut rows = Vec::with_capacity(word.len());

    for &g in word {
        let i = g.unsigned_abs() as usize;
        if g == 0 || i >= strands {
            return Err(SkeinError::InvalidDiagram(format!(
                "generator {} on {} strands",
                g, strands
            )));
        }
        let i = i - 1;
        touched[i] = true;
        touched[i + 1] = true;
        let (a, b) = (current[i], current[i + 1]);
        let (x, y) = (next, next + 1);
        next += 2;
        if g > 0 {
            rows.push(([a, x, b, y], Handedness::Right));
            current[i + 1] = x;
            current[i] = y;
        } else {
            rows.push(([b, x, a, y], Handedness::Left));
            current[i] = x;
            current[i + 1] = y;
        }
    }

    // Close each strand back onto its starting label.
    for (position, &end) in current.iter().enumerate() {
        let start = position as u32;
        if end != start {
            for (arcs, _) in &mut rows {
                for label in arcs.iter_mut().filter(|l| **l == end) {
                    *label = start;
                }
            }
        }
    }

    let crossings = rows
        .into_iter()
        .map(|(arcs, h)| Crossing::from_raw(arcs, h))
        .collect();
    let mut diagram = Diagram::new(crossings)?;
    diagram.add_unknots(touched.iter().filter(|t| !**t).count());
    Ok(diagram.with_label("braid"))
}

/// Look up a catalog diagram by name. See [`CATALOG_NAMES`].
pub fn by_name(name: &str) -> Result<Diagram, SkeinError> {
    let count = |rest: &str| {
        rest.parse::<usize>()
            .map_err(|_| SkeinError::InvalidDiagram(format!("bad count in {:?}", name)))
    };
    match name {
        "unknot" => Ok(unknot()),
        "trefoil" => trefoil(),
        "figure-eight" => figure_eight(),
        "hopf" => hopf_link(),
        _ => {
            if let Some(rest) = name.strip_prefix("unlink-") {
                Ok(unlink(count(rest)?))
            } else if let Some(rest) = name.strip_prefix("torus-2-") {
                torus_2(count(rest)?)
            } else {
                Err(SkeinError::InvalidDiagram(format!(
                    "unknown catalog diagram {:?} (known: {})",
                    name,
                    CATALOG_NAMES.join(", ")
                )))
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
