//! # HOMFLY Engine
//!
//! Recursive skein-relation solver.
//!
//! Each call owns its diagram. The call reduces kinks, bottoms out on a
//! crossingless unlink, or picks a distinguished crossing and recurses on two
//! independent copies: one with the crossing switched and one with it
//! smoothed. The polynomial of the call's own diagram is then solved from
//!
//! ```text
//! l * P(L+) + l^-1 * P(L-) + m * P(L0) = 0
//! ```
//!
//! with `right` handedness as `L+` and `P(unknot) = 1`.
//!
//! ## Distinguished crossing
//!
//! Every closed strand is walked from the exit carrying its smallest arc
//! label, strands in ascending order of that label. A crossing whose first
//! visit passes under still violates the descending order; the lowest such
//! index is chosen. Switching it makes it descending, so each call strictly
//! decreases (live crossings, undescended crossings) and the recursion ends.

use crate::graph::Diagram;
use crate::polynomial::LaurentPoly;
use crate::primitives::DEFAULT_MAX_DEPTH;
use crate::{CrossingId, Handedness, SkeinError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, debug_span, trace};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Limits for one HOMFLY computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Deepest recursion allowed before `RecursionLimitExceeded`.
    pub max_depth: usize,
    /// Reidemeister-I reductions per call; `None` reduces to exhaustion.
    pub max_reductions: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_reductions: None,
        }
    }
}

// =============================================================================
// BRANCH PATH
// =============================================================================

/// One resolution choice on the way down the recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Swap(CrossingId),
    Smooth(CrossingId),
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Swap(c) => write!(f, "swap({})", c.index()),
            Resolution::Smooth(c) => write!(f, "smooth({})", c.index()),
        }
    }
}

/// Names a recursive branch, e.g. `root/swap(0)/smooth(2)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchPath(Vec<Resolution>);

impl BranchPath {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// This path extended by one resolution.
    #[must_use]
    pub fn child(&self, step: Resolution) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn steps(&self) -> &[Resolution] {
        &self.0
    }
}

impl fmt::Display for BranchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for step in &self.0 {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Counters collected over one computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveStats {
    /// Recursive calls made, the root included.
    pub calls: usize,
    /// Deepest branch reached.
    pub deepest: usize,
    /// Reidemeister-I eliminations over all branches.
    pub reductions: usize,
}

/// The recursive HOMFLY solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomflyEngine {
    config: EngineConfig,
}

impl HomflyEngine {
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// HOMFLY polynomial of `diagram`. The input is never mutated.
    pub fn compute(&self, diagram: &Diagram) -> Result<LaurentPoly, SkeinError> {
        self.compute_with_stats(diagram).map(|(poly, _)| poly)
    }

    /// HOMFLY polynomial together with recursion counters.
    pub fn compute_with_stats(
        &self,
        diagram: &Diagram,
    ) -> Result<(LaurentPoly, SolveStats), SkeinError> {
        let mut stats = SolveStats::default();
        let poly = self.solve(diagram.clone(), &BranchPath::root(), &mut stats)?;
        debug!(
            diagram = diagram.label(),
            calls = stats.calls,
            deepest = stats.deepest,
            "homfly computed"
        );
        Ok((poly, stats))
    }

    fn solve(
        &self,
        mut diagram: Diagram,
        path: &BranchPath,
        stats: &mut SolveStats,
    ) -> Result<LaurentPoly, SkeinError> {
        let span = debug_span!("skein", branch = %path);
        let _guard = span.enter();

        let depth = path.depth();
        if depth > self.config.max_depth {
            return Err(SkeinError::RecursionLimitExceeded {
                limit: self.config.max_depth,
                branch: path.to_string(),
            });
        }
        stats.calls += 1;
        stats.deepest = stats.deepest.max(depth);

        let reduced = diagram.reduce_r1s(self.config.max_reductions)?;
        if reduced > 0 {
            stats.reductions += reduced;
            debug!(reduced, live = diagram.live_count(), "kinks eliminated");
        }

        if diagram.is_unlink() {
            return unlink_value(&diagram);
        }

        let c = match diagram.untried_crossing()? {
            Some(c) => c,
            None => {
                // Descending diagrams are cleared by the reducer alone, so a
                // capped reduction pass is finished here before giving up.
                let rest = diagram.reduce_r1s(None)?;
                stats.reductions += rest;
                if diagram.is_unlink() {
                    return unlink_value(&diagram);
                }
                return Err(SkeinError::ExhaustedCrossings {
                    branch: path.to_string(),
                });
            }
        };
        let handedness = diagram.handedness(c)?;
        trace!(crossing = %c, %handedness, "distinguished crossing");

        let mut switched = diagram.clone();
        switched.swap_crossing(c)?;
        let mut smoothed = diagram;
        smoothed.smooth_crossing(c)?;

        let p_switched = self.solve(switched, &path.child(Resolution::Swap(c)), stats)?;
        let p_smoothed = self.solve(smoothed, &path.child(Resolution::Smooth(c)), stats)?;
        skein_solve(handedness, &p_switched, &p_smoothed)
    }
}

/// Closed form for a crossingless diagram.
fn unlink_value(diagram: &Diagram) -> Result<LaurentPoly, SkeinError> {
    let n = diagram.num_unknots();
    if n == 0 {
        return Err(SkeinError::InvalidDiagram(
            "empty link has no HOMFLY polynomial".to_string(),
        ));
    }
    trace!(unknots = n, "unlink reached");
    LaurentPoly::unlink(n)
}

/// Polynomial of a diagram from its switched and smoothed resolutions.
///
/// `handedness` is the sign of the distinguished crossing in the diagram
/// being solved for.
pub fn skein_solve(
    handedness: Handedness,
    switched: &LaurentPoly,
    smoothed: &LaurentPoly,
) -> Result<LaurentPoly, SkeinError> {
    let (switched_factor, smoothed_factor) = match handedness {
        // P(L+) = -l^-2 P(L-) - l^-1 m P(L0)
        Handedness::Right => (
            LaurentPoly::monomial(-1, -2, 0),
            LaurentPoly::monomial(-1, -1, 1),
        ),
        // P(L-) = -l^2 P(L+) - l m P(L0)
        Handedness::Left => (
            LaurentPoly::monomial(-1, 2, 0),
            LaurentPoly::monomial(-1, 1, 1),
        ),
    };
    switched_factor
        .checked_mul(switched)?
        .checked_add(&smoothed_factor.checked_mul(smoothed)?)
}

impl Diagram {
    /// Lowest-indexed crossing first met passing under on the base-point walk.
    pub fn untried_crossing(&self) -> Result<Option<CrossingId>, SkeinError> {
        let mut visited = BTreeSet::new();
        let mut untried = BTreeSet::new();
        for path in self.get_knot_paths()? {
            for step in path.steps() {
                if visited.insert(step.crossing) && !step.exit.is_over() {
                    untried.insert(step.crossing);
                }
            }
        }
        Ok(untried.first().copied())
    }
}

// =============================================================================
// TESTS
// =============================================================================
