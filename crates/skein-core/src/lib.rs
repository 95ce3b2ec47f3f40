//! # skein-core
//!
//! The knot-diagram reduction and skein-recursion engine - THE LOGIC.
//!
//! This crate holds the mutable crossing graph, its local rewrites, the
//! Reidemeister-I reducer, the closed-strand decomposition and the recursive
//! HOMFLY solver.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Has NO async, NO I/O, NO network dependencies (pure Rust)
//! - Is deterministic: ordered collections only, integer arithmetic only
//! - Never shares a diagram between recursive branches; each branch owns a copy
//! - Returns every failure as a `SkeinError`; it never prints and carries on

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod components;
pub mod formats;
pub mod graph;
pub mod homfly;
pub mod mutation;
pub mod polynomial;
pub mod primitives;
pub mod reidemeister;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{ArcLabel, CrossingId, CrossingType, Handedness, Port, SkeinError};

// =============================================================================
// RE-EXPORTS: Diagram Engine
// =============================================================================

pub use components::{DiagramStats, KnotPath, PathStep};
pub use graph::{Crossing, CrossingState, Diagram};
pub use homfly::{BranchPath, EngineConfig, HomflyEngine, Resolution, SolveStats, skein_solve};
pub use polynomial::{LaurentPoly, Monomial};
pub use reidemeister::R1Candidate;

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{CrossingSpec, DiagramSpec, ResultRecord};
