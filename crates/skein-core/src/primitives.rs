//! # Innate Primitives
//!
//! Hardcoded runtime constants for the skein engine.
//!
//! These primitives are compiled into the binary and are immutable at runtime.
//! Configurable limits (see `homfly::EngineConfig`) default to the values here.

/// Default bound on skein recursion depth.
///
/// Each recursive call strictly decreases (live crossings, undescended
/// crossings), so depth grows roughly quadratically in the crossing count.
/// 256 covers diagrams with a few tens of crossings.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Maximum number of crossings accepted from external input.
///
/// The skein recursion is exponential in the crossing count; this rejects
/// inputs that could never finish before they are built.
pub const MAX_INPUT_CROSSINGS: usize = 256;

/// Number of ports on every crossing.
pub const PORTS_PER_CROSSING: usize = 4;

/// Separator between the diagram name and the polynomial in a results-log row.
///
/// - Row format: `<diagram-name>,<polynomial>`
/// - Other tooling parses this line format; it must not change.
pub const RESULTS_LOG_SEPARATOR: char = ',';

/// Name of the first formal variable (the framing variable).
pub const L_SYMBOL: &str = "l";

/// Name of the second formal variable.
pub const M_SYMBOL: &str = "m";
