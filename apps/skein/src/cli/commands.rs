//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::SkeinConfig;
use skein_core::{Diagram, DiagramSpec, HomflyEngine, ResultRecord, SkeinError, catalog};
use std::io::Write;
use std::path::{Path, PathBuf};

// =============================================================================
// INPUT FILES
// =============================================================================

/// The two kinds of file the binary reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// JSON diagram description.
    Diagram,
    /// TOML configuration.
    Config,
}

impl InputKind {
    /// Largest accepted file. Diagrams in scope have tens of crossings.
    #[must_use]
    pub const fn max_size(self) -> u64 {
        match self {
            InputKind::Diagram => 1024 * 1024,
            InputKind::Config => 64 * 1024,
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            InputKind::Diagram => "json",
            InputKind::Config => "toml",
        }
    }

    const fn name(self) -> &'static str {
        match self {
            InputKind::Diagram => "diagram",
            InputKind::Config => "config",
        }
    }

    fn malformed(self, message: String) -> SkeinError {
        match self {
            InputKind::Diagram => SkeinError::SerializationError(message),
            InputKind::Config => SkeinError::ConfigError(message),
        }
    }
}

/// Resolve and read an input file.
///
/// The file must exist, be a regular file with the kind's extension, and fit
/// within the kind's size limit. Returns the canonical path and the text.
pub fn read_input(path: &Path, kind: InputKind) -> Result<(PathBuf, String), SkeinError> {
    let io = |e: std::io::Error| {
        SkeinError::IoError(format!("{} file '{}': {}", kind.name(), path.display(), e))
    };
    let canonical = path.canonicalize().map_err(io)?;
    if !canonical.is_file() {
        return Err(SkeinError::IoError(format!(
            "{} path '{}' is not a regular file",
            kind.name(),
            path.display()
        )));
    }

    let extension = canonical.extension().and_then(|e| e.to_str());
    if !extension.is_some_and(|e| e.eq_ignore_ascii_case(kind.extension())) {
        return Err(kind.malformed(format!(
            "{} file '{}' must have a .{} extension",
            kind.name(),
            path.display(),
            kind.extension()
        )));
    }

    let size = std::fs::metadata(&canonical).map_err(io)?.len();
    if size > kind.max_size() {
        return Err(kind.malformed(format!(
            "{} file '{}' is {} bytes, limit is {}",
            kind.name(),
            path.display(),
            size,
            kind.max_size()
        )));
    }

    let text = std::fs::read_to_string(&canonical).map_err(io)?;
    Ok((canonical, text))
}

/// Resolve a file the binary writes to. Its directory must already exist.
fn output_target(path: &Path) -> Result<PathBuf, SkeinError> {
    let filename = path
        .file_name()
        .ok_or_else(|| SkeinError::IoError(format!("'{}' names no file", path.display())))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let dir = dir
        .canonicalize()
        .map_err(|e| SkeinError::IoError(format!("output directory '{}': {}", dir.display(), e)))?;
    Ok(dir.join(filename))
}

// =============================================================================
// DIAGRAM FILES
// =============================================================================

/// Load and validate a diagram file.
///
/// A file without a `name` is named after its file stem.
pub fn load_diagram(path: &Path) -> Result<Diagram, SkeinError> {
    let (canonical, text) = read_input(path, InputKind::Diagram)?;
    let mut spec: DiagramSpec = serde_json::from_str(&text)
        .map_err(|e| SkeinError::SerializationError(format!("{}: {}", path.display(), e)))?;

    if spec.name.is_empty() {
        spec.name = canonical
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    spec.into_diagram()
}

/// Append rows to the results log, creating it if needed.
pub fn append_results(log: &Path, rows: &[String]) -> Result<(), SkeinError> {
    let target = output_target(log)?;
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&target)
        .map_err(|e| SkeinError::IoError(format!("Cannot open results log: {}", e)))?;
    for row in rows {
        writeln!(file, "{}", row)
            .map_err(|e| SkeinError::IoError(format!("Cannot write results log: {}", e)))?;
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<(), SkeinError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| SkeinError::SerializationError(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

// =============================================================================
// HOMFLY COMMAND
// =============================================================================

/// Compute and print the polynomial of one diagram.
pub fn cmd_homfly(
    config: &SkeinConfig,
    json_mode: bool,
    verbose: bool,
    file: &Path,
    latex: bool,
) -> Result<(), SkeinError> {
    let diagram = load_diagram(file)?;
    let engine = HomflyEngine::new(config.engine);
    let (poly, stats) = engine.compute_with_stats(&diagram)?;

    if json_mode {
        print_json(&serde_json::json!({
            "name": diagram.label(),
            "polynomial": poly.to_string(),
            "latex": poly.to_latex(),
            "calls": stats.calls,
            "deepest": stats.deepest,
            "reductions": stats.reductions
        }))?;
        return Ok(());
    }

    if latex {
        println!("{}", poly.to_latex());
    } else {
        println!("{}", poly);
    }
    if verbose {
        println!();
        println!("Diagram:    {}", diagram.label());
        println!("Calls:      {}", stats.calls);
        println!("Deepest:    {}", stats.deepest);
        println!("Reductions: {}", stats.reductions);
    }

    Ok(())
}

// =============================================================================
// BATCH COMMAND
// =============================================================================

/// Result of a batch run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<ResultRecord>,
    /// Diagram name and error text of every skipped diagram.
    pub failures: Vec<(String, String)>,
}

/// Compute every file in order, appending each result row as it is produced.
///
/// Recursion-limit and exhausted-crossing failures are recorded against the
/// diagram name and the batch moves on. Any other error stops the batch.
pub fn run_batch(
    engine: &HomflyEngine,
    files: &[PathBuf],
    log: Option<&Path>,
) -> Result<BatchOutcome, SkeinError> {
    let mut outcome = BatchOutcome::default();

    for file in files {
        let diagram = load_diagram(file)?;
        let name = diagram.label().to_string();
        match engine.compute(&diagram) {
            Ok(poly) => {
                let record = ResultRecord::new(name, poly);
                let row = record.to_line()?;
                if let Some(log) = log {
                    append_results(log, &[row])?;
                }
                outcome.records.push(record);
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(diagram = %name, error = %e, "diagram skipped");
                outcome.failures.push((name, e.to_string()));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(outcome)
}

/// Compute many diagrams and report a summary.
pub fn cmd_batch(
    config: &SkeinConfig,
    json_mode: bool,
    files: &[PathBuf],
    log: Option<&Path>,
) -> Result<(), SkeinError> {
    let engine = HomflyEngine::new(config.engine);
    let outcome = run_batch(&engine, files, log)?;

    if json_mode {
        let results: Vec<_> = outcome
            .records
            .iter()
            .map(|r| serde_json::json!({ "name": r.name, "polynomial": r.polynomial.to_string() }))
            .collect();
        let failures: Vec<_> = outcome
            .failures
            .iter()
            .map(|(name, error)| serde_json::json!({ "name": name, "error": error }))
            .collect();
        print_json(&serde_json::json!({
            "computed": outcome.records.len(),
            "failed": outcome.failures.len(),
            "results": results,
            "failures": failures,
            "log": log.map(|p| p.to_string_lossy().into_owned())
        }))?;
        return Ok(());
    }

    for record in &outcome.records {
        println!("{}", record.to_line()?);
    }
    for (name, error) in &outcome.failures {
        println!("FAILED {}: {}", name, error);
    }
    println!();
    println!(
        "{} computed, {} failed",
        outcome.records.len(),
        outcome.failures.len()
    );
    if let Some(log) = log {
        println!("Results appended to {}", log.display());
    }

    Ok(())
}

// =============================================================================
// REDUCE COMMAND
// =============================================================================

/// Eliminate kinks and print before/after statistics.
pub fn cmd_reduce(json_mode: bool, file: &Path, limit: Option<usize>) -> Result<(), SkeinError> {
    let mut diagram = load_diagram(file)?;
    let before = diagram.stats()?;
    let reductions = diagram.reduce_r1s(limit)?;
    let after = diagram.stats()?;

    if json_mode {
        print_json(&serde_json::json!({
            "name": diagram.label(),
            "reductions": reductions,
            "before": before,
            "after": after
        }))?;
        return Ok(());
    }

    println!("Reidemeister-I Reduction: {}", diagram.label());
    println!("========================");
    println!("Eliminations: {}", reductions);
    println!();
    println!("                 before  after");
    println!(
        "Live crossings:  {:>6}  {:>5}",
        before.live_crossings, after.live_crossings
    );
    println!("Arcs:            {:>6}  {:>5}", before.arcs, after.arcs);
    println!(
        "Components:      {:>6}  {:>5}",
        before.components, after.components
    );
    println!("Unknots:         {:>6}  {:>5}", before.unknots, after.unknots);

    Ok(())
}

// =============================================================================
// COMPONENTS COMMAND
// =============================================================================

/// Print the closed strands of a diagram.
pub fn cmd_components(json_mode: bool, file: &Path) -> Result<(), SkeinError> {
    let diagram = load_diagram(file)?;
    let paths = diagram.get_knot_paths()?;

    if json_mode {
        print_json(&serde_json::json!({
            "name": diagram.label(),
            "strands": paths,
            "unknots": diagram.num_unknots()
        }))?;
        return Ok(());
    }

    println!("Components: {}", diagram.label());
    for (n, path) in paths.iter().enumerate() {
        println!("  strand {}: {}", n, path);
    }
    println!("  detached loops: {}", diagram.num_unknots());

    Ok(())
}

// =============================================================================
// CATALOG COMMAND
// =============================================================================

/// Write a catalog diagram in input-file form.
pub fn cmd_catalog(name: &str, output: Option<&Path>) -> Result<(), SkeinError> {
    let diagram = catalog::by_name(name)?;
    let spec = DiagramSpec::from_diagram(name, &diagram);
    let text = serde_json::to_string_pretty(&spec)
        .map_err(|e| SkeinError::SerializationError(e.to_string()))?;

    match output {
        Some(path) => {
            let target = output_target(path)?;
            std::fs::write(&target, text + "\n")
                .map_err(|e| SkeinError::IoError(format!("Cannot write diagram: {}", e)))?;
            tracing::info!(diagram = name, path = %target.display(), "catalog diagram written");
        }
        None => println!("{}", text),
    }

    Ok(())
}
