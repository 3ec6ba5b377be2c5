//! # lazycalc
//!
//! lazycalc is a lazy calculator for assignment statements such as
//! `B = A + 1`. Statements may be entered before the variables they use are
//! defined: each one is parsed into a syntax tree, queued, and evaluated
//! round-robin as its inputs become known. Evaluation is partial, so the
//! parts of a tree that can be computed are folded to constants even while
//! the rest still waits.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{error::ParseError, interpreter::scheduler::Scheduler};

/// Defines the syntax tree of expressions.
///
/// This module declares the `Node` enum and the operator and function types
/// it is built from. Trees are built by the parser and folded in place by the
/// evaluator.
///
/// # Responsibilities
/// - Defines the node kinds: constants, variables, operators, calls.
/// - Renders trees back to text for diagnostics.
pub mod ast;
/// Provides the error types for parsing, evaluation and the command driver.
///
/// # Responsibilities
/// - Defines one error enum per phase, with positions where they apply.
/// - Implements `std::error::Error` and `Display` for all of them.
pub mod error;
/// Ties lexing, parsing, evaluation and scheduling together.
///
/// This module exposes the queue that accepts statements and evaluates them
/// lazily, along with the command driver used by the binary.
///
/// # Responsibilities
/// - Coordinates lexer, parser, evaluator and scheduler.
/// - Owns the variable store and the pending expressions.
/// - Reports per-expression outcomes and whether a pass made progress.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert `usize` counts to `f64` without silent precision loss.
pub mod util;

/// Queues every statement of a script and evaluates until nothing more can
/// be computed.
///
/// Each line holds one statement. Blank lines and lines starting with `#`
/// are skipped. The returned scheduler holds the committed values and any
/// expressions that are still waiting.
///
/// # Errors
/// Returns the first [`ParseError`] met; nothing is evaluated in that case.
///
/// # Examples
/// ```
/// use lazycalc::{interpreter::variables::Variable, settle_script};
///
/// let scheduler = settle_script("C = B * 2\nB = A + 1\nA = 1").unwrap();
/// assert_eq!(scheduler.value(Variable::try_from('c').unwrap()), Some(4.0));
///
/// // A cycle never resolves; both expressions stay queued.
/// let scheduler = settle_script("X = Y\nY = X").unwrap();
/// assert_eq!(scheduler.pending().count(), 2);
///
/// assert!(settle_script("A = 1 +").is_err());
/// ```
pub fn settle_script(source: &str) -> Result<Scheduler, ParseError> {
    let mut scheduler = Scheduler::new();

    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        scheduler.submit(line)?;
    }

    scheduler.settle();
    Ok(scheduler)
}
