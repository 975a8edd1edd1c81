//! # solidscript
//!
//! solidscript is the front end of an OpenSCAD-style solid modeling language.
//! It parses source text (following `include` and `use` directives), checks
//! that every declaration only refers to names declared before it, and
//! evaluates the program into a constructive solid geometry tree.

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

use std::path::Path;

use crate::{
    ast::Node,
    config::EvalConfig,
    csg::Csg,
    error::Error,
    interpreter::{
        evaluator::core::Evaluator,
        parser::{ParseSession, parse_file, parse_source},
        scope::build_scopes,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` tree that represents the syntactic
/// structure of a program. The AST is built by the parser, annotated with
/// scopes by the scope builder and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines node kinds for all language constructs.
/// - Attaches ids and source positions to nodes for side tables and error
///   reporting.
pub mod ast;
/// Evaluator configuration.
///
/// Binding mode and the Undefined-argument policy, selectable from the
/// command line.
pub mod config;
/// The CSG tree produced by evaluation.
///
/// This is the whole contract with the geometry backend: leaf shapes,
/// combinators and unary wrappers.
pub mod csg;
/// Provides unified error types for every phase.
///
/// This module defines the fatal errors raised while parsing, scope checking
/// or evaluating, and the non-fatal diagnostics collected along the way.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, scopes, evaluator).
/// - Attaches source positions and detailed messages for context.
pub mod error;
/// Orchestrates the pipeline from source text to CSG.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, scope builder and evaluator.
/// - Defines the runtime value representation.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

/// Scope-checks and evaluates a parsed program.
///
/// # Returns
/// The root CSG node, or `None` if the program produces no geometry.
///
/// # Errors
/// A `ScopeError` for forward references or unknown callees, or a
/// `RuntimeError` on an internal invariant violation.
pub fn render(root: &Node, config: &EvalConfig) -> Result<Option<Csg>, Error> {
    let scopes = build_scopes(root)?;
    Ok(Evaluator::new(root, &scopes, config).run()?)
}

/// Renders literal source text to a CSG tree.
///
/// Relative `include` and `use` targets resolve against `base_dir`.
///
/// # Errors
/// The first fatal error of any phase.
///
/// # Examples
/// ```
/// use std::path::Path;
///
/// use solidscript::{config::EvalConfig, render_source};
///
/// let source = "difference() { cube(10); sphere(6); }";
/// let csg = render_source(source, Path::new("."), &EvalConfig::default()).unwrap();
/// assert_eq!(csg.unwrap().to_string(),
///            "difference\n    cube(size = [10, 10, 10], center = false)\n    sphere(r = 6)");
///
/// // Forward reference: 'b' is declared after 'a'.
/// let source = "a = b; b = 1;";
/// assert!(render_source(source, Path::new("."), &EvalConfig::default()).is_err());
/// ```
pub fn render_source(source: &str, base_dir: &Path, config: &EvalConfig) -> Result<Option<Csg>, Error> {
    let mut session = ParseSession::new();
    let root = parse_source(source, base_dir, &mut session)?;
    render(&root, config)
}

/// Renders a source file to a CSG tree.
///
/// # Errors
/// The first fatal error of any phase, including failure to read the file.
pub fn render_file(path: &Path, config: &EvalConfig) -> Result<Option<Csg>, Error> {
    let mut session = ParseSession::new();
    let root = parse_file(path, &mut session)?;
    render(&root, config)
}
