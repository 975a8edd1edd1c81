/// The evaluator module executes the AST and builds the CSG tree.
///
/// The evaluator walks the scope-checked AST with a stack of call frames,
/// evaluates expressions, binds arguments, runs loops and conditionals, and
/// combines the geometry every statement produces.
///
/// # Responsibilities
/// - Evaluates expressions and statements.
/// - Maintains call frames and block frames and the hybrid name lookup.
/// - Instantiates built-in and user-defined modules and functions.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a meaningful language element such as a number, string,
/// identifier, keyword, directive or operator, with its source position.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Skips comments and whitespace while tracking line numbers.
/// - Reports lexical errors for invalid input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// # Responsibilities
/// - Converts tokens into AST nodes, desugaring `assign` and multi-variable
///   loops.
/// - Follows `include` and `use` directives and detects include cycles.
/// - Reports fatal syntax errors and collects non-fatal diagnostics.
pub mod parser;
/// The scope module builds and queries the static scope tree.
///
/// # Responsibilities
/// - Opens a scope for every block-opening construct.
/// - Rejects declarations that refer to names not yet declared.
/// - Resolves every module and function call to its definition.
pub mod scope;
/// The value module defines the runtime data types for evaluation.
pub mod value;
