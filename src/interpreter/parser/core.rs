use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    ast::{Node, NodeId, NodeKind, Position},
    error::{Diagnostic, ParseError},
    interpreter::lexer::{Token, TokenStream},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// State shared by every parse belonging to one compilation.
///
/// The session is passed by `&mut` into each recursive parse started by an
/// `include` or `use` directive, so that node ids stay unique and cycles are
/// detected across files. Call [`ParseSession::reset`] before reusing a
/// session for an unrelated compilation.
#[derive(Debug, Default)]
pub struct ParseSession {
    visited:     HashSet<PathBuf>,
    next_id:     u32,
    diagnostics: Vec<Diagnostic>,
}

impl ParseSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every visited path, diagnostic and issued id.
    pub fn reset(&mut self) {
        self.visited.clear();
        self.next_id = 0;
        self.diagnostics.clear();
    }

    /// Hands out the next unused node id.
    pub fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Records `path` as entered.
    ///
    /// # Returns
    /// `false` if the path was already entered during this compilation.
    pub fn enter(&mut self, path: &Path) -> bool {
        self.visited.insert(path.to_path_buf())
    }

    /// Returns `true` if `path` has been entered during this compilation.
    #[must_use]
    pub fn has_visited(&self, path: &Path) -> bool {
        self.visited.contains(path)
    }

    /// Logs a non-fatal problem and keeps it for later inspection.
    pub fn warn(&mut self, message: impl Into<String>, position: Position, file: Option<&Path>) {
        let diagnostic = Diagnostic { message: message.into(),
                                      position,
                                      file: file.map(Path::to_path_buf) };
        tracing::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Every diagnostic raised so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Recursive-descent parser over one file's token stream.
///
/// The parser methods are spread across the sibling modules; this module
/// holds the cursor state and the top level.
pub struct Parser<'s> {
    pub(in crate::interpreter::parser) tokens:   TokenStream,
    pub(in crate::interpreter::parser) session:  &'s mut ParseSession,
    pub(in crate::interpreter::parser) base_dir: PathBuf,
    pub(in crate::interpreter::parser) file:     Option<PathBuf>,
    pub(in crate::interpreter::parser) depth:    usize,
}

/// Parses literal source text.
///
/// Relative `include` and `use` targets resolve against `base_dir`. The text
/// itself is not recorded as visited.
///
/// # Errors
/// Returns the first fatal `ParseError` of this source or of any file it
/// includes.
///
/// # Example
/// ```
/// use std::path::Path;
///
/// use solidscript::{
///     ast::NodeKind,
///     interpreter::parser::{ParseSession, parse_source},
/// };
///
/// let mut session = ParseSession::new();
/// let root = parse_source("cube(1); sphere(2);", Path::new("."), &mut session).unwrap();
///
/// assert_eq!(root.kind, NodeKind::Root);
/// assert_eq!(root.children.len(), 2);
/// ```
pub fn parse_source(source: &str,
                    base_dir: &Path,
                    session: &mut ParseSession)
                    -> ParseResult<Node> {
    let tokens = TokenStream::tokenize(source)?;
    let mut parser = Parser { tokens,
                              session,
                              base_dir: base_dir.to_path_buf(),
                              file: None,
                              depth: 0 };
    parser.parse_program()
}

/// Reads and parses the file at `path`, recording it as visited.
///
/// # Errors
/// Returns `ParseError::Io` if the file cannot be read, or the first fatal
/// parse error of the file or anything it includes.
pub fn parse_file(path: &Path, session: &mut ParseSession) -> ParseResult<Node> {
    let io_error = |e: std::io::Error| ParseError::Io { path:    path.to_path_buf(),
                                                        message: e.to_string(), };
    let canonical = fs::canonicalize(path).map_err(io_error)?;
    let source = fs::read_to_string(&canonical).map_err(io_error)?;
    session.enter(&canonical);

    tracing::debug!("parsing {}", canonical.display());
    let tokens = TokenStream::tokenize(&source)?;
    let base_dir = canonical.parent()
                            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let mut parser = Parser { tokens,
                              session,
                              base_dir,
                              file: Some(canonical),
                              depth: 0 };
    parser.parse_program()
}

impl Parser<'_> {
    /// Parses the whole token stream into a root node.
    ///
    /// Grammar:
    /// ```text
    /// program := (module_def | function_def | include | use | statement)* EOF
    /// ```
    ///
    /// `include` splices every top-level node of the target file; `use`
    /// splices only its module and function definitions.
    ///
    /// # Errors
    /// Any fatal parse error in this file or in an included file.
    pub fn parse_program(&mut self) -> ParseResult<Node> {
        let position = self.tokens.position();
        let mut children = Vec::new();

        while let Some(token) = self.tokens.peek() {
            match token {
                Token::Include(target) => {
                    let target = target.clone();
                    let at = self.tokens.position();
                    self.tokens.advance();
                    if let Some(root) = self.load(&target, at)? {
                        children.extend(root.children);
                    }
                },
                Token::Use(target) => {
                    let target = target.clone();
                    let at = self.tokens.position();
                    self.tokens.advance();
                    if let Some(root) = self.load(&target, at)? {
                        children.extend(root.children.into_iter().filter(Node::is_definition));
                    }
                },
                Token::RBrace => {
                    let at = self.tokens.position();
                    self.warn("Unmatched '}' ignored.", at);
                    self.tokens.advance();
                },
                Token::Semicolon => {
                    self.tokens.advance();
                },
                _ => children.push(self.parse_statement()?),
            }
        }

        Ok(self.node(NodeKind::Root, position, children))
    }

    /// Resolves and parses the target of an `include` or `use` directive.
    ///
    /// The target is looked up relative to the current file's directory, then
    /// as given. A missing target or one already entered in this compilation
    /// is a diagnostic, and the directive contributes nothing.
    fn load(&mut self, target: &str, at: Position) -> ParseResult<Option<Node>> {
        let Some(path) = self.resolve(target) else {
            self.warn(format!("Could not load '{target}'."), at);
            return Ok(None);
        };
        if self.session.has_visited(&path) {
            self.warn(format!("Include cycle detected with file '{target}'."), at);
            return Ok(None);
        }
        parse_file(&path, self.session).map(Some)
    }

    fn resolve(&self, target: &str) -> Option<PathBuf> {
        let candidates = [self.base_dir.join(target), PathBuf::from(target)];
        let found = candidates.into_iter().find(|p| p.is_file())?;
        fs::canonicalize(found).ok()
    }

    /// Builds a node at the current nesting depth with a fresh id.
    pub(in crate::interpreter::parser) fn node(&mut self,
                                               kind: NodeKind,
                                               position: Position,
                                               children: Vec<Node>)
                                               -> Node {
        Node { id: self.session.fresh_id(),
               kind,
               position,
               children,
               depth: self.depth }
    }

    /// Raises a diagnostic tagged with this parser's file.
    pub(in crate::interpreter::parser) fn warn(&mut self, message: impl Into<String>, at: Position) {
        self.session.warn(message, at, self.file.as_deref());
    }
}
