use std::fmt;

/// A location in a source file.
///
/// Lines and columns are both 1-based. The end-of-input sentinel uses the
/// position just past the last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Source line.
    pub line:   usize,
    /// Column within the line.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Identity of one AST node within a compilation.
///
/// Ids are handed out by the [`ParseSession`](crate::interpreter::parser::core::ParseSession)
/// and are unique across every file spliced in through `include` or `use`.
/// Later phases key their side tables (scopes, captured definitions) by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Display modifier prefixed to a module instantiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `*` removes the subtree.
    Disable,
    /// `%` keeps the subtree out of the CSG result.
    Background,
    /// `#` highlights the subtree; it still contributes geometry.
    Highlight,
    /// `!` marks the subtree as the render root.
    Root,
}

/// Which loop construct produced a loop node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    /// `for`: iterations are unioned.
    For,
    /// `intersection_for`: iterations are intersected.
    IntersectionFor,
}

/// Operators carried by [`NodeKind::Op`] nodes.
///
/// Unary operators have one child, binary operators two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Logical or (`||`)
    Or,
    /// Logical and (`&&`)
    And,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Greater than (`>`)
    Greater,
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Logical not (`!x`)
    Not,
    /// Arithmetic negation (`-x`)
    Negate,
    /// Unary plus (`+x`)
    Plus,
    /// Indexing (`v[i]`)
    Index,
}

impl Operator {
    /// Returns `true` for the comparison operators.
    ///
    /// Relational operators do not chain: `a < b < c` is a parse error at the
    /// second `<`.
    #[must_use]
    pub const fn is_relational(self) -> bool {
        matches!(self,
                 Self::Less
                 | Self::LessEqual
                 | Self::Equal
                 | Self::NotEqual
                 | Self::GreaterEqual
                 | Self::Greater)
    }

    /// Returns `true` for operators that take a single operand.
    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Not | Self::Negate | Self::Plus)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterEqual => ">=",
            Self::Greater => ">",
            Self::Add | Self::Plus => "+",
            Self::Sub | Self::Negate => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Not => "!",
            Self::Index => "[]",
        };
        write!(f, "{operator}")
    }
}

/// The kind of an AST node together with its kind-specific payload.
///
/// Children are stored on the enclosing [`Node`]; the layout per kind is:
///
/// | kind            | children                                           |
/// |-----------------|----------------------------------------------------|
/// | `Root`          | top-level statements                               |
/// | `ModuleDef`     | `ParamList`, then body statements                  |
/// | `FunctionDef`   | `ParamList`, body expression                       |
/// | `ModuleCall`    | `ArgList`, then child statements                   |
/// | `FunctionCall`  | `ArgList`                                          |
/// | `ParamList`     | `Param`*                                           |
/// | `Param`         | optional default expression                        |
/// | `ArgList`       | positional expressions or `NamedArg` nodes         |
/// | `NamedArg`      | value expression                                   |
/// | `If`            | `Condition`+                                       |
/// | `Condition`     | guard expression (or `Always`), then statements    |
/// | `Loop`          | `LoopBinding`, then body statements                |
/// | `LoopBinding`   | iterable expression                                |
/// | `Declare`       | value expression                                   |
/// | `Op`            | one operand (unary) or two (binary, `Index`)       |
/// | `Ternary`       | condition, then-branch, else-branch                |
/// | `Vector`        | element expressions                                |
/// | `Range`         | start, end, increment                              |
/// | literals/`Ident`| none                                               |
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The compilation unit.
    Root,
    /// `module name(params) { ... }`
    ModuleDef {
        /// Module name.
        name: String,
    },
    /// `function name(params) = expr;`
    FunctionDef {
        /// Function name.
        name: String,
    },
    /// Module instantiation statement.
    ModuleCall {
        /// Name of the instantiated module.
        name:     String,
        /// Optional display modifier.
        modifier: Option<Modifier>,
    },
    /// Function call expression.
    FunctionCall {
        /// Name of the called function.
        name: String,
    },
    /// Parameter profile of a definition.
    ParamList,
    /// One declared parameter.
    Param {
        /// Parameter name.
        name: String,
    },
    /// Actual arguments of a call.
    ArgList,
    /// `name = expr` inside an argument list.
    NamedArg {
        /// Name of the targeted parameter.
        name: String,
    },
    /// `if` / `else if` / `else` chain.
    If,
    /// One branch of an `if` chain.
    Condition,
    /// Guard of the implicit `else` branch; always true.
    Always,
    /// `for` or `intersection_for` with exactly one binding.
    Loop(LoopKind),
    /// `name = iterable` inside a loop header.
    LoopBinding {
        /// Loop variable name.
        name: String,
    },
    /// `declare name = expr;` or `name = expr;`
    Declare {
        /// Declared name.
        name: String,
    },
    /// Unary, binary or index operator.
    Op(Operator),
    /// `cond ? a : b`
    Ternary,
    /// Identifier reference.
    Ident {
        /// Referenced name.
        name: String,
    },
    /// Numeric literal (booleans lex as `1` / `0`).
    Number(f64),
    /// String literal.
    Text(String),
    /// The `undef` literal.
    Undef,
    /// `[a, b, ...]`
    Vector,
    /// `[start:end]` or `[start:increment:end]`
    Range,
}

impl NodeKind {
    /// A short, stable label used in diagnostics and traces.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::ModuleDef { .. } => "module definition",
            Self::FunctionDef { .. } => "function definition",
            Self::ModuleCall { .. } => "module call",
            Self::FunctionCall { .. } => "function call",
            Self::ParamList => "parameter list",
            Self::Param { .. } => "parameter",
            Self::ArgList => "argument list",
            Self::NamedArg { .. } => "named argument",
            Self::If => "if",
            Self::Condition => "condition",
            Self::Always => "else guard",
            Self::Loop(LoopKind::For) => "for",
            Self::Loop(LoopKind::IntersectionFor) => "intersection_for",
            Self::LoopBinding { .. } => "loop binding",
            Self::Declare { .. } => "declaration",
            Self::Op(_) => "operator",
            Self::Ternary => "conditional operator",
            Self::Ident { .. } => "identifier",
            Self::Number(_) => "number literal",
            Self::Text(_) => "string literal",
            Self::Undef => "undef",
            Self::Vector => "vector",
            Self::Range => "range",
        }
    }
}

/// One node of the abstract syntax tree.
///
/// Nodes are built once by the parser and never mutated afterwards. Module and
/// function bodies are plain owned subtrees; nothing is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique id within the compilation.
    pub id:       NodeId,
    /// Kind tag and payload.
    pub kind:     NodeKind,
    /// Where the node starts in its source file.
    pub position: Position,
    /// Ordered children; layout depends on `kind`.
    pub children: Vec<Self>,
    /// Block nesting depth assigned by the parser; the root is 0.
    pub depth:    usize,
}

impl Node {
    /// Returns the name carried by named kinds, if any.
    ///
    /// ## Example
    /// ```
    /// use solidscript::ast::{Node, NodeId, NodeKind, Position};
    ///
    /// let node = Node { id:       NodeId(0),
    ///                   kind:     NodeKind::Ident { name: "x".to_string() },
    ///                   position: Position::new(1, 1),
    ///                   children: Vec::new(),
    ///                   depth:    0, };
    ///
    /// assert_eq!(node.name(), Some("x"));
    /// ```
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::ModuleDef { name }
            | NodeKind::FunctionDef { name }
            | NodeKind::ModuleCall { name, .. }
            | NodeKind::FunctionCall { name }
            | NodeKind::Param { name }
            | NodeKind::NamedArg { name }
            | NodeKind::LoopBinding { name }
            | NodeKind::Declare { name }
            | NodeKind::Ident { name } => Some(name),
            _ => None,
        }
    }

    /// First child, if present.
    #[must_use]
    pub fn first(&self) -> Option<&Self> {
        self.children.first()
    }

    /// Children after the first one.
    ///
    /// For definitions, calls, conditions and loops this is the statement body.
    #[must_use]
    pub fn body(&self) -> &[Self] {
        self.children.get(1..).unwrap_or(&[])
    }

    /// Returns `true` for module and function definitions.
    #[must_use]
    pub const fn is_definition(&self) -> bool {
        matches!(self.kind, NodeKind::ModuleDef { .. } | NodeKind::FunctionDef { .. })
    }
}
