use std::fmt;

use logos::Logos;

use crate::{ast::Position, error::ParseError};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `3`, `3.14`, `.5` or `2e-3`.
    /// `true` and `false` lex as `1` and `0`.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[token("true", |_| 1.0)]
    #[token("false", |_| 0.0)]
    Number(f64),
    /// Double quoted string literal with escapes resolved.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    Text(String),
    /// `undef`
    #[token("undef")]
    Undef,
    /// `module`
    #[token("module")]
    Module,
    /// `function`
    #[token("function")]
    Function,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `intersection_for`
    #[token("intersection_for")]
    IntersectionFor,
    /// `declare`
    #[token("declare")]
    Declare,
    /// `include <path>`, carrying the path.
    #[regex(r"include[ \t]*<[^>\n]*>", |lex| directive_path(lex.slice()))]
    Include(String),
    /// `use <path>`, carrying the path.
    #[regex(r"use[ \t]*<[^>\n]*>", |lex| directive_path(lex.slice()))]
    Use(String),
    /// Identifier tokens such as `cube` or the sigil-marked `$fn`.
    #[regex(r"\$?[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// ```
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| {
        let comment = lex.slice();
        if let Some(last) = comment.rfind('\n') {
            let newlines = comment.chars().filter(|&c| c == '\n').count();
            lex.extras.line += newlines;
            lex.extras.line_start = lex.span().start + last + 1;
        }
        logos::Skip
    })]
    MultiLineComment,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `?`
    #[token("?")]
    Question,
    /// `=`
    #[token("=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `!`
    #[token("!")]
    Bang,
    /// `#`
    #[token("#")]
    Hash,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// Line breaks; counted, then skipped.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Text(s) => write!(f, "string \"{s}\""),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::Include(path) => write!(f, "include <{path}>"),
            Self::Use(path) => write!(f, "use <{path}>"),
            other => {
                let text = match other {
                    Self::Undef => "undef",
                    Self::Module => "module",
                    Self::Function => "function",
                    Self::If => "if",
                    Self::Else => "else",
                    Self::For => "for",
                    Self::IntersectionFor => "intersection_for",
                    Self::Declare => "declare",
                    Self::LParen => "(",
                    Self::RParen => ")",
                    Self::LBracket => "[",
                    Self::RBracket => "]",
                    Self::LBrace => "{",
                    Self::RBrace => "}",
                    Self::Comma => ",",
                    Self::Semicolon => ";",
                    Self::Colon => ":",
                    Self::Question => "?",
                    Self::Assign => "=",
                    Self::Plus => "+",
                    Self::Minus => "-",
                    Self::Star => "*",
                    Self::Slash => "/",
                    Self::Percent => "%",
                    Self::Bang => "!",
                    Self::Hash => "#",
                    Self::Less => "<",
                    Self::LessEqual => "<=",
                    Self::Greater => ">",
                    Self::GreaterEqual => ">=",
                    Self::EqualEqual => "==",
                    Self::BangEqual => "!=",
                    Self::AndAnd => "&&",
                    Self::OrOr => "||",
                    _ => "trivia",
                };
                write!(f, "'{text}'")
            },
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and the byte offset where it starts, so every
/// token can be given a line and column.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

fn parse_number(lex: &mut logos::Lexer<'_, Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn parse_string(lex: &mut logos::Lexer<'_, Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn directive_path(slice: &str) -> Option<String> {
    let open = slice.find('<')?;
    let close = slice.rfind('>')?;
    Some(slice[open + 1..close].trim().to_string())
}

/// An ordered, finite token sequence with a one-token cursor.
///
/// The parser only ever inspects the current token, advances, or steps back
/// by a single position. Running off the end yields the end-of-input
/// sentinel: `peek` returns `None` and `position` reports the position just
/// past the last token.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<(Token, Position)>,
    index:  usize,
    eof:    Position,
}

impl TokenStream {
    /// Tokenizes `source` completely.
    ///
    /// # Errors
    /// Returns `ParseError::UnexpectedCharacter` for input no token matches.
    ///
    /// # Example
    /// ```
    /// use solidscript::interpreter::lexer::{Token, TokenStream};
    ///
    /// let mut stream = TokenStream::tokenize("cube(1);").unwrap();
    /// assert_eq!(stream.peek(), Some(&Token::Identifier("cube".to_string())));
    /// stream.advance();
    /// assert_eq!(stream.peek(), Some(&Token::LParen));
    /// stream.step_back();
    /// assert_eq!(stream.position().column, 1);
    /// ```
    pub fn tokenize(source: &str) -> Result<Self, ParseError> {
        let mut tokens = Vec::new();
        let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());

        while let Some(token) = lexer.next() {
            let position = Position::new(lexer.extras.line,
                                         lexer.span().start - lexer.extras.line_start + 1);
            match token {
                Ok(tok) => tokens.push((tok, position)),
                Err(()) => {
                    return Err(ParseError::UnexpectedCharacter { text: lexer.slice().to_string(),
                                                                 position });
                },
            }
        }

        let eof = Position::new(lexer.extras.line, source.len() - lexer.extras.line_start + 1);
        Ok(Self { tokens,
                  index: 0,
                  eof })
    }

    /// The current token, or `None` at end of input.
    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index).map(|(token, _)| token)
    }

    /// Position of the current token or of the end-of-input sentinel.
    #[must_use]
    pub fn position(&self) -> Position {
        self.tokens
            .get(self.index)
            .map_or(self.eof, |(_, position)| *position)
    }

    /// Moves to the next token and returns it. Stays put at end of input.
    pub fn advance(&mut self) -> Option<&Token> {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        self.peek()
    }

    /// Moves back one token.
    pub fn step_back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Returns `true` if the current token equals `token`.
    #[must_use]
    pub fn is(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }
}
