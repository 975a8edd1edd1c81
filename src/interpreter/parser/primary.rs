use crate::{
    ast::{Node, NodeKind, Operator},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a primary expression followed by any number of index suffixes.
    ///
    /// Grammar:
    /// ```text
    /// primary := atom ("[" expression "]")*
    /// atom    := "(" expression ")" | vector_or_range | number | string
    ///          | "undef" | identifier | identifier args
    /// ```
    ///
    /// Index suffixes nest to the left: `v[1][2]` is `Index(Index(v, 1), 2)`.
    pub(in crate::interpreter::parser) fn parse_primary(&mut self) -> ParseResult<Node> {
        let mut node = self.parse_atom()?;

        while self.tokens.is(&Token::LBracket) {
            let position = self.tokens.position();
            self.tokens.advance();
            let index = self.parse_expression()?;
            self.expect(&Token::RBracket)?;
            node = self.node(NodeKind::Op(Operator::Index), position, vec![node, index]);
        }

        Ok(node)
    }

    fn parse_atom(&mut self) -> ParseResult<Node> {
        let position = self.tokens.position();
        let kind = match self.tokens.peek() {
            Some(Token::LParen) => {
                self.tokens.advance();
                let inner = self.parse_expression()?;
                self.expect_or_warn(&Token::RParen, "to close parenthesized expression");
                return Ok(inner);
            },
            Some(Token::LBracket) => return self.parse_vector_or_range(),
            Some(Token::Number(n)) => NodeKind::Number(*n),
            Some(Token::Text(s)) => NodeKind::Text(s.clone()),
            Some(Token::Undef) => NodeKind::Undef,
            Some(Token::Identifier(name)) => {
                let name = name.clone();
                if self.tokens.advance() == Some(&Token::LParen) {
                    let args = self.parse_arg_list()?;
                    return Ok(self.node(NodeKind::FunctionCall { name }, position, vec![args]));
                }
                self.tokens.step_back();
                NodeKind::Ident { name }
            },
            _ => return Err(self.unexpected("expression")),
        };

        self.tokens.advance();
        Ok(self.node(kind, position, Vec::new()))
    }

    /// Parses `[ ... ]` as either a vector or a range.
    ///
    /// The first element is parsed once; a following `:` makes the literal a
    /// range, anything else a vector.
    ///
    /// Grammar:
    /// ```text
    /// vector := "[" (expression ("," expression)*)? ","? "]"
    /// range  := "[" expression ":" expression (":" expression)? "]"
    /// ```
    ///
    /// # Returns
    /// A `Vector` node, or a `Range` node whose children are always ordered
    /// start, end, increment. `[a:b]` gets an increment of `1`; `[a:s:b]`
    /// moves `s` last.
    fn parse_vector_or_range(&mut self) -> ParseResult<Node> {
        let position = self.expect(&Token::LBracket)?;
        if self.tokens.is(&Token::RBracket) {
            self.tokens.advance();
            return Ok(self.node(NodeKind::Vector, position, Vec::new()));
        }

        let first = self.parse_expression()?;
        if self.tokens.is(&Token::Colon) {
            self.tokens.advance();
            let second = self.parse_expression()?;
            let children = if self.tokens.is(&Token::Colon) {
                self.tokens.advance();
                let third = self.parse_expression()?;
                vec![first, third, second]
            } else {
                let at = self.tokens.position();
                let step = self.node(NodeKind::Number(1.0), at, Vec::new());
                vec![first, second, step]
            };
            self.expect_or_warn(&Token::RBracket, "to close range");
            return Ok(self.node(NodeKind::Range, position, children));
        }

        let mut elements = vec![first];
        loop {
            match self.tokens.peek() {
                Some(Token::RBracket) => {
                    self.tokens.advance();
                    break;
                },
                Some(Token::Comma) => {
                    self.tokens.advance();
                    if !self.tokens.is(&Token::RBracket) {
                        elements.push(self.parse_expression()?);
                    }
                },
                _ => return Err(self.unexpected("',' or ']' in vector")),
            }
        }

        Ok(self.node(NodeKind::Vector, position, elements))
    }
}
