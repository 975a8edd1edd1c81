use crate::{
    ast::{Node, NodeKind, Position},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Builds the error for the current token not matching `expected`.
    ///
    /// At end of input this is `UnexpectedEndOfInput`, otherwise
    /// `UnexpectedToken`.
    pub(in crate::interpreter::parser) fn unexpected(&self, expected: &str) -> ParseError {
        let position = self.tokens.position();
        match self.tokens.peek() {
            Some(token) => ParseError::UnexpectedToken { expected: expected.to_string(),
                                                         found: token.to_string(),
                                                         position },
            None => ParseError::UnexpectedEndOfInput { context: expected.to_string(),
                                                       position },
        }
    }

    /// Consumes `token` or fails.
    ///
    /// # Returns
    /// The position of the consumed token.
    pub(in crate::interpreter::parser) fn expect(&mut self, token: &Token) -> ParseResult<Position> {
        let position = self.tokens.position();
        if self.tokens.is(token) {
            self.tokens.advance();
            return Ok(position);
        }
        Err(self.unexpected(&token.to_string()))
    }

    /// Consumes `token` if present; otherwise raises a diagnostic and carries
    /// on as if it had been there.
    pub(in crate::interpreter::parser) fn expect_or_warn(&mut self, token: &Token, context: &str) {
        if self.tokens.is(token) {
            self.tokens.advance();
            return;
        }
        let at = self.tokens.position();
        let found = self.tokens
                        .peek()
                        .map_or_else(|| "end of input".to_string(), ToString::to_string);
        self.warn(format!("Expected {token} {context}, found {found}."), at);
    }

    /// Consumes an identifier and returns its name and position.
    pub(in crate::interpreter::parser) fn expect_identifier(&mut self,
                                                            context: &str)
                                                            -> ParseResult<(String, Position)> {
        let position = self.tokens.position();
        if let Some(Token::Identifier(name)) = self.tokens.peek() {
            let name = name.clone();
            self.tokens.advance();
            return Ok((name, position));
        }
        Err(self.unexpected(&format!("identifier {context}")))
    }

    /// Parses a parenthesized parameter profile.
    ///
    /// Grammar:
    /// ```text
    /// params := "(" (param ("," param)*)? ","? ")"
    /// param  := identifier ("=" expression)?
    /// ```
    ///
    /// # Returns
    /// A `ParamList` node whose children are `Param` nodes, each holding its
    /// default expression if one was given.
    pub(in crate::interpreter::parser) fn parse_param_list(&mut self) -> ParseResult<Node> {
        let position = self.expect(&Token::LParen)?;
        let mut params = Vec::new();

        loop {
            match self.tokens.peek() {
                Some(Token::RParen) => {
                    self.tokens.advance();
                    break;
                },
                Some(Token::Comma) => {
                    self.tokens.advance();
                },
                _ => {
                    let (name, at) = self.expect_identifier("in parameter list")?;
                    let mut default = Vec::new();
                    if self.tokens.is(&Token::Assign) {
                        self.tokens.advance();
                        default.push(self.parse_expression()?);
                    }
                    params.push(self.node(NodeKind::Param { name }, at, default));
                },
            }
        }

        Ok(self.node(NodeKind::ParamList, position, params))
    }

    /// Parses a parenthesized argument list.
    ///
    /// Grammar:
    /// ```text
    /// args := "(" (arg ("," arg)*)? ","? ")"
    /// arg  := identifier "=" expression | expression
    /// ```
    ///
    /// An identifier directly followed by `=` is a named argument; the parser
    /// looks one token ahead and steps back otherwise.
    pub(in crate::interpreter::parser) fn parse_arg_list(&mut self) -> ParseResult<Node> {
        let position = self.expect(&Token::LParen)?;
        let mut args = Vec::new();

        loop {
            match self.tokens.peek() {
                Some(Token::RParen) => {
                    self.tokens.advance();
                    break;
                },
                Some(Token::Comma) => {
                    self.tokens.advance();
                },
                Some(Token::Identifier(name)) => {
                    let name = name.clone();
                    let at = self.tokens.position();
                    if self.tokens.advance() == Some(&Token::Assign) {
                        self.tokens.advance();
                        let value = self.parse_expression()?;
                        args.push(self.node(NodeKind::NamedArg { name }, at, vec![value]));
                    } else {
                        self.tokens.step_back();
                        args.push(self.parse_expression()?);
                    }
                },
                Some(_) => args.push(self.parse_expression()?),
                None => return Err(self.unexpected("')' to close argument list")),
            }
        }

        Ok(self.node(NodeKind::ArgList, position, args))
    }

    /// Parses the statements of a braced block up to and including `}`.
    ///
    /// Stray semicolons are skipped.
    pub(in crate::interpreter::parser) fn parse_block(&mut self) -> ParseResult<Vec<Node>> {
        self.expect(&Token::LBrace)?;
        let mut statements = Vec::new();

        loop {
            match self.tokens.peek() {
                Some(Token::RBrace) => {
                    self.tokens.advance();
                    return Ok(statements);
                },
                Some(Token::Semicolon) => {
                    self.tokens.advance();
                },
                Some(_) => statements.push(self.parse_statement()?),
                None => return Err(self.unexpected("'}' to close block")),
            }
        }
    }

    /// Parses the body of a module call, branch or loop.
    ///
    /// The body is a braced block, a lone `;` (empty), or a single statement.
    pub(in crate::interpreter::parser) fn parse_body(&mut self) -> ParseResult<Vec<Node>> {
        match self.tokens.peek() {
            Some(Token::LBrace) => self.parse_block(),
            Some(Token::Semicolon) => {
                self.tokens.advance();
                Ok(Vec::new())
            },
            _ => Ok(vec![self.parse_statement()?]),
        }
    }
}
