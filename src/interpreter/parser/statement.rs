use crate::{
    ast::{LoopKind, Modifier, Node, NodeKind, Position},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a single statement.
    ///
    /// A statement may be one of:
    /// - a module or function definition,
    /// - a declaration (`declare x = e;` or `x = e;`),
    /// - an `if` chain,
    /// - a `for` or `intersection_for` loop,
    /// - a module instantiation, optionally prefixed by a modifier.
    ///
    /// # Errors
    /// Returns a `ParseError` if no statement starts at the current token or
    /// if the statement is malformed.
    pub fn parse_statement(&mut self) -> ParseResult<Node> {
        match self.tokens.peek() {
            Some(Token::Module) => self.parse_module_def(),
            Some(Token::Function) => self.parse_function_def(),
            Some(Token::Declare) => {
                self.tokens.advance();
                self.parse_declaration()
            },
            Some(Token::If) => self.parse_if(),
            Some(Token::For) => self.parse_loop(LoopKind::For),
            Some(Token::IntersectionFor) => self.parse_loop(LoopKind::IntersectionFor),
            Some(Token::Star | Token::Percent | Token::Hash | Token::Bang) => {
                self.parse_module_call()
            },
            Some(Token::Identifier(_)) => {
                let is_assignment = self.tokens.advance() == Some(&Token::Assign);
                self.tokens.step_back();
                if is_assignment {
                    self.parse_declaration()
                } else {
                    self.parse_module_call()
                }
            },
            _ => Err(self.unexpected("statement")),
        }
    }

    /// Parses `module name(params) { body }`.
    ///
    /// # Returns
    /// A `ModuleDef` node: the parameter list, then the body statements.
    fn parse_module_def(&mut self) -> ParseResult<Node> {
        let position = self.expect(&Token::Module)?;
        let (name, _) = self.expect_identifier("after 'module'")?;

        self.depth += 1;
        let mut children = vec![self.parse_param_list()?];
        children.extend(self.parse_block()?);
        let node = self.node(NodeKind::ModuleDef { name }, position, children);
        self.depth -= 1;

        Ok(node)
    }

    /// Parses `function name(params) = expression;`.
    ///
    /// # Returns
    /// A `FunctionDef` node: the parameter list, then the body expression.
    fn parse_function_def(&mut self) -> ParseResult<Node> {
        let position = self.expect(&Token::Function)?;
        let (name, _) = self.expect_identifier("after 'function'")?;

        self.depth += 1;
        let params = self.parse_param_list()?;
        self.expect(&Token::Assign)?;
        let body = self.parse_expression()?;
        self.expect(&Token::Semicolon)?;
        let node = self.node(NodeKind::FunctionDef { name }, position, vec![params, body]);
        self.depth -= 1;

        Ok(node)
    }

    /// Parses `name = expression;` with the cursor on `name`.
    ///
    /// A missing semicolon is reported as a diagnostic.
    fn parse_declaration(&mut self) -> ParseResult<Node> {
        let (name, position) = self.expect_identifier("in declaration")?;
        self.expect(&Token::Assign)?;
        let value = self.parse_expression()?;
        self.expect_or_warn(&Token::Semicolon, "after declaration");
        Ok(self.node(NodeKind::Declare { name }, position, vec![value]))
    }

    /// Parses an `if` / `else if` / `else` chain.
    ///
    /// Grammar:
    /// ```text
    /// if := "if" expression body ("else" "if" expression body)* ("else" body)?
    /// ```
    ///
    /// # Returns
    /// An `If` node whose children are `Condition` nodes. The final `else`
    /// gets an `Always` guard.
    fn parse_if(&mut self) -> ParseResult<Node> {
        let position = self.expect(&Token::If)?;

        self.depth += 1;
        let branches = self.parse_branches()?;
        let node = self.node(NodeKind::If, position, branches);
        self.depth -= 1;

        Ok(node)
    }

    fn parse_branches(&mut self) -> ParseResult<Vec<Node>> {
        let mut branches = vec![self.parse_condition()?];

        while self.tokens.is(&Token::Else) {
            self.tokens.advance();
            if self.tokens.is(&Token::If) {
                self.tokens.advance();
                branches.push(self.parse_condition()?);
                continue;
            }
            let position = self.tokens.position();
            let guard = self.node(NodeKind::Always, position, Vec::new());
            let mut children = vec![guard];
            children.extend(self.parse_body()?);
            branches.push(self.node(NodeKind::Condition, position, children));
            break;
        }

        Ok(branches)
    }

    fn parse_condition(&mut self) -> ParseResult<Node> {
        let position = self.tokens.position();
        let guard = self.parse_expression()?;
        let mut children = vec![guard];
        children.extend(self.parse_body()?);
        Ok(self.node(NodeKind::Condition, position, children))
    }

    /// Parses a loop header and body.
    ///
    /// Grammar:
    /// ```text
    /// loop    := ("for" | "intersection_for") "(" binding ("," binding)* ")" body
    /// binding := identifier "=" expression
    /// ```
    ///
    /// Each binding after the first becomes a loop of the same kind nested as
    /// the sole body of the previous one, so the result is a chain of
    /// single-variable loops with the body in the innermost.
    fn parse_loop(&mut self, kind: LoopKind) -> ParseResult<Node> {
        let position = self.tokens.position();
        self.tokens.advance();
        self.expect_or_warn(&Token::LParen, "after loop keyword");

        let mut bindings = Vec::new();
        loop {
            self.depth += 1;
            let (name, at) = self.expect_identifier("as loop variable")?;
            self.expect(&Token::Assign)?;
            let iterable = self.parse_expression()?;
            bindings.push(self.node(NodeKind::LoopBinding { name }, at, vec![iterable]));
            if !self.tokens.is(&Token::Comma) {
                break;
            }
            self.tokens.advance();
        }
        self.expect_or_warn(&Token::RParen, "after loop bindings");

        let mut body = self.parse_body()?;
        while let Some(binding) = bindings.pop() {
            let at = if bindings.is_empty() { position } else { binding.position };
            let mut children = vec![binding];
            children.append(&mut body);
            body = vec![self.node(NodeKind::Loop(kind), at, children)];
            self.depth -= 1;
        }

        body.pop().ok_or_else(|| self.unexpected("loop binding"))
    }

    /// Parses a module instantiation, with an optional modifier prefix.
    ///
    /// Grammar:
    /// ```text
    /// call := modifier? identifier args (";" | "{" statement* "}" | statement)
    /// ```
    ///
    /// An instantiation of `assign` is rewritten into a `union` whose body
    /// starts with one declaration per named argument.
    ///
    /// # Errors
    /// `PositionalAssign` if `assign` receives a positional argument.
    fn parse_module_call(&mut self) -> ParseResult<Node> {
        let modifier = match self.tokens.peek() {
            Some(Token::Star) => Some(Modifier::Disable),
            Some(Token::Percent) => Some(Modifier::Background),
            Some(Token::Hash) => Some(Modifier::Highlight),
            Some(Token::Bang) => Some(Modifier::Root),
            _ => None,
        };
        if modifier.is_some() {
            self.tokens.advance();
        }

        let (name, position) = self.expect_identifier("to start module instantiation")?;
        self.depth += 1;
        let args = self.parse_arg_list()?;
        let body = self.parse_body()?;
        let node = if name == "assign" {
            self.desugar_assign(modifier, position, args, body)?
        } else {
            let mut children = vec![args];
            children.extend(body);
            self.node(NodeKind::ModuleCall { name, modifier }, position, children)
        };
        self.depth -= 1;

        Ok(node)
    }

    fn desugar_assign(&mut self,
                      modifier: Option<Modifier>,
                      position: Position,
                      args: Node,
                      body: Vec<Node>)
                      -> ParseResult<Node> {
        let mut children = vec![self.node(NodeKind::ArgList, args.position, Vec::new())];
        for arg in args.children {
            let NodeKind::NamedArg { name } = arg.kind else {
                return Err(ParseError::PositionalAssign { position: arg.position });
            };
            children.push(self.node(NodeKind::Declare { name }, arg.position, arg.children));
        }
        children.extend(body);

        Ok(self.node(NodeKind::ModuleCall { name: "union".to_string(),
                                            modifier },
                     position,
                     children))
    }
}
