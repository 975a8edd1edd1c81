use crate::{
    ast::{Node, NodeKind, Operator},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

/// Maps a token to the binary operator it denotes at one precedence level.
type OperatorTable = fn(&Token) -> Option<Operator>;

fn logical_or(token: &Token) -> Option<Operator> {
    matches!(token, Token::OrOr).then_some(Operator::Or)
}

fn logical_and(token: &Token) -> Option<Operator> {
    matches!(token, Token::AndAnd).then_some(Operator::And)
}

fn relational(token: &Token) -> Option<Operator> {
    match token {
        Token::Less => Some(Operator::Less),
        Token::LessEqual => Some(Operator::LessEqual),
        Token::EqualEqual => Some(Operator::Equal),
        Token::BangEqual => Some(Operator::NotEqual),
        Token::GreaterEqual => Some(Operator::GreaterEqual),
        Token::Greater => Some(Operator::Greater),
        _ => None,
    }
}

fn additive(token: &Token) -> Option<Operator> {
    match token {
        Token::Plus => Some(Operator::Add),
        Token::Minus => Some(Operator::Sub),
        _ => None,
    }
}

fn multiplicative(token: &Token) -> Option<Operator> {
    match token {
        Token::Star => Some(Operator::Mul),
        Token::Slash => Some(Operator::Div),
        Token::Percent => Some(Operator::Mod),
        _ => None,
    }
}

fn prefix(token: &Token) -> Option<Operator> {
    match token {
        Token::Bang => Some(Operator::Not),
        Token::Minus => Some(Operator::Negate),
        Token::Plus => Some(Operator::Plus),
        _ => None,
    }
}

impl Parser<'_> {
    /// Parses a full expression.
    ///
    /// This is the entry point for expression parsing. It begins at the
    /// lowest-precedence level, the conditional operator, and recursively
    /// descends through the precedence hierarchy.
    ///
    /// Grammar:
    /// ```text
    /// expression := logical_or ("?" expression ":" expression)?
    /// ```
    ///
    /// # Returns
    /// The parsed expression node.
    pub fn parse_expression(&mut self) -> ParseResult<Node> {
        let condition = self.parse_logical_or()?;
        if !self.tokens.is(&Token::Question) {
            return Ok(condition);
        }

        let position = self.tokens.position();
        self.tokens.advance();
        let then_branch = self.parse_expression()?;
        self.expect(&Token::Colon)?;
        let else_branch = self.parse_expression()?;

        Ok(self.node(NodeKind::Ternary, position, vec![condition, then_branch, else_branch]))
    }

    /// Parses a left-associative chain of `||`.
    ///
    /// Grammar: `logical_or := logical_and ("||" logical_and)*`
    fn parse_logical_or(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(logical_or, Self::parse_logical_and)
    }

    /// Parses a left-associative chain of `&&`.
    ///
    /// Grammar: `logical_and := relational ("&&" relational)*`
    fn parse_logical_and(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(logical_and, Self::parse_relational)
    }

    /// Parses at most one comparison.
    ///
    /// Comparisons do not chain; in `a < b < c` the second `<` is left for
    /// the caller, which will reject it.
    ///
    /// Grammar: `relational := additive (rel_op additive)?`
    fn parse_relational(&mut self) -> ParseResult<Node> {
        let lhs = self.parse_additive()?;
        let Some(op) = self.tokens.peek().and_then(relational) else {
            return Ok(lhs);
        };

        let position = self.tokens.position();
        self.tokens.advance();
        let rhs = self.parse_additive()?;
        Ok(self.node(NodeKind::Op(op), position, vec![lhs, rhs]))
    }

    /// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
    fn parse_additive(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(additive, Self::parse_multiplicative)
    }

    /// Grammar: `multiplicative := unary (("*" | "/" | "%") unary)*`
    fn parse_multiplicative(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(multiplicative, Self::parse_unary)
    }

    /// Parses a chain of prefix operators applied to a primary expression.
    ///
    /// `-!x` becomes `Negate(Not(x))`.
    ///
    /// Grammar: `unary := ("!" | "-" | "+")* primary`
    fn parse_unary(&mut self) -> ParseResult<Node> {
        let mut prefixes = Vec::new();
        while let Some(op) = self.tokens.peek().and_then(prefix) {
            prefixes.push((op, self.tokens.position()));
            self.tokens.advance();
        }

        let mut operand = self.parse_primary()?;
        while let Some((op, position)) = prefixes.pop() {
            operand = self.node(NodeKind::Op(op), position, vec![operand]);
        }
        Ok(operand)
    }

    /// Shared driver for the left-associative binary levels.
    fn parse_left_assoc(&mut self,
                        table: OperatorTable,
                        next: fn(&mut Self) -> ParseResult<Node>)
                        -> ParseResult<Node> {
        let mut lhs = next(self)?;

        while let Some(op) = self.tokens.peek().and_then(table) {
            let position = self.tokens.position();
            self.tokens.advance();
            let rhs = next(self)?;
            lhs = self.node(NodeKind::Op(op), position, vec![lhs, rhs]);
        }

        Ok(lhs)
    }
}
