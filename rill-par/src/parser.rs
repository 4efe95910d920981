//! Pratt parser: precedence-climbing expressions, recursive descent
//! statements (§4.2).
//!
//! Two-token lookahead (`cur`/`peek`); `advance()` pulls the next token
//! from the lexer and shifts. The parser never aborts on a bad construct —
//! it records an error on [`Handler`] and keeps going from the next
//! statement boundary, so a single bad line doesn't hide every other
//! error in the file (§4.2 Error policy).

use rill_lex::{Lexer, Token, TokenKind};
use rill_util::Handler;

use crate::ast::*;
use crate::precedence::{precedence_of, Precedence};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    peek: Token,
    handler: Handler,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            cur,
            peek,
            handler: Handler::new(),
        }
    }

    /// Parse the whole input into a [`Program`], returning it alongside
    /// whatever errors were accumulated along the way. A non-empty error
    /// list means the program must not be evaluated (§4.2, §7).
    pub fn parse(mut self) -> (Program, Handler) {
        let mut program = Program::default();
        while self.cur.kind != TokenKind::Eof {
            if self.cur.kind == TokenKind::Semicolon {
                self.advance();
                continue;
            }
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt);
            }
            self.advance();
        }
        tracing::debug!(
            statements = program.statements.len(),
            errors = self.handler.diagnostics().len(),
            "parsing complete"
        );
        (program, self.handler)
    }

    fn advance(&mut self) {
        self.cur = self.peek.clone();
        self.peek = self.lexer.next_token();
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    fn cur_precedence(&self) -> Precedence {
        precedence_of(self.cur.kind)
    }

    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek.kind)
    }

    /// If `peek` is `kind`, consume it and return true; otherwise record
    /// the pinned "expected next token" error (§4.2) and return false.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.advance();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenKind) {
        self.handler.error(
            format!(
                "expected next token to be {:?}, got {:?} instead",
                expected, self.peek.kind
            ),
            self.peek.span,
        );
    }

    fn no_prefix_parse_error(&mut self) {
        self.handler.error(
            format!("no prefix parse function for {:?} found", self.cur.kind),
            self.cur.span,
        );
    }

    // ---- statements ----

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Class => self.parse_class_statement(),
            TokenKind::Import => self.parse_import_statement(),
            TokenKind::From => self.parse_from_statement(),
            TokenKind::Try => self.parse_try_statement(),
            TokenKind::Raise => self.parse_raise_statement(),
            TokenKind::Assert => self.parse_assert_statement(),
            TokenKind::With => self.parse_with_statement(),
            TokenKind::Async => self.parse_async_statement(),
            TokenKind::Pass => {
                let token = self.cur.clone();
                Some(Statement::Pass(PassStatement { token }))
            }
            TokenKind::Break => {
                let token = self.cur.clone();
                Some(Statement::Break(BreakStatement { token }))
            }
            TokenKind::Continue => {
                let token = self.cur.clone();
                Some(Statement::Continue(ContinueStatement { token }))
            }
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_identifier_here(&self) -> Identifier {
        Identifier {
            token: self.cur.clone(),
            name: self.cur.literal,
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.parse_identifier_here();
        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Let(LetStatement { token, name, value }))
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        if self.peek_is(TokenKind::Semicolon) || self.peek_is(TokenKind::RBrace) {
            self.advance();
            return Some(Statement::Return(ReturnStatement { token, value: None }));
        }
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Return(ReturnStatement {
            token,
            value: Some(value),
        }))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Expression(ExpressionStatement { token, expression }))
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.cur.clone();
        let mut statements = Vec::new();
        self.advance();
        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            if self.cur_is(TokenKind::Semicolon) {
                self.advance();
                continue;
            }
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.advance();
        }
        BlockStatement { token, statements }
    }

    fn parse_while_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();
        Some(Statement::While(WhileStatement {
            token,
            condition,
            body,
        }))
    }

    /// `for` disambiguation (§4.2): after `(`, an identifier immediately
    /// followed by `in` means a `for-in`; anything else is the three-part
    /// C-style form.
    fn parse_for_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        if self.peek_is(TokenKind::Ident) {
            // need two tokens of lookahead past `(` to see `in`; peek at
            // the lexer's next token without consuming via the parser.
            let mut probe = self.lexer.clone();
            let after_ident = probe.next_token();
            if after_ident.kind == TokenKind::In {
                self.advance(); // consume the identifier
                let iterator = self.parse_identifier_here();
                self.advance(); // consume `in`
                self.advance();
                let iterable = self.parse_expression(Precedence::Lowest)?;
                if !self.expect_peek(TokenKind::RParen) {
                    return None;
                }
                if !self.expect_peek(TokenKind::LBrace) {
                    return None;
                }
                let body = self.parse_block_statement();
                return Some(Statement::ForIn(ForInStatement {
                    token,
                    iterator,
                    iterable,
                    body,
                }));
            }
        }

        self.advance();
        let init = Box::new(self.parse_statement()?);
        // `parse_statement` already consumed the clause's own trailing `;`
        // (both `let` and expression statements eat it when present), so
        // `cur` is the semicolon itself here rather than still at peek.
        if !self.cur_is(TokenKind::Semicolon) {
            self.handler.error(
                format!(
                    "expected next token to be Semicolon, got {:?} instead",
                    self.cur.kind
                ),
                self.cur.span,
            );
            return None;
        }
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }
        self.advance();
        let increment = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();
        Some(Statement::For(ForStatement {
            token,
            init,
            condition,
            increment,
            body,
        }))
    }

    /// Class body (§4.2): only method (function-literal) statements and
    /// `pass` are allowed; anything else is a parse error.
    fn parse_class_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.parse_identifier_here();

        let superclass = if self.peek_is(TokenKind::Colon) {
            self.advance();
            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            Some(self.parse_identifier_here())
        } else {
            None
        };

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let class_token = self.cur.clone();
        let mut statements = Vec::new();
        self.advance();
        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            match self.cur.kind {
                TokenKind::Pass => statements.push(Statement::Pass(PassStatement {
                    token: self.cur.clone(),
                })),
                TokenKind::Function => {
                    let stmt_token = self.cur.clone();
                    if let Some(expr) = self.parse_function_literal() {
                        statements.push(Statement::Expression(ExpressionStatement {
                            token: stmt_token,
                            expression: expr,
                        }));
                    }
                }
                _ => {
                    self.handler.error(
                        format!(
                            "only functions and pass statements are allowed inside a class body, got {:?}",
                            self.cur.kind
                        ),
                        self.cur.span,
                    );
                }
            }
            self.advance();
        }
        let body = BlockStatement {
            token: class_token,
            statements,
        };

        Some(Statement::Class(ClassStatement {
            token,
            name,
            superclass,
            body,
        }))
    }

    fn parse_string_literal_here(&mut self) -> Option<StringLiteral> {
        if !self.cur_is(TokenKind::Str) {
            self.handler.error(
                format!("expected string literal, got {:?}", self.cur.kind),
                self.cur.span,
            );
            return None;
        }
        Some(StringLiteral {
            token: self.cur.clone(),
            value: self.cur.literal,
        })
    }

    fn parse_import_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        if !self.expect_peek(TokenKind::Str) {
            return None;
        }
        let path = self.parse_string_literal_here()?;
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Import(ImportStatement { token, path }))
    }

    fn parse_from_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        if !self.expect_peek(TokenKind::Str) {
            return None;
        }
        let path = self.parse_string_literal_here()?;
        if !self.expect_peek(TokenKind::Import) {
            return None;
        }
        let mut imports = Vec::new();
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        imports.push(self.parse_identifier_here());
        while self.peek_is(TokenKind::Comma) {
            self.advance();
            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            imports.push(self.parse_identifier_here());
        }
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::From(FromStatement {
            token,
            path,
            imports,
        }))
    }

    fn parse_try_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let try_block = self.parse_block_statement();

        let except_block = if self.peek_is(TokenKind::Except) {
            self.advance();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        let finally_block = if self.peek_is(TokenKind::Finally) {
            self.advance();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Statement::Try(TryStatement {
            token,
            try_block,
            except_block,
            finally_block,
        }))
    }

    fn parse_raise_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        self.advance();
        let exception = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Raise(RaiseStatement { token, exception }))
    }

    fn parse_assert_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        let message = if self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            Some(self.parse_expression(Precedence::Lowest)?)
        } else {
            None
        };
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Assert(AssertStatement {
            token,
            condition,
            message,
        }))
    }

    fn parse_with_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        self.advance();
        let context = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();
        Some(Statement::With(WithStatement {
            token,
            context,
            body,
        }))
    }

    fn parse_async_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        self.advance();
        let statement = Box::new(self.parse_statement()?);
        Some(Statement::Async(AsyncStatement { token, statement }))
    }

    // ---- expressions ----

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            if !has_infix(self.peek.kind) {
                return Some(left);
            }
            self.advance();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.cur.kind {
            TokenKind::Ident => Some(Expression::Identifier(self.parse_identifier_here())),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::Float => self.parse_float_literal(),
            TokenKind::Binary => Some(self.parse_radix_literal(Expression::Binary as fn(RadixLiteral) -> Expression)),
            TokenKind::Octal => Some(self.parse_radix_literal(Expression::Octal as fn(RadixLiteral) -> Expression)),
            TokenKind::Hex => Some(self.parse_radix_literal(Expression::Hex as fn(RadixLiteral) -> Expression)),
            TokenKind::Str => Some(Expression::String(StringLiteral {
                token: self.cur.clone(),
                value: self.cur.literal,
            })),
            TokenKind::True | TokenKind::False => Some(Expression::Boolean(BooleanLiteral {
                token: self.cur.clone(),
                value: self.cur_is(TokenKind::True),
            })),
            TokenKind::Null => Some(Expression::Null(NullLiteral {
                token: self.cur.clone(),
            })),
            TokenKind::Bang | TokenKind::Minus | TokenKind::BitwiseNot => {
                self.parse_prefix_expression()
            }
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            TokenKind::Super => {
                let token = self.cur.clone();
                Some(Expression::Super(SuperExpression { token }))
            }
            TokenKind::SelfKw => {
                let token = self.cur.clone();
                Some(Expression::SelfExpr(SelfExpression { token }))
            }
            TokenKind::New => self.parse_new_expression(),
            TokenKind::Await => {
                let token = self.cur.clone();
                self.advance();
                let expression = Box::new(self.parse_expression(Precedence::Prefix)?);
                Some(Expression::Await(AwaitExpression { token, expression }))
            }
            TokenKind::Yield => {
                let token = self.cur.clone();
                if self.peek_is(TokenKind::Semicolon) || self.peek_is(TokenKind::RBrace) {
                    return Some(Expression::Yield(YieldExpression { token, value: None }));
                }
                self.advance();
                let value = Some(Box::new(self.parse_expression(Precedence::Yield)?));
                Some(Expression::Yield(YieldExpression { token, value }))
            }
            _ => {
                self.no_prefix_parse_error();
                None
            }
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        match token.literal.as_str().parse::<i64>() {
            Ok(value) => Some(Expression::Integer(IntegerLiteral { token, value })),
            Err(_) => {
                self.handler.error(
                    format!("could not parse {} as integer", token.literal),
                    token.span,
                );
                None
            }
        }
    }

    fn parse_float_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        match token.literal.as_str().parse::<f64>() {
            Ok(value) => Some(Expression::Float(FloatLiteral { token, value })),
            Err(_) => {
                self.handler.error(
                    format!("could not parse {} as float", token.literal),
                    token.span,
                );
                None
            }
        }
    }

    fn parse_radix_literal(&self, wrap: fn(RadixLiteral) -> Expression) -> Expression {
        let token = self.cur.clone();
        wrap(RadixLiteral {
            digits: token.literal,
            token,
        })
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let operator = token.literal;
        self.advance();
        let right = Box::new(self.parse_expression(Precedence::Prefix)?);
        Some(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right,
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.advance();
        let condition = Box::new(self.parse_expression(Precedence::Lowest)?);
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.advance();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If(IfExpression {
            token,
            condition,
            consequence,
            alternative,
        }))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();

        let name = if self.peek_is(TokenKind::Ident) {
            self.advance();
            Some(self.parse_identifier_here())
        } else {
            None
        };

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expression::Function(FunctionLiteral {
            token,
            name,
            parameters,
            body,
        }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut params = Vec::new();
        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Some(params);
        }
        self.advance();
        params.push(self.parse_identifier_here());
        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            params.push(self.parse_identifier_here());
        }
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(params)
    }

    /// Shared by call arguments and array elements: a comma-separated
    /// expression list terminated by `end`.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = Vec::new();
        if self.peek_is(end) {
            self.advance();
            return Some(list);
        }
        self.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }
        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expression::Array(ArrayLiteral { token, elements }))
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let mut pairs = Vec::new();

        while !self.peek_is(TokenKind::RBrace) {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest)?;
            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }
            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if !self.peek_is(TokenKind::RBrace) && !self.expect_peek(TokenKind::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }
        Some(Expression::Hash(HashLiteral { token, pairs }))
    }

    fn parse_new_expression(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        self.advance();
        let class = Box::new(self.parse_expression(Precedence::Call)?);
        Some(Expression::New(NewExpression { token, class }))
    }

    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        match self.cur.kind {
            TokenKind::LParen => self.parse_call_expression(left),
            TokenKind::LBracket => self.parse_index_expression(left),
            TokenKind::Assign
            | TokenKind::PlusAssign
            | TokenKind::MinusAssign
            | TokenKind::AsteriskAssign
            | TokenKind::SlashAssign
            | TokenKind::ModuloAssign
            | TokenKind::FloorDivideAssign => self.parse_assign_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    /// The left side of `=` must be an identifier or a `.`-member-access
    /// infix; anything else is a parse error (§4.2).
    fn parse_assign_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        let operator = token.literal;
        let valid_target = match &left {
            Expression::Identifier(_) => true,
            Expression::Infix(infix) => infix.operator.as_str() == ".",
            _ => false,
        };
        if !valid_target {
            self.handler.error(
                format!(
                    "expected identifier or member access as assignment target, got {}",
                    kind_of(&left)
                ),
                token.span,
            );
            return None;
        }
        self.advance();
        let value = Box::new(self.parse_expression(Precedence::Assign)?);
        Some(Expression::Assign(AssignExpression {
            token,
            operator,
            target: Box::new(left),
            value,
        }))
    }

    /// Single-precedence left-associative recursion: the right side is
    /// parsed at the *same* precedence as the current operator (matching
    /// the source's own convention, not the `+1` convention some Pratt
    /// parsers use).
    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        let operator = token.literal;
        let precedence = self.cur_precedence();
        self.advance();
        let right = Box::new(self.parse_expression(precedence)?);
        Some(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right,
        }))
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;
        Some(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        self.advance();
        let index = Box::new(self.parse_expression(Precedence::Lowest)?);
        if !self.expect_peek(TokenKind::RBracket) {
            return None;
        }
        Some(Expression::Index(IndexExpression {
            token,
            left: Box::new(left),
            index,
        }))
    }
}

fn has_infix(kind: TokenKind) -> bool {
    precedence_of(kind) != Precedence::Lowest
}

fn kind_of(expr: &Expression) -> &'static str {
    match expr {
        Expression::Identifier(_) => "Identifier",
        Expression::Integer(_) => "Integer",
        Expression::Float(_) => "Float",
        Expression::Binary(_) => "Binary",
        Expression::Octal(_) => "Octal",
        Expression::Hex(_) => "Hex",
        Expression::String(_) => "String",
        Expression::Boolean(_) => "Boolean",
        Expression::Null(_) => "Null",
        Expression::Prefix(_) => "Prefix",
        Expression::Infix(_) => "Infix",
        Expression::Assign(_) => "Assign",
        Expression::Array(_) => "Array",
        Expression::Index(_) => "Index",
        Expression::Hash(_) => "Hash",
        Expression::If(_) => "If",
        Expression::Function(_) => "Function",
        Expression::Call(_) => "Call",
        Expression::New(_) => "New",
        Expression::Super(_) => "Super",
        Expression::SelfExpr(_) => "Self",
        Expression::Await(_) => "Await",
        Expression::Yield(_) => "Yield",
    }
}
