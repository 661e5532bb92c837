//! Recursive-descent grammar walker that builds the instruction graph directly.
//!
//! ```text
//! program         := decl-section body trailing-inputs
//! decl-section    := id { ',' id } ';'
//! body            := '{' stmt-list '}'
//! stmt-list       := stmt { stmt }
//! stmt            := assign | if | while | switch | for | input | output
//! assign          := id '=' primary-or-expr ';'
//! primary-or-expr := primary | primary op primary
//! condition       := primary relop primary
//! if / while      := kw ( condition | '(' condition ')' ) body
//! switch          := 'switch' ( id | '(' id ')' ) '{' { case } [ default ] '}'
//! case            := 'case' number ':' ( body | stmt-list )
//! default         := 'default' ':' ( body | stmt-list )
//! for             := 'for' '(' assign condition ';' id '=' primary-or-expr [ ';' ] ')' body
//! input / output  := kw id ';'
//! ```
//!
//! Every decision uses at most two tokens of lookahead and is never revisited.
//! Any mismatch aborts the whole parse; no partial program is returned.

use std::collections::VecDeque;

use log::{debug, warn};

use crate::ir::graph::{ArithmeticOp, DEFAULT_MAX_NODES, Expr, InstructionGraph, RelationalOp};
use crate::ir::ids::{Location, NodeId};
use crate::ir::lower::{self, Condition, SwitchCase};
use crate::ir::program::Program;
use crate::ir::storage::{DEFAULT_STORAGE_CAPACITY, Storage};
use crate::lexer::{Keyword, Lexer, OperatorKind, Span, Token, TokenKind};
use crate::parser::error::ParseError;
use crate::parser::symbols::SymbolTable;
use crate::parser::token_stream::TokenStream;

type ParseResult<T> = Result<T, ParseError>;

/// Parser behavior options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    /// Number of storage cells available to variables and constants.
    pub storage_capacity: usize,
    /// Maximum instruction nodes in the graph.
    pub max_nodes: usize,
    /// Maximum nesting depth of statement bodies.
    pub max_nesting: usize,
    /// Rejects tokens left over after the trailing inputs.
    pub strict_trailing_input: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            storage_capacity: DEFAULT_STORAGE_CAPACITY,
            max_nodes: DEFAULT_MAX_NODES,
            max_nesting: 256,
            strict_trailing_input: false,
        }
    }
}

/// Lexes and parses one whole program.
pub fn parse_source(source: &str, options: ParseOptions) -> Result<Program, ParseError> {
    Parser::new(options, TokenStream::new(Lexer::new(source))).parse_program()
}

const STATEMENT_START: [&str; 7] = [
    "identifier",
    "'if'",
    "'while'",
    "'switch'",
    "'for'",
    "'input'",
    "'output'",
];

/// Grammar walker; one value per parse.
pub struct Parser<'a> {
    options: ParseOptions,
    token_stream: TokenStream<'a>,
    storage: Storage,
    symbols: SymbolTable,
    graph: InstructionGraph,
    inputs: VecDeque<i64>,
    depth: usize,
    last_span: Option<Span>,
}

impl<'a> Parser<'a> {
    /// Creates a parser with explicit options and token stream.
    pub fn new(options: ParseOptions, token_stream: TokenStream<'a>) -> Self {
        Self {
            options,
            token_stream,
            storage: Storage::new(options.storage_capacity),
            symbols: SymbolTable::new(),
            graph: InstructionGraph::new(options.max_nodes),
            inputs: VecDeque::new(),
            depth: 0,
            last_span: None,
        }
    }

    /// Returns parser options.
    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parses `decl-section body trailing-inputs` and returns the built program.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        self.parse_decl_section()?;
        let entry = self.parse_body()?;
        self.parse_trailing_inputs()?;

        debug!(
            "parsed program: {} node(s), {} cell(s), {} input(s)",
            self.graph.len(),
            self.storage.len(),
            self.inputs.len()
        );

        Ok(Program {
            graph: self.graph,
            entry,
            storage: self.storage,
            symbols: self.symbols,
            inputs: self.inputs,
        })
    }

    // -----------------------------------------------------------------------
    // Declarations
    // -----------------------------------------------------------------------

    fn parse_decl_section(&mut self) -> ParseResult<()> {
        loop {
            let name = self.expect_identifier()?;
            self.symbols
                .declare(&name.lexeme, &mut self.storage)
                .map_err(|error| ParseError::from_ir_error(error, Some(name.span)))?;

            let separator = self.token_stream.expect(
                |token| {
                    token.is_operator(OperatorKind::Comma)
                        || token.is_operator(OperatorKind::Semicolon)
                },
                "',' or ';'",
            )?;
            if separator.is_operator(OperatorKind::Semicolon) {
                return Ok(());
            }
        }
    }

    // -----------------------------------------------------------------------
    // Bodies and statement lists
    // -----------------------------------------------------------------------

    fn parse_body(&mut self) -> ParseResult<NodeId> {
        let open = self.expect_operator(OperatorKind::LeftBrace)?;
        let list = self.nested(Some(open.span), Self::parse_stmt_list)?;
        self.expect_operator(OperatorKind::RightBrace)?;
        Ok(list)
    }

    fn parse_stmt_list(&mut self) -> ParseResult<NodeId> {
        let mut entries = vec![self.parse_statement()?];
        while self.can_start_statement()? {
            entries.push(self.parse_statement()?);
        }

        let entry = lower::splice(&mut self.graph, &entries).map_err(|e| self.ir_error(e))?;
        entry.ok_or_else(|| ParseError::unexpected_end_of_input(STATEMENT_START))
    }

    fn can_start_statement(&mut self) -> ParseResult<bool> {
        Ok(matches!(
            self.peek_kind(0)?,
            Some(
                TokenKind::Identifier
                    | TokenKind::Keyword(
                        Keyword::If
                            | Keyword::While
                            | Keyword::Switch
                            | Keyword::For
                            | Keyword::Input
                            | Keyword::Output
                    )
            )
        ))
    }

    fn parse_statement(&mut self) -> ParseResult<NodeId> {
        match self.peek_kind(0)? {
            Some(TokenKind::Identifier) => self.parse_assign_statement(),
            Some(TokenKind::Keyword(Keyword::If)) => self.parse_if(),
            Some(TokenKind::Keyword(Keyword::While)) => self.parse_while(),
            Some(TokenKind::Keyword(Keyword::Switch)) => self.parse_switch(),
            Some(TokenKind::Keyword(Keyword::For)) => self.parse_for(),
            Some(TokenKind::Keyword(Keyword::Input)) => self.parse_input(),
            Some(TokenKind::Keyword(Keyword::Output)) => self.parse_output(),
            Some(_) => {
                let token = self.next_token(STATEMENT_START)?;
                Err(ParseError::unexpected_token(&token, STATEMENT_START))
            }
            None => Err(ParseError::unexpected_end_of_input(STATEMENT_START)),
        }
    }

    // -----------------------------------------------------------------------
    // Simple statements
    // -----------------------------------------------------------------------

    fn parse_assign_statement(&mut self) -> ParseResult<NodeId> {
        let (dest, source) = self.parse_assignment(&[OperatorKind::Semicolon])?;
        self.expect_operator(OperatorKind::Semicolon)?;
        let node = lower::lower_assign(&mut self.graph, dest, source);
        node.map_err(|e| self.ir_error(e))
    }

    /// Parses `id '=' primary-or-expr` without consuming the terminator.
    ///
    /// A bare primary is chosen when the token after it is one of
    /// `terminators`; no terminator can itself start a primary.
    fn parse_assignment(&mut self, terminators: &[OperatorKind]) -> ParseResult<(Location, Expr)> {
        let name = self.expect_identifier()?;
        let dest = self.resolve(&name)?;
        self.expect_operator(OperatorKind::Equal)?;

        let primary_first = matches!(
            self.peek_kind(0)?,
            Some(TokenKind::Identifier | TokenKind::Number)
        );
        let terminated = match self.peek_kind(1)? {
            Some(TokenKind::Operator(operator)) => terminators.contains(&operator),
            _ => false,
        };

        let source = if primary_first && terminated {
            Expr::Primary(self.parse_primary()?)
        } else {
            let left = self.parse_primary()?;
            let op = self.parse_arithmetic_op()?;
            let right = self.parse_primary()?;
            Expr::Binary { op, left, right }
        };

        Ok((dest, source))
    }

    fn parse_input(&mut self) -> ParseResult<NodeId> {
        self.expect_keyword(Keyword::Input)?;
        let name = self.expect_identifier()?;
        let dest = self.resolve(&name)?;
        self.expect_operator(OperatorKind::Semicolon)?;
        let node = lower::lower_input(&mut self.graph, dest);
        node.map_err(|e| self.ir_error(e))
    }

    fn parse_output(&mut self) -> ParseResult<NodeId> {
        self.expect_keyword(Keyword::Output)?;
        let name = self.expect_identifier()?;
        let src = self.resolve(&name)?;
        self.expect_operator(OperatorKind::Semicolon)?;
        let node = lower::lower_output(&mut self.graph, src);
        node.map_err(|e| self.ir_error(e))
    }

    // -----------------------------------------------------------------------
    // Control flow
    // -----------------------------------------------------------------------

    fn parse_if(&mut self) -> ParseResult<NodeId> {
        self.expect_keyword(Keyword::If)?;
        let condition = self.parse_condition_clause()?;
        let body = self.parse_body()?;
        let node = lower::lower_if(&mut self.graph, condition, body);
        node.map_err(|e| self.ir_error(e))
    }

    fn parse_while(&mut self) -> ParseResult<NodeId> {
        self.expect_keyword(Keyword::While)?;
        let condition = self.parse_condition_clause()?;
        let body = self.parse_body()?;
        let node = lower::lower_while(&mut self.graph, condition, body);
        node.map_err(|e| self.ir_error(e))
    }

    fn parse_switch(&mut self) -> ParseResult<NodeId> {
        self.expect_keyword(Keyword::Switch)?;
        let parenthesized = self
            .token_stream
            .consume_if(|token| token.is_operator(OperatorKind::LeftParen))?
            .is_some();
        let name = self.expect_identifier()?;
        let subject = self.resolve(&name)?;
        if parenthesized {
            self.expect_operator(OperatorKind::RightParen)?;
        }
        self.expect_operator(OperatorKind::LeftBrace)?;

        let mut cases = Vec::new();
        while self.peek_kind(0)? == Some(TokenKind::Keyword(Keyword::Case)) {
            self.expect_keyword(Keyword::Case)?;
            let label = self.token_stream.expect(
                |token| token.kind == TokenKind::Number,
                TokenKind::Number.to_string(),
            )?;
            let value = self.allocate_constant(&label)?;
            self.expect_operator(OperatorKind::Colon)?;
            let body = self.parse_case_body()?;
            cases.push(SwitchCase { value, body });
        }

        let default = if self.peek_kind(0)? == Some(TokenKind::Keyword(Keyword::Default)) {
            self.expect_keyword(Keyword::Default)?;
            self.expect_operator(OperatorKind::Colon)?;
            Some(self.parse_case_body()?)
        } else {
            None
        };

        self.expect_operator(OperatorKind::RightBrace)?;
        let node = lower::lower_switch(&mut self.graph, subject, &cases, default);
        node.map_err(|e| self.ir_error(e))
    }

    fn parse_case_body(&mut self) -> ParseResult<NodeId> {
        if self.peek_kind(0)? == Some(TokenKind::Operator(OperatorKind::LeftBrace)) {
            return self.parse_body();
        }
        let span = self.last_span;
        self.nested(span, Self::parse_stmt_list)
    }

    fn parse_for(&mut self) -> ParseResult<NodeId> {
        self.expect_keyword(Keyword::For)?;
        self.expect_operator(OperatorKind::LeftParen)?;

        let init = self.parse_assign_statement()?;
        let condition = self.parse_condition()?;
        self.expect_operator(OperatorKind::Semicolon)?;

        let (dest, source) =
            self.parse_assignment(&[OperatorKind::Semicolon, OperatorKind::RightParen])?;
        let update = lower::lower_assign(&mut self.graph, dest, source)
            .map_err(|e| self.ir_error(e))?;
        self.token_stream
            .consume_if(|token| token.is_operator(OperatorKind::Semicolon))?;
        self.expect_operator(OperatorKind::RightParen)?;

        let body = self.parse_body()?;
        let node = lower::lower_for(&mut self.graph, init, condition, update, body);
        node.map_err(|e| self.ir_error(e))
    }

    fn parse_condition_clause(&mut self) -> ParseResult<Condition> {
        let parenthesized = self
            .token_stream
            .consume_if(|token| token.is_operator(OperatorKind::LeftParen))?
            .is_some();
        let condition = self.parse_condition()?;
        if parenthesized {
            self.expect_operator(OperatorKind::RightParen)?;
        }
        Ok(condition)
    }

    fn parse_condition(&mut self) -> ParseResult<Condition> {
        let left = self.parse_primary()?;
        let relation = self.parse_relational_op()?;
        let right = self.parse_primary()?;
        Ok(Condition::new(relation, left, right))
    }

    // -----------------------------------------------------------------------
    // Operands and operators
    // -----------------------------------------------------------------------

    fn parse_primary(&mut self) -> ParseResult<Location> {
        const EXPECTED: [&str; 2] = ["identifier", "number"];
        let token = self.next_token(EXPECTED)?;
        match token.kind {
            TokenKind::Identifier => self.resolve(&token),
            TokenKind::Number => self.allocate_constant(&token),
            _ => Err(ParseError::unexpected_token(&token, EXPECTED)),
        }
    }

    fn parse_arithmetic_op(&mut self) -> ParseResult<ArithmeticOp> {
        const EXPECTED: [&str; 4] = ["'+'", "'-'", "'*'", "'/'"];
        let token = self.next_token(EXPECTED)?;
        match token.kind {
            TokenKind::Operator(OperatorKind::Plus) => Ok(ArithmeticOp::Add),
            TokenKind::Operator(OperatorKind::Minus) => Ok(ArithmeticOp::Subtract),
            TokenKind::Operator(OperatorKind::Star) => Ok(ArithmeticOp::Multiply),
            TokenKind::Operator(OperatorKind::Slash) => Ok(ArithmeticOp::Divide),
            _ => Err(ParseError::unexpected_token(&token, EXPECTED)),
        }
    }

    fn parse_relational_op(&mut self) -> ParseResult<RelationalOp> {
        const EXPECTED: [&str; 3] = ["'>'", "'<'", "'!='"];
        let token = self.next_token(EXPECTED)?;
        match token.kind {
            TokenKind::Operator(OperatorKind::Greater) => Ok(RelationalOp::Greater),
            TokenKind::Operator(OperatorKind::Less) => Ok(RelationalOp::Less),
            TokenKind::Operator(OperatorKind::NotEqual) => Ok(RelationalOp::NotEqual),
            _ => Err(ParseError::unexpected_token(&token, EXPECTED)),
        }
    }

    // -----------------------------------------------------------------------
    // Trailing inputs
    // -----------------------------------------------------------------------

    fn parse_trailing_inputs(&mut self) -> ParseResult<()> {
        while let Some(token) = self
            .token_stream
            .consume_if(|token| token.kind == TokenKind::Number)?
        {
            let value = parse_number(&token)?;
            self.inputs.push_back(value);
        }

        if let Some(token) = self.token_stream.peek(0)? {
            if self.options.strict_trailing_input {
                return Err(ParseError::unexpected_token(
                    token,
                    ["number", "end of input"],
                ));
            }
            warn!(
                "ignoring input after trailing values: '{}' at {}",
                token.lexeme, token.span
            );
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn nested<T>(
        &mut self,
        span: Option<Span>,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= self.options.max_nesting {
            return Err(ParseError::nesting_too_deep(span, self.options.max_nesting));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn peek_kind(&mut self, n: usize) -> ParseResult<Option<TokenKind>> {
        Ok(self.token_stream.peek(n)?.map(|token| token.kind))
    }

    fn next_token<const N: usize>(&mut self, expected: [&str; N]) -> ParseResult<Token> {
        let token = self
            .token_stream
            .next()?
            .ok_or_else(|| ParseError::unexpected_end_of_input(expected))?;
        self.last_span = Some(token.span);
        Ok(token)
    }

    fn expect_operator(&mut self, operator: OperatorKind) -> ParseResult<Token> {
        let token = self.token_stream.expect(
            |token| token.is_operator(operator),
            TokenKind::Operator(operator).to_string(),
        )?;
        self.last_span = Some(token.span);
        Ok(token)
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<Token> {
        let token = self.token_stream.expect(
            |token| token.is_keyword(keyword),
            TokenKind::Keyword(keyword).to_string(),
        )?;
        self.last_span = Some(token.span);
        Ok(token)
    }

    fn expect_identifier(&mut self) -> ParseResult<Token> {
        let token = self.token_stream.expect(
            |token| token.kind == TokenKind::Identifier,
            TokenKind::Identifier.to_string(),
        )?;
        self.last_span = Some(token.span);
        Ok(token)
    }

    fn resolve(&self, name: &Token) -> ParseResult<Location> {
        self.symbols
            .resolve(&name.lexeme)
            .ok_or_else(|| ParseError::unknown_variable(name))
    }

    /// Gives every literal occurrence its own cell; equal values are not shared.
    fn allocate_constant(&mut self, literal: &Token) -> ParseResult<Location> {
        let value = parse_number(literal)?;
        self.storage
            .allocate(value)
            .map_err(|error| ParseError::from_ir_error(error, Some(literal.span)))
    }

    fn ir_error(&self, error: crate::ir::IrError) -> ParseError {
        ParseError::from_ir_error(error, self.last_span)
    }
}

fn parse_number(token: &Token) -> ParseResult<i64> {
    token
        .lexeme
        .parse::<i64>()
        .map_err(|_| ParseError::unconverted_literal(token))
}
