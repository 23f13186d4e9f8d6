//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! Statements are dispatched through a lookup table keyed by the leading
//! token; expressions use a Pratt parser with NUD/LED handlers and binding
//! powers for precedence.
//!
//! The parser owns the scope table for the whole compilation. Every
//! construct that opens a scope goes through [`Parser::with_scope`], which
//! leaves the scope again on every exit path, including errors.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    scope::scope::ScopeTable,
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Token cursor, scope table and handler tables of one parse.
pub struct Parser {
    /// The tokens to parse, always terminated by a single `EOF` token
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Symbols declared so far, organised as a scope tree
    symbols: ScopeTable,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser instance and appends the end-of-input token.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Tokens produced by the lexer
    ///
    /// # Returns
    ///
    /// A new Parser instance ready to parse the token stream.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let eof = match tokens.last() {
            Some(last) => Token {
                kind: TokenKind::EOF,
                value: String::new(),
                position: Position(
                    last.position.line(),
                    last.position.column() + last.value.chars().count() as u32,
                ),
                line: Rc::clone(&last.line),
            },
            None => Token {
                kind: TokenKind::EOF,
                value: String::new(),
                position: Position(1, 1),
                line: Rc::new(String::new()),
            },
        };
        tokens.push(eof);

        Parser {
            tokens,
            pos: 0,
            symbols: ScopeTable::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing. Past the end this keeps
    /// returning the `EOF` token.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the kind of the token `offset` places ahead.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Consumes the current token and returns it. Never moves past `EOF`.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise an
    /// `UnexpectedToken` error located at the current token.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(self.error_here(ErrorImpl::UnexpectedToken {
                expected: expected_kind.describe().to_string(),
                found: self.found_text(),
            }));
        }
        Ok(self.advance())
    }

    /// Text of the current token for error messages.
    pub fn found_text(&self) -> String {
        let token = self.current_token();
        if token.kind == TokenKind::EOF {
            TokenKind::EOF.describe().to_string()
        } else {
            token.value.clone()
        }
    }

    /// Builds an error located at the current token.
    pub fn error_here(&self, error: ErrorImpl) -> Error {
        self.error_at(error, self.current_token())
    }

    pub fn error_at(&self, error: ErrorImpl, token: &Token) -> Error {
        Error::new(error, token.position, Rc::clone(&token.line))
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn symbols(&self) -> &ScopeTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut ScopeTable {
        &mut self.symbols
    }

    /// Consumes the parser, keeping only the scope table it built.
    pub fn into_symbols(self) -> ScopeTable {
        self.symbols
    }

    /// Runs `parse_fn` inside a new child scope labelled `label`.
    ///
    /// The scope is left again whether `parse_fn` succeeds or fails.
    pub fn with_scope<T>(
        &mut self,
        label: &str,
        parse_fn: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.symbols.enter_scope(label);
        let result = parse_fn(self);
        self.symbols.exit_scope();
        result
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses statements until EOF. Header
/// tokens at program level are skipped.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with state after parsing, including its scopes)
/// - Result containing either the `Program` node or the first syntax error
pub fn parse(tokens: Vec<Token>) -> (Parser, Result<Node, Error>) {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let mut body = vec![];

    while parser.has_tokens() {
        if parser.current_token_kind() == TokenKind::Header {
            parser.advance();
            continue;
        }

        match parse_stmt(&mut parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => return (parser, Err(error)),
        }
    }

    (parser, Ok(Node::synthetic(NodeKind::Program(body))))
}
