use std::{collections::HashMap, rc::Rc};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, KEYWORD_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &str);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        // Every pattern is anchored so it only matches at the cursor
        RegexPattern {
            regex: Regex::new(&format!("^(?:{})", pattern)).unwrap(),
            handler,
        }
    }
}

lazy_static! {
    /// Patterns in matching priority order: the first pattern that matches
    /// at the cursor wins, so keywords and multi-character operators are
    /// listed before identifiers and single-character operators.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new(r"#include\s*<(\w+\.h|\w+)>", MK_DEFAULT_HANDLER!(TokenKind::Header)),
        RegexPattern::new(r"\b(endl|cout|nullptr|switch|case|default|using namespace std)\b", MK_DEFAULT_HANDLER!(TokenKind::Reserved)),
        RegexPattern::new(r"[a-zA-Z][a-zA-Z_0-9]*", symbol_handler),
        RegexPattern::new(r#""[^"]*""#, MK_DEFAULT_HANDLER!(TokenKind::String)),
        RegexPattern::new(r"'(\\.|[^\\'])'", MK_DEFAULT_HANDLER!(TokenKind::Char)),
        RegexPattern::new(r"[0-9]+(\.[0-9]+)?", MK_DEFAULT_HANDLER!(TokenKind::Number)),
        RegexPattern::new(r"&&", MK_DEFAULT_HANDLER!(TokenKind::And)),
        RegexPattern::new(r"\|\|", MK_DEFAULT_HANDLER!(TokenKind::Or)),
        RegexPattern::new(r"<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals)),
        RegexPattern::new(r">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals)),
        RegexPattern::new(r"==", MK_DEFAULT_HANDLER!(TokenKind::Equals)),
        RegexPattern::new(r"!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals)),
        RegexPattern::new(r"<<|>>", MK_DEFAULT_HANDLER!(TokenKind::Shift)),
        RegexPattern::new(r"\+", MK_DEFAULT_HANDLER!(TokenKind::Plus)),
        RegexPattern::new(r"-", MK_DEFAULT_HANDLER!(TokenKind::Dash)),
        RegexPattern::new(r"\*", MK_DEFAULT_HANDLER!(TokenKind::Star)),
        RegexPattern::new(r"/", MK_DEFAULT_HANDLER!(TokenKind::Slash)),
        RegexPattern::new(r"%", MK_DEFAULT_HANDLER!(TokenKind::Percent)),
        RegexPattern::new(r"=", MK_DEFAULT_HANDLER!(TokenKind::Assignment)),
        RegexPattern::new(r"<", MK_DEFAULT_HANDLER!(TokenKind::Less)),
        RegexPattern::new(r">", MK_DEFAULT_HANDLER!(TokenKind::Greater)),
        RegexPattern::new(r";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon)),
        RegexPattern::new(r",", MK_DEFAULT_HANDLER!(TokenKind::Comma)),
        RegexPattern::new(r"\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen)),
        RegexPattern::new(r"\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen)),
        RegexPattern::new(r"\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly)),
        RegexPattern::new(r"\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly)),
    ];
}

/// Everything the tokenizer produces for one source text.
#[derive(Debug, Clone, Default)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub counts: HashMap<TokenKind, usize>,
    pub errors: Vec<Error>,
}

pub struct Lexer {
    tokens: Vec<Token>,
    counts: HashMap<TokenKind, usize>,
    errors: Vec<Error>,
    line: Rc<String>,
    line_number: u32,
    pos: usize,
}

impl Lexer {
    pub fn new() -> Lexer {
        Lexer {
            tokens: vec![],
            counts: HashMap::new(),
            errors: vec![],
            line: Rc::new(String::new()),
            line_number: 0,
            pos: 0,
        }
    }

    pub fn start_line(&mut self, line_number: u32, text: &str) {
        self.line = Rc::new(text.to_string());
        self.line_number = line_number;
        self.pos = 0;
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        *self.counts.entry(token.kind).or_insert(0) += 1;
        self.tokens.push(token);
    }

    /// Position of the cursor. Columns count characters, not bytes.
    pub fn position(&self) -> Position {
        let column = self.line[..self.pos].chars().count() as u32 + 1;
        Position(self.line_number, column)
    }

    pub fn remainder(&self) -> &str {
        &self.line[self.pos..]
    }

    pub fn at_eol(&self) -> bool {
        self.pos >= self.line.len()
    }

    fn skip_whitespace(&mut self) -> bool {
        let skipped: usize = self
            .remainder()
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        self.advance_n(skipped);
        skipped > 0
    }

    fn matches_here(&self) -> bool {
        PATTERNS
            .iter()
            .any(|pattern| pattern.regex.is_match(self.remainder()))
    }

    /// Runs the handler of the first pattern matching at the cursor.
    fn match_pattern(&mut self) -> bool {
        let line = Rc::clone(&self.line);
        let rest = &line[self.pos..];

        for pattern in PATTERNS.iter() {
            if let Some(found) = pattern.regex.find(rest) {
                (pattern.handler)(self, found.as_str());
                return true;
            }
        }

        false
    }

    /// Consumes a run of characters no pattern accepts and records it.
    fn skip_unrecognised(&mut self) {
        let start = self.position();
        let mut text = String::new();

        while let Some(ch) = self.remainder().chars().next() {
            if ch.is_whitespace() {
                break;
            }
            text.push(ch);
            self.advance_n(ch.len_utf8());
            if self.matches_here() {
                break;
            }
        }

        self.errors.push(Error::new(
            ErrorImpl::UnrecognisedCharacters {
                text,
                line: start.line(),
                column: start.column(),
            },
            start,
            Rc::clone(&self.line),
        ));
    }

    fn finish(self) -> TokenizeResult {
        TokenizeResult {
            tokens: self.tokens,
            counts: self.counts,
            errors: self.errors,
        }
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer::new()
    }
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) {
    let kind = KEYWORD_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let token = MK_TOKEN!(kind, String::from(matched), lexer.position(), Rc::clone(&lexer.line));
    lexer.push(token);
    lexer.advance_n(matched.len());
}

/// Splits `source` into tokens line by line.
///
/// Unrecognised character runs are collected as lexical errors and scanning
/// carries on with the rest of the line. No end-of-input token is appended.
pub fn tokenize(source: &str) -> TokenizeResult {
    let mut lex = Lexer::new();

    for (index, text) in source.lines().enumerate() {
        lex.start_line(index as u32 + 1, text);

        while !lex.at_eol() {
            if lex.skip_whitespace() {
                continue;
            }

            if !lex.match_pattern() {
                lex.skip_unrecognised();
            }
        }
    }

    lex.finish()
}
