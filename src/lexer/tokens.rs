use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display, rc::Rc};

use crate::Position;

lazy_static! {
    /// Words that the identifier pattern must never claim.
    pub static ref KEYWORD_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("return", TokenKind::Return);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("int", TokenKind::TypeName);
        map.insert("float", TokenKind::TypeName);
        map.insert("char", TokenKind::TypeName);
        map.insert("void", TokenKind::TypeName);
        map.insert("string", TokenKind::TypeName);
        map.insert("bool", TokenKind::TypeName);
        map.insert("pi", TokenKind::ConstPi);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    EOF,
    Header,
    Reserved,

    If,
    Else,
    While,
    For,
    Break,
    Continue,
    Return,
    True,
    False,

    TypeName,
    ConstPi,

    String,
    Char,
    Number,
    Identifier,

    And,           // &&
    Or,            // ||
    LessEquals,    // <=
    GreaterEquals, // >=
    Equals,        // ==
    NotEquals,     // !=
    Shift,         // << >>

    Plus,
    Dash,
    Star,
    Slash,
    Percent,
    Assignment, // =
    Less,
    Greater,

    Semicolon,
    Comma,
    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
}

impl TokenKind {
    /// Text used for this kind in "expected ..." messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Header => "header",
            TokenKind::Reserved => "reserved word",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::TypeName => "type name",
            TokenKind::ConstPi => "pi",
            TokenKind::String => "string literal",
            TokenKind::Char => "char literal",
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::LessEquals => "<=",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Shift => "shift operator",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Assignment => "=",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One lexeme with its location. `line` is the whole source line the token
/// was found on, kept for caret diagnostics.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
    pub line: Rc<String>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} {} `{}`",
            self.position.line(),
            self.position.column(),
            self.kind,
            self.value
        )
    }
}
