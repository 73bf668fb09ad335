use regex::Regex;
use std::{fmt, sync::OnceLock};

use super::error::ExprError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    And,
    Or,
    Not,
    Xor,
    Equiv,
    Implies,
    Provided,
    True,
    False,
    Var,
    OpenBracket,
    CloseBracket,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Token::And => "AND",
            Token::Or => "OR",
            Token::Not => "NOT",
            Token::Xor => "XOR",
            Token::Equiv => "EQUIV",
            Token::Implies => "IMPLIES",
            Token::Provided => "PROVIDED",
            Token::True => "CONST_TRUE",
            Token::False => "CONST_FALSE",
            Token::Var => "VAR",
            Token::OpenBracket => "OPEN_PAREN",
            Token::CloseBracket => "CLOSE_PAREN",
        };
        f.write_str(name)
    }
}

/// Lexical patterns in match priority. Every pattern is anchored at the start
/// of the unread input; operator and keyword spellings come before `Var` so an
/// identifier never swallows them.
const PATTERNS: [(Token, &str); 12] = [
    (Token::And, r"(?i)^(?:[∧^&·*]|AND\b)"),
    (Token::Or, r"(?i)^(?:[∨v+∥|]|OR\b)"),
    (Token::Not, r"(?i)^(?:[~'!¬]|NOT\b)"),
    (Token::Xor, r"(?i)^(?:[⊻⊕]|XOR\b)"),
    (Token::Equiv, r"(?i)^(?:[⇔≡↔=]|EQUIV\b)"),
    (Token::Implies, r"(?i)^(?:[⇒→⊃>]|IMPLIES\b)"),
    (Token::Provided, r"(?i)^(?:[⇐←⊃<]|PROVIDED\b)"),
    (Token::True, r"(?i)^(?:[1⊤]|T\b|TRUE\b)"),
    (Token::False, r"(?i)^(?:[0⊥]|F\b|FALSE\b)"),
    (Token::Var, r"^[A-Za-z_][A-Za-z0-9_]*"),
    (Token::OpenBracket, r"^\("),
    (Token::CloseBracket, r"^\)"),
];

fn patterns() -> &'static [(Token, Regex)] {
    static COMPILED: OnceLock<Vec<(Token, Regex)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|(token, pattern)| (*token, Regex::new(pattern).expect("invalid token pattern")))
            .collect()
    })
}

fn whitespace() -> &'static Regex {
    static WS: OnceLock<Regex> = OnceLock::new();
    WS.get_or_init(|| Regex::new(r"^\s+").expect("invalid whitespace pattern"))
}

/// A token together with the text it was matched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub token: Token,
    pub lexeme: String,
}

impl Symbol {
    pub fn new<S: ToString>(token: Token, lexeme: S) -> Self {
        Self {
            token,
            lexeme: lexeme.to_string(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.token, self.lexeme)
    }
}

pub struct Lexer<'a> {
    data: &'a str,
    pointer: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(data: &'a str) -> Self {
        let mut lexer = Self { data, pointer: 0 };
        lexer.eat_whitespace();
        lexer
    }

    pub fn end(&self) -> bool {
        self.pointer == self.data.len()
    }

    fn remaining(&self) -> &'a str {
        &self.data[self.pointer..]
    }

    fn eat_whitespace(&mut self) {
        if let Some(m) = whitespace().find(self.remaining()) {
            self.pointer += m.end();
        }
    }

    /// Find the next symbol without moving the pointer.
    pub fn peek(&self) -> Result<Symbol, ExprError> {
        let rest = self.remaining();
        for (token, pattern) in patterns() {
            if let Some(m) = pattern.find(rest) {
                return Ok(Symbol::new(*token, m.as_str()));
            }
        }

        Err(ExprError::Lex {
            position: self.pointer,
            found: rest.chars().next().unwrap_or('\0'),
        })
    }

    pub fn read(&mut self) -> Result<Symbol, ExprError> {
        let symbol = self.peek()?;
        trace!("read {} at {}", symbol, self.pointer);

        self.pointer += symbol.lexeme.len();
        self.eat_whitespace();

        Ok(symbol)
    }

    /// Read every remaining symbol. Consumes the lexer; a fresh one is needed
    /// per input.
    pub fn read_all(mut self) -> Result<Vec<Symbol>, ExprError> {
        let mut symbols = vec![];

        while !self.end() {
            symbols.push(self.read()?);
        }

        Ok(symbols)
    }
}

pub fn lex(s: &str) -> Result<Vec<Symbol>, ExprError> {
    Lexer::new(s).read_all()
}
