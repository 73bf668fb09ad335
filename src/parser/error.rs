use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// No lexical pattern matches at `position` (byte offset into the input).
    Lex { position: usize, found: char },
    Syntax(String),
    Input(String),
    Eval(String),
    TooManyVariables { count: usize, limit: usize },
}

impl ExprError {
    pub fn syntax<S: ToString>(error: S) -> Self {
        Self::Syntax(error.to_string())
    }

    pub fn input<S: ToString>(error: S) -> Self {
        Self::Input(error.to_string())
    }

    pub fn eval<S: ToString>(error: S) -> Self {
        Self::Eval(error.to_string())
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex { position, found } => write!(
                f,
                "LexError: unknown symbol {:?} at position {}",
                found, position
            ),
            Self::Syntax(error) => write!(f, "SyntaxError: {}", error),
            Self::Input(error) => write!(f, "InputError: {}", error),
            Self::Eval(error) => write!(f, "EvalError: {}", error),
            Self::TooManyVariables { count, limit } => write!(
                f,
                "TooManyVariables: {} variables exceeds the limit of {}",
                count, limit
            ),
        }
    }
}

impl Error for ExprError {}
