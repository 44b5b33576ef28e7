use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Syntax,
    TooManyArgs,
    MissingRedirectFile,
    Leftovers(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax => write!(f, "syntax error"),
            ParseError::TooManyArgs => write!(f, "too many args"),
            ParseError::MissingRedirectFile => write!(f, "missing file for redirection"),
            ParseError::Leftovers(rest) => write!(f, "leftovers: {}", rest),
        }
    }
}

impl Error for ParseError {}
