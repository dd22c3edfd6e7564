use std::error;
use std::fmt;

use nom::Err;

/// Every way a grammar mutation or a derivation query can fail.
///
/// All failures are synchronous and recoverable by the caller; no operation
/// commits a partial mutation before reporting one.
#[derive(PartialEq, Eq, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// The symbol does not match the letter case the operation requires.
    InvalidSymbol(char),
    /// The symbol is already declared as a terminal or nonterminal.
    DuplicateSymbol(char),
    /// The referenced symbol was never declared.
    UnknownSymbol(char),
    /// The production body is not one terminal or two nonterminals.
    NotInCnf(String),
    /// The identical body is already registered under this nonterminal.
    DuplicateProduction(char, String),
    /// The queried word contains a symbol outside the declared terminal set.
    InvalidWordSymbol(char),
    /// A derivation query on a grammar with no productions or no start symbol.
    GrammarNotReady,
    /// Malformed canonical rule notation.
    ParseError(String),
    /// The grammar cannot generate any terminal string from its start symbol.
    GenerateError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidSymbol(c) => {
                write!(f, "symbol '{c}' does not match the required letter case")
            }
            Error::DuplicateSymbol(c) => write!(f, "symbol '{c}' is already declared"),
            Error::UnknownSymbol(c) => write!(f, "symbol '{c}' has not been declared"),
            Error::NotInCnf(body) => {
                write!(f, "production body '{body}' is not in Chomsky Normal Form")
            }
            Error::DuplicateProduction(lhs, body) => {
                write!(f, "production '{lhs}::={body}' is already defined")
            }
            Error::InvalidWordSymbol(c) => {
                write!(f, "word symbol '{c}' is not a declared terminal")
            }
            Error::GrammarNotReady => {
                write!(f, "grammar has no productions or no start symbol")
            }
            Error::ParseError(s) | Error::GenerateError(s) => write!(f, "{s}"),
        }
    }
}

impl error::Error for Error {}

impl From<nom::error::Error<&str>> for Error {
    fn from(err: nom::error::Error<&str>) -> Self {
        Error::ParseError(format!("parsing error: {err}"))
    }
}

impl From<Err<nom::error::Error<&str>>> for Error {
    fn from(err: Err<nom::error::Error<&str>>) -> Self {
        Error::ParseError(format!("parsing error: {err}"))
    }
}
