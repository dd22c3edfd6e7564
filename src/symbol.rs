use std::fmt;

use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single grammar symbol, classified by Unicode letter case:
/// uppercase characters are nonterminals, lowercase characters are terminals.
///
/// A character that is neither (digits, punctuation, titlecase letters) is not
/// a symbol at all and fails conversion with [`Error::InvalidSymbol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Symbol {
    Terminal(char),
    Nonterminal(char),
}

impl Symbol {
    /// The underlying character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Self::Terminal(c) | Self::Nonterminal(c) => *c,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    #[must_use]
    pub const fn is_nonterminal(&self) -> bool {
        matches!(self, Self::Nonterminal(_))
    }
}

impl TryFrom<char> for Symbol {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Error> {
        if c.is_uppercase() {
            Ok(Self::Nonterminal(c))
        } else if c.is_lowercase() {
            Ok(Self::Terminal(c))
        } else {
            Err(Error::InvalidSymbol(c))
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
