//! Grammar module for building and inspecting context-free grammars in
//! Chomsky Normal Form (CNF).
//!
//! A CNF grammar only has productions of the shapes `A → BC` (two
//! nonterminals) and `A → a` (one terminal). Symbols are single characters
//! classified by letter case, uppercase for nonterminals and lowercase for
//! terminals, and must be declared before any rule references them.
//!
//! # Examples
//!
//! ```rust
//! use cnf::Grammar;
//!
//! // Build a grammar programmatically...
//! let mut grammar = Grammar::new();
//! grammar.add_nonterminal('S').unwrap();
//! grammar.add_terminal('a').unwrap();
//! grammar.set_start_symbol('S').unwrap();
//! grammar.add_production('S', "SS").unwrap();
//! grammar.add_production('S', "a").unwrap();
//!
//! // ...or parse the canonical notation.
//! let parsed: Grammar = "S::=SS|a".parse().unwrap();
//! assert_eq!(grammar, parsed);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::HashMap;
use crate::cyk;
use crate::error::Error;
use crate::parsers;
use crate::symbol::Symbol;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The right-hand side of a single CNF production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Body {
    /// `A → a`: one terminal.
    Terminal(char),
    /// `A → BC`: two nonterminals.
    Pair(char, char),
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Body::Terminal(t) => write!(f, "{t}"),
            Body::Pair(left, right) => write!(f, "{left}{right}"),
        }
    }
}

/// A context-free grammar restricted to Chomsky Normal Form.
///
/// Built incrementally: declare symbols, pick a start symbol, then add
/// productions over the declared symbols. Every mutation validates its whole
/// input before touching the grammar, so a failed call leaves the grammar
/// exactly as it was. Declaration order is preserved and determines the order
/// of every rendered output.
#[derive(Clone, Default, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Grammar {
    nonterminals: Vec<char>,
    terminals: Vec<char>,
    start: Option<char>,
    productions: HashMap<char, Vec<Body>>,
}

impl Grammar {
    /// Construct an empty `Grammar`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a nonterminal symbol.
    ///
    /// # Errors
    ///
    /// `InvalidSymbol` if `sym` is not an uppercase letter, `DuplicateSymbol`
    /// if it is already declared.
    pub fn add_nonterminal(&mut self, sym: char) -> Result<(), Error> {
        if !matches!(Symbol::try_from(sym), Ok(Symbol::Nonterminal(_))) {
            return Err(Error::InvalidSymbol(sym));
        }
        if self.is_declared(sym) {
            return Err(Error::DuplicateSymbol(sym));
        }
        self.nonterminals.push(sym);
        Ok(())
    }

    /// Declare a terminal symbol.
    ///
    /// # Errors
    ///
    /// `InvalidSymbol` if `sym` is not a lowercase letter, `DuplicateSymbol`
    /// if it is already declared.
    pub fn add_terminal(&mut self, sym: char) -> Result<(), Error> {
        if !matches!(Symbol::try_from(sym), Ok(Symbol::Terminal(_))) {
            return Err(Error::InvalidSymbol(sym));
        }
        if self.is_declared(sym) {
            return Err(Error::DuplicateSymbol(sym));
        }
        self.terminals.push(sym);
        Ok(())
    }

    /// Designate a declared nonterminal as the start symbol (the axiom).
    /// Overwrites any earlier choice.
    ///
    /// # Errors
    ///
    /// `UnknownSymbol` if `sym` is not a declared nonterminal.
    pub fn set_start_symbol(&mut self, sym: char) -> Result<(), Error> {
        if !self.nonterminals.contains(&sym) {
            return Err(Error::UnknownSymbol(sym));
        }
        self.start = Some(sym);
        Ok(())
    }

    /// Add the production `lhs → body`, where `body` is either one declared
    /// terminal (`"a"`) or two declared nonterminals (`"BC"`).
    ///
    /// # Errors
    ///
    /// `UnknownSymbol` if `lhs` is not a declared nonterminal, `NotInCnf` if
    /// the body has any other shape or references undeclared symbols, and
    /// `DuplicateProduction` if the same body is already registered under
    /// `lhs` (compared by value).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cnf::{Error, Grammar};
    ///
    /// let mut grammar = Grammar::new();
    /// grammar.add_nonterminal('S').unwrap();
    /// grammar.add_terminal('a').unwrap();
    ///
    /// assert_eq!(grammar.add_production('S', "a"), Ok(()));
    /// assert_eq!(
    ///     grammar.add_production('S', "aa"),
    ///     Err(Error::NotInCnf(String::from("aa")))
    /// );
    /// ```
    pub fn add_production(&mut self, lhs: char, body: &str) -> Result<(), Error> {
        let mut chars = body.chars();
        let body = match (chars.next(), chars.next(), chars.next()) {
            (Some(terminal), None, _) => Body::Terminal(terminal),
            (Some(left), Some(right), None) => Body::Pair(left, right),
            _ => {
                // still report the unknown lhs first
                if !self.nonterminals.contains(&lhs) {
                    return Err(Error::UnknownSymbol(lhs));
                }
                return Err(Error::NotInCnf(body.to_string()));
            }
        };
        self.add_body(lhs, body)
    }

    /// `add_production` over an already-shaped [`Body`].
    pub(crate) fn add_body(&mut self, lhs: char, body: Body) -> Result<(), Error> {
        if !self.nonterminals.contains(&lhs) {
            return Err(Error::UnknownSymbol(lhs));
        }
        let well_formed = match body {
            Body::Terminal(terminal) => self.terminals.contains(&terminal),
            Body::Pair(left, right) => {
                self.nonterminals.contains(&left) && self.nonterminals.contains(&right)
            }
        };
        if !well_formed {
            return Err(Error::NotInCnf(body.to_string()));
        }
        if self
            .productions
            .get(&lhs)
            .is_some_and(|bodies| bodies.contains(&body))
        {
            return Err(Error::DuplicateProduction(lhs, body.to_string()));
        }
        self.productions.entry(lhs).or_default().push(body);
        Ok(())
    }

    /// The declared nonterminals, in declaration order.
    #[must_use]
    pub fn nonterminals(&self) -> &[char] {
        &self.nonterminals
    }

    /// The declared terminals, in declaration order.
    #[must_use]
    pub fn terminals(&self) -> &[char] {
        &self.terminals
    }

    /// The start symbol, if one has been designated.
    #[must_use]
    pub const fn start_symbol(&self) -> Option<char> {
        self.start
    }

    /// Iterate the production bodies registered under `lhs`, oldest first.
    /// Empty for a nonterminal with no productions (or an undeclared one).
    pub fn productions_iter(&self, lhs: char) -> impl Iterator<Item = &Body> {
        self.productions.get(&lhs).into_iter().flatten()
    }

    /// The canonical rule string for `lhs`, e.g. `"S::=AB|a"`, with bodies in
    /// insertion order. Empty when `lhs` has no productions.
    #[must_use]
    pub fn productions(&self, lhs: char) -> String {
        match self.productions.get(&lhs) {
            Some(bodies) => {
                let bodies = bodies
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("|");
                format!("{lhs}::={bodies}")
            }
            None => String::new(),
        }
    }

    /// Total number of productions across all nonterminals.
    #[must_use]
    pub fn production_count(&self) -> usize {
        self.productions.values().map(Vec::len).sum()
    }

    /// Remove every declared symbol, every production and the start symbol.
    /// Afterwards the grammar is indistinguishable from a freshly
    /// constructed one.
    pub fn clear(&mut self) {
        self.terminals.clear();
        self.nonterminals.clear();
        self.productions.clear();
        self.start = None;
    }

    /// Whether this grammar derives `word`. See [`crate::is_derived`].
    ///
    /// # Errors
    ///
    /// `GrammarNotReady` if the grammar has no productions or no start
    /// symbol, `InvalidWordSymbol` if `word` contains an undeclared symbol.
    pub fn is_derived(&self, word: &str) -> Result<bool, Error> {
        cyk::is_derived(self, word)
    }

    /// Compute the full derivation table for `word`. See
    /// [`crate::parse_table`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`Grammar::is_derived`].
    pub fn parse_table(&self, word: &str) -> Result<cyk::ParseTable, Error> {
        cyk::parse_table(self, word)
    }

    /// Derive `word` and render the table. See [`crate::render_table`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`Grammar::is_derived`].
    pub fn render_table(&self, word: &str) -> Result<String, Error> {
        cyk::render_table(self, word)
    }

    fn is_declared(&self, sym: char) -> bool {
        self.nonterminals.contains(&sym) || self.terminals.contains(&sym)
    }
}

/// One canonical rule line per declared nonterminal, in declaration order.
/// A nonterminal with no productions contributes an empty line.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &nonterminal in &self.nonterminals {
            writeln!(f, "{}", self.productions(nonterminal))?;
        }
        Ok(())
    }
}

impl FromStr for Grammar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::grammar_from_str(s)
    }
}
