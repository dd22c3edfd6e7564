//! The Cocke–Younger–Kasami derivation engine.
//!
//! Membership of a word in the language of a CNF grammar is decided bottom-up
//! over substring spans: the base row records which nonterminals derive each
//! single character, and the cell for a longer span unions, over every split
//! into a left and a right part, the nonterminals whose pair productions
//! match the two sub-cells. The word is derived exactly when the start symbol
//! reaches the cell covering the whole word.
//!
//! Each query recompiles the grammar and recomputes the table from scratch;
//! the returned [`ParseTable`] is the only state the engine ever produces.

mod grammar;
mod table;

use bit_set::BitSet;

use crate::error::Error;
use crate::grammar::Grammar;
use crate::tracing;
use grammar::DenseGrammar;
pub use table::{Cell, ParseTable};

/// Whether `grammar` derives `word`.
///
/// The empty word is never derived: Chomsky Normal Form has no epsilon
/// productions.
///
/// # Errors
///
/// [`Error::GrammarNotReady`] when the grammar has no productions or no start
/// symbol (checked first, whatever the word), then
/// [`Error::InvalidWordSymbol`] for the first word character that is not a
/// declared terminal.
pub fn is_derived(grammar: &Grammar, word: &str) -> Result<bool, Error> {
    Ok(parse_table(grammar, word)?.is_derived())
}

/// Compute the full triangular derivation table for `word`.
///
/// # Errors
///
/// Same conditions as [`is_derived`].
pub fn parse_table(grammar: &Grammar, word: &str) -> Result<ParseTable, Error> {
    let _span = tracing::span!(tracing::Level::DEBUG, "cyk_parse_table").entered();
    let dense = DenseGrammar::compile(grammar)?;
    let word = check_word(grammar, word)?;
    Ok(derive(&dense, word))
}

/// Derive `word` and render the resulting table; see [`ParseTable`]'s
/// `Display` impl for the exact layout.
///
/// # Errors
///
/// Same conditions as [`is_derived`].
pub fn render_table(grammar: &Grammar, word: &str) -> Result<String, Error> {
    Ok(parse_table(grammar, word)?.to_string())
}

/// Every word character must be a declared terminal; uppercase characters are
/// nonterminals and can never appear in a word.
fn check_word(grammar: &Grammar, word: &str) -> Result<Vec<char>, Error> {
    word.chars()
        .map(|c| {
            if grammar.terminals().contains(&c) {
                Ok(c)
            } else {
                Err(Error::InvalidWordSymbol(c))
            }
        })
        .collect()
}

fn derive(dense: &DenseGrammar, word: Vec<char>) -> ParseTable {
    let n = word.len();
    let mut rows: Vec<Vec<BitSet>> = Vec::with_capacity(n);
    if n > 0 {
        rows.push(word.iter().map(|&c| dense.unit_derivers(c)).collect());
    }
    for span in 2..=n {
        let row = (0..=n - span)
            .map(|offset| derive_cell(dense, &rows, offset, span))
            .collect();
        rows.push(row);
    }
    ParseTable::new(word, dense.names().to_vec(), dense.start(), rows)
}

/// Union over every split of the span into `[offset, offset + split)` and
/// `[offset + split, offset + span)`.
fn derive_cell(dense: &DenseGrammar, rows: &[Vec<BitSet>], offset: usize, span: usize) -> BitSet {
    let mut cell = BitSet::with_capacity(dense.len());
    for split in 1..span {
        let left = sub_cell(rows, offset, split);
        let right = sub_cell(rows, offset + split, span - split);
        if left.is_empty() || right.is_empty() {
            continue;
        }
        for rule in dense.pair_rules() {
            if left.contains(rule.left) && right.contains(rule.right) {
                cell.insert(rule.lhs);
            }
        }
    }
    cell
}

fn sub_cell(rows: &[Vec<BitSet>], offset: usize, span: usize) -> &BitSet {
    rows.get(span - 1)
        .and_then(|row| row.get(offset))
        .expect("sub-span cells are derived before their covering span")
}
