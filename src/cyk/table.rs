use std::fmt;
use std::fmt::Write;

use bit_set::BitSet;

/// The triangular derivation table computed for one word.
///
/// Row `s` (1-based) holds one cell per start offset; the cell at
/// `(offset, span)` is the set of nonterminals deriving
/// `word[offset..offset + span]`. The table is a plain value: it owns its
/// word, its nonterminal names and its cells, and nothing about it is shared
/// with the grammar or the engine after the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
    word: Vec<char>,
    names: Vec<char>,
    start: usize,
    rows: Vec<Vec<BitSet>>,
}

impl ParseTable {
    pub(crate) const fn new(
        word: Vec<char>,
        names: Vec<char>,
        start: usize,
        rows: Vec<Vec<BitSet>>,
    ) -> Self {
        Self {
            word,
            names,
            start,
            rows,
        }
    }

    /// The word this table was computed for.
    #[must_use]
    pub fn word(&self) -> &[char] {
        &self.word
    }

    /// Length of the word, which is also the number of rows.
    #[must_use]
    pub fn word_len(&self) -> usize {
        self.word.len()
    }

    /// Whether the start symbol derives the whole word. Always `false` for
    /// the empty word, which has no derivation in Chomsky Normal Form.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        self.rows
            .last()
            .and_then(|row| row.first())
            .is_some_and(|cell| cell.contains(self.start))
    }

    /// The cell covering `word[offset..offset + span]`, or `None` when the
    /// coordinates fall outside the triangle.
    #[must_use]
    pub fn cell(&self, offset: usize, span: usize) -> Option<Cell<'_>> {
        let set = self.rows.get(span.checked_sub(1)?)?.get(offset)?;
        Some(Cell {
            names: &self.names,
            offset,
            span,
            set,
        })
    }

    /// All cells in derivation order: every span-1 cell by increasing offset,
    /// then every span-2 cell, and so on up to the single full-word cell.
    /// Yields exactly `n(n+1)/2` cells for a word of length `n`.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> {
        self.rows.iter().enumerate().flat_map(move |(row, cells)| {
            cells.iter().enumerate().map(move |(offset, set)| Cell {
                names: &self.names,
                offset,
                span: row + 1,
                set,
            })
        })
    }
}

/// One line per span, smallest spans first; cells within a line are separated
/// by a single tab and render their nonterminals in declaration order, so an
/// underivable span shows as an empty field. Every line ends with a newline.
impl fmt::Display for ParseTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.rows {
            for (offset, set) in row.iter().enumerate() {
                if offset > 0 {
                    f.write_char('\t')?;
                }
                for id in set.iter() {
                    f.write_char(name_of(&self.names, id))?;
                }
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

/// A borrowed view of one table cell.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'table> {
    names: &'table [char],
    offset: usize,
    span: usize,
    set: &'table BitSet,
}

impl Cell<'_> {
    /// Start offset of the substring this cell covers.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the substring this cell covers.
    #[must_use]
    pub const fn span(&self) -> usize {
        self.span
    }

    /// `true` when no nonterminal derives this substring.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Whether `nonterminal` derives this substring.
    #[must_use]
    pub fn contains(&self, nonterminal: char) -> bool {
        self.names
            .iter()
            .position(|&name| name == nonterminal)
            .is_some_and(|id| self.set.contains(id))
    }

    /// The deriving nonterminals, in declaration order.
    pub fn nonterminals(&self) -> impl Iterator<Item = char> + '_ {
        self.set.iter().map(|id| name_of(self.names, id))
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for nonterminal in self.nonterminals() {
            f.write_char(nonterminal)?;
        }
        Ok(())
    }
}

fn name_of(names: &[char], id: usize) -> char {
    names
        .get(id)
        .copied()
        .expect("cell ids index the name table")
}
