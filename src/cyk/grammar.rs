use bit_set::BitSet;

use crate::HashMap;
use crate::error::Error;
use crate::grammar::{Body, Grammar};
use crate::tracing;

/// A pair production `lhs → left right` over dense nonterminal ids.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PairRule {
    pub lhs: usize,
    pub left: usize,
    pub right: usize,
}

/// A [`Grammar`] recompiled into tables shaped for the derivation loop:
/// nonterminals become dense ids in declaration order, terminal rules become
/// a per-terminal deriver set, and pair rules become a flat list of id
/// triples scanned once per split.
#[derive(Debug)]
pub(crate) struct DenseGrammar {
    names: Vec<char>,
    start: usize,
    unit_rules: HashMap<char, BitSet>,
    pair_rules: Vec<PairRule>,
}

impl DenseGrammar {
    /// Compile `grammar`, or report [`Error::GrammarNotReady`] when it has no
    /// productions or no start symbol.
    pub fn compile(grammar: &Grammar) -> Result<Self, Error> {
        let _span = tracing::span!(tracing::Level::DEBUG, "DenseGrammar_compile").entered();

        let start = grammar.start_symbol().ok_or(Error::GrammarNotReady)?;
        if grammar.production_count() == 0 {
            return Err(Error::GrammarNotReady);
        }

        let names = grammar.nonterminals().to_vec();
        let ids: HashMap<char, usize> = names
            .iter()
            .enumerate()
            .map(|(id, &name)| (name, id))
            .collect();
        let id_of = |name: char| {
            ids.get(&name)
                .copied()
                .expect("production symbols are declared nonterminals")
        };

        let mut unit_rules: HashMap<char, BitSet> = HashMap::new();
        let mut pair_rules = Vec::new();
        for &lhs in grammar.nonterminals() {
            for body in grammar.productions_iter(lhs) {
                match *body {
                    Body::Terminal(terminal) => {
                        unit_rules
                            .entry(terminal)
                            .or_insert_with(|| BitSet::with_capacity(names.len()))
                            .insert(id_of(lhs));
                    }
                    Body::Pair(left, right) => pair_rules.push(PairRule {
                        lhs: id_of(lhs),
                        left: id_of(left),
                        right: id_of(right),
                    }),
                }
            }
        }

        let start = id_of(start);
        Ok(Self {
            names,
            start,
            unit_rules,
            pair_rules,
        })
    }

    /// Number of nonterminals, i.e. the bit width of every cell.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Dense id of the start symbol.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Dense id → nonterminal mapping, in declaration order.
    pub fn names(&self) -> &[char] {
        &self.names
    }

    /// The set of nonterminals deriving `terminal` directly.
    pub fn unit_derivers(&self, terminal: char) -> BitSet {
        self.unit_rules
            .get(&terminal)
            .cloned()
            .unwrap_or_default()
    }

    pub fn pair_rules(&self) -> &[PairRule] {
        &self.pair_rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_grammar() -> Grammar {
        "S::=AB\nA::=a\nB::=b|AB".parse().unwrap()
    }

    #[test]
    fn compile_requires_a_start_symbol() {
        let mut grammar = Grammar::new();
        grammar.add_nonterminal('S').unwrap();
        grammar.add_terminal('a').unwrap();
        grammar.add_production('S', "a").unwrap();
        grammar.clear();
        assert!(matches!(
            DenseGrammar::compile(&grammar),
            Err(Error::GrammarNotReady)
        ));
    }

    #[test]
    fn compile_requires_productions() {
        let mut grammar = Grammar::new();
        grammar.add_nonterminal('S').unwrap();
        grammar.set_start_symbol('S').unwrap();
        assert!(matches!(
            DenseGrammar::compile(&grammar),
            Err(Error::GrammarNotReady)
        ));
    }

    #[test]
    fn ids_follow_declaration_order() {
        let dense = DenseGrammar::compile(&ready_grammar()).unwrap();
        assert_eq!(dense.names(), &['S', 'A', 'B']);
        assert_eq!(dense.start(), 0);
        assert_eq!(dense.len(), 3);
    }

    #[test]
    fn unit_rules_index_by_terminal() {
        let dense = DenseGrammar::compile(&ready_grammar()).unwrap();
        let derivers: Vec<usize> = dense.unit_derivers('a').iter().collect();
        assert_eq!(derivers, vec![1]); // 'A'
        assert!(dense.unit_derivers('z').is_empty());
    }

    #[test]
    fn pair_rules_flatten_every_binary_production() {
        let dense = DenseGrammar::compile(&ready_grammar()).unwrap();
        // S → AB and B → AB
        assert_eq!(dense.pair_rules().len(), 2);
        assert!(
            dense
                .pair_rules()
                .iter()
                .all(|rule| rule.left == 1 && rule.right == 2)
        );
    }
}
