//! Random word generation: expand productions from the start symbol to
//! produce members of the grammar's language.
//!
//! Expansion is uniform over the terminating alternatives of each
//! nonterminal up to a depth bound; past the bound it follows each
//! nonterminal's shortest derivation, so generation always terminates with a
//! word of bounded size.

use rand::Rng;
use rand::rngs::StdRng;
use rand::{SeedableRng, rng};

use crate::HashMap;
use crate::error::Error;
use crate::grammar::{Body, Grammar};

/// Depth at which expansion falls back to shortest derivations.
const DEFAULT_MAX_DEPTH: usize = 64;

impl Grammar {
    /// Generate a random word of this grammar's language.
    ///
    /// # Errors
    ///
    /// [`Error::GrammarNotReady`] when the grammar has no productions or no
    /// start symbol; [`Error::GenerateError`] when the start symbol cannot
    /// derive any terminal string (e.g. only `S → SS` is defined).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cnf::Grammar;
    ///
    /// let grammar: Grammar = "S::=AB\nA::=a\nB::=b".parse().unwrap();
    /// assert_eq!(grammar.generate().unwrap(), "ab");
    /// ```
    pub fn generate(&self) -> Result<String, Error> {
        let mut seed = [0u8; 32];
        rng().fill(&mut seed);
        self.generate_seeded(&mut StdRng::from_seed(seed))
    }

    /// [`Grammar::generate`] with a caller-provided generator, for
    /// reproducible output.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Grammar::generate`].
    pub fn generate_seeded(&self, rng: &mut StdRng) -> Result<String, Error> {
        self.generate_seeded_bounded(rng, DEFAULT_MAX_DEPTH)
    }

    /// [`Grammar::generate_seeded`] with an explicit depth bound. Lower
    /// bounds skew the output towards each nonterminal's shortest
    /// derivations; a bound of zero yields a shortest word.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Grammar::generate`].
    pub fn generate_seeded_bounded(
        &self,
        rng: &mut StdRng,
        max_depth: usize,
    ) -> Result<String, Error> {
        let start = self.start_symbol().ok_or(Error::GrammarNotReady)?;
        if self.production_count() == 0 {
            return Err(Error::GrammarNotReady);
        }
        let lengths = self.shortest_lengths();
        if !lengths.contains_key(&start) {
            return Err(Error::GenerateError(format!(
                "start symbol '{start}' cannot derive any terminal string"
            )));
        }

        let mut word = String::new();
        self.expand(start, 0, max_depth, &lengths, rng, &mut word);
        Ok(word)
    }

    /// Length of the shortest word derivable from each nonterminal, by fixed
    /// point: a terminal body costs one, a pair body the sum of its parts.
    /// Nonterminals deriving no terminal string never enter the map.
    fn shortest_lengths(&self) -> HashMap<char, usize> {
        let mut lengths: HashMap<char, usize> = HashMap::new();
        let mut progress = true;
        while progress {
            progress = false;
            for &nonterminal in self.nonterminals() {
                let best = self
                    .productions_iter(nonterminal)
                    .filter_map(|body| body_length(body, &lengths))
                    .min();
                let Some(best) = best else { continue };
                let improved = lengths
                    .get(&nonterminal)
                    .is_none_or(|&current| best < current);
                if improved {
                    lengths.insert(nonterminal, best);
                    progress = true;
                }
            }
        }
        lengths
    }

    fn expand(
        &self,
        nonterminal: char,
        depth: usize,
        max_depth: usize,
        lengths: &HashMap<char, usize>,
        rng: &mut StdRng,
        word: &mut String,
    ) {
        let terminating: Vec<&Body> = self
            .productions_iter(nonterminal)
            .filter(|body| body_length(body, lengths).is_some())
            .collect();
        let chosen = if depth < max_depth {
            random_choice(rng, &terminating)
        } else {
            terminating
                .iter()
                .min_by_key(|body| body_length(body, lengths))
                .copied()
        };
        // a nonterminal is only expanded when it terminates, so a
        // terminating body exists
        let Some(body) = chosen else { return };
        match *body {
            Body::Terminal(terminal) => word.push(terminal),
            Body::Pair(left, right) => {
                self.expand(left, depth + 1, max_depth, lengths, rng, word);
                self.expand(right, depth + 1, max_depth, lengths, rng, word);
            }
        }
    }
}

fn body_length(body: &Body, lengths: &HashMap<char, usize>) -> Option<usize> {
    match *body {
        Body::Terminal(_) => Some(1),
        Body::Pair(left, right) => match (lengths.get(&left), lengths.get(&right)) {
            (Some(&left), Some(&right)) => Some(left + right),
            _ => None,
        },
    }
}

fn random_choice<'b>(rng: &mut StdRng, bodies: &[&'b Body]) -> Option<&'b Body> {
    if bodies.is_empty() {
        return None;
    }
    bodies.get(rng.random_range(0..bodies.len())).copied()
}
