#![cfg(test)]

use cnf::{Error, Grammar};
use rand::{SeedableRng, rngs::StdRng};

#[test]
fn generated_words_are_always_derived() {
    let grammar: Grammar = "S::=AB|BC\nA::=BA|a\nB::=CC|b\nC::=AB|a".parse().unwrap();
    let mut rng = StdRng::from_seed([42; 32]);
    for _ in 0..32 {
        let word = grammar.generate_seeded_bounded(&mut rng, 5).unwrap();
        assert_eq!(grammar.is_derived(&word), Ok(true), "word {word}");
    }
}

#[test]
fn seeded_generation_is_reproducible() {
    let grammar: Grammar = "S::=SS|a".parse().unwrap();
    let mut first = StdRng::from_seed([9; 32]);
    let mut second = StdRng::from_seed([9; 32]);
    assert_eq!(
        grammar.generate_seeded(&mut first).unwrap(),
        grammar.generate_seeded(&mut second).unwrap()
    );
}

#[test]
fn generation_requires_a_populated_grammar() {
    let mut grammar = Grammar::new();
    assert_eq!(grammar.generate(), Err(Error::GrammarNotReady));

    grammar.add_nonterminal('S').unwrap();
    grammar.set_start_symbol('S').unwrap();
    assert_eq!(grammar.generate(), Err(Error::GrammarNotReady));
}

#[test]
fn generation_requires_a_terminating_start_symbol() {
    // S only rewrites to itself and can never reach a terminal
    let grammar: Grammar = "S::=SS".parse().unwrap();
    let error = grammar.generate().unwrap_err();
    assert!(matches!(error, Error::GenerateError(_)));
    assert_eq!(
        error.to_string(),
        "start symbol 'S' cannot derive any terminal string"
    );
}
