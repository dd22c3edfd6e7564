//! Parsers for the canonical rule notation, one rule per line:
//! `S::=AB|BC`. No whitespace is allowed inside a rule; blank lines between
//! rules are ignored.

use crate::error::Error;
use crate::grammar::{Body, Grammar};
use crate::symbol::Symbol;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{line_ending, satisfy},
    combinator::{all_consuming, map},
    multi::{many0, many1, separated_list1},
    sequence::delimited,
};

/// A raw `lhs ::= bodies` line, before any declaration checking.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Rule {
    pub lhs: char,
    pub bodies: Vec<Body>,
}

pub(crate) fn nonterminal(input: &str) -> IResult<&str, char> {
    satisfy(char::is_uppercase).parse(input)
}

pub(crate) fn terminal(input: &str) -> IResult<&str, char> {
    satisfy(char::is_lowercase).parse(input)
}

pub(crate) fn body(input: &str) -> IResult<&str, Body> {
    alt((
        map((nonterminal, nonterminal), |(left, right)| {
            Body::Pair(left, right)
        }),
        map(terminal, Body::Terminal),
    ))
    .parse(input)
}

pub(crate) fn rule(input: &str) -> IResult<&str, Rule> {
    map(
        (nonterminal, tag("::="), separated_list1(tag("|"), body)),
        |(lhs, _, bodies)| Rule { lhs, bodies },
    )
    .parse(input)
}

pub(crate) fn rules_complete(input: &str) -> IResult<&str, Vec<Rule>> {
    all_consuming(delimited(
        many0(line_ending),
        separated_list1(many1(line_ending), rule),
        many0(line_ending),
    ))
    .parse(input)
}

/// Assemble a [`Grammar`] from canonical notation.
///
/// Symbols are declared in order of first appearance (rule head first, then
/// body symbols, line by line); the first rule's head becomes the start
/// symbol. Syntax problems surface as [`Error::ParseError`], semantic ones
/// (e.g. a repeated body) as the corresponding construction error.
pub(crate) fn grammar_from_str(input: &str) -> Result<Grammar, Error> {
    let (_, rules) = rules_complete(input).map_err(Error::from)?;

    let mut grammar = Grammar::new();
    for rule in &rules {
        declare(&mut grammar, Symbol::Nonterminal(rule.lhs))?;
        for body in &rule.bodies {
            match *body {
                Body::Terminal(t) => declare(&mut grammar, Symbol::Terminal(t))?,
                Body::Pair(left, right) => {
                    declare(&mut grammar, Symbol::Nonterminal(left))?;
                    declare(&mut grammar, Symbol::Nonterminal(right))?;
                }
            }
        }
    }
    if let Some(first) = rules.first() {
        grammar.set_start_symbol(first.lhs)?;
    }
    for rule in rules {
        for body in rule.bodies {
            grammar.add_body(rule.lhs, body)?;
        }
    }
    Ok(grammar)
}

fn declare(grammar: &mut Grammar, symbol: Symbol) -> Result<(), Error> {
    let declared = match symbol {
        Symbol::Terminal(t) => grammar.terminals().contains(&t),
        Symbol::Nonterminal(nt) => grammar.nonterminals().contains(&nt),
    };
    if declared {
        return Ok(());
    }
    match symbol {
        Symbol::Terminal(t) => grammar.add_terminal(t),
        Symbol::Nonterminal(nt) => grammar.add_nonterminal(nt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_prefers_the_pair_shape() {
        assert_eq!(body("AB"), Ok(("", Body::Pair('A', 'B'))));
        assert_eq!(body("a"), Ok(("", Body::Terminal('a'))));
        // a lone nonterminal is not a body
        assert!(body("|").is_err());
    }

    #[test]
    fn rule_match() {
        let parsed = rule("S::=AB|BC|a");
        assert_eq!(
            parsed,
            Ok((
                "",
                Rule {
                    lhs: 'S',
                    bodies: vec![
                        Body::Pair('A', 'B'),
                        Body::Pair('B', 'C'),
                        Body::Terminal('a'),
                    ],
                }
            ))
        );
    }

    #[test]
    fn rules_tolerate_blank_lines() {
        let parsed = rules_complete("S::=a\n\nT::=b\n");
        let (rest, rules) = parsed.unwrap();
        assert_eq!(rest, "");
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn grammar_from_str_declares_in_first_appearance_order() {
        let grammar = grammar_from_str("S::=AB\nA::=a\nB::=b").unwrap();
        assert_eq!(grammar.nonterminals(), &['S', 'A', 'B']);
        assert_eq!(grammar.terminals(), &['a', 'b']);
        assert_eq!(grammar.start_symbol(), Some('S'));
    }

    #[test]
    fn grammar_from_str_rejects_whitespace_inside_rules() {
        assert!(matches!(
            grammar_from_str("S ::= a"),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn grammar_from_str_reports_duplicate_bodies() {
        assert_eq!(
            grammar_from_str("S::=a|a"),
            Err(Error::DuplicateProduction('S', String::from("a")))
        );
    }
}
