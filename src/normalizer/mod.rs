/*
    This module rewrites arbitrary grammars into Chomsky Normal Form
*/

mod binarize;
mod epsilon;
mod terminals;
mod units;

use std::fmt::Display;

use crate::error_handling::*;
use crate::grammar::*;

#[derive(Debug, PartialEq)]
pub enum NormalizeErrorType {
    // An alternative references a nonterminal with no rule entry
    MalformedGrammar(String),
    // The grammar has no rules, or its start symbol has no rule entry
    EmptyGrammar,
}

impl ErrorType for NormalizeErrorType {}

impl Display for NormalizeErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeErrorType::MalformedGrammar(nonterminal) => {
                write!(f, "No rule entry for nonterminal `{}`", nonterminal)
            }
            NormalizeErrorType::EmptyGrammar => write!(f, "Grammar has no start rule"),
        }
    }
}

pub type NormalizeResult<T> = std::result::Result<T, NormalizeErrorType>;

fn verify_well_formed(grammar: &Grammar) -> NormalizeResult<()> {
    if grammar.rules.is_empty() || !grammar.rules.contains_key(&grammar.start_symbol) {
        return Err(NormalizeErrorType::EmptyGrammar);
    }

    let dangling = grammar
        .rules
        .values()
        .flatten()
        .flatten()
        .filter_map(|symbol| match symbol {
            Symbol::Nonterminal(name) => Some(name),
            _ => None,
        })
        .find(|name| !grammar.rules.contains_key(*name));

    match dangling {
        Some(name) => Err(NormalizeErrorType::MalformedGrammar(name.clone())),
        None => Ok(()),
    }
}

// Rewrites the grammar into an equivalent CNF grammar. Each stage returns
// a new grammar value; the stage order is load-bearing (terminal isolation
// before unit elimination would reintroduce mixed unit alternatives).
pub fn normalize(grammar: &Grammar) -> NormalizeResult<Grammar> {
    verify_well_formed(grammar)?;

    let mut registry = SymbolRegistry::from_grammar(grammar);

    let stage = epsilon::eliminate_epsilon(grammar, &mut registry);
    let stage = units::eliminate_units(&stage);
    let stage = terminals::isolate_terminals(&stage, &mut registry);
    let stage = binarize::binarize(&stage, &mut registry);

    Ok(stage)
}

#[cfg(test)]
pub mod tests {
    use super::*;

    pub fn s_nonterminal(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    pub fn s_terminal(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    // S -> "+" B A ; A -> "a" A "c" | "a" "b" "c" ; B -> "b"
    pub fn arithmetic_grammar() -> Grammar {
        let mut grammar = Grammar::new("S");
        grammar.add_alternative(
            "S",
            vec![s_terminal("+"), s_nonterminal("B"), s_nonterminal("A")],
        );
        grammar.add_alternative(
            "A",
            vec![s_terminal("a"), s_nonterminal("A"), s_terminal("c")],
        );
        grammar.add_alternative("A", vec![s_terminal("a"), s_terminal("b"), s_terminal("c")]);
        grammar.add_alternative("B", vec![s_terminal("b")]);
        grammar
    }

    pub fn is_cnf_shape(grammar: &Grammar) -> bool {
        grammar.rules.iter().all(|(symbol, rewrite)| {
            rewrite.iter().all(|alternative| match &alternative[..] {
                [] => *symbol == grammar.start_symbol,
                [Symbol::Terminal(_)] => true,
                [Symbol::Nonterminal(_), Symbol::Nonterminal(_)] => true,
                _ => false,
            })
        })
    }

    #[test]
    fn normalize_produces_cnf_shape() {
        let cnf = normalize(&arithmetic_grammar()).unwrap();
        assert!(is_cnf_shape(&cnf));
    }

    #[test]
    fn normalize_rejects_dangling_reference() {
        let mut grammar = Grammar::new("S");
        grammar.add_alternative("S", vec![s_nonterminal("missing")]);

        assert_eq!(
            normalize(&grammar),
            Err(NormalizeErrorType::MalformedGrammar("missing".to_string()))
        );
    }

    #[test]
    fn normalize_rejects_missing_start() {
        assert_eq!(
            normalize(&Grammar::new("S")),
            Err(NormalizeErrorType::EmptyGrammar)
        );

        let mut grammar = Grammar::new("S");
        grammar.add_alternative("A", vec![s_terminal("a")]);
        assert_eq!(normalize(&grammar), Err(NormalizeErrorType::EmptyGrammar));
    }

    #[test]
    fn normalize_terminates_on_unit_cycle() {
        let mut grammar = Grammar::new("A");
        grammar.add_alternative("A", vec![s_nonterminal("B")]);
        grammar.add_alternative("B", vec![s_nonterminal("A")]);
        grammar.add_alternative("A", vec![s_terminal("x")]);

        let cnf = normalize(&grammar).unwrap();
        assert!(is_cnf_shape(&cnf));
        assert!(cnf.rules["A"].contains(&vec![s_terminal("x")]));
    }
}
