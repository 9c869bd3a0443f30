/*
    This module decides membership of terminal sequences in CNF grammars
*/

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use crate::error_handling::*;
use crate::grammar::*;

#[derive(Debug, PartialEq)]
pub enum RecognizeErrorType {
    // A rewrite of the named nonterminal breaks the CNF shape
    NotInCNF(String),
}

impl ErrorType for RecognizeErrorType {}

impl Display for RecognizeErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecognizeErrorType::NotInCNF(nonterminal) => {
                write!(f, "Rewrite of `{}` is not in Chomsky Normal Form", nonterminal)
            }
        }
    }
}

pub type RecognizeResult<T> = std::result::Result<T, RecognizeErrorType>;

// Every alternative must be two nonterminals or a single terminal; the
// start symbol alone may carry an epsilon alternative
fn verify_cnf(grammar: &Grammar) -> RecognizeResult<()> {
    for (lhs, rewrite) in &grammar.rules {
        for alternative in rewrite {
            let valid = match &alternative[..] {
                [] => *lhs == grammar.start_symbol,
                [Symbol::Terminal(_)] => true,
                [Symbol::Nonterminal(_), Symbol::Nonterminal(_)] => true,
                _ => false,
            };
            if !valid {
                return Err(RecognizeErrorType::NotInCNF(lhs.clone()));
            }
        }
    }
    Ok(())
}

fn starts_with_epsilon(grammar: &Grammar) -> bool {
    grammar
        .rules
        .get(&grammar.start_symbol)
        .is_some_and(|rewrite| rewrite.iter().any(Vec::is_empty))
}

// CYK tabulation: T[i][j] holds the nonterminals deriving input[i..=j],
// filled by increasing span length. Accepts iff the start symbol derives
// the whole input.
pub fn recognize(grammar: &Grammar, input: &[String]) -> RecognizeResult<bool> {
    verify_cnf(grammar)?;

    if input.is_empty() {
        return Ok(starts_with_epsilon(grammar));
    }

    // Index the grammar once instead of rescanning it per cell
    let mut producers: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut binary_rules: Vec<(&str, &str, &str)> = Vec::new();
    for (lhs, rewrite) in &grammar.rules {
        for alternative in rewrite {
            match &alternative[..] {
                [Symbol::Terminal(value)] => {
                    producers.entry(value).or_default().push(lhs);
                }
                [Symbol::Nonterminal(left), Symbol::Nonterminal(right)] => {
                    binary_rules.push((lhs, left, right));
                }
                _ => {}
            }
        }
    }

    let n = input.len();
    let mut table: Vec<Vec<HashSet<&str>>> = vec![vec![HashSet::new(); n]; n];

    // An input terminal no rule produces just leaves its cell empty
    for (i, value) in input.iter().enumerate() {
        if let Some(found) = producers.get(value.as_str()) {
            table[i][i].extend(found);
        }
    }

    for span in 2..=n {
        for start in 0..=n - span {
            let end = start + span - 1;
            for split in start..end {
                for &(lhs, left, right) in &binary_rules {
                    if table[start][split].contains(left) && table[split + 1][end].contains(right)
                    {
                        table[start][end].insert(lhs);
                    }
                }
            }
        }
    }

    Ok(table[0][n - 1].contains(grammar.start_symbol.as_str()))
}
