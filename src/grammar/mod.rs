/*
    This module is for storing and manipulating grammars
*/

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use itertools::Itertools;

// The base unit in a grammar rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(t) => write!(f, "\"{}\"", t),
            Symbol::Nonterminal(n) => write!(f, "{}", n),
        }
    }
}

// The symbols in a single alternative. An empty alternative stands for
// epsilon.
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    pub start_symbol: String,
    pub rules: HashMap<String, Rewrite>,
}

impl Grammar {
    pub fn new(start_symbol: &str) -> Self {
        Grammar {
            start_symbol: start_symbol.to_string(),
            rules: HashMap::new(),
        }
    }

    // Appends an alternative to a nonterminal's rewrite, creating the
    // rewrite if the nonterminal is new
    pub fn add_alternative(&mut self, nonterminal: &str, alternative: Alternative) {
        self.rules
            .entry(nonterminal.to_string())
            .or_default()
            .push(alternative);
    }
}

fn fmt_alternative(alternative: &Alternative) -> String {
    if alternative.is_empty() {
        return "\"\"".to_string();
    }
    alternative.iter().map(Symbol::to_string).join(" ")
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The start symbol prints first so the output is itself a valid
        // grammar file
        let rest = self
            .rules
            .keys()
            .filter(|symbol| **symbol != self.start_symbol)
            .sorted();
        for symbol in std::iter::once(&self.start_symbol).chain(rest) {
            let Some(rewrite) = self.rules.get(symbol) else {
                continue;
            };
            let alternatives = rewrite.iter().map(fmt_alternative).join(" | ");
            writeln!(f, "{} = {}", symbol, alternatives)?;
        }
        Ok(())
    }
}

// Hands out nonterminal names guaranteed not to collide with any name
// already in the grammar or previously handed out. One registry per
// normalization run.
#[derive(Debug)]
pub struct SymbolRegistry {
    used: HashSet<String>,
    counter: u32,
}

impl SymbolRegistry {
    pub fn from_grammar(grammar: &Grammar) -> Self {
        SymbolRegistry {
            used: grammar.rules.keys().cloned().collect(),
            counter: 0,
        }
    }

    pub fn fresh(&mut self, prefix: &str) -> String {
        loop {
            let candidate = format!("{}{}", prefix, self.counter);
            self.counter += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
