use std::collections::HashSet;

use itertools::Itertools;

use crate::grammar::*;

// A nonterminal is nullable if it has an epsilon alternative, or some
// alternative made up entirely of nullable nonterminals
fn nullable_set(grammar: &Grammar) -> HashSet<String> {
    let mut nullable = HashSet::new();

    let mut changed = true;
    while changed {
        changed = false;
        for (lhs, rewrite) in &grammar.rules {
            if nullable.contains(lhs) {
                continue;
            }
            let derives_epsilon = rewrite.iter().any(|alternative| {
                alternative.iter().all(|symbol| match symbol {
                    Symbol::Nonterminal(name) => nullable.contains(name),
                    Symbol::Terminal(_) => false,
                })
            });
            if derives_epsilon {
                nullable.insert(lhs.clone());
                changed = true;
            }
        }
    }

    nullable
}

// Emits every way of deleting a subset of the nullable occurrences.
// Deletion works on positions, so duplicate symbols are handled
// independently. Variants that come out empty are dropped.
fn expand_alternative(alternative: &Alternative, nullable: &HashSet<String>) -> Vec<Alternative> {
    let nullable_positions = alternative
        .iter()
        .enumerate()
        .filter(|(_, symbol)| {
            matches!(symbol, Symbol::Nonterminal(name) if nullable.contains(name))
        })
        .map(|(position, _)| position)
        .collect_vec();

    nullable_positions
        .into_iter()
        .powerset()
        .map(|deleted| {
            let deleted: HashSet<usize> = deleted.into_iter().collect();
            alternative
                .iter()
                .enumerate()
                .filter(|(position, _)| !deleted.contains(position))
                .map(|(_, symbol)| symbol.clone())
                .collect::<Alternative>()
        })
        .filter(|variant| !variant.is_empty())
        .collect()
}

pub(super) fn eliminate_epsilon(grammar: &Grammar, registry: &mut SymbolRegistry) -> Grammar {
    let nullable = nullable_set(grammar);

    let mut result = Grammar::new(&grammar.start_symbol);
    for (lhs, rewrite) in &grammar.rules {
        let expanded = rewrite
            .iter()
            .flat_map(|alternative| expand_alternative(alternative, &nullable))
            .unique()
            .collect_vec();
        result.rules.insert(lhs.clone(), expanded);
    }

    // A nullable start symbol moves behind a fresh start so the one
    // tolerated epsilon alternative cannot leak into other rewrites
    if nullable.contains(&grammar.start_symbol) {
        let new_start = registry.fresh("S");
        result.rules.insert(
            new_start.clone(),
            vec![
                vec![Symbol::Nonterminal(grammar.start_symbol.clone())],
                vec![],
            ],
        );
        result.start_symbol = new_start;
    }

    result
}
