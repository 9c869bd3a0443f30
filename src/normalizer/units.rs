use std::collections::HashSet;

use itertools::Itertools;

use crate::grammar::*;

fn is_unit(alternative: &Alternative) -> bool {
    matches!(&alternative[..], [Symbol::Nonterminal(_)])
}

// Every nonterminal reachable from `origin` through unit alternatives
// alone. The visited set doubles as cycle protection, so A -> B -> A
// terminates.
fn unit_targets<'a>(grammar: &'a Grammar, origin: &'a str) -> HashSet<&'a str> {
    let mut targets = HashSet::new();
    let mut pending = vec![origin];

    while let Some(current) = pending.pop() {
        for alternative in &grammar.rules[current] {
            if let [Symbol::Nonterminal(name)] = &alternative[..] {
                if targets.insert(name.as_str()) {
                    pending.push(name);
                }
            }
        }
    }

    targets
}

pub(super) fn eliminate_units(grammar: &Grammar) -> Grammar {
    let mut result = Grammar::new(&grammar.start_symbol);

    for (lhs, rewrite) in &grammar.rules {
        let own = rewrite.iter().filter(|alternative| !is_unit(alternative));
        let inherited = unit_targets(grammar, lhs)
            .into_iter()
            .flat_map(|target| &grammar.rules[target])
            .filter(|alternative| !is_unit(alternative));

        let merged = own.chain(inherited).cloned().unique().collect_vec();
        result.rules.insert(lhs.clone(), merged);
    }

    result
}
