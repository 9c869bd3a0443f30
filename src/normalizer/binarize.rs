use crate::grammar::*;

// Splits [s1, s2, ..., sk] into a suffix chain:
//   lhs -> s1 N2, N2 -> s2 N3, ..., N(k-1) -> s(k-1) sk
// Alternatives of length <= 2 pass through untouched.
pub(super) fn binarize(grammar: &Grammar, registry: &mut SymbolRegistry) -> Grammar {
    let mut chain_rules: Vec<(String, Alternative)> = Vec::new();

    let mut result = Grammar::new(&grammar.start_symbol);
    for (lhs, rewrite) in &grammar.rules {
        let mut binarized = Vec::with_capacity(rewrite.len());
        for alternative in rewrite {
            if alternative.len() <= 2 {
                binarized.push(alternative.clone());
                continue;
            }

            let mut tail = registry.fresh("X");
            binarized.push(vec![
                alternative[0].clone(),
                Symbol::Nonterminal(tail.clone()),
            ]);
            for symbol in &alternative[1..alternative.len() - 2] {
                let next = registry.fresh("X");
                chain_rules.push((
                    tail,
                    vec![symbol.clone(), Symbol::Nonterminal(next.clone())],
                ));
                tail = next;
            }
            chain_rules.push((tail, alternative[alternative.len() - 2..].to_vec()));
        }
        result.rules.insert(lhs.clone(), binarized);
    }

    for (name, alternative) in chain_rules {
        result.rules.insert(name, vec![alternative]);
    }

    result
}
