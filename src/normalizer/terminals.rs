use std::collections::HashMap;

use crate::grammar::*;

// Replaces every terminal inside a multi-symbol alternative with a proxy
// nonterminal whose only alternative is that terminal. One proxy per
// distinct terminal value, reused across the whole grammar.
pub(super) fn isolate_terminals(grammar: &Grammar, registry: &mut SymbolRegistry) -> Grammar {
    let mut proxies: HashMap<String, String> = HashMap::new();
    let mut proxy_rules: Vec<(String, String)> = Vec::new();

    let mut result = Grammar::new(&grammar.start_symbol);
    for (lhs, rewrite) in &grammar.rules {
        let isolated = rewrite
            .iter()
            .map(|alternative| {
                if alternative.len() < 2 {
                    return alternative.clone();
                }
                alternative
                    .iter()
                    .map(|symbol| match symbol {
                        Symbol::Terminal(value) => {
                            let proxy = proxies.entry(value.clone()).or_insert_with(|| {
                                let name = registry.fresh("T");
                                proxy_rules.push((name.clone(), value.clone()));
                                name
                            });
                            Symbol::Nonterminal(proxy.clone())
                        }
                        nonterminal => nonterminal.clone(),
                    })
                    .collect()
            })
            .collect();
        result.rules.insert(lhs.clone(), isolated);
    }

    for (name, value) in proxy_rules {
        result.rules.insert(name, vec![vec![Symbol::Terminal(value)]]);
    }

    result
}
