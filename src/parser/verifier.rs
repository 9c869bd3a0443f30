use std::collections::HashMap;

use itertools::Itertools;

use super::ParseErrorType::UndefinedNonterminal;
use super::{FileResult, Location, ParseError, ParseErrors, Rewrite};
use crate::grammar::Symbol;

pub type IntermediateRuleset = HashMap<String, (Rewrite, Location)>;

// Collects an error for every nonterminal referenced without a rule
// entry, ordered by source line for stable reporting
fn undefined_symbol_errors(rules: &IntermediateRuleset) -> ParseErrors {
    rules
        .values()
        .flat_map(|(rewrite, location)| {
            rewrite
                .iter()
                .flatten()
                .filter_map(move |symbol| match symbol {
                    Symbol::Nonterminal(name) if !rules.contains_key(name) => Some(ParseError {
                        location: location.clone(),
                        error: UndefinedNonterminal(name.clone()),
                    }),
                    _ => None,
                })
        })
        .sorted_by_key(|error| error.location.line)
        .collect()
}

pub fn verify_rules(rules: &IntermediateRuleset) -> FileResult<()> {
    let errors = undefined_symbol_errors(rules);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
