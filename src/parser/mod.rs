/*
    This module parses BNF files into grammars
*/

mod lexer;
mod verifier;

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::PathBuf;

use crate::error_handling::*;
use crate::grammar::*;
use itertools::Itertools;
use lexer::*;
use verifier::verify_rules;
use verifier::IntermediateRuleset;

#[derive(Debug)]
pub enum ParseErrorType {
    // A line which should contain a rule does not
    MissingEquals,
    // A rule has multiple equals signs
    UnexpectedEquals,
    // The user starts a rule line with something other than a nonterminal
    MissingNonterminal,
    // There is an unclosed quote
    UnmatchedQuote,
    // An undefined nonterminal was used
    UndefinedNonterminal(String),
    // Somehow a full rewrite was parsed as a base alternative
    // This is a problem with the parser, not the grammar
    UnsplitRewrite,
    // A blank line got too deep into the parser
    // This is a problem with the parser, not the grammar
    UnexpectedBlankLine,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for ParseErrorType {}

impl PartialEq for ParseErrorType {
    fn eq(&self, other: &Self) -> bool {
        if let ParseErrorType::FileError(a) = self {
            if let ParseErrorType::FileError(b) = other {
                return a.kind() == b.kind();
            }
        }
        return std::mem::discriminant(self) == std::mem::discriminant(other);
    }
}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorType::MissingEquals => write!(f, "Expected `=` after nonterminal"),
            ParseErrorType::UnexpectedEquals => write!(f, "Unexpected `=` encountered"),
            ParseErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            ParseErrorType::UnmatchedQuote => write!(f, "Unmatched quotes"),
            ParseErrorType::UndefinedNonterminal(nonterminal) => write!(f, "Could not find definition for `{}`", nonterminal),
            ParseErrorType::UnsplitRewrite => write!(f, "Rewrite was not fully split (this is a parser bug, not a grammar error)"),
            ParseErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in rule parser (this is a parser bug, not a grammar error)"),
            ParseErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type ParseError = Error<ParseErrorType>;
pub type ParseErrors = Errors<ParseErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> ParseError {
    ParseError {
        location: Location { file, line: 0 },
        error: ParseErrorType::FileError(error),
    }
}

pub type Result<T> = std::result::Result<T, ParseErrorType>;
pub type LineResult<T> = std::result::Result<T, ParseError>;
pub type FileResult<T> = std::result::Result<T, ParseErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    rewrite: Rewrite,
    location: Location
}

// An empty quoted terminal stands for epsilon and contributes no symbol,
// so `X = ""` and `X = a | ` both yield an empty alternative
fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    tokens.iter()
        .filter(|t| !matches!(t, Token::Terminal(s) if s.is_empty()))
        .map(|t| match t {
            Token::Equals => Err(ParseErrorType::UnexpectedEquals),
            Token::Or => Err(ParseErrorType::UnsplitRewrite),
            Token::Nonterminal(s) => Ok(Symbol::Nonterminal(s.clone())),
            Token::Terminal(s) => Ok(Symbol::Terminal(s.clone()))
        })
        .collect()
}

fn parse_rewrite(tokens: &[Token]) -> Result<Rewrite> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    // Try to get the token the rule is for. The match returns a result which
    // is then unwrapped with the ? operator
    let symbol = match tokens.first() {
        Some(Token::Nonterminal(s)) => Ok(s.clone()),
        Some(_) => Err(ParseErrorType::MissingNonterminal),
        None => Err(ParseErrorType::UnexpectedBlankLine)
    }?;

    if tokens.get(1) != Some(&Token::Equals) {
        return Err(ParseErrorType::MissingEquals)
    }

    let rewrite = parse_rewrite(&tokens[2..])?;

    return Ok(Rule {
        symbol,
        rewrite,
        location
    });
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line, location.clone()))
        .map_err(|error| ParseError { location, error })
}

fn is_rule_line(line: &String) -> bool {
    !line.is_empty() && !line.starts_with(';')
}

// Returns an iterator over the lines of a file, with the io errors wrapped
// in ParseError and enumerated
fn file_line_nums<'a>(file: File, path: &'a PathBuf) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    std::io::BufReader::new(file)
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.clone())))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

// Generates a rule hashmap from a vector of rules. Rules defined on
// several lines for the same nonterminal are merged into one rewrite.
fn ruleset_from_rules(rules: Vec<Rule>) -> FileResult<HashMap<String, Rewrite>> {
    let mut test_ruleset = IntermediateRuleset::with_capacity(rules.len());
    for rule in rules {
        match test_ruleset.entry(rule.symbol) {
            Entry::Occupied(mut entry) => entry.get_mut().0.extend(rule.rewrite),
            Entry::Vacant(entry) => {
                entry.insert((rule.rewrite, rule.location));
            }
        }
    }

    verify_rules(&test_ruleset)?;

    let mut ruleset = HashMap::<String, Rewrite>::with_capacity(test_ruleset.len());
    for (symbol, (rewrite, _)) in test_ruleset.drain() {
        ruleset.insert(symbol, rewrite);
    }

    return Ok(ruleset);
}

fn grammar_from_rules(rule_list: Vec<Rule>) -> FileResult<Grammar> {
    let start_symbol = if rule_list.len() > 0 {
        rule_list[0].symbol.clone()
    } else {
        String::new()
    };

    let rules = ruleset_from_rules(rule_list)?;

    return Ok(Grammar {
        start_symbol,
        rules
    })
}

pub fn parse_file(path: &PathBuf) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.clone())])?;
    let lines = file_line_nums(file, path);

    let parsed_lines = lines.map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location {
            file: path.clone(),
            line: num
        }))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition(LineResult::is_ok);
    if errors.len() > 0 {
        return Err(errors.into_iter().map(LineResult::unwrap_err).collect_vec());
    }
    let rules_unwrapped = rules.into_iter().map(LineResult::unwrap).collect_vec();

    return grammar_from_rules(rules_unwrapped);
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Location {
        pub fn new() -> Self {
            Location {
                file: PathBuf::new(),
                line: 0
            }
        }
    }

    fn s_nonterminal(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    fn s_terminal(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    #[test]
    fn parse_normal_alternative() {
        let tokens = vec![
            Token::Terminal("+".to_string()),
            Token::Nonterminal("B".to_string()),
            Token::Nonterminal("A".to_string()),
        ];
        let answer = vec![s_terminal("+"), s_nonterminal("B"), s_nonterminal("A")];
        assert_eq!(parse_alternative(&tokens[..]).unwrap(), answer);
    }

    #[test]
    fn parse_epsilon_alternative() {
        // An empty quoted terminal means epsilon, not a zero-width symbol
        assert_eq!(parse_alternative(&[Token::Terminal(String::new())]).unwrap(), vec![]);
        assert_eq!(parse_alternative(&[]).unwrap(), vec![]);

        let tokens = lex_line("A = \"a\" | \"\"").unwrap();
        let rule = parse_line(&tokens[..], Location::new()).unwrap();
        assert_eq!(rule.rewrite, vec![vec![s_terminal("a")], vec![]]);
    }

    #[test]
    fn parse_malformed_alternative() {
        assert_eq!(parse_alternative(&[Token::Equals]), Err(ParseErrorType::UnexpectedEquals));
        assert_eq!(parse_alternative(&[Token::Or]), Err(ParseErrorType::UnsplitRewrite));
    }

    #[test]
    fn parse_normal_line() {
        let text = "A = \"a\" A \"c\" | \"a\" \"b\" \"c\"";
        let lexed = lex_line(text).unwrap();

        let answer = Rule {
            symbol: "A".to_string(),
            rewrite: vec![
                vec![s_terminal("a"), s_nonterminal("A"), s_terminal("c")],
                vec![s_terminal("a"), s_terminal("b"), s_terminal("c")],
            ],
            location: Location::new()
        };

        assert_eq!(parse_line(&lexed[..], Location::new()), Ok(answer));
    }

    #[test]
    fn parse_malformed_line() {
        // Blank
        assert_eq!(parse_line(&[], Location::new()), Err(ParseErrorType::UnexpectedBlankLine));

        // Missing equals
        assert_eq!(parse_line(
            &lex_line("alpha bravo charlie").unwrap()[..],
            Location::new()
        ), Err(ParseErrorType::MissingEquals));

        // Improper definition
        assert_eq!(parse_line(
            &lex_line("\"alpha\" = bravo charlie").unwrap()[..],
            Location::new()
        ), Err(ParseErrorType::MissingNonterminal));
        assert_eq!(parse_line(
            &lex_line("= alpha bravo charlie").unwrap()[..],
            Location::new()
        ), Err(ParseErrorType::MissingNonterminal));
    }

    #[test]
    fn parse_normal_file() {
        let example_path = PathBuf::from("example_data/arith.bnf");
        let example_parsed = parse_file(&example_path).unwrap();

        let mut rules = HashMap::new();
        rules.insert("S".to_string(), vec![vec![
            s_terminal("+"),
            s_nonterminal("B"),
            s_nonterminal("A")
        ]]);
        rules.insert("A".to_string(), vec![
            vec![s_terminal("a"), s_nonterminal("A"), s_terminal("c")],
            vec![s_terminal("a"), s_terminal("b"), s_terminal("c")]
        ]);
        rules.insert("B".to_string(), vec![vec![s_terminal("b")]]);

        assert_eq!(example_parsed, Grammar {
            start_symbol: "S".to_string(),
            rules
        });
    }

    #[test]
    fn parse_repeated_nonterminal_lines_merge() {
        let example_path = PathBuf::from("example_data/unit_cycle.bnf");
        let example_parsed = parse_file(&example_path).unwrap();

        assert_eq!(example_parsed.start_symbol, "A");
        assert_eq!(example_parsed.rules["A"], vec![
            vec![s_nonterminal("B")],
            vec![s_terminal("x")]
        ]);
        assert_eq!(example_parsed.rules["B"], vec![vec![s_nonterminal("A")]]);
    }

    #[test]
    fn parse_malformed_file() {
        let example_path = PathBuf::from("example_data/malformed.bnf");
        let example_parsed = parse_file(&example_path).unwrap_err();

        assert_eq!(example_parsed, vec![
            ParseError {
                location: Location {
                    file: example_path.clone(),
                    line: 3
                },
                error: ParseErrorType::MissingNonterminal
            },
            ParseError {
                location: Location {
                    file: example_path,
                    line: 5
                },
                error: ParseErrorType::UnmatchedQuote
            }
        ]);
    }

    #[test]
    fn parse_undefined_nonterminal_file() {
        let example_path = PathBuf::from("example_data/undefined.bnf");
        let example_parsed = parse_file(&example_path).unwrap_err();

        assert_eq!(example_parsed, vec![
            ParseError {
                location: Location {
                    file: example_path,
                    line: 1
                },
                error: ParseErrorType::UndefinedNonterminal("oops".to_string())
            }
        ]);
    }
}
