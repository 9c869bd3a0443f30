use itertools::{Itertools, PeekingNext};

use super::{ParseErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Equals,
    Or,
    Nonterminal(String),
    Terminal(String),
}

// Consumes a quoted terminal, open quote included. The close quote must
// sit on the same line.
fn lex_terminal(line: &mut (impl PeekingNext<Item = char>)) -> Result<Token> {
    line.next();
    let text = line.peeking_take_while(|&c| c != '"').collect();

    match line.next() {
        Some('"') => Ok(Token::Terminal(text)),
        _ => Err(ParseErrorType::UnmatchedQuote),
    }
}

// Consumes a bare nonterminal name. Stops before the next delimiter, so
// `A=B|C` lexes the same as `A = B | C`.
fn lex_nonterminal(line: &mut (impl PeekingNext<Item = char>)) -> Token {
    let name = line
        .peeking_take_while(|&c| !c.is_whitespace() && !"=|\"".contains(c))
        .collect();
    Token::Nonterminal(name)
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut chars = line.chars().peekable();
    let mut tokens = Vec::new();

    while let Some(&c) = chars.peek() {
        match c {
            '=' => {
                chars.next();
                tokens.push(Token::Equals);
            }
            '|' => {
                chars.next();
                tokens.push(Token::Or);
            }
            '"' => tokens.push(lex_terminal(&mut chars)?),
            c if c.is_whitespace() => {
                chars.next();
            }
            _ => tokens.push(lex_nonterminal(&mut chars)),
        }
    }

    Ok(tokens)
}
