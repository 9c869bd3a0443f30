use clap::Parser;

use chomsky::cli::Cli;
use chomsky::{normalizer, parser, recognizer};

fn main() {
    let cli = Cli::parse();

    let mut grammar = match parser::parse_file(&cli.file) {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            std::process::exit(2);
        }
    };

    if let Some(start) = cli.start {
        grammar.start_symbol = start;
    }

    let cnf = match normalizer::normalize(&grammar) {
        Ok(cnf) => cnf,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(2);
        }
    };

    if cli.print_cnf {
        print!("{}", cnf);
    }

    let Some(input) = cli.input else {
        return;
    };
    let terminals: Vec<String> = input.chars().map(String::from).collect();

    match recognizer::recognize(&cnf, &terminals) {
        Ok(true) => println!("accepted"),
        Ok(false) => {
            println!("rejected");
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(2);
        }
    }
}
