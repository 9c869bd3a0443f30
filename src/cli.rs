use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// Input string to recognize, one character per terminal
    pub input: Option<String>,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Print the grammar after normalization to Chomsky Normal Form
    #[arg(long)]
    pub print_cnf: bool,
}
