pub mod cli;
pub mod error_handling;
pub mod grammar;
pub mod normalizer;
pub mod parser;
pub mod recognizer;
