pub mod ast;
mod error;
mod lexer;
mod parser;

pub use parser::Parser;
