/*
 * command line input
 */
pub mod args;
pub mod color;
pub mod velocity;

pub use args::{parse, parse_tokens, tokenize, Command, Options, USAGE};
pub use color::Color;
pub use velocity::Velocity;
