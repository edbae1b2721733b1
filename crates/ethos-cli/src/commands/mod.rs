//! Command implementations.

mod advise;
mod parse;
mod retrieve;
mod seed;

pub use advise::execute_advise;
pub use parse::execute_parse;
pub use retrieve::execute_retrieve;
pub use seed::execute_seed;
