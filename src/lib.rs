//! Root crate facade for codetint.

pub use codetint_cli as cli;
pub use codetint_core::*;
