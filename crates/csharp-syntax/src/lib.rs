//! Concrete syntax for the C# subset we rewrite.

#![allow(missing_docs)]

#[allow(clippy::must_use_candidate)]
pub mod ast;
pub mod kind;
