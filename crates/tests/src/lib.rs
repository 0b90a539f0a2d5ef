//! End-to-end tests.

#![cfg(test)]
#![allow(clippy::disallowed_methods, clippy::needless_raw_string_hashes)]

mod chain;
mod check;
mod eval;
mod init;
mod pipeline;
mod semantics;
