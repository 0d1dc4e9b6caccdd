//! parsley-bot - a chat bot that answers its trigger phrase with the
//! least-told joke from a SQLite store.

pub mod domain;
pub mod application;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod testing;
