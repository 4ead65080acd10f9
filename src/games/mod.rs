//! Game implementations.

pub mod wordle;
