//! Azalea Tools - Developer utilities for azalea lexers
//!
//! Rendering of token streams and automata for the `azalea` binary.

pub mod cli;
pub mod tokens;
pub mod visualize;

pub use visualize::*;
