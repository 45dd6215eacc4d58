//! airnet CLI library.
//!
//! This crate provides the output formatting used by the `airnet-cli`
//! binary so it can be unit tested independently of argument parsing.

pub mod output;
