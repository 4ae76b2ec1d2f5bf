//! Core storage primitive (dense row-major Matrix).
//!
//! Feature tables, codebooks and confusion matrices are all stored as a
//! [`Matrix`]; one row per sample.

mod matrix;

pub use matrix::Matrix;
