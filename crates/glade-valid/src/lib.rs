//! Validation rules for felling-licence bulk-import batches.
//!
//! The engine is a pure function: it takes the source collections and a
//! read-only reference snapshot and returns an ordered report of every
//! business-rule violation. It performs no I/O and never halts early.

pub mod rules;
pub mod validator;

pub use validator::validate;
