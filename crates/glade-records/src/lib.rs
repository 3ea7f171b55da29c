//! Source record types, reference data, and lookup structures for the
//! felling-licence bulk-import validation engine.

pub mod linkage;
pub mod reference;
pub mod species;
pub mod types;
