//! Store configuration implementations

pub mod json;
