//! Email delivery implementations

pub mod smtp;
