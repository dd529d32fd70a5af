#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Test mail library: a mail message builder, the mail and configuration
//! ports it depends on, and the admin HTTP endpoint that sends a test message.

pub mod domain;
pub mod infrastructure;
