//! earmark-core
//!
//! Pure domain types for hearing-test records: ears, audiometric
//! frequencies, hearing levels and threshold sets. No I/O; this is the
//! shared vocabulary of the Earmark crates and the frontend.

pub mod error;
pub mod models;
