//! practica-core
//!
//! Pure domain types and object key conventions.
//! No AWS SDK dependency. This is the shared vocabulary of the Practica system.

pub mod error;
pub mod keys;
pub mod models;
