//! practica-storage
//!
//! Object storage behind a small async trait. `S3Store` wraps the AWS S3
//! SDK for deployed environments; `MemoryStore` backs local runs and tests.
//! `records` layers JSON (de)serialization on top of either.

pub mod client;
pub mod error;
pub mod memory;
pub mod records;
pub mod s3;
pub mod store;

pub use memory::MemoryStore;
pub use s3::S3Store;
pub use store::{BoxFuture, ObjectStore, StoredObject};
