//! practica-audit
//!
//! Application-level audit trail for changes to clinical records. Events
//! go out through `tracing` and land next to the request logs.

pub mod events;

pub use events::{ANONYMOUS_ACTOR, AuditAction, AuditEvent, ResourceType};
