//! Shared domain model for annotation entities.
//!
//! # Responsibility
//! - Define the value types exchanged between handles and backends.
//! - Keep rendering of enum values canonical across the crate.
//!
//! # Invariants
//! - Every entity is identified by a stable string id minted by the backend.
//! - Enum wire names match their canonical textual rendering.

pub mod link_type;
