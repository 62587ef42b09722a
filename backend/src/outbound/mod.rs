//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: in-process store interpreting the aggregation DSL, used by
//!   tests and when no database is configured
//! - **mongodb**: MongoDB-backed store using the official driver
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod mongodb;
