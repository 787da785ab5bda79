//! Use-case service layer.
//!
//! # Responsibility
//! - Provide stable entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

pub mod person_service;
