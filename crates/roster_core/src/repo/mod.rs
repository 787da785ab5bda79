//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record-store contract for identity records.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `NewPerson::validate()` before
//!   persistence.
//! - A batch is one unit of work: it commits fully or not at all.

pub mod person_repo;
