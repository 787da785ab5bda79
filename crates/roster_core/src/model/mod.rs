//! Identity record domain model.
//!
//! # Responsibility
//! - Define the canonical person record used by core business logic.
//! - Validate field constraints before any persistence is attempted.
//!
//! # Invariants
//! - `Gender` is a closed set; free-form gender text never crosses this
//!   boundary unvalidated.
//! - Record equivalence is decided by the (full name, birth date, gender)
//!   identity key and nothing else.

pub mod person;
