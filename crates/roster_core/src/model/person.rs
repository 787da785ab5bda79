//! Person domain model.
//!
//! # Responsibility
//! - Define the canonical identity record (full name, birth date, gender).
//! - Provide the validation shared by every repository write path.
//!
//! # Invariants
//! - `id` is assigned by the record store exactly once and never reused.
//! - `full_name` is non-blank and at most 900 characters.
//! - `gender` persists as its canonical string form (`Male` / `Female`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Surrogate key assigned by the record store on insert.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PersonId = i64;

/// Maximum accepted `full_name` length in characters.
pub const MAX_FULL_NAME_CHARS: usize = 900;

/// Accepted text formats for birth date input, tried in order.
const BIRTH_DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y"];

/// Validation failure for person field constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    /// `full_name` is empty or whitespace-only.
    EmptyFullName,
    /// `full_name` exceeds [`MAX_FULL_NAME_CHARS`].
    FullNameTooLong { length: usize },
    /// Birth date text matched none of the accepted formats.
    InvalidBirthDate { value: String },
    /// Gender text is not one of the canonical forms.
    InvalidGender { value: String },
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFullName => write!(f, "full name must not be empty"),
            Self::FullNameTooLong { length } => write!(
                f,
                "full name is {length} characters long, limit is {MAX_FULL_NAME_CHARS}"
            ),
            Self::InvalidBirthDate { value } => {
                write!(f, "`{value}` is not a valid birth date")
            }
            Self::InvalidGender { value } => {
                write!(f, "`{value}` is not a valid gender, expected Male|Female")
            }
        }
    }
}

impl Error for PersonValidationError {}

/// Closed gender set, persisted in its canonical string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Canonical string form used in storage and presentation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    /// Parses the canonical string form. Case-sensitive.
    pub fn parse(value: &str) -> Result<Self, PersonValidationError> {
        match value {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            other => Err(PersonValidationError::InvalidGender {
                value: other.to_string(),
            }),
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unsaved identity record. The store assigns the surrogate id; no caller
/// ever constructs or predicts one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub full_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
}

impl NewPerson {
    /// Creates an unsaved record. Field constraints are checked by
    /// [`NewPerson::validate`] on every write path.
    pub fn new(full_name: impl Into<String>, gender: Gender, birth_date: NaiveDate) -> Self {
        Self {
            full_name: full_name.into(),
            gender,
            birth_date,
        }
    }

    /// Builds a record from untyped text input, as received from a CLI or
    /// import path. All three fields are validated.
    pub fn parse(
        full_name: &str,
        birth_date: &str,
        gender: &str,
    ) -> Result<Self, PersonValidationError> {
        let person = Self::new(
            full_name,
            Gender::parse(gender)?,
            parse_birth_date(birth_date)?,
        );
        person.validate()?;
        Ok(person)
    }

    /// Checks field constraints shared by every write path.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(PersonValidationError::EmptyFullName);
        }
        let length = self.full_name.chars().count();
        if length > MAX_FULL_NAME_CHARS {
            return Err(PersonValidationError::FullNameTooLong { length });
        }
        Ok(())
    }
}

/// Stored identity record as returned by the store. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Surrogate key owned by the record store.
    pub id: PersonId,
    pub full_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
}

impl Person {
    /// Returns the equivalence key used for deduplication.
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            full_name: self.full_name.clone(),
            birth_date: self.birth_date,
            gender: self.gender,
        }
    }
}

/// Exact (full name, birth date, gender) triple deciding record equivalence.
///
/// The derived ordering compares `full_name` first, byte-wise, so iterating
/// keys in order yields full-name-ascending output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct IdentityKey {
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
}

/// Parses a birth date from accepted text input formats.
///
/// Accepts ISO `YYYY-MM-DD` and `DD.MM.YYYY`. Impossible calendar dates are
/// rejected, not clamped.
pub fn parse_birth_date(value: &str) -> Result<NaiveDate, PersonValidationError> {
    for format in BIRTH_DATE_INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }
    Err(PersonValidationError::InvalidBirthDate {
        value: value.to_string(),
    })
}
