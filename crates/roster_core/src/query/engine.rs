//! Prefix-and-gender lookups over stored records.
//!
//! # Responsibility
//! - Filter records by case-sensitive full-name prefix and exact gender.
//! - Produce identical result sets with or without secondary indexes.
//!
//! # Invariants
//! - Prefix matching is byte-wise; no locale folding or case normalization.
//! - Query paths never create or assume secondary indexes.

use crate::db::DbError;
use crate::model::person::{Gender, Person};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type QueryResult<T> = Result<T, QueryError>;

/// Query-layer error for DB interaction and result decoding.
#[derive(Debug)]
pub enum QueryError {
    Db(DbError),
    InvalidData(String),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid query row: {message}"),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for QueryError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for QueryError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Filter for [`find_people`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixQuery {
    /// Case-sensitive full-name prefix; empty matches every name.
    pub name_prefix: String,
    pub gender: Gender,
}

impl PrefixQuery {
    pub fn new(name_prefix: impl Into<String>, gender: Gender) -> Self {
        Self {
            name_prefix: name_prefix.into(),
            gender,
        }
    }
}

/// Returns every record whose full name starts with the prefix and whose
/// gender matches, in store-defined order.
///
/// The prefix is rewritten as a half-open range under SQLite's BINARY
/// collation, so the same SQL is served by the `full_name` index when one
/// exists and by a table scan otherwise, with identical results.
pub fn find_people(conn: &Connection, query: &PrefixQuery) -> QueryResult<Vec<Person>> {
    let mut sql = String::from(
        "SELECT id, full_name, gender, birth_date
         FROM persons
         WHERE gender = ? AND full_name >= ?",
    );
    let mut bind_values: Vec<Value> = vec![
        Value::Text(query.gender.as_str().to_string()),
        Value::Text(query.name_prefix.clone()),
    ];

    if let Some(upper) = prefix_upper_bound(&query.name_prefix) {
        sql.push_str(" AND full_name < ?");
        bind_values.push(Value::Text(upper));
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut people = Vec::new();

    while let Some(row) = rows.next()? {
        people.push(parse_person_row(row)?);
    }

    Ok(people)
}

/// Smallest string strictly greater than every string carrying the prefix.
///
/// `None` for the empty prefix and for prefixes consisting only of
/// `char::MAX`, where no upper bound exists and the range stays open.
fn prefix_upper_bound(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    while let Some(last) = chars.pop() {
        if let Some(next) = next_scalar(last) {
            chars.push(next);
            return Some(chars.into_iter().collect());
        }
    }
    None
}

fn next_scalar(value: char) -> Option<char> {
    let mut code = u32::from(value) + 1;
    // Unicode scalar values skip the surrogate block.
    if (0xD800..=0xDFFF).contains(&code) {
        code = 0xE000;
    }
    char::from_u32(code)
}

fn parse_person_row(row: &Row<'_>) -> QueryResult<Person> {
    let gender_text: String = row.get("gender")?;
    let gender = Gender::parse(&gender_text)
        .map_err(|_| QueryError::InvalidData(format!("invalid gender `{gender_text}`")))?;

    let date_text: String = row.get("birth_date")?;
    let birth_date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d")
        .map_err(|_| QueryError::InvalidData(format!("invalid birth date `{date_text}`")))?;

    Ok(Person {
        id: row.get("id")?,
        full_name: row.get("full_name")?,
        gender,
        birth_date,
    })
}
