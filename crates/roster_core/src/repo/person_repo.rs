//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/scan APIs over canonical `persons` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `NewPerson::validate()` before SQL mutations.
//! - Surrogate ids are assigned here and nowhere else.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::person::{Gender, NewPerson, Person, PersonId, PersonValidationError};
use chrono::NaiveDate;
use log::info;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const PERSON_SELECT_SQL: &str = "SELECT id, full_name, gender, birth_date FROM persons";
const PERSON_INSERT_SQL: &str =
    "INSERT INTO persons (full_name, gender, birth_date) VALUES (?1, ?2, ?3);";
const PERSONS_TABLE: &str = "persons";
const REQUIRED_COLUMNS: &[&str] = &["id", "full_name", "gender", "birth_date"];
const BIRTH_DATE_DB_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for person persistence and scan operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(PersonValidationError),
    Db(DbError),
    InvalidData(String),
    /// The connection has no applied schema at all.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted person data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection has schema version {actual_version}, expected {expected_version}; \
                 open it through db::open_db first"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PersonValidationError> for RepoError {
    fn from(value: PersonValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record-store contract for identity records.
pub trait PersonRepository {
    /// Persists one record and returns its fresh surrogate id.
    fn insert(&self, person: &NewPerson) -> RepoResult<PersonId>;

    /// Persists a set of records as one unit of work.
    ///
    /// The iterator is drained record by record, so arbitrarily large batches
    /// stream through without being materialized by the store. Any invalid
    /// record aborts and rolls back the whole batch.
    fn insert_batch<I>(&self, people: I) -> RepoResult<Vec<PersonId>>
    where
        I: IntoIterator<Item = NewPerson>;

    /// Produces every stored record in store-defined order.
    ///
    /// The order is not guaranteed stable across calls once writes happen in
    /// between.
    fn scan_all(&self) -> RepoResult<Vec<Person>>;

    /// Returns the number of stored records.
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    /// Wraps a connection after checking that the persons schema is usable.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn insert(&self, person: &NewPerson) -> RepoResult<PersonId> {
        person.validate()?;

        self.conn.execute(
            PERSON_INSERT_SQL,
            params![
                person.full_name.as_str(),
                person.gender.as_str(),
                birth_date_to_db(person.birth_date),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn insert_batch<I>(&self, people: I) -> RepoResult<Vec<PersonId>>
    where
        I: IntoIterator<Item = NewPerson>,
    {
        let started_at = Instant::now();
        // The repository never nests transactions, so the unchecked variant
        // is sound on a shared connection reference.
        let tx = self.conn.unchecked_transaction()?;
        let mut ids = Vec::new();

        {
            let mut stmt = tx.prepare(PERSON_INSERT_SQL)?;
            for person in people {
                // An early return drops `tx` uncommitted, rolling back every
                // row inserted so far.
                person.validate()?;
                stmt.execute(params![
                    person.full_name.as_str(),
                    person.gender.as_str(),
                    birth_date_to_db(person.birth_date),
                ])?;
                ids.push(tx.last_insert_rowid());
            }
        }

        tx.commit()?;
        info!(
            "event=insert_batch module=repo status=ok count={} duration_ms={}",
            ids.len(),
            started_at.elapsed().as_millis()
        );
        Ok(ids)
    }

    fn scan_all(&self) -> RepoResult<Vec<Person>> {
        let mut stmt = self.conn.prepare(&format!("{PERSON_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut people = Vec::new();

        while let Some(row) = rows.next()? {
            people.push(parse_person_row(row)?);
        }

        Ok(people)
    }

    fn count(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM persons;", [], |row| {
                row.get::<_, u64>(0)
            })?;
        Ok(count)
    }
}

fn ensure_schema_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let expected_version = latest_version();

    if actual_version == 0 {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, PERSONS_TABLE)? {
        return Err(RepoError::MissingRequiredTable(PERSONS_TABLE));
    }

    let columns = table_columns(conn, PERSONS_TABLE)?;
    for required in REQUIRED_COLUMNS.iter().copied() {
        if !columns.iter().any(|column| column.as_str() == required) {
            return Err(RepoError::MissingRequiredColumn {
                table: PERSONS_TABLE,
                column: required,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table_name: &str) -> RepoResult<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(exists)
}

fn table_columns(conn: &Connection, table_name: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let mut rows = stmt.query([table_name])?;
    let mut columns = Vec::new();

    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(0)?);
    }

    Ok(columns)
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let gender_text: String = row.get("gender")?;
    let gender = Gender::parse(&gender_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid gender value `{gender_text}` in persons.gender"))
    })?;

    let date_text: String = row.get("birth_date")?;
    let birth_date = parse_db_birth_date(&date_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid birth date `{date_text}` in persons.birth_date"
        ))
    })?;

    Ok(Person {
        id: row.get("id")?,
        full_name: row.get("full_name")?,
        gender,
        birth_date,
    })
}

fn birth_date_to_db(date: NaiveDate) -> String {
    date.format(BIRTH_DATE_DB_FORMAT).to_string()
}

fn parse_db_birth_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, BIRTH_DATE_DB_FORMAT).ok()
}
