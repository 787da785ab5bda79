//! Core domain logic for the roster identity record store.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod dedupe;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod timing;

pub use dedupe::dedupe_people;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::person::{
    parse_birth_date, Gender, IdentityKey, NewPerson, Person, PersonId, PersonValidationError,
};
pub use query::engine::{find_people, PrefixQuery, QueryError, QueryResult};
pub use query::indexes::{create_indexes, IndexOutcome};
pub use repo::person_repo::{PersonRepository, RepoError, RepoResult, SqlitePersonRepository};
pub use service::person_service::PersonService;
pub use timing::timed;
