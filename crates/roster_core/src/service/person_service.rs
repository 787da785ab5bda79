//! Person use-case service.
//!
//! # Responsibility
//! - Provide stable store/read entry points for core callers.
//! - Compose the deduplicator with repository scans.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.

use crate::dedupe::dedupe_people;
use crate::model::person::{NewPerson, Person, PersonId};
use crate::repo::person_repo::{PersonRepository, RepoResult};

/// Use-case wrapper around a person repository.
pub struct PersonService<R: PersonRepository> {
    repo: R,
}

impl<R: PersonRepository> PersonService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts one record through repository validation and persistence.
    pub fn insert(&self, person: &NewPerson) -> RepoResult<PersonId> {
        self.repo.insert(person)
    }

    /// Inserts a batch of records as one unit of work.
    pub fn insert_batch<I>(&self, people: I) -> RepoResult<Vec<PersonId>>
    where
        I: IntoIterator<Item = NewPerson>,
    {
        self.repo.insert_batch(people)
    }

    /// Returns every stored record in store-defined order.
    pub fn scan_all(&self) -> RepoResult<Vec<Person>> {
        self.repo.scan_all()
    }

    /// Returns the number of stored records.
    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count()
    }

    /// Returns one representative per identity key, ordered by full name.
    pub fn unique_people(&self) -> RepoResult<Vec<Person>> {
        Ok(dedupe_people(self.repo.scan_all()?))
    }
}
