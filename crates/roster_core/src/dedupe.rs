//! Identity-key deduplication over scanned records.
//!
//! # Responsibility
//! - Collapse records sharing one identity key into a single representative.
//! - Emit representatives ordered by full name, ascending and byte-wise.
//!
//! # Invariants
//! - Operates on the snapshot passed in; the store is never consulted.
//! - Runs in O(n log n) over the number of input records.

use crate::model::person::{IdentityKey, Person};
use std::collections::BTreeMap;

/// Collapses attribute-identical records and sorts survivors by full name.
///
/// The first record seen for a key becomes the representative; records
/// within a group differ only in their surrogate id. Keys compare full name
/// first, so draining the map yields the required ordering without a second
/// sort pass.
pub fn dedupe_people(people: Vec<Person>) -> Vec<Person> {
    let mut unique: BTreeMap<IdentityKey, Person> = BTreeMap::new();
    for person in people {
        unique.entry(person.identity_key()).or_insert(person);
    }
    unique.into_values().collect()
}
