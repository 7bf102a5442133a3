//! Helpers shared by composite stores.
//!
//! Composite listings fetch the complete result of each store, merge and
//! de-duplicate by identifier, and paginate the merged sequence. The reads
//! against the two stores are independent: a write racing a composite read
//! may be observed in one store's count but not in its listing. That weak
//! consistency is accepted; nothing here takes locks.

use std::collections::HashSet;

use crate::error::ResultLimitExceeded;

/// Ceiling on the merged candidate set of a composite listing.
pub const DEFAULT_MAX_COMPOSITE_RECORDS: u64 = 1000;

/// Fail when a composite listing would materialize more than `ceiling` records.
///
/// # Errors
/// Returns [`ResultLimitExceeded`] when `candidates > ceiling`.
pub fn ensure_within_ceiling(candidates: u64, ceiling: u64) -> Result<(), ResultLimitExceeded> {
    if candidates > ceiling {
        return Err(ResultLimitExceeded {
            ceiling,
            candidates,
        });
    }
    Ok(())
}

/// Concatenate `primary` and `secondary`, keeping only the first occurrence of
/// every identifier. Items of `primary` therefore win on collision.
pub fn merge_by_id<T, F>(primary: Vec<T>, secondary: Vec<T>, id: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen: HashSet<String> = HashSet::with_capacity(primary.len() + secondary.len());
    let mut merged = Vec::with_capacity(primary.len() + secondary.len());

    for item in primary.into_iter().chain(secondary) {
        if seen.insert(id(&item).to_owned()) {
            merged.push(item);
        }
    }

    merged
}

/// Apply `limit`/`offset` to an already materialized sequence.
#[must_use]
pub fn paginate<T>(items: Vec<T>, limit: u64, offset: u64) -> Vec<T> {
    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    items.into_iter().skip(offset).take(limit).collect()
}
