use std::collections::{HashMap, HashSet};
use std::fmt;

use log::{debug, info};
use serde::Serialize;

use crate::cards::card_record::{CardError, CardRecord};
use crate::lookup::{CardLookup, CollectionResponse, LookupError};

#[derive(Debug)]
pub enum ResolveError {
    Lookup(LookupError),
    Card(CardError),
    /// The collection answer has a different number of cards than the
    /// request minus its `not_found` names.
    Misaligned { expected: usize, received: usize },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResolveError::Lookup(e) => write!(f, "{}", e),
            ResolveError::Card(e) => write!(f, "{}", e),
            ResolveError::Misaligned { expected, received } => write!(
                f,
                "collection response holds {} cards, expected {}",
                received, expected
            ),
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::Lookup(e) => Some(e),
            ResolveError::Card(e) => Some(e),
            ResolveError::Misaligned { .. } => None,
        }
    }
}

impl From<LookupError> for ResolveError {
    fn from(err: LookupError) -> Self {
        ResolveError::Lookup(err)
    }
}

impl From<CardError> for ResolveError {
    fn from(err: CardError) -> Self {
        ResolveError::Card(err)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize)]
pub struct BatchResult {
    pub found: HashMap<String, CardRecord>,
    #[serde(rename = "notFound")]
    pub not_found: Vec<String>,
}

/// Distinct names in first-occurrence order. Names are compared exactly, so
/// `Opt` and `opt` are both kept.
pub fn dedupe_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Lines a collection answer back up with the names that were asked for.
///
/// `data` skips every name listed in `not_found`, so the card for the name at
/// position `i` sits at `i - offset`, where `offset` counts the unmatched
/// names before it.
pub fn reconcile(
    names: &[String],
    response: &CollectionResponse,
) -> Result<BatchResult, ResolveError> {
    let unmatched: HashSet<&str> = response
        .not_found
        .iter()
        .filter_map(|identifier| identifier.name.as_deref())
        .collect();

    let (offset, result) = names.iter().enumerate().try_fold(
        (0usize, BatchResult::default()),
        |(offset, mut result), (index, name)| -> Result<(usize, BatchResult), ResolveError> {
            if unmatched.contains(name.as_str()) {
                result.not_found.push(name.clone());
                return Ok((offset + 1, result));
            }
            let payload = response.data.get(index - offset).ok_or_else(|| {
                ResolveError::Misaligned {
                    expected: names.len() - unmatched_count(names, &unmatched),
                    received: response.data.len(),
                }
            })?;
            let card = CardRecord::try_from(payload.clone())?;
            result.found.insert(name.clone(), card);
            Ok((offset, result))
        },
    )?;

    let expected = names.len() - offset;
    if response.data.len() != expected {
        return Err(ResolveError::Misaligned {
            expected,
            received: response.data.len(),
        });
    }

    Ok(result)
}

fn unmatched_count(names: &[String], unmatched: &HashSet<&str>) -> usize {
    names
        .iter()
        .filter(|name| unmatched.contains(name.as_str()))
        .count()
}

/// Resolves every distinct name with a single collection lookup.
pub async fn resolve_names<L>(lookup: &L, names: &[String]) -> Result<BatchResult, ResolveError>
where
    L: CardLookup + ?Sized,
{
    let unique = dedupe_names(names);
    if unique.is_empty() {
        debug!("No names to resolve, skipping lookup");
        return Ok(BatchResult::default());
    }

    let response = lookup.find_collection(&unique).await?;
    let result = reconcile(&unique, &response)?;
    info!(
        "Resolved {} of {} names, {} not found",
        result.found.len(),
        unique.len(),
        result.not_found.len()
    );
    Ok(result)
}
