use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cards::scryfallcard::{CardIdentifier, ScryfallCard};

#[derive(Debug)]
pub enum LookupError {
    Request(reqwest::Error),
    Status(u16),
    Malformed(serde_json::Error),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LookupError::Request(e) => write!(f, "card lookup request failed: {}", e),
            LookupError::Status(code) => write!(f, "card lookup answered with status {}", code),
            LookupError::Malformed(e) => write!(f, "card lookup response was malformed: {}", e),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::Request(e) => Some(e),
            LookupError::Status(_) => None,
            LookupError::Malformed(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Request(err)
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Malformed(err)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NameMatch {
    Exact,
    Fuzzy,
}

/// A single-card request: one name, optionally pinned to a set.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NamedQuery {
    pub name: String,
    pub set: Option<String>,
    pub mode: NameMatch,
}

impl NamedQuery {
    pub fn exact(name: &str) -> Self {
        NamedQuery {
            name: name.to_string(),
            set: None,
            mode: NameMatch::Exact,
        }
    }

    pub fn fuzzy(name: &str, set: Option<&str>) -> Self {
        NamedQuery {
            name: name.to_string(),
            set: set.map(str::to_string),
            mode: NameMatch::Fuzzy,
        }
    }
}

/// Answer to a collection request. `data` holds the matched cards in request
/// order with the unmatched ones left out, not padded.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct CollectionResponse {
    #[serde(default)]
    pub data: Vec<ScryfallCard>,
    #[serde(default)]
    pub not_found: Vec<CardIdentifier>,
}

impl CollectionResponse {
    /// Appends the next chunk of a split request, keeping request order.
    pub fn extend(&mut self, next: CollectionResponse) {
        self.data.extend(next.data);
        self.not_found.extend(next.not_found);
    }
}

/// The card database the resolver talks to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardLookup: Send + Sync {
    async fn find_named(&self, query: &NamedQuery) -> Result<Option<ScryfallCard>, LookupError>;

    async fn find_collection(&self, names: &[String]) -> Result<CollectionResponse, LookupError>;
}
