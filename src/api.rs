use std::fmt;

use log::{debug, info};
use serde::Deserialize;

use crate::batch_resolver::{resolve_names, ResolveError};
use crate::cards::card_record::CardRecord;
use crate::lookup::{CardLookup, LookupError, NamedQuery};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(serde_json::Error),
    Resolve(ResolveError),
    Lookup(LookupError),
    /// Our own response could not be serialised.
    Encode(serde_json::Error),
}

impl ApiError {
    /// HTTP status a request handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Resolve(_) | ApiError::Lookup(_) => 502,
            ApiError::Encode(_) => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::BadRequest(e) => write!(f, "bad request: {}", e),
            ApiError::Resolve(e) => write!(f, "could not resolve cards: {}", e),
            ApiError::Lookup(e) => write!(f, "could not look up card: {}", e),
            ApiError::Encode(e) => write!(f, "could not encode response: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::BadRequest(e) => Some(e),
            ApiError::Resolve(e) => Some(e),
            ApiError::Lookup(e) => Some(e),
            ApiError::Encode(e) => Some(e),
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        ApiError::Resolve(err)
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        ApiError::Lookup(err)
    }
}

#[derive(Debug, Deserialize)]
struct MultiCardRequest {
    names: Vec<String>,
}

/// Exact-name lookup. Answers with the card JSON, or an empty body when no
/// card has that name.
pub async fn single_card_query<L>(lookup: &L, name: &str) -> Result<String, ApiError>
where
    L: CardLookup + ?Sized,
{
    let payload = match lookup.find_named(&NamedQuery::exact(name)).await? {
        Some(payload) => payload,
        None => {
            debug!("Single card query for '{}' found nothing", name);
            return Ok(String::new());
        }
    };
    let card = CardRecord::try_from(payload).map_err(ResolveError::from)?;
    serde_json::to_string(&card).map_err(ApiError::Encode)
}

/// Takes `{"names": [...]}` and answers with `{"found": {...}, "notFound": [...]}`.
pub async fn multi_card_query<L>(lookup: &L, body: &str) -> Result<String, ApiError>
where
    L: CardLookup + ?Sized,
{
    let request: MultiCardRequest = serde_json::from_str(body).map_err(ApiError::BadRequest)?;
    info!("Multi card query for {} names", request.names.len());
    let result = resolve_names(lookup, &request.names).await?;
    serde_json::to_string(&result).map_err(ApiError::Encode)
}
