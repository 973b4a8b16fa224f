use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::{info, warn};

use super::line_parser::{parse_decklist, DecklistLineRequest, LineParseError, RejectedLine};
use crate::batch_resolver::{resolve_names, ResolveError};
use crate::cards::card_record::CardRecord;
use crate::lookup::CardLookup;

/// What to do with a line that breaks the decklist grammar.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParseMode {
    Skip,
    Abort,
}

impl ParseMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ParseMode::Abort
        } else {
            ParseMode::Skip
        }
    }
}

#[derive(Debug)]
pub enum DeckError {
    Parse {
        line_number: usize,
        line: String,
        error: LineParseError,
    },
    Resolve(ResolveError),
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeckError::Parse {
                line_number,
                line,
                error,
            } => write!(f, "decklist line {} '{}': {}", line_number, line, error),
            DeckError::Resolve(e) => write!(f, "could not resolve decklist: {}", e),
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeckError::Parse { error, .. } => Some(error),
            DeckError::Resolve(e) => Some(e),
        }
    }
}

impl From<ResolveError> for DeckError {
    fn from(err: ResolveError) -> Self {
        DeckError::Resolve(err)
    }
}

impl From<RejectedLine> for DeckError {
    fn from(rejected: RejectedLine) -> Self {
        DeckError::Parse {
            line_number: rejected.line_number,
            line: rejected.line,
            error: rejected.error,
        }
    }
}

/// One printed proxy.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DeckSlot {
    Resolved {
        request: DecklistLineRequest,
        card: Arc<CardRecord>,
    },
    NotFound {
        request: DecklistLineRequest,
    },
}

impl DeckSlot {
    pub fn request(&self) -> &DecklistLineRequest {
        match self {
            DeckSlot::Resolved { request, .. } | DeckSlot::NotFound { request } => request,
        }
    }

    pub fn card(&self) -> Option<&CardRecord> {
        match self {
            DeckSlot::Resolved { card, .. } => Some(card.as_ref()),
            DeckSlot::NotFound { .. } => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Deck {
    slots: Vec<DeckSlot>,
    rejected: Vec<RejectedLine>,
    not_found: Vec<String>,
}

impl Deck {
    /// Parses the decklist, resolves every distinct name in one batch and
    /// expands each line into `quantity` slots, keeping line order.
    pub async fn build<L>(decklist: &str, lookup: &L, mode: ParseMode) -> Result<Deck, DeckError>
    where
        L: CardLookup + ?Sized,
    {
        let parsed = parse_decklist(decklist);

        if mode == ParseMode::Abort {
            if let Some(rejected) = parsed.rejected.into_iter().next() {
                return Err(rejected.into());
            }
            return Self::resolve(parsed.requests, Vec::new(), lookup).await;
        }

        for rejected in &parsed.rejected {
            warn!(
                "Skipping decklist line {} '{}': {}",
                rejected.line_number, rejected.line, rejected.error
            );
        }
        Self::resolve(parsed.requests, parsed.rejected, lookup).await
    }

    async fn resolve<L>(
        requests: Vec<DecklistLineRequest>,
        rejected: Vec<RejectedLine>,
        lookup: &L,
    ) -> Result<Deck, DeckError>
    where
        L: CardLookup + ?Sized,
    {
        let names: Vec<String> = requests.iter().map(|request| request.name.clone()).collect();
        let result = resolve_names(lookup, &names).await?;

        let cards: HashMap<String, Arc<CardRecord>> = result
            .found
            .into_iter()
            .map(|(name, card)| (name, Arc::new(card)))
            .collect();

        let slots: Vec<DeckSlot> = requests
            .into_iter()
            .flat_map(|request| expand(request, &cards))
            .collect();

        info!(
            "Deck has {} slots from {} lines, {} names not found",
            slots.len(),
            names.len(),
            result.not_found.len()
        );

        Ok(Deck {
            slots,
            rejected,
            not_found: result.not_found,
        })
    }

    pub fn slots(&self) -> &[DeckSlot] {
        &self.slots
    }

    /// Lines skipped under `ParseMode::Skip`.
    pub fn rejected(&self) -> &[RejectedLine] {
        &self.rejected
    }

    pub fn not_found(&self) -> &[String] {
        &self.not_found
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn expand(request: DecklistLineRequest, cards: &HashMap<String, Arc<CardRecord>>) -> Vec<DeckSlot> {
    let copies = request.quantity as usize;
    match cards.get(&request.name) {
        Some(card) => (0..copies)
            .map(|_| DeckSlot::Resolved {
                request: request.clone(),
                card: Arc::clone(card),
            })
            .collect(),
        None => (0..copies)
            .map(|_| DeckSlot::NotFound {
                request: request.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{LookupError, MockCardLookup};
    use crate::test::helpers::{collection_of, kukemssa_pirates_payload, lightning_bolt_payload};

    fn bolt_and_pirates_lookup() -> MockCardLookup {
        let mut lookup = MockCardLookup::new();
        lookup
            .expect_find_collection()
            .withf(|names| {
                names.to_vec()
                    == vec![
                        "Lightning Bolt".to_string(),
                        "Shockk".to_string(),
                        "Kukemssa Pirates".to_string(),
                    ]
            })
            .times(1)
            .returning(|_| {
                Ok(collection_of(
                    vec![lightning_bolt_payload(), kukemssa_pirates_payload()],
                    &["Shockk"],
                ))
            });
        lookup
    }

    fn slot_names(deck: &Deck) -> Vec<String> {
        deck.slots()
            .iter()
            .map(|slot| match slot {
                DeckSlot::Resolved { card, .. } => card.name().to_string(),
                DeckSlot::NotFound { request } => format!("missing {}", request.name),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_build_expands_quantities_in_line_order() {
        let _ = env_logger::builder().is_test(true).try_init();
        let lookup = bolt_and_pirates_lookup();
        let decklist = "2 Lightning Bolt\n// sideboard\nShockk\n\n[MIR#71] Kukemssa Pirates\n1 Lightning Bolt";

        let deck = Deck::build(decklist, &lookup, ParseMode::Skip).await.unwrap();

        assert_eq!(
            slot_names(&deck),
            vec![
                "Lightning Bolt",
                "Lightning Bolt",
                "missing Shockk",
                "Kukemssa Pirates",
                "Lightning Bolt"
            ]
        );
        assert_eq!(deck.not_found(), &["Shockk".to_string()]);
        assert_eq!(deck.len(), 5);
        assert_eq!(
            deck.slots()[3].request().set_code.as_deref(),
            Some("MIR")
        );
    }

    #[tokio::test]
    async fn test_copies_share_one_card() {
        let lookup = bolt_and_pirates_lookup();
        let deck = Deck::build(
            "3 Lightning Bolt\nShockk\nKukemssa Pirates",
            &lookup,
            ParseMode::Skip,
        )
        .await
        .unwrap();

        match (&deck.slots()[0], &deck.slots()[2]) {
            (DeckSlot::Resolved { card: first, .. }, DeckSlot::Resolved { card: third, .. }) => {
                assert!(Arc::ptr_eq(first, third));
            }
            other => panic!("expected resolved slots, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bad_line_is_skipped_without_touching_the_rest() {
        let lookup = bolt_and_pirates_lookup();
        let decklist = "Lightning Bolt\nShock\u{7}ed\nShockk\nKukemssa Pirates";

        let deck = Deck::build(decklist, &lookup, ParseMode::Skip).await.unwrap();

        assert_eq!(
            slot_names(&deck),
            vec!["Lightning Bolt", "missing Shockk", "Kukemssa Pirates"]
        );
        assert_eq!(deck.rejected().len(), 1);
        assert_eq!(deck.rejected()[0].line_number, 2);
        assert_eq!(
            deck.rejected()[0].error,
            LineParseError::ControlCharacter('\u{7}')
        );
    }

    #[tokio::test]
    async fn test_oversized_quantity_is_rejected_not_expanded() {
        let lookup = bolt_and_pirates_lookup();
        let decklist = "Lightning Bolt\n4294967295 Lightning Bolt\nShockk\nKukemssa Pirates";

        let deck = Deck::build(decklist, &lookup, ParseMode::Skip).await.unwrap();

        assert_eq!(deck.len(), 3);
        assert_eq!(deck.rejected().len(), 1);
        assert_eq!(deck.rejected()[0].line_number, 2);
        assert_eq!(
            deck.rejected()[0].error,
            LineParseError::QuantityOutOfRange("4294967295".to_string())
        );

        let mut strict = MockCardLookup::new();
        strict.expect_find_collection().times(0);
        let result = Deck::build("4294967295 Lightning Bolt", &strict, ParseMode::Abort).await;
        assert!(matches!(
            result,
            Err(DeckError::Parse {
                error: LineParseError::QuantityOutOfRange(_),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_abort_mode_fails_before_lookup() {
        let mut lookup = MockCardLookup::new();
        lookup.expect_find_collection().times(0);

        let result = Deck::build("Opt\nSho\u{0}ck", &lookup, ParseMode::Abort).await;

        match result {
            Err(DeckError::Parse {
                line_number, error, ..
            }) => {
                assert_eq!(line_number, 2);
                assert_eq!(error, LineParseError::ControlCharacter('\u{0}'));
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_failure_fails_the_deck() {
        let mut lookup = MockCardLookup::new();
        lookup
            .expect_find_collection()
            .returning(|_| Err(LookupError::Status(502)));

        let result = Deck::build("Opt", &lookup, ParseMode::Skip).await;

        assert!(matches!(result, Err(DeckError::Resolve(_))));
    }

    #[tokio::test]
    async fn test_empty_decklist_makes_no_lookup() {
        let mut lookup = MockCardLookup::new();
        lookup.expect_find_collection().times(0);

        let deck = Deck::build("\n  // just a comment\n", &lookup, ParseMode::Abort)
            .await
            .unwrap();

        assert!(deck.is_empty());
    }

    #[test]
    fn test_parse_mode_from_strict() {
        assert_eq!(ParseMode::from_strict(true), ParseMode::Abort);
        assert_eq!(ParseMode::from_strict(false), ParseMode::Skip);
    }
}
