use crate::cards::{card_record::CardRecord, scryfallcard::ScryfallCard};
use crate::lookup::CollectionResponse;

pub fn lightning_bolt_payload() -> ScryfallCard {
    serde_json::from_str(include_str!("named_card_resp.json")).unwrap()
}

pub fn kukemssa_pirates_payload() -> ScryfallCard {
    collection_response().data.remove(1)
}

pub fn delver_payload() -> ScryfallCard {
    collection_response().data.remove(2)
}

pub fn karn_payload() -> ScryfallCard {
    ScryfallCard {
        id: Some("d1a2b3c4-0000-4e6b-9a0c-5b6f7e8d9c01".to_string()),
        name: "Karn Liberated".to_string(),
        mana_cost: Some("{7}".to_string()),
        type_line: "Legendary Planeswalker — Karn".to_string(),
        oracle_text: Some("+4: Target player exiles a card from their hand.\n−3: Exile target permanent.".to_string()),
        loyalty: Some("6".to_string()),
        set: "nph".to_string(),
        set_name: "New Phyrexia".to_string(),
        collector_number: "1".to_string(),
        colors: Some(vec![]),
        ..Default::default()
    }
}

pub fn shock_payload() -> ScryfallCard {
    ScryfallCard {
        id: Some("5d2e7a1c-5f0b-4a8e-9d3c-1b2a3c4d5e6f".to_string()),
        name: "Shock".to_string(),
        mana_cost: Some("{R}".to_string()),
        type_line: "Instant".to_string(),
        oracle_text: Some("Shock deals 2 damage to any target.".to_string()),
        set: "m21".to_string(),
        set_name: "Core Set 2021".to_string(),
        collector_number: "159".to_string(),
        colors: Some(vec!["R".to_string()]),
        ..Default::default()
    }
}

pub fn lightning_bolt() -> CardRecord {
    CardRecord::try_from(lightning_bolt_payload()).unwrap()
}

pub fn kukemssa_pirates() -> CardRecord {
    CardRecord::try_from(kukemssa_pirates_payload()).unwrap()
}

pub fn karn() -> CardRecord {
    CardRecord::try_from(karn_payload()).unwrap()
}

/// Collection answer for `Lightning Bolt`, `Shockk`, `Kukemssa Pirates` and
/// `Delver of Secrets`, in that order.
pub fn collection_response() -> CollectionResponse {
    serde_json::from_str(include_str!("collection_resp.json")).unwrap()
}

pub fn collection_of(cards: Vec<ScryfallCard>, not_found: &[&str]) -> CollectionResponse {
    CollectionResponse {
        data: cards,
        not_found: not_found
            .iter()
            .map(|name| crate::cards::scryfallcard::CardIdentifier::by_name(name))
            .collect(),
    }
}
