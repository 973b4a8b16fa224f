use serde::{Deserialize, Serialize};

/// A card object as Scryfall returns it. Only the fields the proxies use are
/// kept; everything may be missing so a bad payload can be reported instead of
/// failing the whole response.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct ScryfallCard {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub collector_number: String,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub card_faces: Vec<CardFace>,
}

/// One face of a double-faced, split or adventure card.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct CardFace {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
}

/// An entry of the `not_found` list of a collection response.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct CardIdentifier {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_number: Option<String>,
}

impl CardIdentifier {
    pub fn by_name(name: &str) -> Self {
        CardIdentifier {
            name: Some(name.to_string()),
            set: None,
            collector_number: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_scryfall_card_object() {
        let card: ScryfallCard = serde_json::from_str(include_str!("../test/named_card_resp.json")).unwrap();
        assert_eq!(card.id.as_deref(), Some("e3285e6b-3e79-4d7c-bf96-d920f973b122"));
        assert_eq!(card.name, "Lightning Bolt");
        assert_eq!(card.mana_cost.as_deref(), Some("{R}"));
        assert_eq!(card.set, "m10");
        assert_eq!(card.set_name, "Magic 2010");
        assert_eq!(card.collector_number, "146");
        assert_eq!(card.colors, Some(vec!["R".to_string()]));
        assert!(card.card_faces.is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let card: ScryfallCard = serde_json::from_str(r#"{"object": "card"}"#).unwrap();
        assert_eq!(card, ScryfallCard::default());
    }

    #[test]
    fn test_identifier_serializes_only_what_is_set() {
        let json = serde_json::to_string(&CardIdentifier::by_name("Opt")).unwrap();
        assert_eq!(json, r#"{"name":"Opt"}"#);
    }
}
