use std::fmt;

use serde::{Serialize, Serializer};

use super::{
    colour::{classify_colours, ColourLabel},
    scryfallcard::{CardFace, ScryfallCard},
    taxonomy::{CardType, SuperType, Taxonomy},
};

const FACE_LIMIT: usize = 2;

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct SetInfo {
    pub name: String,
    pub code: String,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum CardError {
    MissingId,
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CardError::MissingId => write!(f, "could not create card, payload has no id"),
        }
    }
}

impl std::error::Error for CardError {}

/// A resolved card. Built once from a Scryfall payload and never changed, so
/// the taxonomy and colour label are worked out at construction.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CardRecord {
    id: String,
    name: String,
    mana_cost: String,
    type_line: String,
    oracle_text: String,
    power: Option<String>,
    toughness: Option<String>,
    loyalty: Option<String>,
    set: SetInfo,
    collector_number: String,
    colors: Vec<String>,
    taxonomy: Taxonomy,
    colour_label: ColourLabel,
}

impl TryFrom<ScryfallCard> for CardRecord {
    type Error = CardError;

    fn try_from(card: ScryfallCard) -> Result<Self, Self::Error> {
        let id = match card.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(CardError::MissingId),
        };

        let faces: &[CardFace] = &card.card_faces[..card.card_faces.len().min(FACE_LIMIT)];

        let mana_cost = card
            .mana_cost
            .unwrap_or_else(|| join_faces(faces, |face| face.mana_cost.as_deref(), " // "));
        let oracle_text = card
            .oracle_text
            .unwrap_or_else(|| join_faces(faces, |face| face.oracle_text.as_deref(), "\n//\n"));
        let power = card
            .power
            .or_else(|| first_face_value(faces, |face| face.power.as_ref()));
        let toughness = card
            .toughness
            .or_else(|| first_face_value(faces, |face| face.toughness.as_ref()));
        let loyalty = card
            .loyalty
            .or_else(|| first_face_value(faces, |face| face.loyalty.as_ref()));
        let colors = card.colors.unwrap_or_else(|| face_colours(faces));

        let taxonomy = Taxonomy::from_type_line(&card.type_line);
        let colour_label = classify_colours(&colors);

        Ok(CardRecord {
            id,
            name: card.name,
            mana_cost,
            type_line: card.type_line,
            oracle_text,
            power,
            toughness,
            loyalty,
            set: SetInfo {
                name: card.set_name,
                code: card.set,
            },
            collector_number: card.collector_number,
            colors,
            taxonomy,
            colour_label,
        })
    }
}

fn join_faces<'a, F>(faces: &'a [CardFace], field: F, separator: &str) -> String
where
    F: Fn(&'a CardFace) -> Option<&'a str>,
{
    faces
        .iter()
        .filter_map(field)
        .filter(|value| !value.is_empty())
        .collect::<Vec<&str>>()
        .join(separator)
}

fn first_face_value<'a, F>(faces: &'a [CardFace], field: F) -> Option<String>
where
    F: Fn(&'a CardFace) -> Option<&'a String>,
{
    faces.iter().find_map(field).cloned()
}

fn face_colours(faces: &[CardFace]) -> Vec<String> {
    let mut colours: Vec<String> = Vec::new();
    for colour in faces.iter().filter_map(|face| face.colors.as_ref()).flatten() {
        if !colours.contains(colour) {
            colours.push(colour.clone());
        }
    }
    colours
}

impl CardRecord {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mana_cost(&self) -> &str {
        &self.mana_cost
    }

    pub fn type_line(&self) -> &str {
        &self.type_line
    }

    pub fn oracle_text(&self) -> &str {
        &self.oracle_text
    }

    pub fn power(&self) -> Option<&str> {
        self.power.as_deref()
    }

    pub fn toughness(&self) -> Option<&str> {
        self.toughness.as_deref()
    }

    pub fn loyalty(&self) -> Option<&str> {
        self.loyalty.as_deref()
    }

    pub fn set(&self) -> &SetInfo {
        &self.set
    }

    pub fn collector_number(&self) -> &str {
        &self.collector_number
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn super_types(&self) -> &[SuperType] {
        &self.taxonomy.super_types
    }

    pub fn card_types(&self) -> &[CardType] {
        &self.taxonomy.card_types
    }

    pub fn sub_types(&self) -> &[String] {
        &self.taxonomy.sub_types
    }

    pub fn colour_label(&self) -> &ColourLabel {
        &self.colour_label
    }

    /// Substring match on the type line, so `Artifact Creature` and both faces
    /// of a transforming card count.
    pub fn is_creature(&self) -> bool {
        self.type_line.contains("Creature")
    }

    pub fn is_planeswalker(&self) -> bool {
        self.type_line.contains("Planeswalker")
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardRecordJson<'a> {
    id: &'a str,
    name: &'a str,
    mana_cost: &'a str,
    colors: &'a [String],
    #[serde(rename = "type")]
    type_line: &'a str,
    text: &'a str,
    set: &'a SetInfo,
    set_number: &'a str,
    super_types: &'a [SuperType],
    card_types: &'a [CardType],
    sub_types: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    power: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    toughness: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    loyalty: Option<Option<&'a str>>,
}

impl Serialize for CardRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let creature = self.is_creature();
        CardRecordJson {
            id: &self.id,
            name: &self.name,
            mana_cost: &self.mana_cost,
            colors: &self.colors,
            type_line: &self.type_line,
            text: &self.oracle_text,
            set: &self.set,
            set_number: &self.collector_number,
            super_types: self.super_types(),
            card_types: self.card_types(),
            sub_types: self.sub_types(),
            power: creature.then(|| self.power()),
            toughness: creature.then(|| self.toughness()),
            loyalty: self.is_planeswalker().then(|| self.loyalty()),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::test::helpers::{
        delver_payload, karn_payload, kukemssa_pirates_payload, lightning_bolt_payload,
    };

    #[test]
    fn test_builds_from_payload() {
        let card = CardRecord::try_from(lightning_bolt_payload()).unwrap();
        assert_eq!(card.id(), "e3285e6b-3e79-4d7c-bf96-d920f973b122");
        assert_eq!(card.name(), "Lightning Bolt");
        assert_eq!(card.mana_cost(), "{R}");
        assert_eq!(card.set().code, "m10");
        assert_eq!(card.set().name, "Magic 2010");
        assert_eq!(card.collector_number(), "146");
        assert_eq!(card.card_types(), &[CardType::Instant]);
        assert_eq!(card.colour_label().as_str(), "red");
    }

    #[test]
    fn test_missing_or_blank_id_fails() {
        let mut payload = lightning_bolt_payload();
        payload.id = None;
        assert_eq!(CardRecord::try_from(payload.clone()), Err(CardError::MissingId));
        payload.id = Some("  ".to_string());
        assert_eq!(CardRecord::try_from(payload), Err(CardError::MissingId));
    }

    #[test]
    fn test_absent_cost_and_text_become_empty() {
        let mut payload = lightning_bolt_payload();
        payload.mana_cost = None;
        payload.oracle_text = None;
        payload.colors = None;
        let card = CardRecord::try_from(payload).unwrap();
        assert_eq!(card.mana_cost(), "");
        assert_eq!(card.oracle_text(), "");
        assert!(card.colors().is_empty());
        assert_eq!(card.colour_label().as_str(), "colorless");
    }

    #[test]
    fn test_two_faced_card_falls_back_to_faces() {
        let delver = delver_payload();
        let card = CardRecord::try_from(delver).unwrap();
        assert_eq!(card.mana_cost(), "{U}");
        assert!(card.oracle_text().starts_with("At the beginning of your upkeep"));
        assert!(card.oracle_text().ends_with("\n//\nFlying"));
        assert_eq!(card.power(), Some("1"));
        assert_eq!(card.toughness(), Some("1"));
        assert_eq!(card.colors(), &["U".to_string()]);
        assert_eq!(
            card.sub_types(),
            &["Human", "Wizard", "//", "Creature"]
        );
    }

    #[test]
    fn test_creature_json_shape() {
        let card = CardRecord::try_from(kukemssa_pirates_payload()).unwrap();
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "3bf2e7de-cc39-4a4f-b7b0-0e7df5e8c2e5",
                "name": "Kukemssa Pirates",
                "manaCost": "{3}{U}",
                "colors": ["U"],
                "type": "Creature — Human Pirate",
                "text": "Whenever Kukemssa Pirates attacks and isn't blocked, you may gain control of target artifact defending player controls. If you do, Kukemssa Pirates assigns no combat damage this turn.",
                "set": {"name": "Mirage", "code": "mir"},
                "setNumber": "71",
                "superTypes": [],
                "cardTypes": ["Creature"],
                "subTypes": ["Human", "Pirate"],
                "power": "2",
                "toughness": "2"
            })
        );
    }

    #[test]
    fn test_non_creature_has_no_stats_in_json() {
        let card = CardRecord::try_from(lightning_bolt_payload()).unwrap();
        let value = serde_json::to_value(&card).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("power"));
        assert!(!object.contains_key("toughness"));
        assert!(!object.contains_key("loyalty"));
        assert_eq!(object["subTypes"], json!([]));
    }

    #[test]
    fn test_planeswalker_json_has_loyalty() {
        let card = CardRecord::try_from(karn_payload()).unwrap();
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["loyalty"], json!("6"));
        assert_eq!(value["superTypes"], json!(["Legendary"]));
        assert!(value.get("power").is_none());
    }

    #[test]
    fn test_creature_without_power_serializes_null() {
        let mut payload = kukemssa_pirates_payload();
        payload.power = None;
        let card = CardRecord::try_from(payload).unwrap();
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["power"], Value::Null);
        assert!(value.as_object().unwrap().contains_key("power"));
    }
}
