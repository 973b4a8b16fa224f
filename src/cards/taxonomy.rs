use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

const SUBTYPE_SEPARATOR: char = '—';

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SuperType {
    Basic,
    Legendary,
    Snow,
    World,
}

impl fmt::Display for SuperType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SuperType::Basic => write!(f, "Basic"),
            SuperType::Legendary => write!(f, "Legendary"),
            SuperType::Snow => write!(f, "Snow"),
            SuperType::World => write!(f, "World"),
        }
    }
}

impl FromStr for SuperType {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Basic" => Ok(SuperType::Basic),
            "Legendary" => Ok(SuperType::Legendary),
            "Snow" => Ok(SuperType::Snow),
            "World" => Ok(SuperType::World),
            _ => Err(()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum CardType {
    Artifact,
    Creature,
    Enchantment,
    Instant,
    Land,
    Planeswalker,
    Sorcery,
}

impl CardType {
    /// Name used for the type icon file, e.g. `creature` for `svg/creature.svg`.
    pub fn icon_name(&self) -> &'static str {
        match self {
            CardType::Artifact => "artifact",
            CardType::Creature => "creature",
            CardType::Enchantment => "enchantment",
            CardType::Instant => "instant",
            CardType::Land => "land",
            CardType::Planeswalker => "planeswalker",
            CardType::Sorcery => "sorcery",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CardType::Artifact => write!(f, "Artifact"),
            CardType::Creature => write!(f, "Creature"),
            CardType::Enchantment => write!(f, "Enchantment"),
            CardType::Instant => write!(f, "Instant"),
            CardType::Land => write!(f, "Land"),
            CardType::Planeswalker => write!(f, "Planeswalker"),
            CardType::Sorcery => write!(f, "Sorcery"),
        }
    }
}

impl FromStr for CardType {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Artifact" => Ok(CardType::Artifact),
            "Creature" => Ok(CardType::Creature),
            "Enchantment" => Ok(CardType::Enchantment),
            "Instant" => Ok(CardType::Instant),
            "Land" => Ok(CardType::Land),
            "Planeswalker" => Ok(CardType::Planeswalker),
            "Sorcery" => Ok(CardType::Sorcery),
            _ => Err(()),
        }
    }
}

impl Serialize for SuperType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Serialize for CardType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// The three tiers of a type line such as `Legendary Creature — Human Wizard`.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Taxonomy {
    pub super_types: Vec<SuperType>,
    pub card_types: Vec<CardType>,
    pub sub_types: Vec<String>,
}

impl Taxonomy {
    pub fn from_type_line(type_line: &str) -> Self {
        Taxonomy {
            super_types: super_types(type_line),
            card_types: card_types(type_line),
            sub_types: sub_types(type_line),
        }
    }
}

/// Words of the type line that are supertypes, in the order they appear.
pub fn super_types(type_line: &str) -> Vec<SuperType> {
    type_line
        .split_whitespace()
        .filter_map(|word| word.parse().ok())
        .collect()
}

/// Words of the type line that are card types, in the order they appear.
pub fn card_types(type_line: &str) -> Vec<CardType> {
    type_line
        .split_whitespace()
        .filter_map(|word| word.parse().ok())
        .collect()
}

/// Words after the em-dash, or nothing when the type line has no subtypes.
pub fn sub_types(type_line: &str) -> Vec<String> {
    type_line
        .split(SUBTYPE_SEPARATOR)
        .nth(1)
        .map(|segment| segment.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
