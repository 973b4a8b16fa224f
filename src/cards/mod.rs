pub mod card_record;
pub mod colour;
pub mod mana;
pub mod scryfallcard;
pub mod taxonomy;
