pub mod api;
pub mod batch_resolver;
pub mod cards;
pub mod decklist;
pub mod html_generator;
pub mod lookup;
pub mod scryfall_client;
pub mod utilities;

#[cfg(test)]
mod test;
