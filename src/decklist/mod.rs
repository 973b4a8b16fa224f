pub mod deck;
pub mod line_parser;
