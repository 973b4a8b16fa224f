pub mod config;
pub mod constants;
pub mod string_manipulators;
