// Terminal output formatting.

pub mod terminal;
