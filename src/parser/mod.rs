pub mod pattern;
pub mod product_parser;

pub use pattern::{ProductCodeMatch, ProductPattern};
pub use product_parser::ProductParser;
