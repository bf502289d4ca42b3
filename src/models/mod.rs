pub mod order;
pub mod product;

pub use order::{CleanedOrder, InputOrder};
pub use product::{Product, Texture};
