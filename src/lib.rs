pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod service;

pub use config::{AppConfig, OutputFormat};
pub use error::{OrderError, Result};
pub use models::{CleanedOrder, InputOrder, Product, Texture};
pub use parser::ProductParser;
pub use service::OrderService;
