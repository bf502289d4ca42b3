pub mod order_service;

pub use order_service::{round2, OrderService, CLEANER_SUFFIX, WIPING_CLOTH};
