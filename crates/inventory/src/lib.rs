//! Stock availability module.
//!
//! Resolution and adjustment of stock records, implemented purely as
//! deterministic logic (no IO, no storage, no caching).

pub mod adjuster;
pub mod config;
pub mod resolver;
pub mod stock;

pub use adjuster::StockAdjuster;
pub use config::{
    DEFAULT_CACHE_TIMEOUT_SECS, DEFAULT_QUANTITY, DEFAULT_UNIT_OF_MEASURE, StockConfig,
    parse_cache_timeout,
};
pub use resolver::StockResolver;
pub use stock::{StockAdjustment, StockQuery, StockRecord, StockStatus};
