//! `stockpipe-core` — shared building blocks for stock availability.
//!
//! This crate contains **pure** primitives (no IO, no logging setup): product
//! references, the error taxonomy and the value object marker.

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{StockError, StockResult};
pub use id::ProductRef;
pub use value_object::ValueObject;
