//! Host pipeline boundary for stock information.
//!
//! Typed request/result containers and the processors that adapt them to the
//! inventory resolver and adjuster. Nothing here is downcast at runtime: each
//! processor validates the arguments it needs once, then works on typed values.

pub mod args;
pub mod pipeline;
pub mod processor;

pub use args::{
    GetStockInformationRequest, GetStockInformationResult, InventoryProduct, RequestContext,
    ServicePipelineArgs,
};
pub use pipeline::Pipeline;
pub use processor::{
    AdjustStockInformation, DEFAULT_ADJUSTMENT_DELTA, GetStockInformation, PipelineProcessor,
};
