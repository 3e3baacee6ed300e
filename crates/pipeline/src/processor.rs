use stockpipe_core::StockResult;
use stockpipe_inventory::{StockAdjuster, StockAdjustment, StockConfig, StockResolver};

use crate::args::ServicePipelineArgs;

/// Delta the adjusting step adds when none is configured.
pub const DEFAULT_ADJUSTMENT_DELTA: i64 = 1_000_000;

/// One step of a host pipeline.
///
/// A processor validates the arguments it needs, does its work and sets the
/// result's success flag. Returning an error aborts the remaining steps.
pub trait PipelineProcessor: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(&self, args: &mut ServicePipelineArgs) -> StockResult<()>;
}

/// Resolves the requested products into stock records.
#[derive(Debug, Clone, Default)]
pub struct GetStockInformation {
    resolver: StockResolver,
}

impl GetStockInformation {
    pub fn new(config: StockConfig) -> StockResult<Self> {
        Ok(Self {
            resolver: StockResolver::new(config)?,
        })
    }

    /// Default configuration with the cache timeout given as text.
    pub fn from_cache_timeout_text(text: &str) -> Self {
        Self {
            resolver: StockResolver::new(StockConfig::default().with_cache_timeout_text(text))
                .unwrap_or_default(),
        }
    }

    pub fn resolver(&self) -> &StockResolver {
        &self.resolver
    }

    pub fn inventory_cache_timeout(&self) -> f64 {
        self.resolver.config().inventory_cache_timeout
    }
}

impl PipelineProcessor for GetStockInformation {
    fn name(&self) -> &'static str {
        "get_stock_information"
    }

    fn process(&self, args: &mut ServicePipelineArgs) -> StockResult<()> {
        let (request, result) = args.validate()?;

        let records = self.resolver.resolve(request.query().as_ref())?;
        tracing::debug!(records = records.len(), "stock information resolved");

        result.stock_information = Some(records);
        result.success = true;
        Ok(())
    }
}

/// Shifts the stock records already present in the result.
#[derive(Debug, Clone, Copy)]
pub struct AdjustStockInformation {
    adjuster: StockAdjuster,
}

impl AdjustStockInformation {
    pub fn new(adjustment: StockAdjustment) -> Self {
        Self {
            adjuster: StockAdjuster::new(adjustment),
        }
    }

    pub fn adjustment(&self) -> StockAdjustment {
        self.adjuster.adjustment()
    }
}

impl Default for AdjustStockInformation {
    fn default() -> Self {
        Self::new(StockAdjustment::new(DEFAULT_ADJUSTMENT_DELTA))
    }
}

impl PipelineProcessor for AdjustStockInformation {
    fn name(&self) -> &'static str {
        "adjust_stock_information"
    }

    fn process(&self, args: &mut ServicePipelineArgs) -> StockResult<()> {
        let (_, result) = args.validate()?;

        self.adjuster
            .adjust_in_place(result.stock_information.as_deref_mut())?;
        result.success = true;
        Ok(())
    }
}
