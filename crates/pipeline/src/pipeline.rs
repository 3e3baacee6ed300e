//! Ordered execution of pipeline processors.

use stockpipe_core::{StockError, StockResult};
use stockpipe_inventory::{StockAdjustment, StockConfig};

use crate::args::{GetStockInformationRequest, GetStockInformationResult, ServicePipelineArgs};
use crate::processor::{AdjustStockInformation, GetStockInformation, PipelineProcessor};

/// Runs processors in order against shared arguments.
///
/// Execution stops at the first failing processor; later processors never see
/// arguments left behind by a failed step.
pub struct Pipeline {
    name: String,
    processors: Vec<Box<dyn PipelineProcessor>>,
}

impl core::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("processors", &self.processor_names())
            .finish()
    }
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            processors: Vec::new(),
        }
    }

    /// Resolve-only stock information pipeline.
    pub fn stock_information(config: StockConfig) -> StockResult<Self> {
        Ok(Self::new("get_stock_information").with_processor(GetStockInformation::new(config)?))
    }

    /// Resolve, then shift every record by `adjustment`.
    pub fn adjusted_stock_information(
        config: StockConfig,
        adjustment: StockAdjustment,
    ) -> StockResult<Self> {
        Ok(Self::stock_information(config)?
            .with_processor(AdjustStockInformation::new(adjustment)))
    }

    pub fn with_processor(mut self, processor: impl PipelineProcessor + 'static) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    pub fn processor_names(&self) -> Vec<&'static str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    /// Run every processor in order.
    pub fn run(&self, args: &mut ServicePipelineArgs) -> StockResult<()> {
        let correlation_id = args.correlation_id().map(|id| id.to_string());
        let span = tracing::info_span!(
            "pipeline",
            pipeline = %self.name,
            correlation_id = correlation_id.as_deref().unwrap_or("-"),
        );
        let _guard = span.enter();

        for processor in &self.processors {
            if let Err(e) = processor.process(args) {
                tracing::warn!(processor = processor.name(), error = %e, "pipeline processor failed");
                return Err(e);
            }
            tracing::debug!(processor = processor.name(), "pipeline processor completed");
        }
        Ok(())
    }

    /// Run against a fresh result container and hand the result back.
    pub fn execute(
        &self,
        request: GetStockInformationRequest,
    ) -> StockResult<GetStockInformationResult> {
        let mut args = ServicePipelineArgs::new(request);
        self.run(&mut args)?;
        args.result
            .take()
            .ok_or_else(|| StockError::invalid_query("args.result is missing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::RequestContext;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(Arc<AtomicUsize>);

    impl PipelineProcessor for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn process(&self, _args: &mut ServicePipelineArgs) -> StockResult<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn standard_pipelines_have_expected_steps() {
        let p = Pipeline::stock_information(StockConfig::default()).unwrap();
        assert_eq!(p.processor_names(), vec!["get_stock_information"]);

        let p = Pipeline::adjusted_stock_information(
            StockConfig::default(),
            StockAdjustment::new(10),
        )
        .unwrap();
        assert_eq!(
            p.processor_names(),
            vec!["get_stock_information", "adjust_stock_information"]
        );
    }

    #[test]
    fn failing_step_stops_the_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        // Adjusting before resolving has no records to work on.
        let pipeline = Pipeline::new("broken")
            .with_processor(AdjustStockInformation::default())
            .with_processor(Counting(calls.clone()));

        let request = GetStockInformationRequest::new(RequestContext::new()).with_products(["P1"]);
        let err = pipeline.execute(request).unwrap_err();

        assert!(matches!(err, StockError::InvalidInput(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_pipeline_returns_untouched_result() {
        let pipeline = Pipeline::new("noop");
        assert!(pipeline.is_empty());

        let request = GetStockInformationRequest::new(RequestContext::new());
        let result = pipeline.execute(request).unwrap();
        assert_eq!(result, GetStockInformationResult::default());
    }

    #[test]
    fn every_step_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::stock_information(StockConfig::default())
            .unwrap()
            .with_processor(Counting(calls.clone()))
            .with_processor(Counting(calls.clone()));
        assert_eq!(pipeline.len(), 3);

        let request = GetStockInformationRequest::new(RequestContext::new()).with_products(["P1"]);
        let result = pipeline.execute(request).unwrap();

        assert!(result.success);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
