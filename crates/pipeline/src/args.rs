use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockpipe_core::{ProductRef, StockError, StockResult};
use stockpipe_inventory::{StockQuery, StockRecord};

/// Context the host attaches to every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub correlation_id: Uuid,
    pub shop_name: Option<String>,
    pub requested_at: DateTime<Utc>,
}

impl RequestContext {
    /// Fresh context with a time-ordered correlation id.
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::now_v7(),
            shop_name: None,
            requested_at: Utc::now(),
        }
    }

    pub fn with_shop_name(mut self, shop_name: impl Into<String>) -> Self {
        self.shop_name = Some(shop_name.into());
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Product entity as handed over by the host. Only its reference is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryProduct {
    pub product_id: ProductRef,
}

impl InventoryProduct {
    pub fn new(product_id: impl Into<ProductRef>) -> Self {
        Self {
            product_id: product_id.into(),
        }
    }
}

/// Request: stock information for a list of products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetStockInformationRequest {
    pub context: Option<RequestContext>,
    pub products: Option<Vec<Option<InventoryProduct>>>,
}

impl GetStockInformationRequest {
    pub fn new(context: RequestContext) -> Self {
        Self {
            context: Some(context),
            products: Some(Vec::new()),
        }
    }

    pub fn with_products<I, P>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProductRef>,
    {
        self.products = Some(
            products
                .into_iter()
                .map(|p| Some(InventoryProduct::new(p)))
                .collect(),
        );
        self
    }

    /// Append a null product entry.
    pub fn with_missing_product(mut self) -> Self {
        self.products.get_or_insert_with(Vec::new).push(None);
        self
    }

    /// The product list as a resolver query; `None` when the host sent no list.
    pub fn query(&self) -> Option<StockQuery> {
        self.products.as_ref().map(|products| {
            products
                .iter()
                .map(|p| p.as_ref().map(|p| p.product_id.clone()))
                .collect()
        })
    }
}

/// Result: resolved stock records and the success flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetStockInformationResult {
    pub stock_information: Option<Vec<StockRecord>>,
    pub success: bool,
}

/// Arguments shared by every processor of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicePipelineArgs {
    pub request: Option<GetStockInformationRequest>,
    pub result: Option<GetStockInformationResult>,
}

impl ServicePipelineArgs {
    /// Args for a request with an empty result container.
    pub fn new(request: GetStockInformationRequest) -> Self {
        Self {
            request: Some(request),
            result: Some(GetStockInformationResult::default()),
        }
    }

    pub fn correlation_id(&self) -> Option<Uuid> {
        self.request
            .as_ref()
            .and_then(|r| r.context.as_ref())
            .map(|c| c.correlation_id)
    }

    /// Check that request, request context and result are all present.
    pub fn validate(
        &mut self,
    ) -> StockResult<(&GetStockInformationRequest, &mut GetStockInformationResult)> {
        let request = self
            .request
            .as_ref()
            .ok_or_else(|| StockError::invalid_query("args.request is missing"))?;
        if request.context.is_none() {
            return Err(StockError::invalid_query("args.request.context is missing"));
        }
        let result = self
            .result
            .as_mut()
            .ok_or_else(|| StockError::invalid_query("args.result is missing"))?;
        Ok((request, result))
    }
}
