use serde::{Deserialize, Serialize};

use stockpipe_core::{ProductRef, ValueObject};

/// Availability state of a stock record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    PartiallyInStock,
    NotFound,
}

impl StockStatus {
    /// Status derived from an available count: anything above zero is in stock.
    pub fn for_available(available_count: u64) -> Self {
        if available_count > 0 {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, StockStatus::InStock | StockStatus::PartiallyInStock)
    }
}

/// Resolved availability snapshot for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub product_ref: ProductRef,
    pub on_hand_quantity: u64,
    pub available_count: u64,
    pub unit_of_measure: String,
    pub status: StockStatus,
}

impl ValueObject for StockRecord {}

impl StockRecord {
    /// A record holding `quantity` both on hand and available.
    pub fn with_quantity(
        product_ref: ProductRef,
        quantity: u64,
        unit_of_measure: impl Into<String>,
    ) -> Self {
        Self {
            product_ref,
            on_hand_quantity: quantity,
            available_count: quantity,
            unit_of_measure: unit_of_measure.into(),
            status: StockStatus::for_available(quantity),
        }
    }

    /// Re-derive `status` from `available_count`.
    pub fn recompute_status(&mut self) {
        self.status = StockStatus::for_available(self.available_count);
    }
}

/// Ordered list of products for which availability is requested.
///
/// Entries may be absent (the host handed over a null product); duplicates are
/// kept and each yields its own record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockQuery(Vec<Option<ProductRef>>);

impl StockQuery {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, product_ref: impl Into<ProductRef>) {
        self.0.push(Some(product_ref.into()));
    }

    /// Append an absent entry.
    pub fn push_missing(&mut self) {
        self.0.push(None);
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&ProductRef>> {
        self.0.iter().map(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries that will produce a record.
    pub fn resolvable_len(&self) -> usize {
        self.iter().flatten().filter(|p| p.is_valid()).count()
    }
}

impl From<Vec<Option<ProductRef>>> for StockQuery {
    fn from(value: Vec<Option<ProductRef>>) -> Self {
        Self(value)
    }
}

impl FromIterator<ProductRef> for StockQuery {
    fn from_iter<I: IntoIterator<Item = ProductRef>>(iter: I) -> Self {
        Self(iter.into_iter().map(Some).collect())
    }
}

impl FromIterator<Option<ProductRef>> for StockQuery {
    fn from_iter<I: IntoIterator<Item = Option<ProductRef>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A uniform delta applied to a batch of stock records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub delta: i64,
}

impl ValueObject for StockAdjustment {}

impl StockAdjustment {
    pub fn new(delta: i64) -> Self {
        Self { delta }
    }

    /// Shift both quantities by `delta`, clamping at zero (and saturating at the
    /// top), then recompute the status.
    ///
    /// Returns `true` when either quantity had to be clamped at zero.
    pub fn apply_to(&self, record: &mut StockRecord) -> bool {
        let (on_hand, on_hand_clamped) = shift(record.on_hand_quantity, self.delta);
        let (available, available_clamped) = shift(record.available_count, self.delta);
        record.on_hand_quantity = on_hand;
        record.available_count = available;
        record.recompute_status();
        on_hand_clamped || available_clamped
    }

    /// The adjustment that undoes this one (saturating for `i64::MIN`).
    pub fn inverse(&self) -> Self {
        Self::new(self.delta.saturating_neg())
    }
}

fn shift(quantity: u64, delta: i64) -> (u64, bool) {
    if delta >= 0 {
        (quantity.saturating_add(delta.unsigned_abs()), false)
    } else {
        let magnitude = delta.unsigned_abs();
        (quantity.saturating_sub(magnitude), magnitude > quantity)
    }
}
