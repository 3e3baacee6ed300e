use stockpipe_core::{StockError, StockResult};

use crate::stock::{StockAdjustment, StockRecord};

/// Shifts the quantities of already-resolved stock records by a fixed delta.
///
/// Records are updated in place: the adjuster never adds or removes records,
/// and status is recomputed after every shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockAdjuster {
    adjustment: StockAdjustment,
}

impl StockAdjuster {
    pub fn new(adjustment: StockAdjustment) -> Self {
        Self { adjustment }
    }

    pub fn with_delta(delta: i64) -> Self {
        Self::new(StockAdjustment::new(delta))
    }

    pub fn adjustment(&self) -> StockAdjustment {
        self.adjustment
    }

    /// Consume a record sequence and return it adjusted.
    pub fn adjust(&self, records: Option<Vec<StockRecord>>) -> StockResult<Vec<StockRecord>> {
        let mut records = records.ok_or_else(missing_records)?;
        self.adjust_in_place(Some(records.as_mut_slice()))?;
        Ok(records)
    }

    /// Adjust a record sequence owned by someone else.
    pub fn adjust_in_place(&self, records: Option<&mut [StockRecord]>) -> StockResult<()> {
        let records = records.ok_or_else(missing_records)?;

        let mut clamped = 0usize;
        for record in records.iter_mut() {
            if self.adjustment.apply_to(record) {
                clamped += 1;
            }
        }

        if clamped > 0 {
            tracing::debug!(
                delta = self.adjustment.delta,
                clamped,
                "stock adjustment clamped quantities at zero"
            );
        }
        tracing::debug!(
            delta = self.adjustment.delta,
            records = records.len(),
            "adjusted stock records"
        );
        Ok(())
    }
}

fn missing_records() -> StockError {
    StockError::invalid_input("stock records are missing")
}
