use stockpipe_core::{ProductRef, StockError, StockResult};

use crate::config::StockConfig;
use crate::stock::{StockQuery, StockRecord};

/// Resolves stock availability for requested products.
///
/// Every resolvable product is reported with the configured default quantity,
/// on hand and available, and `InStock` status. Stateless after construction,
/// so a single resolver can be shared across threads.
#[derive(Debug, Clone)]
pub struct StockResolver {
    config: StockConfig,
}

impl StockResolver {
    pub fn new(config: StockConfig) -> StockResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StockConfig {
        &self.config
    }

    /// Resolve a query into one record per valid product, in query order.
    ///
    /// Absent and blank product references are skipped. Fails only when the
    /// query itself is absent.
    pub fn resolve(&self, query: Option<&StockQuery>) -> StockResult<Vec<StockRecord>> {
        let query = query.ok_or_else(|| StockError::invalid_query("stock query is missing"))?;
        let records = self.resolve_all(query.iter());

        tracing::debug!(
            requested = query.len(),
            resolved = records.len(),
            "resolved stock query"
        );
        Ok(records)
    }

    /// Resolve a sequence of possibly-absent product references.
    pub fn resolve_all<'a>(
        &self,
        products: impl IntoIterator<Item = Option<&'a ProductRef>>,
    ) -> Vec<StockRecord> {
        products
            .into_iter()
            .enumerate()
            .filter_map(|(position, product)| match product {
                Some(product) => self.resolve_one(product),
                None => {
                    tracing::debug!(position, "skipping missing product");
                    None
                }
            })
            .collect()
    }

    /// Resolve a single product; `None` when the reference is not valid.
    pub fn resolve_one(&self, product: &ProductRef) -> Option<StockRecord> {
        if !product.is_valid() {
            tracing::debug!(product = %product, "skipping invalid product reference");
            return None;
        }
        Some(StockRecord::with_quantity(
            product.clone(),
            self.config.default_quantity,
            self.config.unit_of_measure.clone(),
        ))
    }
}

impl Default for StockResolver {
    fn default() -> Self {
        Self {
            config: StockConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stock::StockStatus;
    use proptest::prelude::*;

    fn p(id: &str) -> ProductRef {
        ProductRef::from(id)
    }

    #[test]
    fn resolves_each_product_with_default_quantity() {
        let resolver = StockResolver::default();
        let query: StockQuery = vec![p("P1"), p("P2")].into_iter().collect();

        let records = resolver.resolve(Some(&query)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product_ref, p("P1"));
        assert_eq!(records[1].product_ref, p("P2"));
        for r in &records {
            assert_eq!(r.on_hand_quantity, 1_000_000);
            assert_eq!(r.available_count, 1_000_000);
            assert_eq!(r.unit_of_measure, "ea");
            assert_eq!(r.status, StockStatus::InStock);
        }
    }

    #[test]
    fn missing_entries_are_skipped() {
        let resolver = StockResolver::default();
        let query = StockQuery::from(vec![None, Some(p("P1"))]);

        let records = resolver.resolve(Some(&query)).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_ref, p("P1"));
        assert_eq!(records[0].on_hand_quantity, 1_000_000);
        assert_eq!(records[0].status, StockStatus::InStock);
    }

    #[test]
    fn blank_references_are_skipped() {
        let resolver = StockResolver::default();
        let query: StockQuery = vec![p(""), p("P1"), p("  ")].into_iter().collect();

        let records = resolver.resolve(Some(&query)).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn empty_query_resolves_to_nothing() {
        let resolver = StockResolver::default();
        let records = resolver.resolve(Some(&StockQuery::new())).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn absent_query_is_rejected() {
        let err = StockResolver::default().resolve(None).unwrap_err();
        assert!(matches!(err, StockError::InvalidQuery(_)));
    }

    #[test]
    fn duplicates_each_receive_a_record() {
        let resolver = StockResolver::default();
        let query: StockQuery = vec![p("P1"), p("P1")].into_iter().collect();

        let records = resolver.resolve(Some(&query)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
    }

    #[test]
    fn uses_configured_quantity_and_unit() {
        let config = StockConfig::default()
            .with_default_quantity(25)
            .with_unit_of_measure("kg");
        let resolver = StockResolver::new(config).unwrap();

        let record = resolver.resolve_one(&p("P9")).unwrap();
        assert_eq!(record.on_hand_quantity, 25);
        assert_eq!(record.unit_of_measure, "kg");
    }

    #[test]
    fn rejects_invalid_configuration() {
        let err = StockResolver::new(StockConfig::default().with_default_quantity(0)).unwrap_err();
        assert!(matches!(err, StockError::InvalidConfiguration(_)));
    }

    #[test]
    fn shared_resolver_serves_concurrent_lookups() {
        let resolver = StockResolver::default();
        let query: StockQuery = (0..100).map(|i| p(&format!("P{i}"))).collect();

        let (resolver, query) = (&resolver, &query);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(move || resolver.resolve(Some(query)).unwrap()))
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap().len(), 100);
            }
        });
    }

    fn arb_entry() -> impl Strategy<Value = Option<ProductRef>> {
        prop_oneof![
            3 => "[A-Z][A-Z0-9-]{0,11}".prop_map(|s| Some(ProductRef::new(s))),
            1 => Just(None),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: one record per present entry, in query order.
        #[test]
        fn output_matches_present_entries_in_order(
            entries in prop::collection::vec(arb_entry(), 0..50),
            quantity in 1u64..10_000_000u64,
        ) {
            let resolver = StockResolver::new(
                StockConfig::default().with_default_quantity(quantity),
            ).unwrap();
            let query = StockQuery::from(entries.clone());

            let records = resolver.resolve(Some(&query)).unwrap();

            let missing = entries.iter().filter(|e| e.is_none()).count();
            prop_assert_eq!(records.len(), entries.len() - missing);

            let expected: Vec<&ProductRef> = entries.iter().flatten().collect();
            for (record, product) in records.iter().zip(expected) {
                prop_assert_eq!(&record.product_ref, product);
                prop_assert_eq!(record.on_hand_quantity, quantity);
                prop_assert_eq!(record.available_count, quantity);
                prop_assert_eq!(record.status, StockStatus::InStock);
            }
        }
    }
}
