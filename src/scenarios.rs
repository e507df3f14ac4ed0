//! Volume scenario detection
//!
//! A BOM code qualifies as a volume scenario when it was inserted into the
//! quote at two or more *different* quantities. Repeated insertions at the
//! same quantity are duplicates, not a volume signal.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::items::LineItem;

/// Index of BOM codes to their distinct instance quantities.
#[derive(Debug, Default)]
pub struct ScenarioIndex {
    quantities: FxHashMap<String, BTreeSet<Decimal>>,
}

impl ScenarioIndex {
    /// Build the index from the full line-item list.
    ///
    /// Rows without complete identity fields are skipped silently; they can
    /// never participate in a comparison.
    pub fn build(items: &[LineItem<'_>]) -> Self {
        let mut quantities: FxHashMap<String, BTreeSet<Decimal>> = FxHashMap::default();

        for item in items.iter().filter(|item| item.has_identity()) {
            quantities
                .entry(item.bom_code.clone())
                .or_default()
                .insert(item.bom_instance_quantity);
        }

        Self { quantities }
    }

    /// Whether the given BOM code qualifies as a volume scenario.
    pub fn is_volume_bom(&self, bom_code: &str) -> bool {
        self.quantities
            .get(bom_code)
            .is_some_and(|set| set.len() >= 2)
    }

    /// The distinct instance quantities recorded for a BOM code, in
    /// ascending order.
    pub fn quantities(&self, bom_code: &str) -> Option<&BTreeSet<Decimal>> {
        self.quantities.get(bom_code)
    }

    /// Iterate over the qualifying BOM codes.
    ///
    /// Iteration order is unspecified; callers needing determinism sort or
    /// collect into an ordered structure.
    pub fn volume_boms(&self) -> impl Iterator<Item = &str> {
        self.quantities
            .iter()
            .filter(|(_, set)| set.len() >= 2)
            .map(|(code, _)| code.as_str())
    }

    /// Number of qualifying BOM codes.
    #[must_use]
    pub fn volume_bom_count(&self) -> usize {
        self.quantities.values().filter(|set| set.len() >= 2).count()
    }
}
