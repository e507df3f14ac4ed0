//! Line items
//!
//! One `LineItem` per item per BOM instance, exactly as the upstream
//! analytics API reports them. The same catalog item appears once for
//! every insertion of its BOM into the quote.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{items::path::BomPath, tags::TagSet};

pub mod path;

/// A single quoted line: one item within one BOM instance.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    /// Catalog item code, unique within a BOM instance.
    pub item_code: String,

    /// Human-readable item name.
    pub item_name: String,

    /// Identifier of the BOM this item belongs to.
    pub bom_code: String,

    /// Hierarchical position of that BOM within the quote.
    pub bom_path: BomPath,

    /// Distinguishes repeated insertions of the same BOM code.
    pub bom_instance_id: String,

    /// Quantity of the BOM insertion itself (the volume dimension).
    pub bom_instance_quantity: Decimal,

    /// Item quantity within the BOM instance.
    pub quantity: Decimal,

    /// Per-unit rate as quoted by the vendor.
    pub vendor_rate: Money<'a, Currency>,

    /// Per-unit rate after currency normalisation.
    pub base_rate: Money<'a, Currency>,

    /// Final per-unit rate presented to the customer.
    pub quoted_rate: Money<'a, Currency>,

    /// Additional per-unit cost applied on top of the base rate.
    pub additional_cost_per_unit: Money<'a, Currency>,

    /// Total amount for this line.
    pub total_amount: Money<'a, Currency>,

    /// Vendor the rate was sourced from, when known.
    pub vendor_name: Option<String>,

    /// Category labels.
    pub tags: TagSet,
}

impl LineItem<'_> {
    /// Whether the row carries the identity fields grouping relies on.
    ///
    /// Rows missing an item code, BOM code, or BOM path are carried for
    /// display but silently excluded from scenario detection and
    /// correlation.
    pub fn has_identity(&self) -> bool {
        !self.item_code.is_empty() && !self.bom_code.is_empty() && !self.bom_path.is_empty()
    }
}
