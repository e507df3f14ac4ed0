//! Volume correlation
//!
//! Correlates occurrences of the same item across BOM quantity instances.
//! Two rows belong to the same [`VolumeItem`] iff they share an identical
//! item code AND an identical BOM path — the match is hierarchy-sensitive,
//! so an item under `"A > Sub1"` never correlates with the same code under
//! `"A > Sub2"`.

use rust_decimal::Decimal;
use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    items::{LineItem, path::BomPath},
    scenarios::ScenarioIndex,
    tags::TagSet,
    volume::metrics::{Metric, MetricChange},
};

pub mod metrics;

/// One occurrence of an item within one BOM instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInstance<'a> {
    /// Identifier of the BOM insertion this occurrence belongs to.
    pub bom_instance_id: String,

    /// Quantity of the BOM insertion (the volume dimension).
    pub bom_instance_quantity: Decimal,

    /// Item quantity within the instance.
    pub quantity: Decimal,

    /// Per-unit rate as quoted by the vendor.
    pub vendor_rate: Money<'a, Currency>,

    /// Per-unit rate after currency normalisation.
    pub base_rate: Money<'a, Currency>,

    /// Final per-unit rate presented to the customer.
    pub quoted_rate: Money<'a, Currency>,

    /// Additional per-unit cost.
    pub additional_cost_per_unit: Money<'a, Currency>,

    /// Total amount for the occurrence.
    pub total_amount: Money<'a, Currency>,
}

impl<'a> From<&LineItem<'a>> for ItemInstance<'a> {
    fn from(item: &LineItem<'a>) -> Self {
        ItemInstance {
            bom_instance_id: item.bom_instance_id.clone(),
            bom_instance_quantity: item.bom_instance_quantity,
            quantity: item.quantity,
            vendor_rate: item.vendor_rate,
            base_rate: item.base_rate,
            quoted_rate: item.quoted_rate,
            additional_cost_per_unit: item.additional_cost_per_unit,
            total_amount: item.total_amount,
        }
    }
}

/// An item correlated across two or more BOM quantity instances.
#[derive(Debug, Clone)]
pub struct VolumeItem<'a> {
    item_code: String,
    item_name: String,
    bom_code: String,
    bom_path: BomPath,
    vendor_name: Option<String>,
    tags: TagSet,
    instances: SmallVec<[ItemInstance<'a>; 4]>,
}

impl<'a> VolumeItem<'a> {
    /// Create a volume item, ordering instances ascending by instance
    /// quantity. Equal quantities keep their given order.
    #[must_use]
    pub fn new(
        item_code: impl Into<String>,
        item_name: impl Into<String>,
        bom_code: impl Into<String>,
        bom_path: BomPath,
        vendor_name: Option<String>,
        tags: TagSet,
        mut instances: SmallVec<[ItemInstance<'a>; 4]>,
    ) -> Self {
        instances.sort_by(|a, b| a.bom_instance_quantity.cmp(&b.bom_instance_quantity));

        VolumeItem {
            item_code: item_code.into(),
            item_name: item_name.into(),
            bom_code: bom_code.into(),
            bom_path,
            vendor_name,
            tags,
            instances,
        }
    }

    /// Catalog item code.
    #[must_use]
    pub fn item_code(&self) -> &str {
        &self.item_code
    }

    /// Human-readable item name.
    #[must_use]
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    /// BOM code the item sits under.
    #[must_use]
    pub fn bom_code(&self) -> &str {
        &self.bom_code
    }

    /// Hierarchical BOM position shared by all instances.
    #[must_use]
    pub fn bom_path(&self) -> &BomPath {
        &self.bom_path
    }

    /// Vendor the rates were sourced from, when known.
    #[must_use]
    pub fn vendor_name(&self) -> Option<&str> {
        self.vendor_name.as_deref()
    }

    /// Category labels, merged across the correlated rows.
    #[must_use]
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Instances ordered ascending by BOM instance quantity.
    #[must_use]
    pub fn instances(&self) -> &[ItemInstance<'a>] {
        &self.instances
    }

    /// Project the selected metric across the instances.
    pub fn values(&self, metric: Metric) -> impl Iterator<Item = Money<'a, Currency>> + '_ {
        self.instances.iter().map(move |inst| metric.value(inst))
    }

    /// Change of the selected metric from the lowest-quantity instance to
    /// the highest-quantity instance.
    ///
    /// Returns `None` when fewer than two instances are present (no
    /// comparison possible). A zero baseline yields a change whose percent
    /// is flagged not computable, never `0` or an infinity.
    pub fn change(&self, metric: Metric) -> Option<MetricChange<'a>> {
        if self.instances.len() < 2 {
            return None;
        }

        let first = self.instances.first()?;
        let last = self.instances.last()?;

        Some(MetricChange::between(first, last, metric))
    }
}

/// Correlate line items across the instances of qualifying BOMs.
///
/// One [`VolumeItem`] is produced per `(item_code, bom_path)` pair that
/// occurs in at least two distinct BOM instances under a volume-scenario
/// BOM. Rows with incomplete identity are skipped, as are items seen in
/// only one instance. Output order is first-seen input order.
pub fn correlate<'a>(items: &[LineItem<'a>], index: &ScenarioIndex) -> Vec<VolumeItem<'a>> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: FxHashMap<(String, String), GroupBuilder<'a>> = FxHashMap::default();

    for item in items
        .iter()
        .filter(|item| item.has_identity() && index.is_volume_bom(&item.bom_code))
    {
        let key = (item.item_code.clone(), item.bom_path.as_str().to_string());

        let builder = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            GroupBuilder::seed(item)
        });

        builder.push(item);
    }

    order
        .into_iter()
        .filter_map(|key| groups.remove(&key))
        .filter(GroupBuilder::qualifies)
        .map(GroupBuilder::build)
        .collect()
}

struct GroupBuilder<'a> {
    item_code: String,
    item_name: String,
    bom_code: String,
    bom_path: BomPath,
    vendor_name: Option<String>,
    tags: TagSet,
    instances: SmallVec<[ItemInstance<'a>; 4]>,
}

impl<'a> GroupBuilder<'a> {
    fn seed(item: &LineItem<'a>) -> Self {
        GroupBuilder {
            item_code: item.item_code.clone(),
            item_name: item.item_name.clone(),
            bom_code: item.bom_code.clone(),
            bom_path: item.bom_path.clone(),
            vendor_name: None,
            tags: TagSet::empty(),
            instances: SmallVec::new(),
        }
    }

    fn push(&mut self, item: &LineItem<'a>) {
        if self.vendor_name.is_none() {
            self.vendor_name = item.vendor_name.clone();
        }

        for tag in item.tags.iter() {
            self.tags.add(tag);
        }

        self.instances.push(ItemInstance::from(item));
    }

    /// At least two distinct instance ids are needed for a comparison.
    fn qualifies(&self) -> bool {
        let distinct: FxHashSet<&str> = self
            .instances
            .iter()
            .map(|inst| inst.bom_instance_id.as_str())
            .collect();

        distinct.len() >= 2
    }

    fn build(self) -> VolumeItem<'a> {
        VolumeItem::new(
            self.item_code,
            self.item_name,
            self.bom_code,
            self.bom_path,
            self.vendor_name,
            self.tags,
            self.instances,
        )
    }
}
