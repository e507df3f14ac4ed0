//! Metric projection
//!
//! A small closed set of per-unit metrics that can drive the volume
//! comparison. Selecting a metric is a read-time projection over the
//! stored instances; it never mutates them and never changes which items
//! qualified as volume scenarios.

use std::str::FromStr;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::volume::ItemInstance;

/// The per-unit figure a volume comparison is projected on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Final per-unit rate presented to the customer.
    #[default]
    QuotedRate,

    /// Per-unit rate as quoted by the vendor.
    VendorRate,

    /// Per-unit rate after currency normalisation.
    BaseRate,

    /// Additional per-unit cost.
    AdditionalCostPerUnit,

    /// Total amount for the occurrence.
    TotalCost,
}

impl Metric {
    /// Every selectable metric, in display order.
    pub const ALL: [Metric; 5] = [
        Metric::QuotedRate,
        Metric::VendorRate,
        Metric::BaseRate,
        Metric::AdditionalCostPerUnit,
        Metric::TotalCost,
    ];

    /// The metric's value for one instance.
    pub fn value<'a>(self, instance: &ItemInstance<'a>) -> Money<'a, Currency> {
        match self {
            Metric::QuotedRate => instance.quoted_rate,
            Metric::VendorRate => instance.vendor_rate,
            Metric::BaseRate => instance.base_rate,
            Metric::AdditionalCostPerUnit => instance.additional_cost_per_unit,
            Metric::TotalCost => instance.total_amount,
        }
    }

    /// Human-readable column label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Metric::QuotedRate => "Quoted Rate",
            Metric::VendorRate => "Vendor Rate",
            Metric::BaseRate => "Base Rate",
            Metric::AdditionalCostPerUnit => "Additional Cost / Unit",
            Metric::TotalCost => "Total Cost",
        }
    }
}

/// Error parsing a metric name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown metric: {0}")]
pub struct ParseMetricError(String);

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quoted-rate" => Ok(Metric::QuotedRate),
            "vendor-rate" => Ok(Metric::VendorRate),
            "base-rate" => Ok(Metric::BaseRate),
            "additional-cost" => Ok(Metric::AdditionalCostPerUnit),
            "total-cost" => Ok(Metric::TotalCost),
            other => Err(ParseMetricError(other.to_string())),
        }
    }
}

/// Direction of a metric change between the lowest- and highest-quantity
/// instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    /// The per-unit figure drops at higher volume.
    CheaperAtScale,

    /// The per-unit figure rises at higher volume.
    MoreExpensive,

    /// No change between baseline and final instance.
    Unchanged,

    /// The baseline is zero, so a relative change is undefined.
    NotComputable,
}

/// Change of one metric from the lowest-quantity instance (baseline) to
/// the highest-quantity instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricChange<'a> {
    baseline_quantity: Decimal,
    final_quantity: Decimal,
    baseline: Money<'a, Currency>,
    final_value: Money<'a, Currency>,
    delta: Money<'a, Currency>,
    percent: Option<Percentage>,
}

impl<'a> MetricChange<'a> {
    /// Compute the change of `metric` between two instances.
    ///
    /// The delta is computed in decimal space so the result is total: no
    /// money arithmetic error is possible for same-currency instances. A
    /// zero baseline makes the relative change undefined; the percent is
    /// `None` in that case, never `0` or an infinity.
    pub fn between(first: &ItemInstance<'a>, last: &ItemInstance<'a>, metric: Metric) -> Self {
        let baseline = metric.value(first);
        let final_value = metric.value(last);

        let baseline_dec = *baseline.amount();
        let delta_dec = *final_value.amount() - baseline_dec;

        let percent = if baseline_dec.is_zero() {
            None
        } else {
            Some(Percentage::from(delta_dec / baseline_dec))
        };

        MetricChange {
            baseline_quantity: first.bom_instance_quantity,
            final_quantity: last.bom_instance_quantity,
            baseline,
            final_value,
            delta: Money::from_decimal(delta_dec, baseline.currency()),
            percent,
        }
    }

    /// BOM instance quantity of the baseline instance.
    #[must_use]
    pub fn baseline_quantity(&self) -> Decimal {
        self.baseline_quantity
    }

    /// BOM instance quantity of the final instance.
    #[must_use]
    pub fn final_quantity(&self) -> Decimal {
        self.final_quantity
    }

    /// Metric value at the lowest-quantity instance.
    #[must_use]
    pub fn baseline(&self) -> Money<'a, Currency> {
        self.baseline
    }

    /// Metric value at the highest-quantity instance.
    #[must_use]
    pub fn final_value(&self) -> Money<'a, Currency> {
        self.final_value
    }

    /// Absolute change, final minus baseline.
    #[must_use]
    pub fn delta(&self) -> Money<'a, Currency> {
        self.delta
    }

    /// Fractional change relative to the baseline, or `None` when the
    /// baseline is zero.
    #[must_use]
    pub fn percent(&self) -> Option<Percentage> {
        self.percent
    }

    /// Raw fractional change as a decimal, for ordering.
    #[must_use]
    pub fn percent_fraction(&self) -> Option<Decimal> {
        self.percent.map(|p| p * Decimal::ONE)
    }

    /// Change in percent points, rounded to two decimal places, for
    /// display.
    #[must_use]
    pub fn percent_points(&self) -> Option<Decimal> {
        self.percent_fraction()
            .map(|fraction| (fraction * Decimal::from(100)).round_dp(2))
    }

    /// Classify the change for summary counts.
    #[must_use]
    pub fn direction(&self) -> ChangeDirection {
        if self.percent.is_none() {
            return ChangeDirection::NotComputable;
        }

        let delta = *self.delta.amount();

        if delta.is_zero() {
            ChangeDirection::Unchanged
        } else if delta.is_sign_negative() {
            ChangeDirection::CheaperAtScale
        } else {
            ChangeDirection::MoreExpensive
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use smallvec::smallvec;

    use crate::{items::path::BomPath, tags::TagSet, volume::VolumeItem};

    use super::*;

    fn instance(id: &str, instance_qty: u32, quoted_minor: i64) -> ItemInstance<'static> {
        ItemInstance {
            bom_instance_id: id.to_string(),
            bom_instance_quantity: Decimal::from(instance_qty),
            quantity: Decimal::ONE,
            vendor_rate: Money::from_minor(quoted_minor + 100, GBP),
            base_rate: Money::from_minor(quoted_minor + 50, GBP),
            quoted_rate: Money::from_minor(quoted_minor, GBP),
            additional_cost_per_unit: Money::from_minor(0, GBP),
            total_amount: Money::from_minor(quoted_minor * 10, GBP),
        }
    }

    #[test]
    fn percent_matches_last_minus_first_over_first() {
        // 50.00 at qty 10 down to 44.00 at qty 1000: -12%.
        let change = MetricChange::between(
            &instance("i1", 10, 5000),
            &instance("i2", 1000, 4400),
            Metric::QuotedRate,
        );

        assert_eq!(change.percent_points(), Some(Decimal::new(-1200, 2)));
        assert_eq!(change.delta(), Money::from_minor(-600, GBP));
        assert_eq!(change.direction(), ChangeDirection::CheaperAtScale);
    }

    #[test]
    fn zero_baseline_is_not_computable() {
        let change = MetricChange::between(
            &instance("i1", 10, 0),
            &instance("i2", 1000, 4400),
            Metric::QuotedRate,
        );

        assert_eq!(change.percent(), None);
        assert_eq!(change.percent_points(), None);
        assert_eq!(change.direction(), ChangeDirection::NotComputable);

        // The absolute delta is still reported.
        assert_eq!(change.delta(), Money::from_minor(4400, GBP));
    }

    #[test]
    fn unchanged_metric_is_zero_percent_not_none() {
        let change = MetricChange::between(
            &instance("i1", 10, 5000),
            &instance("i2", 1000, 5000),
            Metric::QuotedRate,
        );

        assert_eq!(change.percent_points(), Some(Decimal::ZERO));
        assert_eq!(change.direction(), ChangeDirection::Unchanged);
    }

    #[test]
    fn rising_rate_is_more_expensive() {
        let change = MetricChange::between(
            &instance("i1", 10, 4000),
            &instance("i2", 1000, 5000),
            Metric::QuotedRate,
        );

        assert_eq!(change.percent_points(), Some(Decimal::from(25)));
        assert_eq!(change.direction(), ChangeDirection::MoreExpensive);
    }

    #[test]
    fn each_metric_projects_its_own_field() {
        let inst = instance("i1", 10, 5000);

        assert_eq!(Metric::QuotedRate.value(&inst), Money::from_minor(5000, GBP));
        assert_eq!(Metric::VendorRate.value(&inst), Money::from_minor(5100, GBP));
        assert_eq!(Metric::BaseRate.value(&inst), Money::from_minor(5050, GBP));
        assert_eq!(
            Metric::AdditionalCostPerUnit.value(&inst),
            Money::from_minor(0, GBP)
        );
        assert_eq!(
            Metric::TotalCost.value(&inst),
            Money::from_minor(50_000, GBP)
        );
    }

    #[test]
    fn metric_parses_from_kebab_case_names() {
        assert_eq!("quoted-rate".parse(), Ok(Metric::QuotedRate));
        assert_eq!("vendor-rate".parse(), Ok(Metric::VendorRate));
        assert_eq!("base-rate".parse(), Ok(Metric::BaseRate));
        assert_eq!("additional-cost".parse(), Ok(Metric::AdditionalCostPerUnit));
        assert_eq!("total-cost".parse(), Ok(Metric::TotalCost));
        assert!("margin".parse::<Metric>().is_err());
    }

    #[test]
    fn change_on_volume_item_uses_quantity_order() {
        let item = VolumeItem::new(
            "ITM-1",
            "M8 bolt",
            "D",
            BomPath::new("D"),
            None,
            TagSet::empty(),
            smallvec![instance("i2", 1000, 4400), instance("i1", 10, 5000)],
        );

        let change = item.change(Metric::QuotedRate);

        assert_eq!(
            change.map(|c| (c.baseline_quantity(), c.final_quantity())),
            Some((Decimal::from(10), Decimal::from(1000)))
        );
    }

    #[test]
    fn change_requires_two_instances() {
        let item = VolumeItem::new(
            "ITM-1",
            "M8 bolt",
            "D",
            BomPath::new("D"),
            None,
            TagSet::empty(),
            smallvec![instance("i1", 10, 5000)],
        );

        assert!(item.change(Metric::QuotedRate).is_none());
    }

    #[test]
    fn reprojection_does_not_mutate_instances() {
        let item = VolumeItem::new(
            "ITM-1",
            "M8 bolt",
            "D",
            BomPath::new("D"),
            None,
            TagSet::empty(),
            smallvec![instance("i1", 10, 5000), instance("i2", 1000, 4400)],
        );

        let before: Vec<ItemInstance<'_>> = item.instances().to_vec();

        let _ = item.change(Metric::VendorRate);
        let _ = item.change(Metric::TotalCost);

        assert_eq!(item.instances(), before.as_slice());
    }
}
