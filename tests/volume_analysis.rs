//! Integration tests for volume scenario detection and correlation

use rust_decimal::Decimal;
use testresult::TestResult;

use quotient::{
    fixtures,
    ingest::parse_quote,
    scenarios::ScenarioIndex,
    volume::{
        VolumeItem, correlate,
        metrics::{ChangeDirection, Metric},
    },
};

fn payload(items_json: &str) -> String {
    format!(r#"{{"currency": "GBP", "items": [{items_json}]}}"#)
}

fn row(
    item_code: &str,
    bom_code: &str,
    bom_path: &str,
    instance_id: &str,
    instance_qty: u32,
    quoted_rate: &str,
) -> String {
    format!(
        r#"{{
            "itemCode": "{item_code}",
            "itemName": "{item_code} name",
            "bomCode": "{bom_code}",
            "bomPath": "{bom_path}",
            "bomInstanceId": "{instance_id}",
            "bomInstanceQuantity": {instance_qty},
            "quantity": 1,
            "vendorRate": {quoted_rate},
            "baseRate": {quoted_rate},
            "quotedRate": {quoted_rate},
            "additionalCostPerUnit": 0.5,
            "totalAmount": {quoted_rate}
        }}"#
    )
}

#[test]
fn repeated_bom_at_two_quantities_yields_a_minus_twelve_percent_change() -> TestResult {
    // BOM "D" at quantities 10 and 1000; ITM-1 quoted at 50 then 44.
    let json = payload(&[
        row("ITM-1", "D", "D", "i1", 10, "50.0"),
        row("ITM-1", "D", "D", "i2", 1000, "44.0"),
    ]
    .join(","));

    let quote = parse_quote(&json)?;
    let index = ScenarioIndex::build(quote.items());
    let volume = correlate(quote.items(), &index);

    assert_eq!(volume.len(), 1);

    let change = volume
        .first()
        .and_then(|item| item.change(Metric::QuotedRate))
        .ok_or("expected a computable change")?;

    assert_eq!(change.percent_points(), Some(Decimal::new(-1200, 2)));
    assert_eq!(change.direction(), ChangeDirection::CheaperAtScale);

    Ok(())
}

#[test]
fn same_quantity_instances_are_not_a_volume_scenario() -> TestResult {
    let json = payload(&[
        row("ITM-1", "D", "D", "i1", 10, "50.0"),
        row("ITM-1", "D", "D", "i2", 10, "44.0"),
    ]
    .join(","));

    let quote = parse_quote(&json)?;
    let index = ScenarioIndex::build(quote.items());

    assert!(!index.is_volume_bom("D"));
    assert!(correlate(quote.items(), &index).is_empty());

    Ok(())
}

#[test]
fn item_seen_in_one_instance_is_excluded() -> TestResult {
    let json = payload(&[
        row("ITM-1", "D", "D", "i1", 10, "50.0"),
        row("ITM-1", "D", "D", "i2", 1000, "44.0"),
        row("ITM-2", "D", "D", "i1", 10, "9.0"),
    ]
    .join(","));

    let quote = parse_quote(&json)?;
    let index = ScenarioIndex::build(quote.items());
    let volume = correlate(quote.items(), &index);

    let codes: Vec<&str> = volume.iter().map(VolumeItem::item_code).collect();
    assert_eq!(codes, ["ITM-1"]);

    Ok(())
}

#[test]
fn zero_baseline_is_flagged_not_computable() -> TestResult {
    let json = payload(&[
        row("ITM-3", "D", "D", "i1", 10, "0.0"),
        row("ITM-3", "D", "D", "i2", 1000, "44.0"),
    ]
    .join(","));

    let quote = parse_quote(&json)?;
    let index = ScenarioIndex::build(quote.items());
    let volume = correlate(quote.items(), &index);

    let change = volume
        .first()
        .and_then(|item| item.change(Metric::QuotedRate))
        .ok_or("expected a change record")?;

    assert_eq!(change.percent(), None);
    assert_eq!(change.direction(), ChangeDirection::NotComputable);

    Ok(())
}

#[test]
fn metric_selection_does_not_change_membership() -> TestResult {
    let quote = fixtures::sample_quote()?;
    let index = ScenarioIndex::build(quote.items());
    let volume = correlate(quote.items(), &index);

    let codes: Vec<&str> = volume.iter().map(VolumeItem::item_code).collect();

    for metric in Metric::ALL {
        let projected: Vec<&str> = volume
            .iter()
            .filter(|item| item.change(metric).is_some())
            .map(VolumeItem::item_code)
            .collect();

        assert_eq!(projected, codes, "membership drifted for {metric:?}");
    }

    Ok(())
}

#[test]
fn correlation_is_deterministic_across_runs() -> TestResult {
    let quote = fixtures::sample_quote()?;
    let index = ScenarioIndex::build(quote.items());

    let first: Vec<String> = correlate(quote.items(), &index)
        .iter()
        .map(|item| format!("{}@{}", item.item_code(), item.bom_path()))
        .collect();

    let second: Vec<String> = correlate(quote.items(), &index)
        .iter()
        .map(|item| format!("{}@{}", item.item_code(), item.bom_path()))
        .collect();

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn sample_quote_correlates_expected_items() -> TestResult {
    let quote = fixtures::sample_quote()?;
    let index = ScenarioIndex::build(quote.items());
    let volume = correlate(quote.items(), &index);

    let codes: Vec<&str> = volume.iter().map(VolumeItem::item_code).collect();

    // ITM-1 across D's two instances, ITM-5 across the sub-assembly's,
    // ITM-4 across F's. ITM-2 is a singleton and ITM-3 sits under the
    // duplicate-quantity BOM.
    assert_eq!(codes, ["ITM-1", "ITM-5", "ITM-4"]);

    Ok(())
}
