//! Payload ingest
//!
//! Deserialises the JSON payload produced by the upstream analytics
//! service into a validated [`Quote`]. Field names follow the API's
//! camelCase convention. Rows with missing identity fields are carried
//! through — the grouping stages exclude them later — but a currency code
//! outside the ISO table is a hard error, since no monetary value can be
//! represented without one.

use std::{fs, io, path::Path};

use rust_decimal::Decimal;
use rusty_money::Money;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    currency,
    items::{LineItem, path::BomPath},
    quote::{Quote, QuoteError, QuoteSummary},
    tags::TagSet,
};

/// Errors reading or converting an analytics payload.
#[derive(Debug, Error)]
pub enum IngestError {
    /// IO error reading the payload.
    #[error("failed to read payload: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing error.
    #[error("failed to parse payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload's currency code is not in the ISO table.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Quote construction error.
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

/// Top-level payload shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePayload {
    /// 3-letter ISO currency code for every monetary figure.
    pub currency: String,

    /// Flat line-item rows, one per item per BOM instance.
    pub items: Vec<LineItemRecord>,

    /// Precomputed aggregates, when the service sent them.
    #[serde(default)]
    pub summary: Option<SummaryRecord>,
}

/// One line-item row as the API sends it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRecord {
    /// Catalog item code.
    #[serde(default)]
    pub item_code: String,

    /// Item name.
    #[serde(default)]
    pub item_name: String,

    /// BOM identifier.
    #[serde(default)]
    pub bom_code: String,

    /// Hierarchical BOM path.
    #[serde(default)]
    pub bom_path: String,

    /// BOM insertion identifier.
    #[serde(default)]
    pub bom_instance_id: String,

    /// Quantity of the BOM insertion.
    pub bom_instance_quantity: Decimal,

    /// Item quantity within the instance.
    pub quantity: Decimal,

    /// Vendor-quoted per-unit rate.
    pub vendor_rate: Decimal,

    /// Currency-normalised per-unit rate.
    pub base_rate: Decimal,

    /// Final quoted per-unit rate.
    pub quoted_rate: Decimal,

    /// Additional per-unit cost.
    pub additional_cost_per_unit: Decimal,

    /// Line total.
    pub total_amount: Decimal,

    /// Vendor name, when known.
    #[serde(default)]
    pub vendor_name: Option<String>,

    /// Category labels.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Precomputed aggregates passed through for display.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    /// Total quote value.
    pub total_value: Decimal,

    /// Sum of base amounts.
    pub base_amount: Decimal,

    /// Grand total.
    pub grand_total: Decimal,
}

/// Parse a quote from a JSON string.
///
/// # Errors
///
/// Returns an [`IngestError`] if the JSON is malformed or the currency
/// code is unknown.
pub fn parse_quote(json: &str) -> Result<Quote<'static>, IngestError> {
    build_quote(serde_json::from_str(json)?)
}

/// Parse a quote from a reader.
///
/// # Errors
///
/// Returns an [`IngestError`] if reading fails, the JSON is malformed, or
/// the currency code is unknown.
pub fn read_quote(reader: impl io::Read) -> Result<Quote<'static>, IngestError> {
    build_quote(serde_json::from_reader(reader)?)
}

/// Load a quote from a JSON file on disk.
///
/// # Errors
///
/// Returns an [`IngestError`] if the file cannot be read or parsed.
pub fn load_quote(path: impl AsRef<Path>) -> Result<Quote<'static>, IngestError> {
    let json = fs::read_to_string(path)?;

    parse_quote(&json)
}

fn build_quote(payload: QuotePayload) -> Result<Quote<'static>, IngestError> {
    let currency = currency::find(&payload.currency)
        .ok_or_else(|| IngestError::UnknownCurrency(payload.currency.clone()))?;

    let items: Vec<LineItem<'static>> = payload
        .items
        .into_iter()
        .map(|record| LineItem {
            item_code: record.item_code,
            item_name: record.item_name,
            bom_code: record.bom_code,
            bom_path: BomPath::new(record.bom_path),
            bom_instance_id: record.bom_instance_id,
            bom_instance_quantity: record.bom_instance_quantity,
            quantity: record.quantity,
            vendor_rate: Money::from_decimal(record.vendor_rate, currency),
            base_rate: Money::from_decimal(record.base_rate, currency),
            quoted_rate: Money::from_decimal(record.quoted_rate, currency),
            additional_cost_per_unit: Money::from_decimal(
                record.additional_cost_per_unit,
                currency,
            ),
            total_amount: Money::from_decimal(record.total_amount, currency),
            vendor_name: record.vendor_name,
            tags: record.tags.into_iter().collect::<TagSet>(),
        })
        .collect();

    let quote = Quote::with_items(items, currency)?;

    match payload.summary {
        Some(summary) => Ok(quote.with_summary(QuoteSummary {
            total_value: Money::from_decimal(summary.total_value, currency),
            base_amount: Money::from_decimal(summary.base_amount, currency),
            grand_total: Money::from_decimal(summary.grand_total, currency),
        })),
        None => Ok(quote),
    }
}
