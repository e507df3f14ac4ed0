//! Fixtures
//!
//! A deterministic sample payload for tests and the demo binary, shaped
//! exactly like the analytics service output. Nothing here is generated
//! at random; the numbers are chosen so every change direction shows up
//! at least once.

use crate::{ingest, ingest::IngestError, quote::Quote};

/// Sample analytics payload: one quote with two volume-scenario BOMs, a
/// duplicate-quantity BOM, nested sub-assemblies, and a zero-baseline
/// item.
pub const SAMPLE_QUOTE_JSON: &str = r#"{
    "currency": "GBP",
    "items": [
        {
            "itemCode": "ITM-1",
            "itemName": "M8 hex bolt",
            "bomCode": "D",
            "bomPath": "D",
            "bomInstanceId": "D-i1",
            "bomInstanceQuantity": 10,
            "quantity": 40,
            "vendorRate": 48.50,
            "baseRate": 49.00,
            "quotedRate": 50.00,
            "additionalCostPerUnit": 1.00,
            "totalAmount": 2000.00,
            "vendorName": "Acme Fasteners",
            "tags": ["fastener", "steel"]
        },
        {
            "itemCode": "ITM-1",
            "itemName": "M8 hex bolt",
            "bomCode": "D",
            "bomPath": "D",
            "bomInstanceId": "D-i2",
            "bomInstanceQuantity": 1000,
            "quantity": 4000,
            "vendorRate": 42.80,
            "baseRate": 43.20,
            "quotedRate": 44.00,
            "additionalCostPerUnit": 0.80,
            "totalAmount": 176000.00,
            "vendorName": "Acme Fasteners",
            "tags": ["fastener", "steel"]
        },
        {
            "itemCode": "ITM-2",
            "itemName": "Spring washer",
            "bomCode": "D",
            "bomPath": "D",
            "bomInstanceId": "D-i1",
            "bomInstanceQuantity": 10,
            "quantity": 40,
            "vendorRate": 8.00,
            "baseRate": 8.40,
            "quotedRate": 9.00,
            "additionalCostPerUnit": 0.20,
            "totalAmount": 360.00,
            "vendorName": "Bolton Supply",
            "tags": ["fastener"]
        },
        {
            "itemCode": "ITM-5",
            "itemName": "Locking pin",
            "bomCode": "SUB-1",
            "bomPath": "D > Sub1",
            "bomInstanceId": "S-i1",
            "bomInstanceQuantity": 20,
            "quantity": 20,
            "vendorRate": 2.00,
            "baseRate": 2.10,
            "quotedRate": 2.20,
            "additionalCostPerUnit": 0.05,
            "totalAmount": 44.00,
            "vendorName": "Bolton Supply",
            "tags": ["fastener", "small-parts"]
        },
        {
            "itemCode": "ITM-5",
            "itemName": "Locking pin",
            "bomCode": "SUB-1",
            "bomPath": "D > Sub1",
            "bomInstanceId": "S-i2",
            "bomInstanceQuantity": 2000,
            "quantity": 2000,
            "vendorRate": 2.00,
            "baseRate": 2.10,
            "quotedRate": 2.20,
            "additionalCostPerUnit": 0.05,
            "totalAmount": 4400.00,
            "vendorName": "Bolton Supply",
            "tags": ["fastener", "small-parts"]
        },
        {
            "itemCode": "ITM-3",
            "itemName": "Mounting bracket",
            "bomCode": "E",
            "bomPath": "E",
            "bomInstanceId": "E-i1",
            "bomInstanceQuantity": 50,
            "quantity": 100,
            "vendorRate": 18.00,
            "baseRate": 19.00,
            "quotedRate": 20.00,
            "additionalCostPerUnit": 0.50,
            "totalAmount": 2000.00,
            "vendorName": "Acme Fasteners",
            "tags": ["sheet-metal"]
        },
        {
            "itemCode": "ITM-3",
            "itemName": "Mounting bracket",
            "bomCode": "E",
            "bomPath": "E",
            "bomInstanceId": "E-i2",
            "bomInstanceQuantity": 50,
            "quantity": 100,
            "vendorRate": 18.00,
            "baseRate": 19.00,
            "quotedRate": 20.00,
            "additionalCostPerUnit": 0.50,
            "totalAmount": 2000.00,
            "vendorName": "Acme Fasteners",
            "tags": ["sheet-metal"]
        },
        {
            "itemCode": "ITM-4",
            "itemName": "Rubber gasket",
            "bomCode": "F",
            "bomPath": "F",
            "bomInstanceId": "F-i1",
            "bomInstanceQuantity": 10,
            "quantity": 10,
            "vendorRate": 0.00,
            "baseRate": 0.00,
            "quotedRate": 0.00,
            "additionalCostPerUnit": 0.00,
            "totalAmount": 0.00,
            "vendorName": "Sealtech",
            "tags": ["rubber"]
        },
        {
            "itemCode": "ITM-4",
            "itemName": "Rubber gasket",
            "bomCode": "F",
            "bomPath": "F",
            "bomInstanceId": "F-i2",
            "bomInstanceQuantity": 500,
            "quantity": 500,
            "vendorRate": 1.20,
            "baseRate": 1.35,
            "quotedRate": 1.50,
            "additionalCostPerUnit": 0.10,
            "totalAmount": 750.00,
            "vendorName": "Sealtech",
            "tags": ["rubber"]
        }
    ],
    "summary": {
        "totalValue": 187554.00,
        "baseAmount": 182400.00,
        "grandTotal": 189340.00
    }
}"#;

/// Parse the sample payload into a quote.
///
/// # Errors
///
/// Returns an [`IngestError`] if the embedded payload fails to parse,
/// which would indicate a broken fixture.
pub fn sample_quote() -> Result<Quote<'static>, IngestError> {
    ingest::parse_quote(SAMPLE_QUOTE_JSON)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::scenarios::ScenarioIndex;

    use super::*;

    #[test]
    fn sample_quote_parses() -> TestResult {
        let quote = sample_quote()?;

        assert_eq!(quote.len(), 9);
        assert!(quote.summary().is_some());

        Ok(())
    }

    #[test]
    fn sample_quote_contains_the_expected_scenarios() -> TestResult {
        let quote = sample_quote()?;
        let index = ScenarioIndex::build(quote.items());

        // D and SUB-1 and F vary in quantity; E repeats at the same
        // quantity and must not qualify.
        assert!(index.is_volume_bom("D"));
        assert!(index.is_volume_bom("SUB-1"));
        assert!(index.is_volume_bom("F"));
        assert!(!index.is_volume_bom("E"));

        Ok(())
    }
}
