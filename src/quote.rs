//! Quotes
//!
//! A `Quote` is the validated container the rest of the pipeline works
//! from: the full line-item list, the quote currency, and any aggregates
//! the upstream analytics service already computed (carried through for
//! display, never recomputed here).

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors related to quote construction or totals.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// A monetary field's currency differs from the quote currency.
    #[error("item {item}: {field} has currency {actual}, but quote has currency {expected}")]
    CurrencyMismatch {
        /// Index of the offending line item.
        item: usize,

        /// Name of the monetary field that mismatched.
        field: &'static str,

        /// ISO code carried by the field.
        actual: &'static str,

        /// ISO code of the quote currency.
        expected: &'static str,
    },

    /// A line item was not found in the quote.
    #[error("item {0} not found")]
    ItemNotFound(usize),

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Aggregates computed upstream and passed through for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteSummary<'a> {
    /// Total quote value across all line items.
    pub total_value: Money<'a, Currency>,

    /// Sum of currency-normalised base amounts.
    pub base_amount: Money<'a, Currency>,

    /// Grand total after all additional costs.
    pub grand_total: Money<'a, Currency>,
}

/// A procurement quote: line items plus the quote currency.
#[derive(Debug)]
pub struct Quote<'a> {
    items: Vec<LineItem<'a>>,
    currency: &'static Currency,
    summary: Option<QuoteSummary<'a>>,
}

impl<'a> Quote<'a> {
    /// Create an empty quote in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Quote {
            items: Vec::new(),
            currency,
            summary: None,
        }
    }

    /// Create a quote with the given items.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteError::CurrencyMismatch`] if any monetary field of
    /// any item carries a different currency than the quote.
    pub fn with_items(
        items: impl Into<Vec<LineItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, QuoteError> {
        let items = items.into();

        items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| check_item_currency(i, item, currency))?;

        Ok(Quote {
            items,
            currency,
            summary: None,
        })
    }

    /// Attach upstream aggregates to the quote.
    #[must_use]
    pub fn with_summary(mut self, summary: QuoteSummary<'a>) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Sum of the line totals.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteError::Money`] if money addition fails.
    pub fn subtotal(&'a self) -> Result<Money<'a, Currency>, QuoteError> {
        let total = self.items.iter().try_fold(
            Money::from_minor(0, self.currency),
            |acc, item| acc.add(item.total_amount),
        )?;

        Ok(total)
    }

    /// Get a line item by its index.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteError::ItemNotFound`] if the index is out of range.
    pub fn get_item(&'a self, item: usize) -> Result<&'a LineItem<'a>, QuoteError> {
        self.items.get(item).ok_or(QuoteError::ItemNotFound(item))
    }

    /// Iterate over the line items.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.items.iter()
    }

    /// The full line-item slice.
    #[must_use]
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Number of line items in the quote.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the quote has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The quote currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Upstream aggregates, when the payload carried them.
    #[must_use]
    pub fn summary(&self) -> Option<&QuoteSummary<'a>> {
        self.summary.as_ref()
    }
}

fn check_item_currency(
    index: usize,
    item: &LineItem<'_>,
    expected: &'static Currency,
) -> Result<(), QuoteError> {
    let fields: [(&'static str, &Money<'_, Currency>); 5] = [
        ("vendor_rate", &item.vendor_rate),
        ("base_rate", &item.base_rate),
        ("quoted_rate", &item.quoted_rate),
        ("additional_cost_per_unit", &item.additional_cost_per_unit),
        ("total_amount", &item.total_amount),
    ];

    for (field, money) in fields {
        let actual = money.currency();

        if actual != expected {
            return Err(QuoteError::CurrencyMismatch {
                item: index,
                field,
                actual: actual.iso_alpha_code,
                expected: expected.iso_alpha_code,
            });
        }
    }

    Ok(())
}
