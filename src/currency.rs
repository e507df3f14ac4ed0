//! Currency display lookup
//!
//! Maps 3-letter ISO codes to display symbols via the static ISO table.
//! Unknown codes fall back to the code itself followed by a space, so
//! display formatting stays total even for exotic upstream data.

use std::borrow::Cow;

use rusty_money::iso::{self, Currency};

/// Look up a currency by its 3-letter ISO code.
pub fn find(code: &str) -> Option<&'static Currency> {
    iso::find(code)
}

/// Return the display symbol for a currency code.
///
/// Known codes resolve through the ISO table (`"GBP"` becomes `"£"`).
/// Unknown codes fall back to the code followed by a space (`"XXX "`),
/// which still reads acceptably as a value prefix.
pub fn symbol(code: &str) -> Cow<'static, str> {
    match iso::find(code) {
        Some(currency) => Cow::Borrowed(currency.symbol),
        None => Cow::Owned(format!("{code} ")),
    }
}
