//! BOM paths
//!
//! Hierarchical BOM positions rendered as delimiter-separated strings,
//! e.g. `"Chassis > Drivetrain"`. Matching is hierarchy-sensitive: the
//! same item code under two different paths is two different positions.

use std::fmt;

/// Separator between parent and child BOM segments.
pub const PATH_DELIMITER: &str = " > ";

/// A hierarchical BOM path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BomPath {
    raw: String,
}

impl BomPath {
    /// Create a path from its string form.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The full path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the path is empty (a malformed row).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Iterate over the path segments from root to leaf.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split(PATH_DELIMITER)
    }

    /// The leaf (innermost) segment.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.raw.rsplit(PATH_DELIMITER).next().unwrap_or(&self.raw)
    }

    /// Whether this path equals `ancestor` or sits below it in the
    /// hierarchy.
    ///
    /// `"D"` matches `"D"` and `"D > Sub1"`, but not `"DX"` or `"E"`:
    /// the prefix must be followed by the delimiter to count as a
    /// descendant.
    pub fn is_descendant_or_self(&self, ancestor: &str) -> bool {
        match self.raw.strip_prefix(ancestor) {
            Some("") => true,
            Some(rest) => rest.starts_with(PATH_DELIMITER),
            None => false,
        }
    }
}

impl From<&str> for BomPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for BomPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
