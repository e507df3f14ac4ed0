//! View pipeline
//!
//! Filtering, sorting and pagination over the correlated volume items.
//! The pipeline holds no state of its own: every invocation is a total
//! function of the item list, the selected metric and a [`ViewParams`]
//! configuration the caller owns and threads across recomputations.

use std::cmp::Ordering;

use crate::volume::{
    VolumeItem,
    metrics::{ChangeDirection, Metric, MetricChange},
};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Filter predicates applied to the volume item list.
///
/// `None` lists mean "no constraint"; an empty allow-list matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Case-insensitive substring match over item code and name.
    pub search: Option<String>,

    /// Vendor allow-list.
    pub vendors: Option<Vec<String>>,

    /// Category tag allow-list; an item matches if any of its tags is
    /// listed.
    pub tags: Option<Vec<String>>,

    /// BOM path allow-list. Filtering by a parent path includes all of
    /// its descendants.
    pub bom_paths: Option<Vec<String>>,
}

impl ItemFilter {
    /// Whether the item passes every configured predicate.
    pub fn matches(&self, item: &VolumeItem<'_>) -> bool {
        self.matches_search(item)
            && self.matches_vendor(item)
            && self.matches_tags(item)
            && self.matches_bom_path(item)
    }

    fn matches_search(&self, item: &VolumeItem<'_>) -> bool {
        let Some(needle) = self.search.as_deref() else {
            return true;
        };

        let needle = needle.to_lowercase();

        item.item_code().to_lowercase().contains(&needle)
            || item.item_name().to_lowercase().contains(&needle)
    }

    fn matches_vendor(&self, item: &VolumeItem<'_>) -> bool {
        let Some(vendors) = self.vendors.as_deref() else {
            return true;
        };

        item.vendor_name()
            .is_some_and(|vendor| vendors.iter().any(|allowed| allowed == vendor))
    }

    fn matches_tags(&self, item: &VolumeItem<'_>) -> bool {
        let Some(tags) = self.tags.as_deref() else {
            return true;
        };

        item.tags().intersects_slice(tags)
    }

    fn matches_bom_path(&self, item: &VolumeItem<'_>) -> bool {
        let Some(paths) = self.bom_paths.as_deref() else {
            return true;
        };

        paths
            .iter()
            .any(|path| item.bom_path().is_descendant_or_self(path))
    }
}

/// Sortable columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortColumn {
    /// Catalog item code.
    #[default]
    ItemCode,

    /// Item name.
    ItemName,

    /// Vendor name; items without a vendor order last.
    Vendor,

    /// Hierarchical BOM path.
    BomPath,

    /// Metric value at the lowest-quantity instance.
    BaselineValue,

    /// Metric value at the highest-quantity instance.
    FinalValue,

    /// Computed change percentage; not-computable rows order last.
    ChangePercent,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,

    /// Largest first.
    Descending,
}

/// Column and direction for the sort stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    /// Column to sort on.
    pub column: SortColumn,

    /// Direction to sort in.
    pub direction: SortDirection,
}

/// Offset/limit pagination over the sorted, filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: usize,

    /// Rows per page; values below 1 are treated as 1.
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Immutable view configuration owned by the caller.
///
/// Updates that change what the result set contains reset pagination to
/// the first page; re-sorting keeps the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    /// Filter predicates.
    pub filter: ItemFilter,

    /// Sort column and direction.
    pub sort: SortSpec,

    /// Page request.
    pub page: PageRequest,
}

impl ViewParams {
    /// Replace the filter, resetting to the first page.
    #[must_use]
    pub fn with_filter(mut self, filter: ItemFilter) -> Self {
        self.filter = filter;
        self.page.page = 0;
        self
    }

    /// Replace the sort specification, keeping the current page.
    #[must_use]
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Move to the given page.
    #[must_use]
    pub fn with_page(mut self, page: usize) -> Self {
        self.page.page = page;
        self
    }

    /// Change the page size, resetting to the first page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page.page_size = page_size;
        self.page.page = 0;
        self
    }
}

/// One row of the evaluated view.
#[derive(Debug, Clone)]
pub struct ViewRow<'a, 'b> {
    item: &'a VolumeItem<'b>,
    change: Option<MetricChange<'b>>,
}

impl<'a, 'b> ViewRow<'a, 'b> {
    /// The underlying volume item.
    #[must_use]
    pub fn item(&self) -> &'a VolumeItem<'b> {
        self.item
    }

    /// The metric change for the row, when computable.
    #[must_use]
    pub fn change(&self) -> Option<&MetricChange<'b>> {
        self.change.as_ref()
    }

    /// Classification of the row's change.
    #[must_use]
    pub fn direction(&self) -> ChangeDirection {
        self.change
            .as_ref()
            .map_or(ChangeDirection::NotComputable, MetricChange::direction)
    }
}

/// Summary counts over the filtered set (before pagination).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VolumeSummary {
    /// Items that matched the filter.
    pub total: usize,

    /// Items whose metric drops at higher volume.
    pub cheaper_at_scale: usize,

    /// Items whose metric rises at higher volume.
    pub more_expensive: usize,

    /// Items with no metric change.
    pub unchanged: usize,

    /// Items whose relative change is undefined (zero baseline).
    pub not_computable: usize,
}

impl VolumeSummary {
    fn tally(rows: &[ViewRow<'_, '_>]) -> Self {
        let mut summary = VolumeSummary {
            total: rows.len(),
            ..VolumeSummary::default()
        };

        for row in rows {
            match row.direction() {
                ChangeDirection::CheaperAtScale => summary.cheaper_at_scale += 1,
                ChangeDirection::MoreExpensive => summary.more_expensive += 1,
                ChangeDirection::Unchanged => summary.unchanged += 1,
                ChangeDirection::NotComputable => summary.not_computable += 1,
            }
        }

        summary
    }
}

/// The evaluated view: one page of rows plus counts over the whole
/// filtered set.
#[derive(Debug)]
pub struct VolumeView<'a, 'b> {
    rows: Vec<ViewRow<'a, 'b>>,
    summary: VolumeSummary,
    metric: Metric,
    page: usize,
    page_count: usize,
}

impl<'a, 'b> VolumeView<'a, 'b> {
    /// Rows of the requested page, in sort order.
    #[must_use]
    pub fn rows(&self) -> &[ViewRow<'a, 'b>] {
        &self.rows
    }

    /// Summary counts over the filtered set.
    #[must_use]
    pub fn summary(&self) -> VolumeSummary {
        self.summary
    }

    /// The metric the view was projected on.
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// The requested page index.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages the filtered set spans.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

/// Evaluate the pipeline: filter, summarise, sort, paginate.
///
/// Total for any well-typed input; an empty result is a valid outcome,
/// distinct from the error states of the upstream fetch (out of scope
/// here). Identical inputs and parameters yield identical output,
/// including the ordering of ties.
pub fn evaluate<'a, 'b>(
    items: &'a [VolumeItem<'b>],
    metric: Metric,
    params: &ViewParams,
) -> VolumeView<'a, 'b> {
    let mut rows: Vec<ViewRow<'a, 'b>> = items
        .iter()
        .filter(|item| params.filter.matches(item))
        .map(|item| ViewRow {
            item,
            change: item.change(metric),
        })
        .collect();

    let summary = VolumeSummary::tally(&rows);

    rows.sort_by(|a, b| compare_rows(a, b, params.sort));

    let page_size = params.page.page_size.max(1);
    let page_count = rows.len().div_ceil(page_size);
    let start = params.page.page.saturating_mul(page_size);

    let rows: Vec<ViewRow<'a, 'b>> = rows.into_iter().skip(start).take(page_size).collect();

    VolumeView {
        rows,
        summary,
        metric,
        page: params.page.page,
        page_count,
    }
}

fn compare_rows(a: &ViewRow<'_, '_>, b: &ViewRow<'_, '_>, spec: SortSpec) -> Ordering {
    match spec.column {
        SortColumn::ItemCode => directed(
            a.item.item_code().cmp(b.item.item_code()),
            spec.direction,
        ),
        SortColumn::ItemName => directed(
            a.item.item_name().cmp(b.item.item_name()),
            spec.direction,
        ),
        SortColumn::Vendor => {
            compare_optional(a.item.vendor_name(), b.item.vendor_name(), spec.direction)
        }
        SortColumn::BomPath => directed(a.item.bom_path().cmp(b.item.bom_path()), spec.direction),
        SortColumn::BaselineValue => compare_optional(
            a.change.as_ref().map(|c| *c.baseline().amount()),
            b.change.as_ref().map(|c| *c.baseline().amount()),
            spec.direction,
        ),
        SortColumn::FinalValue => compare_optional(
            a.change.as_ref().map(|c| *c.final_value().amount()),
            b.change.as_ref().map(|c| *c.final_value().amount()),
            spec.direction,
        ),
        SortColumn::ChangePercent => compare_optional(
            a.change.as_ref().and_then(MetricChange::percent_fraction),
            b.change.as_ref().and_then(MetricChange::percent_fraction),
            spec.direction,
        ),
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Compare sort keys that may be absent. Absent keys order after present
/// keys in both directions, so "not computable" rows never lead a page.
fn compare_optional<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.cmp(&b), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
