//! Utils

use clap::Parser;

use crate::{
    view::{ItemFilter, PageRequest, SortColumn, SortDirection, SortSpec, ViewParams},
    volume::metrics::Metric,
};

/// Arguments for the quote-report demo
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Path to an analytics payload JSON file; the bundled sample quote
    /// is used when omitted
    #[clap(short, long)]
    pub file: Option<String>,

    /// Metric to project: quoted-rate, vendor-rate, base-rate,
    /// additional-cost, or total-cost
    #[clap(short, long, default_value = "quoted-rate")]
    pub metric: Metric,

    /// Free-text search over item code and name
    #[clap(short, long)]
    pub search: Option<String>,

    /// BOM path filter; repeat to allow several paths
    #[clap(short, long)]
    pub bom: Vec<String>,

    /// Sort descending by change percentage instead of by item code
    #[clap(short, long)]
    pub worst_first: bool,

    /// Page to show (zero-based)
    #[clap(short, long, default_value_t = 0)]
    pub page: usize,

    /// Rows per page
    #[clap(long, default_value_t = 25)]
    pub page_size: usize,
}

impl DemoArgs {
    /// Translate the arguments into view parameters.
    #[must_use]
    pub fn view_params(&self) -> ViewParams {
        let sort = if self.worst_first {
            SortSpec {
                column: SortColumn::ChangePercent,
                direction: SortDirection::Descending,
            }
        } else {
            SortSpec::default()
        };

        ViewParams {
            filter: ItemFilter {
                search: self.search.clone(),
                vendors: None,
                tags: None,
                bom_paths: if self.bom.is_empty() {
                    None
                } else {
                    Some(self.bom.clone())
                },
            },
            sort,
            page: PageRequest {
                page: self.page,
                page_size: self.page_size,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bom_list_means_no_constraint() {
        let args = DemoArgs {
            file: None,
            metric: Metric::QuotedRate,
            search: None,
            bom: Vec::new(),
            worst_first: false,
            page: 0,
            page_size: 25,
        };

        assert_eq!(args.view_params().filter.bom_paths, None);
    }

    #[test]
    fn worst_first_sorts_change_percent_descending() {
        let args = DemoArgs {
            file: None,
            metric: Metric::QuotedRate,
            search: None,
            bom: vec!["D".to_string()],
            worst_first: true,
            page: 2,
            page_size: 10,
        };

        let params = args.view_params();

        assert_eq!(params.sort.column, SortColumn::ChangePercent);
        assert_eq!(params.sort.direction, SortDirection::Descending);
        assert_eq!(params.page.page, 2);
        assert_eq!(
            params.filter.bom_paths,
            Some(vec!["D".to_string()])
        );
    }
}
