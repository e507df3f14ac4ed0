//! Quotient prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    ingest::{IngestError, QuotePayload, load_quote, parse_quote, read_quote},
    items::{LineItem, path::BomPath},
    quote::{Quote, QuoteError, QuoteSummary},
    report::{ReportError, write_view},
    scenarios::ScenarioIndex,
    tags::TagSet,
    view::{
        ItemFilter, PageRequest, SortColumn, SortDirection, SortSpec, ViewParams, ViewRow,
        VolumeSummary, VolumeView, evaluate,
    },
    volume::{
        ItemInstance, VolumeItem, correlate,
        metrics::{ChangeDirection, Metric, MetricChange},
    },
};
