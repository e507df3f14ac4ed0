//! View report
//!
//! Plain-text table rendering of an evaluated volume view, for the demo
//! binary and any terminal consumer. Chart and widget rendering stay with
//! the display layer; this is the crate's only presentation surface.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Color, Style, Theme, object::{Columns, Rows}},
};
use thiserror::Error;

use crate::{
    currency,
    quote::QuoteSummary,
    view::{ViewRow, VolumeView},
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Write the view as a table followed by summary counts.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing to `out` fails.
pub fn write_view(
    mut out: impl io::Write,
    view: &VolumeView<'_, '_>,
    quote_summary: Option<&QuoteSummary<'_>>,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record([
        "",
        "Item",
        "BOM Path",
        "Vendor",
        "Volumes",
        "Baseline",
        "Final",
        "Change",
        "Change %",
    ]);

    for (idx, row) in view.rows().iter().enumerate() {
        builder.push_record(row_cells(idx, row));
    }

    write_table(&mut out, builder)?;
    write_summary(&mut out, view, quote_summary)?;

    Ok(())
}

fn row_cells(idx: usize, row: &ViewRow<'_, '_>) -> [String; 9] {
    let item = row.item();

    let (volumes, baseline, final_value, delta, percent) = match row.change() {
        Some(change) => (
            format!(
                "{} → {}",
                change.baseline_quantity(),
                change.final_quantity()
            ),
            format!("{}", change.baseline()),
            format!("{}", change.final_value()),
            format!("{}", change.delta()),
            change
                .percent_points()
                .map_or_else(|| "n/a".to_string(), |points| format!("{points}%")),
        ),
        None => (
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            "n/a".to_string(),
        ),
    };

    [
        format!("#{:<3}", idx + 1),
        item.item_code().to_string(),
        item.bom_path().to_string(),
        item.vendor_name().unwrap_or("").to_string(),
        volumes,
        baseline,
        final_value,
        delta,
        percent,
    ]
}

fn write_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ReportError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(5..9), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| ReportError::IO)
}

fn write_summary(
    out: &mut impl io::Write,
    view: &VolumeView<'_, '_>,
    quote_summary: Option<&QuoteSummary<'_>>,
) -> Result<(), ReportError> {
    let summary = view.summary();

    writeln!(
        out,
        "\n {} · {} matched · page {} of {}",
        view.metric().label(),
        summary.total,
        view.page() + 1,
        view.page_count().max(1),
    )
    .map_err(|_err| ReportError::IO)?;

    writeln!(
        out,
        " cheaper at scale: {} · more expensive: {} · unchanged: {} · not computable: {}",
        summary.cheaper_at_scale,
        summary.more_expensive,
        summary.unchanged,
        summary.not_computable,
    )
    .map_err(|_err| ReportError::IO)?;

    if let Some(aggregates) = quote_summary {
        let code = aggregates.total_value.currency().iso_alpha_code;
        let symbol = currency::symbol(code);

        writeln!(
            out,
            " quote total: {symbol}{} · base: {symbol}{} · grand total: {symbol}{}",
            aggregates.total_value.amount(),
            aggregates.base_amount.amount(),
            aggregates.grand_total.amount(),
        )
        .map_err(|_err| ReportError::IO)?;
    }

    Ok(())
}
