//! Quote Report Demo
//!
//! Renders the volume comparison for an analytics payload as a terminal
//! table.
//!
//! Use `-f` to load a payload JSON file (the bundled sample otherwise)
//! Use `-m` to pick the projected metric
//! Use `-w` to sort worst change first
//! Use `-b`/`-s` to filter by BOM path / free text

use std::{error::Error, io};

use clap::Parser;
use quotient::{
    fixtures,
    ingest::load_quote,
    report::write_view,
    scenarios::ScenarioIndex,
    utils::DemoArgs,
    view::evaluate,
    volume::correlate,
};

/// Quote Report Demo
pub fn main() -> Result<(), Box<dyn Error>> {
    let args = DemoArgs::parse();

    let quote = match args.file.as_deref() {
        Some(path) => load_quote(path)?,
        None => fixtures::sample_quote()?,
    };

    let index = ScenarioIndex::build(quote.items());
    let volume_items = correlate(quote.items(), &index);

    let view = evaluate(&volume_items, args.metric, &args.view_params());

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_view(&mut handle, &view, quote.summary())?;

    Ok(())
}
