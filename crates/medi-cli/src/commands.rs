use std::io::{self, BufReader};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info_span, warn};

use medi_cli::render::{ViewReport, render_stats, render_view};
use medi_cli::session::run_session;
use medi_core::{SearchView, ViewConfig, ViewEvent};
use medi_ingest::Catalog;
use medi_model::{CatalogInfo, SearchField};

use crate::cli::{DataArgs, InteractiveArgs, OutputFormatArg, SearchArgs};

/// Bundled catalog, or the tables given on the command line.
pub fn load_catalog(data: &DataArgs) -> Result<Catalog> {
    match (&data.drugs, &data.conditions) {
        (None, None) => Catalog::bundled().context("load bundled catalog"),
        (Some(drugs), Some(conditions)) => {
            Catalog::from_paths(drugs, conditions, CatalogInfo::default())
                .with_context(|| format!("load catalog from {}", drugs.display()))
        }
        (Some(_), None) => bail!("--drugs requires --conditions"),
        (None, Some(_)) => bail!("--conditions requires --drugs"),
    }
}

pub fn run_search(data: &DataArgs, args: &SearchArgs) -> Result<()> {
    let catalog = load_catalog(data)?;
    let field = SearchField::from(args.field);
    let span = info_span!("search", query = %args.query, field = %field);
    let _guard = span.enter();

    let config = ViewConfig::default().with_initial_field(field);
    let mut view = SearchView::new(catalog.shared(), config);
    view.update(ViewEvent::QueryChanged(args.query.clone()), Instant::now());
    view.flush();
    if let Some(row) = args.select {
        let index = row as usize - 1;
        if index >= view.result_count() {
            warn!(row, results = view.result_count(), "selected row is out of range");
        } else {
            view.update(ViewEvent::RowClicked(index), Instant::now());
        }
    }

    match args.format {
        OutputFormatArg::Table => println!("{}", render_view(&view, catalog.info())),
        OutputFormatArg::Json => {
            let report = ViewReport::new(&view, catalog.info());
            let json = serde_json::to_string_pretty(&report).context("serialize view")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn run_interactive(data: &DataArgs, args: &InteractiveArgs) -> Result<()> {
    let catalog = load_catalog(data)?;
    let config = ViewConfig::default()
        .with_debounce_ms(args.debounce_ms)
        .with_initial_field(SearchField::from(args.field));
    let mut view = SearchView::new(catalog.shared(), config);
    let mut stdout = io::stdout().lock();
    run_session(
        &mut view,
        catalog.info(),
        BufReader::new(io::stdin()),
        &mut stdout,
    )
}

pub fn run_info(data: &DataArgs) -> Result<()> {
    let catalog = load_catalog(data)?;
    println!("{}", render_stats(catalog.info(), &catalog.stats()));
    Ok(())
}
