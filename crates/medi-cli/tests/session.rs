use std::io::Cursor;

use medi_cli::session::{PROMPT_HELP, run_session};
use medi_core::{SearchView, ViewConfig};
use medi_ingest::Catalog;
use medi_model::SearchField;

fn run(field: SearchField, input: &str) -> String {
    let catalog = Catalog::bundled().expect("bundled catalog");
    let config = ViewConfig::default()
        .with_debounce_ms(10)
        .with_initial_field(field);
    let mut view = SearchView::new(catalog.shared(), config);
    let mut out = Vec::new();
    run_session(
        &mut view,
        catalog.info(),
        Cursor::new(input.as_bytes().to_vec()),
        &mut out,
    )
    .expect("session");
    String::from_utf8(out).expect("utf-8 output")
}

#[test]
fn query_line_renders_results() {
    let out = run(SearchField::CommercialName, "dolip\n");
    assert!(out.starts_with(PROMPT_HELP));
    assert!(out.contains("Résultats: 1"));
    assert!(out.contains("DOLIPRANE"));
    assert!(out.contains("Remboursable à 100% dans le cadre des affections de longue durée"));
}

#[test]
fn unmatched_query_shows_no_condition() {
    let out = run(SearchField::CommercialName, "xyz\n");
    assert!(out.contains("Résultats: 0"));
    assert!(out.contains("Aucun!"));
}

#[test]
fn unknown_command_is_reported() {
    let out = run(SearchField::GenericName, ":sort\n");
    assert!(out.contains("Commande inconnue: :sort"));
}

#[test]
fn quit_ignores_remaining_input() {
    let out = run(SearchField::CommercialName, ":quit\ndolip\n");
    assert!(!out.contains("DOLIPRANE"));
    assert!(!out.contains("Résultats"));
}
