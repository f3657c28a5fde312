//! Presentation of a [`SearchView`] as terminal text or JSON.

use colorchoice::ColorChoice;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use medi_core::{SearchStatus, SearchView};
use medi_ingest::CatalogStats;
use medi_model::{CatalogInfo, EnrichedRecord, SearchField};

pub const SEARCH_LABEL: &str = "Recherche";
pub const FIELD_LABEL: &str = "Rechercher par";
pub const RESULTS_LABEL: &str = "Résultats";
pub const TABLE_CAPTION: &str = "Liste des médicaments remboursés en Algérie";
pub const CONDITION_LABEL: &str = "Conditions de remboursement:";
pub const NO_CONDITION: &str = "Aucun!";
pub const NO_RESULTS_MESSAGE: &str = "Votre recherche n'a donné aucun résultat. Veuillez vérifier \
                                      que vous avez correctement saisi le nom du médicament";

const COLUMNS: [&str; 5] = ["Nom commercial", "DCI", "Dosage", "Forme", "Conditionnement"];
const TABLE_WIDTH: u16 = 120;

/// Serializable snapshot of everything the view displays.
#[derive(Debug, Serialize)]
pub struct ViewReport<'a> {
    pub last_updated: &'a str,
    pub status: &'a str,
    pub query: &'a str,
    pub debounced_query: &'a str,
    pub field: SearchField,
    pub search: SearchStatus,
    pub result_count: usize,
    pub selected_index: Option<usize>,
    pub results: Vec<&'a EnrichedRecord>,
    pub condition: &'a str,
}

impl<'a> ViewReport<'a> {
    pub fn new(view: &'a SearchView, info: &'a CatalogInfo) -> Self {
        Self {
            last_updated: &info.last_updated,
            status: &info.status,
            query: view.query(),
            debounced_query: view.debounced_query(),
            field: view.field(),
            search: view.status(),
            result_count: view.result_count(),
            selected_index: view.selected_index(),
            results: view.results().collect(),
            condition: condition_text(view),
        }
    }
}

/// Text of the condition panel, falling back when nothing applies.
pub fn condition_text(view: &SearchView) -> &str {
    view.selected_condition().unwrap_or(NO_CONDITION)
}

pub fn banner(info: &CatalogInfo) -> String {
    format!(
        "Dernière mise à jour: {}\nStatus: {}",
        info.last_updated, info.status
    )
}

pub fn field_choice(field: SearchField) -> String {
    if !SearchField::TOGGLEABLE.contains(&field) {
        return format!("{FIELD_LABEL}: {field}");
    }
    let options: Vec<String> = SearchField::TOGGLEABLE
        .iter()
        .map(|option| {
            let mark = if *option == field { "(•)" } else { "( )" };
            format!("{mark} {option}")
        })
        .collect();
    format!("{FIELD_LABEL}: {}", options.join("  "))
}

pub fn condition_panel(view: &SearchView) -> String {
    format!("{CONDITION_LABEL}\n{}", condition_text(view))
}

/// The result table, or the explanatory message when a search matched nothing.
pub fn results_table(view: &SearchView) -> String {
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(COLUMNS.into_iter().map(header_cell));
    table.set_header(header);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for (index, record) in view.results().enumerate() {
        let selected = view.selection().is_selected(index);
        let record = &record.record;
        let cells = [
            record.commercial_name.as_str(),
            record.generic_name.as_str(),
            record.dosage.as_str(),
            record.form.as_str(),
            record.packaging.as_str(),
        ];
        let marker = if selected {
            format!("› {}", index + 1)
        } else {
            (index + 1).to_string()
        };
        let mut row = vec![row_cell(marker, selected)];
        row.extend(cells.into_iter().map(|value| row_cell(value, selected)));
        table.add_row(row);
    }
    if view.status() != SearchStatus::NoMatches {
        return table.to_string();
    }
    let mut message = Table::new();
    apply_table_style(&mut message);
    message.add_row(vec![Cell::new(NO_RESULTS_MESSAGE).fg(Color::Yellow)]);
    format!("{table}\n{message}")
}

/// Full text rendition of the view.
pub fn render_view(view: &SearchView, info: &CatalogInfo) -> String {
    [
        banner(info),
        String::new(),
        format!("{SEARCH_LABEL}: {}", view.query()),
        field_choice(view.field()),
        format!("{RESULTS_LABEL}: {}", view.result_count()),
        TABLE_CAPTION.to_string(),
        results_table(view),
        condition_panel(view),
    ]
    .join("\n")
}

pub fn render_stats(info: &CatalogInfo, stats: &CatalogStats) -> String {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Catalogue"), header_cell("Valeur")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.add_row(vec![Cell::new("Médicaments"), Cell::new(stats.records)]);
    table.add_row(vec![
        Cell::new("Avec condition"),
        Cell::new(stats.with_condition),
    ]);
    table.add_row(vec![
        Cell::new("Sans condition"),
        count_cell(stats.without_condition),
    ]);
    table.add_row(vec![
        Cell::new("Conditions orphelines"),
        count_cell(stats.orphan_conditions),
    ]);
    format!("{}\n\n{table}", banner(info))
}

/// Shared table look. Cell colors follow the global `--color` choice.
fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(TABLE_WIDTH);
    match ColorChoice::global() {
        ColorChoice::Never => {
            table.force_no_tty();
        }
        ColorChoice::Always | ColorChoice::AlwaysAnsi => {
            table.enforce_styling();
        }
        ColorChoice::Auto => {}
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn row_cell<T: ToString>(value: T, selected: bool) -> Cell {
    if selected {
        Cell::new(value)
            .fg(Color::White)
            .bg(Color::Blue)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(value)
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
