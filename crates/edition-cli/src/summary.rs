use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use edition_model::{EditionCatalog, PaperLayout, pdf_download_name};
use edition_viewer::{COMING_SOON_MESSAGE, Controls};

pub fn print_editions(catalog: &EditionCatalog, layout: &PaperLayout) {
    if catalog.is_empty() {
        println!("{COMING_SOON_MESSAGE}");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Pages"),
        header_cell("Document"),
        header_cell("Download as"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (index, edition) in catalog.editions_descending().enumerate() {
        let date = Cell::new(edition.date());
        let date = if index == 0 {
            date.fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            date
        };
        table.add_row(vec![
            date,
            Cell::new(edition.page_count()),
            Cell::new(layout.document(edition).display()),
            dim_cell(pdf_download_name(edition.date())),
        ]);
    }
    println!("{table}");
}

pub fn print_controls(controls: &Controls) {
    if controls.is_coming_soon() {
        println!("{}", controls.indicator);
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Control"), header_cell("State")]);
    apply_table_style(&mut table);

    let selected = controls
        .date_options
        .iter()
        .find(|option| option.selected)
        .map_or_else(|| "-".to_string(), |option| option.label.clone());
    table.add_row(vec![Cell::new("Edition"), Cell::new(selected)]);
    table.add_row(vec![Cell::new("Page"), Cell::new(&controls.indicator)]);
    table.add_row(vec![Cell::new("Previous"), flag_cell(controls.previous_enabled)]);
    table.add_row(vec![Cell::new("Next"), flag_cell(controls.next_enabled)]);
    table.add_row(vec![Cell::new("Clip / share"), flag_cell(controls.clip_enabled)]);
    table.add_row(vec![Cell::new("Download"), flag_cell(controls.download_enabled)]);

    let image = controls
        .page_image
        .as_ref()
        .map_or_else(|| "-".to_string(), |path| path.display().to_string());
    let image = if controls.page_failed {
        Cell::new(format!("{image} (failed to load)")).fg(Color::Red)
    } else {
        Cell::new(image)
    };
    table.add_row(vec![Cell::new("Page image"), image]);
    if let (Some(document), Some(name)) = (&controls.document, &controls.document_download_name) {
        table.add_row(vec![
            Cell::new("Document"),
            Cell::new(format!("{} -> {name}", document.display())),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn flag_cell(enabled: bool) -> Cell {
    if enabled {
        Cell::new("enabled").fg(Color::Green)
    } else {
        dim_cell("disabled")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
