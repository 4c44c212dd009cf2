use super::ui;
use crate::core::{ConversionRecord, history};
use crate::store::HistoryStore;
use anyhow::Result;
use comfy_table::Cell;

pub const EMPTY_NOTICE: &str = "No conversions recorded yet.";

pub fn render_records(title: &str, records: &[ConversionRecord]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Currency"),
        ui::header_cell("Amount (BRL)"),
        ui::header_cell("Converted"),
    ]);

    for record in records {
        table.add_row(vec![
            Cell::new(&record.timestamp),
            Cell::new(&record.source_currency_label),
            ui::amount_cell(format!("R$ {:.2}", record.original_amount)),
            ui::amount_cell(format!("{:.2}", record.converted_amount)),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text(title, ui::StyleType::Title),
        table
    )
}

/// Prints the history ordered by converted amount.
pub fn run(store: &dyn HistoryStore) -> Result<()> {
    let records = store.load()?;
    if records.is_empty() {
        println!("{}", ui::style_text(EMPTY_NOTICE, ui::StyleType::Warning));
        return Ok(());
    }

    let sorted = history::sort_by_converted_amount(&records);
    println!(
        "{}",
        render_records("Conversion history (by converted amount)", &sorted)
    );
    println!(
        "{}",
        ui::style_text("Sorted with bubble sort, O(n²).", ui::StyleType::Subtle)
    );
    Ok(())
}

/// Prints the first record whose currency label contains `term`.
pub fn search(store: &dyn HistoryStore, term: &str) -> Result<()> {
    let records = store.load()?;
    match history::search(&records, term) {
        Some(record) => println!(
            "{}",
            render_records("Record found", std::slice::from_ref(record))
        ),
        None => println!(
            "{}",
            ui::style_text(
                &format!("No record found for '{term}'."),
                ui::StyleType::Error
            )
        ),
    }
    Ok(())
}
