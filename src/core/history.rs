//! Search and ordering over the in-memory conversion history

use super::record::ConversionRecord;

/// Returns the first record whose source currency label contains `term`,
/// ignoring case.
pub fn search<'a>(history: &'a [ConversionRecord], term: &str) -> Option<&'a ConversionRecord> {
    let term = term.to_uppercase();
    history
        .iter()
        .find(|record| record.source_currency_label.to_uppercase().contains(&term))
}

/// Returns a copy of `history` ordered ascending by converted amount.
///
/// Bubble sort: only strictly greater neighbours are swapped, so records
/// with equal amounts keep their relative order.
pub fn sort_by_converted_amount(history: &[ConversionRecord]) -> Vec<ConversionRecord> {
    let mut sorted = history.to_vec();
    let n = sorted.len();

    for i in 0..n {
        let mut swapped = false;
        for j in 0..n - i - 1 {
            if sorted[j].converted_amount > sorted[j + 1].converted_amount {
                sorted.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    sorted
}
