//! Plain-text table rendering for admin lists

use crate::utils::helpers::truncate_text;
use super::Tabular;

const MAX_COLUMN_WIDTH: usize = 32;

pub fn render_table<T: Tabular>(records: &[T]) -> String {
    let headers = T::headers();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            r.cells()
                .iter()
                .map(|c| truncate_text(&c.replace('\n', " "), MAX_COLUMN_WIDTH))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (index, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(index) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<w$}", cell, w = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut out = format_row(&header_cells);
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}
