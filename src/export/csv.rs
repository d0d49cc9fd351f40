//! CSV export
//!
//! Every field is quoted and embedded quotes are doubled. Line breaks inside a
//! field are flattened to spaces so each record occupies exactly one line.

use std::path::{Path, PathBuf};
use chrono::Utc;
use tracing::info;
use crate::utils::errors::Result;
use crate::utils::helpers::sanitize_filename;
use super::Tabular;

pub fn escape_field(value: &str) -> String {
    let flattened: String = value
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect();
    format!("\"{}\"", flattened.replace('"', "\"\""))
}

fn csv_line<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render records as CSV: one header line plus one line per record
pub fn to_csv<T: Tabular>(records: &[T]) -> String {
    let mut out = csv_line(&T::headers());
    out.push('\n');
    for record in records {
        out.push_str(&csv_line(&record.cells()));
        out.push('\n');
    }
    out
}

/// Write records to `<dir>/<stem>-<timestamp>.csv` and return the path
pub async fn write_csv<T: Tabular>(dir: &Path, stem: &str, records: &[T]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let file_name = sanitize_filename(&format!(
        "{}-{}.csv",
        stem,
        Utc::now().format("%Y%m%d-%H%M%S")
    ));
    let path = dir.join(file_name);
    tokio::fs::write(&path, to_csv(records)).await?;
    info!(path = %path.display(), records = records.len(), "CSV export written");
    Ok(path)
}
