use crate::core::coerce::CellCoercion;
use crate::domain::model::Record;
use crate::utils::error::{EtlError, Result};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses CSV bytes into records. The first row names the columns.
pub fn parse_table(bytes: &[u8], coercion: &CellCoercion) -> Result<Vec<Record>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(EtlError::ProcessingError {
            message: "No columns to parse from file".to_string(),
        });
    }
    let columns = column_names(&headers);
    tracing::debug!("Parsed header with {} columns", columns.len());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.len() > columns.len() {
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            return Err(EtlError::ProcessingError {
                message: format!(
                    "Expected {} fields in line {}, saw {}",
                    columns.len(),
                    line,
                    row.len()
                ),
            });
        }

        let mut record = Record::default();
        for (index, column) in columns.iter().enumerate() {
            let value = row
                .get(index)
                .map(|cell| coercion.coerce(cell))
                .unwrap_or(serde_json::Value::Null);
            record.data.insert(column.clone(), value);
        }
        records.push(record);
    }

    Ok(records)
}

/// Makes header names unique: blanks become `Unnamed: <index>` and repeats get `.1`, `.2`, ...
fn column_names(headers: &StringRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(headers.len());

    for (index, header) in headers.iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", index)
        } else {
            header.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(name.clone());
        columns.push(name);
    }

    columns
}
