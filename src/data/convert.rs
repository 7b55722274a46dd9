use crate::utils::error::{RentError, Result};
use crate::utils::validation::validate_file_extension;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

pub const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub sheet: String,
    pub rows: usize,
    pub preview: Vec<Vec<String>>,
}

/// Integral floats lose their trailing `.0` so counts stay readable.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        other => other.to_string(),
    }
}

/// Writes the first worksheet of `input` to `output` as CSV.
pub fn convert_excel_to_csv<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ConversionSummary> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(RentError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found. Please check the path.", input.display()),
        )));
    }
    validate_file_extension("input", &input.to_string_lossy(), &WORKBOOK_EXTENSIONS)?;

    let mut workbook = open_workbook_auto(input)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| RentError::processing(format!("{} has no worksheets", input.display())))?;
    let range = workbook.worksheet_range(&sheet)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(output)?;

    let mut rows: usize = 0;
    let mut preview = Vec::new();
    for row in range.rows() {
        let fields: Vec<String> = row.iter().map(cell_to_string).collect();
        writer.write_record(&fields)?;
        if preview.len() < 6 {
            preview.push(fields);
        }
        rows += 1;
    }
    writer.flush()?;

    tracing::info!(
        "✅ Converted {} (sheet '{}') to {}",
        input.display(),
        sheet,
        output.display()
    );
    for line in &preview {
        tracing::info!("  {}", line.join(", "));
    }

    Ok(ConversionSummary {
        sheet,
        // Header row is not data.
        rows: rows.saturating_sub(1),
        preview,
    })
}
