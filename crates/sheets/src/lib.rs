use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};
use trip_core::{normalize_columns, CellValue, Sheet};
use walkdir::WalkDir;

const PREVIEW_ROWS: usize = 5;

/// Where the header sits in each sheet. `skip_rows` records are dropped
/// first, then `header_row` more; the next record is the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    pub header_row: usize,
    pub skip_rows: usize,
}

impl ReadOptions {
    fn leading_records(&self) -> usize {
        self.skip_rows + self.header_row
    }
}

/// Reads every `*.csv` file in `path` (sorted by file name) as one sheet per
/// city. A single file is read as a one-sheet workbook.
pub fn read_workbook(path: impl AsRef<Path>, options: ReadOptions) -> Result<Vec<Sheet>> {
    let path = path.as_ref();
    if path.is_file() {
        return Ok(vec![read_sheet(path, options)?]);
    }

    let mut sheets = Vec::new();
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
    {
        sheets.push(read_sheet(entry.path(), options)?);
    }

    if sheets.is_empty() {
        bail!("no csv sheets found in {}", path.display());
    }

    info!(path = %path.display(), sheets = sheets.len(), "workbook loaded");
    Ok(sheets)
}

pub fn read_sheet(path: impl AsRef<Path>, options: ReadOptions) -> Result<Sheet> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(ToString::to_string)
        .with_context(|| format!("sheet file has no usable name: {}", path.display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed opening sheet: {}", path.display()))?;

    let mut records = reader
        .records()
        .skip(options.leading_records())
        .enumerate();

    let headers = match records.next() {
        Some((_, record)) => record
            .with_context(|| format!("failed reading header row of {}", path.display()))?
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        None => bail!("sheet {} has no header row", path.display()),
    };

    let mut sheet = Sheet::new(name, headers);
    for (line, record) in records {
        let record = record.with_context(|| {
            format!("failed reading record {} of {}", line, path.display())
        })?;
        sheet.push_row(record.iter().map(|cell| CellValue::from_raw(Some(cell))));
    }

    debug!(
        sheet = %sheet.name,
        columns = ?normalize_columns(&sheet.headers),
        preview = ?&sheet.rows[..sheet.rows.len().min(PREVIEW_ROWS)],
        "sheet read"
    );

    Ok(sheet)
}
