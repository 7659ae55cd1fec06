use std::fmt::Display;

use crate::error::ItineraryError;
use crate::models::CellValue;

pub const DATE: &str = "date";
pub const TIME: &str = "time";
pub const ACTIVITY: &str = "activity";
pub const LOCATION: &str = "location";
pub const DIRECTIONS: &str = "directions";
pub const TRANSPORTATION: &str = "transportation details";
pub const NOTES: &str = "notes";

pub const REQUIRED_COLUMNS: [&str; 7] = [
    DATE,
    TIME,
    ACTIVITY,
    LOCATION,
    DIRECTIONS,
    TRANSPORTATION,
    NOTES,
];

pub fn normalize_column(label: impl Display) -> String {
    label.to_string().trim().to_lowercase()
}

pub fn normalize_columns<I, T>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    labels.into_iter().map(normalize_column).collect()
}

/// Positions of the required columns within one sheet's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub date: usize,
    pub time: usize,
    pub activity: usize,
    pub location: usize,
    pub directions: usize,
    pub transportation: usize,
    pub notes: usize,
}

impl ColumnIndex {
    pub fn resolve(sheet: &str, headers: &[String]) -> Result<Self, ItineraryError> {
        let normalized = normalize_columns(headers);
        let position = |label: &str| normalized.iter().position(|column| column == label);

        let missing = REQUIRED_COLUMNS
            .into_iter()
            .filter(|label| position(*label).is_none())
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(ItineraryError::MissingColumns {
                sheet: sheet.to_string(),
                missing,
                found: headers.to_vec(),
            });
        }

        let lookup = |label: &str| position(label).unwrap_or_default();
        Ok(Self {
            date: lookup(DATE),
            time: lookup(TIME),
            activity: lookup(ACTIVITY),
            location: lookup(LOCATION),
            directions: lookup(DIRECTIONS),
            transportation: lookup(TRANSPORTATION),
            notes: lookup(NOTES),
        })
    }
}

/// Typed view over one row, with missing cells coerced to their sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub date: String,
    pub time: String,
    pub activity: String,
    pub location: String,
    pub directions: Vec<String>,
    pub transportation: Vec<String>,
    pub notes: Option<String>,
}

pub const NOT_AVAILABLE: &str = "N/A";

impl NormalizedRow {
    pub fn from_cells(index: &ColumnIndex, cells: &[CellValue]) -> Self {
        let cell = |position: usize| cells.get(position).cloned().unwrap_or_default();

        Self {
            date: cell(index.date).text_or_empty(),
            time: cell(index.time).text_or_empty(),
            activity: cell(index.activity).text_or_empty(),
            location: cell(index.location).text_or_empty(),
            directions: split_periods(&cell(index.directions)),
            transportation: split_periods(&cell(index.transportation)),
            notes: cell(index.notes).as_text().map(ToString::to_string),
        }
    }
}

fn split_periods(cell: &CellValue) -> Vec<String> {
    match cell.as_text() {
        Some(text) => text
            .split('.')
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(ToString::to_string)
            .collect(),
        None => vec![NOT_AVAILABLE.to_string()],
    }
}
