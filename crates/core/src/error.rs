use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItineraryError {
    #[error("sheet {sheet} missing required columns: {missing:?}. Found: {found:?}")]
    MissingColumns {
        sheet: String,
        missing: Vec<String>,
        found: Vec<String>,
    },
}

impl ItineraryError {
    pub fn missing_columns(&self) -> &[String] {
        match self {
            Self::MissingColumns { missing, .. } => missing,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized date {raw:?}: expected \"3-Jul-25\" or \"2025-07-03 00:00:00\"")]
pub struct DateParseError {
    pub raw: String,
}
