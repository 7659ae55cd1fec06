use std::fmt;

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell. Empty cells read as `Absent`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellValue {
    Text(String),
    #[default]
    Absent,
}

impl CellValue {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if !value.is_empty() => Self::Text(value.to_string()),
            _ => Self::Absent,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            Self::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn text_or_empty(&self) -> String {
        self.as_text().unwrap_or_default().to_string()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::from_raw(Some(value))
    }
}

impl From<Option<&str>> for CellValue {
    fn from(value: Option<&str>) -> Self {
        Self::from_raw(value)
    }
}

/// One tab of the workbook. The sheet name doubles as the city.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, C>(&mut self, cells: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        let mut row = cells.into_iter().map(Into::into).collect::<Vec<_>>();
        if row.len() < self.headers.len() {
            row.resize(self.headers.len(), CellValue::Absent);
        }
        self.rows.push(row);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Travel,
    Dining,
    Activity,
}

impl ActivityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::Dining => "dining",
            Self::Activity => "activity",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placeholder map link(s). Multi-leg locations carry one link per leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapLink {
    Single(String),
    Legs(Vec<String>),
}

impl MapLink {
    pub fn links(&self) -> Vec<&str> {
        match self {
            Self::Single(link) => vec![link.as_str()],
            Self::Legs(links) => links.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesSplit {
    pub costs_and_notes: Vec<String>,
    pub tickets_to_buy: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub time: String,
    pub activity: String,
    pub location: String,
    pub map_link: MapLink,
    pub directions: Vec<String>,
    pub transportation: Vec<String>,
    pub things_to_do: Vec<String>,
    pub tickets_to_buy: Vec<String>,
    pub costs_and_notes: Vec<String>,
    #[serde(rename = "type")]
    pub types: Vec<ActivityType>,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateGroup {
    pub city: String,
    pub date: String,
    pub activities: Vec<ActivityRecord>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Itinerary {
    pub itinerary: Vec<DateGroup>,
}

impl Itinerary {
    pub fn date_groups(&self) -> &[DateGroup] {
        &self.itinerary
    }

    pub fn activity_count(&self) -> usize {
        self.itinerary
            .iter()
            .map(|group| group.activities.len())
            .sum()
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
