use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, instrument};

use crate::classify::{assign_activity_types, things_to_do};
use crate::columns::{ColumnIndex, NormalizedRow};
use crate::dates::convert_date_with;
use crate::error::ItineraryError;
use crate::links::generate_map_link;
use crate::models::{ActivityRecord, CellValue, DateGroup, Itinerary, Sheet};
use crate::notes::split_notes;

/// Accumulates activity records from every sheet, bucketed by display date.
#[derive(Debug, Default)]
pub struct ItineraryBuilder {
    by_date: BTreeMap<String, Vec<ActivityRecord>>,
    sheets_processed: usize,
    rows_processed: usize,
    unparsed_dates: Vec<String>,
}

impl ItineraryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the sheet's headers before touching any row.
    #[instrument(skip(self, sheet), fields(sheet = %sheet.name, rows = sheet.rows.len()))]
    pub fn add_sheet(&mut self, sheet: &Sheet) -> Result<(), ItineraryError> {
        let index = ColumnIndex::resolve(&sheet.name, &sheet.headers)?;

        for cells in &sheet.rows {
            let (date, record) = self.build_record(&sheet.name, &index, cells);
            self.by_date.entry(date).or_default().push(record);
            self.rows_processed += 1;
        }

        self.sheets_processed += 1;
        info!(sheet = %sheet.name, rows = sheet.rows.len(), "sheet processed");
        Ok(())
    }

    pub fn sheets_processed(&self) -> usize {
        self.sheets_processed
    }

    pub fn rows_processed(&self) -> usize {
        self.rows_processed
    }

    pub fn unparsed_dates(&self) -> &[String] {
        &self.unparsed_dates
    }

    pub fn finish(self) -> Itinerary {
        let itinerary = self
            .by_date
            .into_iter()
            .map(|(date, activities)| {
                debug!(date = %date, activities = activities.len(), "date group");
                let city = activities
                    .iter()
                    .map(|record| record.city.as_str())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect::<Vec<_>>()
                    .join(", ");

                DateGroup {
                    city,
                    date,
                    activities,
                }
            })
            .collect();

        Itinerary { itinerary }
    }

    fn build_record(
        &mut self,
        city: &str,
        index: &ColumnIndex,
        cells: &[CellValue],
    ) -> (String, ActivityRecord) {
        let row = NormalizedRow::from_cells(index, cells);

        let unparsed = &mut self.unparsed_dates;
        let date = convert_date_with(&row.date, |raw| unparsed.push(raw.to_string()));

        let notes_text = row.notes.as_deref().unwrap_or_default();
        let notes = split_notes(row.notes.as_deref());

        let record = ActivityRecord {
            map_link: generate_map_link(&row.location),
            things_to_do: things_to_do(&row.activity, &row.location),
            types: assign_activity_types(&row.activity, notes_text),
            tickets_to_buy: notes.tickets_to_buy,
            costs_and_notes: notes.costs_and_notes,
            time: row.time,
            activity: row.activity,
            location: row.location,
            directions: row.directions,
            transportation: row.transportation,
            city: city.to_string(),
        };

        (date, record)
    }
}

pub fn build_itinerary(sheets: &[Sheet]) -> Result<Itinerary, ItineraryError> {
    let mut builder = ItineraryBuilder::new();
    for sheet in sheets {
        builder.add_sheet(sheet)?;
    }
    Ok(builder.finish())
}
