pub mod aggregate;
pub mod classify;
pub mod columns;
pub mod dates;
pub mod error;
pub mod links;
pub mod models;
pub mod notes;

pub use aggregate::{build_itinerary, ItineraryBuilder};
pub use classify::{assign_activity_types, things_to_do};
pub use columns::{normalize_columns, ColumnIndex, NormalizedRow, REQUIRED_COLUMNS};
pub use dates::{convert_date, convert_date_with, try_convert_date};
pub use error::{DateParseError, ItineraryError};
pub use links::{generate_map_link, MAPS_BASE_URL};
pub use models::*;
pub use notes::{split_notes, NO_TICKETS};
