#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset provider for the shark incident dashboard.
//!
//! Loads the incident table once at startup from a CSV export of the
//! Australian Shark-Incident Database and exposes it as an immutable,
//! column-addressable [`IncidentTable`]. Load failures are fatal; bad
//! values inside numeric columns are not; they coerce to `None` so the
//! rest of the row stays usable.

pub mod parsing;

use std::collections::BTreeMap;
use std::path::Path;

use shark_map_incident_models::{AusState, IncidentRecord, NumericField};

use crate::parsing::{parse_opt_f64, parse_opt_string, parse_opt_year};

/// Errors that can occur while loading the incident dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the header row.
    #[error("Missing column '{name}' in incident dataset")]
    MissingColumn {
        /// The column identifier that was not found.
        name: String,
    },
}

/// Columns the loader requires in the header row.
const REQUIRED_COLUMNS: &[&str] = &[
    "State",
    "Location",
    "Shark.common.name",
    "Shark.length.m",
    "Victim.age",
    "Incident.year",
    "Latitude",
    "Longitude",
];

/// The immutable in-memory incident table.
///
/// Created once at process start and shared read-only across every
/// handler invocation. Derived views (region options, summaries, chart
/// specs) are recomputed from it per event, never cached inside it.
#[derive(Debug, Clone)]
pub struct IncidentTable {
    records: Vec<IncidentRecord>,
}

impl IncidentTable {
    /// Wraps an already-parsed set of records.
    #[must_use]
    pub const fn from_records(records: Vec<IncidentRecord>) -> Self {
        Self { records }
    }

    /// Returns all records in source order.
    #[must_use]
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    /// Number of records in the table.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the distinct states present in the data, in first-seen
    /// order. This ordering drives the state dropdown; its first entry is
    /// the default selection.
    #[must_use]
    pub fn states(&self) -> Vec<AusState> {
        let mut seen = Vec::new();
        for record in &self.records {
            if let Some(state) = record.state {
                if !seen.contains(&state) {
                    seen.push(state);
                }
            }
        }
        seen
    }

    /// Returns the records for the given state, in source order.
    pub fn records_for_state(&self, state: AusState) -> impl Iterator<Item = &IncidentRecord> {
        self.records
            .iter()
            .filter(move |r| r.state == Some(state))
    }

    /// Returns the records for the given state whose location (with the
    /// unknown-location sentinel applied) equals `location`.
    pub fn records_at<'a>(
        &'a self,
        state: AusState,
        location: &'a str,
    ) -> impl Iterator<Item = &'a IncidentRecord> {
        self.records_for_state(state)
            .filter(move |r| r.location_or_unknown() == location)
    }

    /// Returns the full column of values for a numeric field, with
    /// unparseable source values already coerced to `None`.
    #[must_use]
    pub fn numeric_column(&self, field: NumericField) -> Vec<Option<f64>> {
        self.records
            .iter()
            .map(|r| r.numeric_value(field))
            .collect()
    }

    /// Returns the distinct species names in first-seen order. This
    /// ordering defines the integer encoding of the categorical
    /// parallel-coordinates axis.
    #[must_use]
    pub fn species(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for record in &self.records {
            if let Some(species) = &record.species {
                if !seen.iter().any(|s| s == species) {
                    seen.push(species.clone());
                }
            }
        }
        seen
    }
}

/// Loads the incident table from a CSV file.
///
/// The file is header-addressed: columns are looked up by name, so column
/// order (including a leading index column from the spreadsheet export)
/// does not matter.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read, is not valid CSV,
/// or is missing any of the required columns.
pub fn load_incidents(path: &Path) -> Result<IncidentTable, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers = reader.headers()?.clone();
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();
    for (i, name) in headers.iter().enumerate() {
        index.entry(name.trim()).or_insert(i);
    }

    for name in REQUIRED_COLUMNS {
        if !index.contains_key(name) {
            return Err(DatasetError::MissingColumn {
                name: (*name).to_string(),
            });
        }
    }

    let field = |row: &csv::StringRecord, name: &str| -> Option<String> {
        index.get(name).and_then(|&i| row.get(i)).map(str::to_owned)
    };

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;

        let state = field(&row, "State")
            .and_then(|s| s.trim().parse::<AusState>().ok());

        records.push(IncidentRecord {
            state,
            location: field(&row, "Location").as_deref().and_then(parse_opt_string),
            species: field(&row, "Shark.common.name")
                .as_deref()
                .and_then(parse_opt_string),
            shark_length: field(&row, "Shark.length.m")
                .as_deref()
                .and_then(parse_opt_f64),
            victim_age: field(&row, "Victim.age").as_deref().and_then(parse_opt_f64),
            incident_year: field(&row, "Incident.year")
                .as_deref()
                .and_then(parse_opt_year),
            latitude: field(&row, "Latitude").as_deref().and_then(parse_opt_f64),
            longitude: field(&row, "Longitude").as_deref().and_then(parse_opt_f64),
        });
    }

    log::info!("Loaded {} incident records from {path:?}", records.len());

    Ok(IncidentTable::from_records(records))
}
