#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Core domain types for the shark incident dashboard.
//!
//! This crate defines the fixed enumerations (states, metrics, numeric
//! fields) and the incident record type shared across the dataset loader,
//! the reactive dashboard core, and the chart builders.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Sentinel substituted for records with no location name.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Australian states and territories present in the incident dataset.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AusState {
    /// New South Wales
    NSW,
    /// Victoria
    VIC,
    /// Queensland
    QLD,
    /// Western Australia
    WA,
    /// South Australia
    SA,
    /// Tasmania
    TAS,
    /// Northern Territory
    NT,
    /// Australian Capital Territory
    ACT,
}

impl AusState {
    /// Returns the boundary region code used as the `STATE_CODE` feature
    /// key in the states `GeoJSON` file.
    #[must_use]
    pub const fn region_code(self) -> &'static str {
        match self {
            Self::NSW => "1",
            Self::VIC => "2",
            Self::QLD => "3",
            Self::WA => "4",
            Self::SA => "5",
            Self::TAS => "6",
            Self::NT => "7",
            Self::ACT => "8",
        }
    }

    /// Returns the full state name.
    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::NSW => "New South Wales",
            Self::VIC => "Victoria",
            Self::QLD => "Queensland",
            Self::WA => "Western Australia",
            Self::SA => "South Australia",
            Self::TAS => "Tasmania",
            Self::NT => "Northern Territory",
            Self::ACT => "Australian Capital Territory",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::NSW,
            Self::VIC,
            Self::QLD,
            Self::WA,
            Self::SA,
            Self::TAS,
            Self::NT,
            Self::ACT,
        ]
    }
}

/// The metric options offered by the metric dropdown.
///
/// Both [`Metric::SharkLength`] and [`Metric::VictimClothing`] map onto the
/// `Shark.length.m` column; the clothing option keeps its own label but
/// shares the backing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Age of the victim (`Victim.age`).
    VictimAge,
    /// Length of the shark in meters (`Shark.length.m`).
    SharkLength,
    /// Common name of the shark species (`Shark.common.name`).
    SharkName,
    /// Labeled "Victim clothing" but backed by `Shark.length.m`.
    VictimClothing,
}

impl Metric {
    /// Returns the dataset column identifier backing this metric.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::VictimAge => "Victim.age",
            Self::SharkLength | Self::VictimClothing => "Shark.length.m",
            Self::SharkName => "Shark.common.name",
        }
    }

    /// Returns the dropdown label for this metric.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VictimAge => "Victim Age",
            Self::SharkLength => "Shark Length",
            Self::SharkName => "Shark name",
            Self::VictimClothing => "Victim clothing",
        }
    }

    /// Resolves a column identifier back to a metric.
    ///
    /// `Shark.length.m` resolves to [`Metric::SharkLength`]; the "Victim
    /// clothing" option is indistinguishable once reduced to its column.
    #[must_use]
    pub fn from_column(column: &str) -> Option<Self> {
        match column {
            "Victim.age" => Some(Self::VictimAge),
            "Shark.length.m" => Some(Self::SharkLength),
            "Shark.common.name" => Some(Self::SharkName),
            _ => None,
        }
    }

    /// Whether this metric is numeric (as opposed to the categorical
    /// species name).
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::SharkName)
    }

    /// Returns all variants of this enum, in dropdown order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::VictimAge,
            Self::SharkLength,
            Self::SharkName,
            Self::VictimClothing,
        ]
    }
}

/// Numeric columns plotted as parallel-coordinates axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericField {
    /// `Victim.age`
    VictimAge,
    /// `Shark.length.m`
    SharkLength,
    /// `Latitude`
    Latitude,
    /// `Longitude`
    Longitude,
    /// `Incident.year`
    IncidentYear,
}

impl NumericField {
    /// Returns the dataset column identifier for this field.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::VictimAge => "Victim.age",
            Self::SharkLength => "Shark.length.m",
            Self::Latitude => "Latitude",
            Self::Longitude => "Longitude",
            Self::IncidentYear => "Incident.year",
        }
    }

    /// Returns the axis label (column identifier with dots replaced by
    /// spaces).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VictimAge => "Victim age",
            Self::SharkLength => "Shark length m",
            Self::Latitude => "Latitude",
            Self::Longitude => "Longitude",
            Self::IncidentYear => "Incident year",
        }
    }

    /// Returns all variants of this enum, in axis order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::VictimAge,
            Self::SharkLength,
            Self::Latitude,
            Self::Longitude,
            Self::IncidentYear,
        ]
    }
}

/// A metric value, which is numeric for all metrics except the species
/// name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// A numeric metric value.
    Number(f64),
    /// A categorical metric value (species name).
    Text(String),
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n:.2}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One shark-incident observation. Immutable once loaded; numeric fields
/// that could not be parsed from the source data are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// State where the incident occurred, if the source code was
    /// recognized.
    pub state: Option<AusState>,
    /// Location name within the state.
    pub location: Option<String>,
    /// Common name of the shark species involved.
    pub species: Option<String>,
    /// Shark length in meters.
    pub shark_length: Option<f64>,
    /// Age of the victim.
    pub victim_age: Option<f64>,
    /// Year the incident occurred.
    pub incident_year: Option<i32>,
    /// Latitude of the incident.
    pub latitude: Option<f64>,
    /// Longitude of the incident.
    pub longitude: Option<f64>,
}

impl IncidentRecord {
    /// Returns the record's value for the given metric, or `None` if the
    /// underlying field is absent.
    #[must_use]
    pub fn metric_value(&self, metric: Metric) -> Option<MetricValue> {
        match metric {
            Metric::VictimAge => self.victim_age.map(MetricValue::Number),
            Metric::SharkLength | Metric::VictimClothing => {
                self.shark_length.map(MetricValue::Number)
            }
            Metric::SharkName => self.species.clone().map(MetricValue::Text),
        }
    }

    /// Returns the record's value for the given numeric field, or `None`
    /// if absent.
    #[must_use]
    pub fn numeric_value(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::VictimAge => self.victim_age,
            NumericField::SharkLength => self.shark_length,
            NumericField::Latitude => self.latitude,
            NumericField::Longitude => self.longitude,
            NumericField::IncidentYear => self.incident_year.map(f64::from),
        }
    }

    /// Returns the location name with the [`UNKNOWN_LOCATION`] sentinel
    /// substituted for missing values.
    #[must_use]
    pub fn location_or_unknown(&self) -> &str {
        self.location.as_deref().unwrap_or(UNKNOWN_LOCATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_codes_are_distinct() {
        let mut codes: Vec<&str> = AusState::all().iter().map(|s| s.region_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), AusState::all().len());
    }

    #[test]
    fn state_parses_from_abbreviation() {
        assert_eq!("NSW".parse::<AusState>().unwrap(), AusState::NSW);
        assert!("XYZ".parse::<AusState>().is_err());
    }

    #[test]
    fn victim_clothing_shares_shark_length_column() {
        assert_eq!(
            Metric::VictimClothing.column(),
            Metric::SharkLength.column()
        );
        // Once reduced to the column the clothing option is gone.
        assert_eq!(
            Metric::from_column("Shark.length.m"),
            Some(Metric::SharkLength)
        );
    }

    #[test]
    fn metric_columns_resolve() {
        for metric in [Metric::VictimAge, Metric::SharkLength, Metric::SharkName] {
            assert_eq!(Metric::from_column(metric.column()), Some(metric));
        }
        assert_eq!(Metric::from_column("Victim.clothing"), None);
    }

    #[test]
    fn numeric_value_covers_all_fields() {
        let record = IncidentRecord {
            state: Some(AusState::NSW),
            location: Some("Bondi".to_string()),
            species: Some("White Shark".to_string()),
            shark_length: Some(3.5),
            victim_age: Some(27.0),
            incident_year: Some(2019),
            latitude: Some(-33.89),
            longitude: Some(151.27),
        };

        for field in NumericField::all() {
            assert!(record.numeric_value(*field).is_some(), "{field:?}");
        }
        assert!(
            (record.numeric_value(NumericField::IncidentYear).unwrap() - 2019.0).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn missing_location_uses_sentinel() {
        let record = IncidentRecord {
            state: None,
            location: None,
            species: None,
            shark_length: None,
            victim_age: None,
            incident_year: None,
            latitude: None,
            longitude: None,
        };
        assert_eq!(record.location_or_unknown(), UNKNOWN_LOCATION);
        assert!(record.metric_value(Metric::VictimAge).is_none());
    }
}
