//! Parallel-coordinates plot builder.
//!
//! Pure over the full (unfiltered) table: the plot deliberately does not
//! react to the state/region filters.

use serde::{Deserialize, Serialize};
use serde_json::json;
use shark_map_dataset::IncidentTable;
use shark_map_incident_models::NumericField;

use crate::{AXIS_COLOR, Figure, PLOT_BACKGROUND};

/// One parallel-coordinates axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// Axis range, computed from valid values only.
    pub range: [f64; 2],
    /// Axis label.
    pub label: String,
    /// Per-record values; `None` renders as a gap.
    pub values: Vec<Option<f64>>,
    /// Tick labels for categorical axes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticktext: Option<Vec<String>>,
    /// Tick positions for categorical axes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<f64>>,
}

/// Builds one numeric axis: values coerced to numeric with failures
/// absent, range spanning only the valid values.
#[must_use]
pub fn numeric_dimension(table: &IncidentTable, field: NumericField) -> Dimension {
    let values = table.numeric_column(field);
    let (min, max) = values
        .iter()
        .flatten()
        .fold((None, None), |(min, max): (Option<f64>, Option<f64>), &v| {
            (
                Some(min.map_or(v, |m| m.min(v))),
                Some(max.map_or(v, |m| m.max(v))),
            )
        });

    Dimension {
        range: [min.unwrap_or(0.0), max.unwrap_or(0.0)],
        label: field.label().to_owned(),
        values,
        ticktext: None,
        tickvals: None,
    }
}

/// Builds the categorical species axis.
///
/// Species are encoded as integer indices `0..k-1` in first-seen order;
/// the tick labels restore the names from that same ordering, so index
/// `i` always round-trips to the `i`-th distinct species.
#[must_use]
pub fn species_dimension(table: &IncidentTable) -> Dimension {
    let species = table.species();

    let values: Vec<Option<f64>> = table
        .records()
        .iter()
        .map(|record| {
            record.species.as_ref().and_then(|s| {
                #[allow(clippy::cast_precision_loss)]
                species.iter().position(|x| x == s).map(|i| i as f64)
            })
        })
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let tickvals: Vec<f64> = (0..species.len()).map(|i| i as f64).collect();
    #[allow(clippy::cast_precision_loss)]
    let upper = species.len() as f64;

    Dimension {
        range: [0.0, upper],
        label: "Shark Species".to_owned(),
        values,
        ticktext: Some(species),
        tickvals: Some(tickvals),
    }
}

/// Builds the parallel-coordinates figure over the full table: one axis
/// per numeric field, the categorical species axis last, lines colored by
/// incident year on the Viridis scale.
#[must_use]
pub fn build_parallel_coordinates(table: &IncidentTable) -> Figure {
    let mut dimensions: Vec<Dimension> = NumericField::all()
        .iter()
        .map(|field| numeric_dimension(table, *field))
        .collect();
    dimensions.push(species_dimension(table));

    let line_color = table.numeric_column(NumericField::IncidentYear);

    Figure {
        data: vec![json!({
            "type": "parcoords",
            "line": {
                "color": line_color,
                "colorscale": "Viridis",
            },
            "dimensions": dimensions,
        })],
        layout: json!({
            "plot_bgcolor": PLOT_BACKGROUND,
            "paper_bgcolor": PLOT_BACKGROUND,
            "font": { "color": AXIS_COLOR },
            "margin": { "l": 80, "r": 80, "t": 30, "b": 30 },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shark_map_incident_models::{AusState, IncidentRecord};

    fn record(species: Option<&str>, age: Option<f64>, year: Option<i32>) -> IncidentRecord {
        IncidentRecord {
            state: Some(AusState::NSW),
            location: Some("Bondi".to_string()),
            species: species.map(str::to_owned),
            shark_length: Some(2.0),
            victim_age: age,
            incident_year: year,
            latitude: Some(-33.0),
            longitude: Some(151.0),
        }
    }

    fn table() -> IncidentTable {
        IncidentTable::from_records(vec![
            record(Some("White Shark"), Some(25.0), Some(2018)),
            record(Some("Tiger Shark"), None, Some(2020)),
            record(Some("White Shark"), Some(40.0), Some(2019)),
            record(None, Some(33.0), None),
        ])
    }

    #[test]
    fn species_index_round_trips_through_tick_labels() {
        let dim = species_dimension(&table());
        let ticktext = dim.ticktext.as_ref().unwrap();

        for (i, label) in ticktext.iter().enumerate() {
            // The i-th distinct species encodes to i, and i looks up the
            // same label again.
            #[allow(clippy::cast_precision_loss)]
            let expected = i as f64;
            let encoded = dim
                .values
                .iter()
                .flatten()
                .find(|&&v| (v - expected).abs() < f64::EPSILON);
            assert!(encoded.is_some(), "species {label} never encoded");
        }

        assert_eq!(ticktext[0], "White Shark");
        assert_eq!(ticktext[1], "Tiger Shark");
        // Missing species renders as a gap.
        assert_eq!(dim.values[3], None);
    }

    #[test]
    fn numeric_range_skips_invalid_values() {
        let dim = numeric_dimension(&table(), NumericField::VictimAge);
        assert_eq!(dim.range, [25.0, 40.0]);
        assert_eq!(dim.values[1], None);
    }

    #[test]
    fn empty_column_gets_zero_range() {
        let empty = IncidentTable::from_records(vec![]);
        let dim = numeric_dimension(&empty, NumericField::SharkLength);
        assert_eq!(dim.range, [0.0, 0.0]);
    }

    #[test]
    fn figure_has_six_axes_and_year_line_color() {
        let figure = build_parallel_coordinates(&table());
        assert_eq!(figure.data.len(), 1);
        let trace = &figure.data[0];
        assert_eq!(trace["dimensions"].as_array().unwrap().len(), 6);
        assert_eq!(trace["line"]["colorscale"], "Viridis");
        assert_eq!(trace["line"]["color"][0], 2018.0);
    }
}
