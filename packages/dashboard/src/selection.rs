//! Selection aggregator: converts chart point-selections into the two
//! summary tables.
//!
//! Selections arrive as explicit tagged events carrying the identity of
//! the chart that fired them. Only the triggering chart's points are
//! consulted; a stale selection lingering on the other chart is ignored
//! even if the frontend sends both.

use serde::{Deserialize, Serialize};
use shark_map_dataset::IncidentTable;
use shark_map_incident_models::{AusState, IncidentRecord, Metric, MetricValue};

/// Which chart fired the selection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionSource {
    /// The choropleth map.
    GeoMap,
    /// The metric-by-species distribution plot.
    DistributionPlot,
}

/// One selected chart point.
///
/// `location` is the custom data embedded in every trace point; it is the
/// key used to resolve the point back to its source records. The axis
/// values are only meaningful for distribution-plot points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedPoint {
    /// Location name carried as point custom data.
    pub location: String,
    /// The point's metric-axis value (distribution plot only).
    pub x: Option<f64>,
    /// The point's species-axis value (distribution plot only).
    pub y: Option<String>,
}

/// A tagged point-selection event from one of the two charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEvent {
    /// The chart that fired the event.
    pub source: SelectionSource,
    /// The selected points, in selection order.
    pub points: Vec<SelectedPoint>,
}

/// One row of the metric summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    /// Location name.
    pub location: Option<String>,
    /// Species of the first incident at the location.
    pub species: Option<String>,
    /// Year of the first incident at the location.
    pub incident_year: Option<i32>,
    /// Maximum of the active metric over all incidents at the location.
    pub metric_max: Option<MetricValue>,
    /// Minimum of the active metric over all incidents at the location.
    pub metric_min: Option<MetricValue>,
}

impl SummaryRow {
    /// The well-defined "no selection yet" row.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            location: None,
            species: None,
            incident_year: None,
            metric_max: None,
            metric_min: None,
        }
    }
}

/// One row of the incident detail table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRow {
    /// Species name.
    pub species: Option<String>,
    /// Location name.
    pub location: Option<String>,
    /// Incident year. Distribution-plot selections carry the point's
    /// metric-axis value here.
    pub incident_year: Option<f64>,
    /// Formatted metric value.
    pub metric_summary: Option<String>,
}

/// Computes the per-location min/max of a metric over a set of records.
///
/// Numeric metrics use numeric ordering; the species metric orders
/// lexicographically. Records with an absent metric value are ignored;
/// if none remain, both bounds are `None`.
fn metric_extent(records: &[&IncidentRecord], metric: Metric) -> (Option<MetricValue>, Option<MetricValue>) {
    if metric.is_numeric() {
        let values: Vec<f64> = records
            .iter()
            .filter_map(|r| match r.metric_value(metric) {
                Some(MetricValue::Number(n)) => Some(n),
                _ => None,
            })
            .collect();
        let min = values.iter().copied().fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.min(v)))
        });
        let max = values.iter().copied().fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.max(v)))
        });
        (max.map(MetricValue::Number), min.map(MetricValue::Number))
    } else {
        let mut values: Vec<String> = records
            .iter()
            .filter_map(|r| match r.metric_value(metric) {
                Some(MetricValue::Text(s)) => Some(s),
                _ => None,
            })
            .collect();
        values.sort();
        (
            values.last().cloned().map(MetricValue::Text),
            values.first().cloned().map(MetricValue::Text),
        )
    }
}

/// Builds the metric summary table for a selection event.
///
/// If no chart has fired yet (`trigger` is `None`), the result is a
/// single all-empty row, a well-defined "no selection yet" rendering
/// state rather than an absent table. Otherwise one row is emitted per
/// selected point, in selection order and without deduplicating repeated
/// locations; points that resolve to no record in the state-filtered
/// table are silently skipped.
#[must_use]
pub fn metric_summary(
    table: &IncidentTable,
    trigger: Option<&SelectionEvent>,
    state: Option<AusState>,
    metric: Metric,
) -> Vec<SummaryRow> {
    let Some(event) = trigger else {
        return vec![SummaryRow::empty()];
    };

    let mut rows = Vec::new();

    for point in &event.points {
        let Some(state) = state else { continue };
        let matches: Vec<&IncidentRecord> = table.records_at(state, &point.location).collect();
        if matches.is_empty() {
            continue;
        }

        let (metric_max, metric_min) = metric_extent(&matches, metric);
        rows.push(SummaryRow {
            location: Some(point.location.clone()),
            species: matches[0].species.clone(),
            incident_year: matches[0].incident_year,
            metric_max,
            metric_min,
        });
    }

    rows
}

/// Formats a metric value for the detail table.
fn format_metric(value: Option<MetricValue>) -> Option<String> {
    value.map(|v| v.to_string())
}

/// Builds the incident detail table for a selection event.
///
/// A distribution-plot trigger yields one row per selected point from the
/// point's own axis values. A map trigger yields one row per incident at
/// any of the selected locations, in table order; the metric summary of
/// every row comes from the first matching record. With no trigger the
/// table is empty.
#[must_use]
pub fn incident_details(
    table: &IncidentTable,
    trigger: Option<&SelectionEvent>,
    state: Option<AusState>,
    metric: Metric,
) -> Vec<DetailRow> {
    let Some(event) = trigger else {
        return Vec::new();
    };

    match event.source {
        SelectionSource::DistributionPlot => event
            .points
            .iter()
            .map(|point| DetailRow {
                species: point.y.clone(),
                location: Some(point.location.clone()),
                incident_year: point.x,
                metric_summary: point.x.map(|x| MetricValue::Number(x).to_string()),
            })
            .collect(),
        SelectionSource::GeoMap => {
            let Some(state) = state else {
                return Vec::new();
            };

            let locations: Vec<&str> =
                event.points.iter().map(|p| p.location.as_str()).collect();

            let matches: Vec<&IncidentRecord> = table
                .records_for_state(state)
                .filter(|r| locations.contains(&r.location_or_unknown()))
                .collect();

            let first_metric =
                format_metric(matches.first().and_then(|r| r.metric_value(metric)));

            matches
                .iter()
                .map(|record| DetailRow {
                    species: record.species.clone(),
                    location: Some(record.location_or_unknown().to_owned()),
                    incident_year: record.incident_year.map(f64::from),
                    metric_summary: first_metric.clone(),
                })
                .collect()
        }
    }
}
