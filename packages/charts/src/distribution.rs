//! Metric-by-species distribution plot builder.
//!
//! A box trace rendered as individual points: one point per incident,
//! species on the y axis, the active metric on the (log-scaled) x axis.
//! Each point carries its location name as custom data so selections on
//! this chart resolve through the same aggregator as map selections.

use serde_json::json;
use shark_map_dataset::IncidentTable;
use shark_map_incident_models::{AusState, IncidentRecord, Metric, MetricValue};

use crate::{AXIS_COLOR, Figure, PLOT_BACKGROUND};

/// Builds the distribution figure for a state and metric.
///
/// Points whose location is in `highlighted` are marked as selected;
/// the rest are dimmed.
#[must_use]
pub fn build_distribution(
    table: &IncidentTable,
    state: Option<AusState>,
    metric: Metric,
    highlighted: &[String],
) -> Figure {
    let records: Vec<&IncidentRecord> = state
        .map(|s| table.records_for_state(s).collect())
        .unwrap_or_default();

    let y: Vec<Option<&str>> = records.iter().map(|r| r.species.as_deref()).collect();
    let x: Vec<Option<f64>> = records
        .iter()
        .map(|r| match r.metric_value(metric) {
            Some(MetricValue::Number(n)) => Some(n),
            _ => None,
        })
        .collect();
    let customdata: Vec<&str> = records.iter().map(|r| r.location_or_unknown()).collect();

    let selectedpoints: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            highlighted
                .iter()
                .any(|h| h == r.location_or_unknown())
        })
        .map(|(i, _)| i)
        .collect();

    let hovertext: Vec<String> = records
        .iter()
        .map(|r| {
            format!(
                "{}<br><b>{}</b><br>Incident Year: {}",
                r.location_or_unknown(),
                r.species.as_deref().unwrap_or("Unknown"),
                r.incident_year
                    .map_or_else(|| "Unknown".to_owned(), |y| y.to_string()),
            )
        })
        .collect();

    Figure {
        data: vec![json!({
            "type": "box",
            "y": y,
            "x": x,
            "name": "",
            "customdata": customdata,
            "boxpoints": "all",
            "jitter": 0,
            "pointpos": 0,
            "hoveron": "points",
            "fillcolor": "rgba(0,0,0,0)",
            "line": { "color": "rgba(0,0,0,0)" },
            "hoverinfo": "text",
            "hovertext": hovertext,
            "selectedpoints": selectedpoints,
            "selected": { "marker": { "color": "#FFFF00", "size": 13 } },
            "unselected": { "marker": { "opacity": 0.2 } },
            "marker": {
                "line": { "width": 1, "color": "#000000" },
                "color": "#21c7ef",
                "opacity": 0.7,
                "symbol": "square",
                "size": 12,
            },
        })],
        layout: json!({
            "showlegend": false,
            "hovermode": "closest",
            "dragmode": "select",
            "clickmode": "event+select",
            "xaxis": {
                "zeroline": false,
                "automargin": true,
                "showticklabels": true,
                "title": { "text": "Metric", "font": { "color": AXIS_COLOR } },
                "linecolor": AXIS_COLOR,
                "tickfont": { "color": AXIS_COLOR },
                "type": "log",
            },
            "yaxis": {
                "automargin": true,
                "showticklabels": true,
                "tickfont": { "color": AXIS_COLOR },
                "gridcolor": PLOT_BACKGROUND,
            },
            "plot_bgcolor": PLOT_BACKGROUND,
            "paper_bgcolor": PLOT_BACKGROUND,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(location: &str, species: &str, length: f64) -> IncidentRecord {
        IncidentRecord {
            state: Some(AusState::NSW),
            location: Some(location.to_string()),
            species: Some(species.to_string()),
            shark_length: Some(length),
            victim_age: None,
            incident_year: Some(2020),
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn points_carry_location_customdata() {
        let table = IncidentTable::from_records(vec![
            record("Bondi", "White Shark", 3.5),
            record("Manly", "Bull Shark", 2.8),
        ]);
        let figure = build_distribution(&table, Some(AusState::NSW), Metric::SharkLength, &[]);
        let trace = &figure.data[0];
        assert_eq!(trace["customdata"], json!(["Bondi", "Manly"]));
        assert_eq!(trace["selectedpoints"], json!([]));
    }

    #[test]
    fn highlighted_locations_become_selected_points() {
        let table = IncidentTable::from_records(vec![
            record("Bondi", "White Shark", 3.5),
            record("Manly", "Bull Shark", 2.8),
            record("Bondi", "Tiger Shark", 2.1),
        ]);
        let figure = build_distribution(
            &table,
            Some(AusState::NSW),
            Metric::SharkLength,
            &["Bondi".to_string()],
        );
        assert_eq!(figure.data[0]["selectedpoints"], json!([0, 2]));
    }

    #[test]
    fn no_state_yields_empty_trace() {
        let table = IncidentTable::from_records(vec![record("Bondi", "White Shark", 3.5)]);
        let figure = build_distribution(&table, None, Metric::SharkLength, &[]);
        assert_eq!(figure.data[0]["x"], json!([]));
        assert_eq!(figure.layout["xaxis"]["type"], "log");
    }
}
