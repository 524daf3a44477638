//! Choropleth map builder.

use serde_json::json;
use shark_map_dataset::IncidentTable;
use shark_map_geography::{GeographyIndex, STATE_CODE_PROPERTY};
use shark_map_incident_models::{AusState, IncidentRecord, Metric, MetricValue};

use crate::{Figure, PLOT_BACKGROUND};

/// Title of the placeholder figure returned when the filtered set is
/// empty.
pub const NO_DATA_TITLE: &str = "No data available for the selected state";

/// Map title shown over the populated figure.
pub const MAP_TITLE: &str = "Shark Incidents in Australian States";

/// Geographic center of Australia used for the map projection.
const MAP_CENTER: (f64, f64) = (-25.2744, 133.7751);

/// Builds the choropleth figure for a state and metric.
///
/// With no state selected, or a state with zero matching records, the
/// result is a placeholder carrying the "no data" title and no traces.
/// Otherwise the figure contains a single choropleth trace joined onto
/// the boundary geometry by region code, colored by the active metric
/// (species encoded as first-seen integer indices with labels restored on
/// the colorbar), with each point carrying its location name as custom
/// data so map selections can be resolved back to records.
#[must_use]
pub fn build_choropleth(
    table: &IncidentTable,
    geography: &GeographyIndex,
    state: Option<AusState>,
    metric: Metric,
) -> Figure {
    let records: Vec<&IncidentRecord> = state
        .map(|s| table.records_for_state(s).collect())
        .unwrap_or_default();

    let Some(state) = state else {
        return no_data_figure();
    };
    if records.is_empty() {
        return no_data_figure();
    }

    let locations: Vec<&str> = records.iter().map(|_| state.region_code()).collect();
    let customdata: Vec<Vec<String>> = records
        .iter()
        .map(|r| vec![r.location_or_unknown().to_owned()])
        .collect();
    let hovertext: Vec<String> = records
        .iter()
        .map(|r| {
            let value = r
                .metric_value(metric)
                .map_or_else(|| "n/a".to_owned(), |v| v.to_string());
            format!("{}<br>Metric Value: {value}", r.location_or_unknown())
        })
        .collect();

    let mut trace = json!({
        "type": "choropleth",
        "geojson": geography.to_json(),
        "featureidkey": format!("properties.{STATE_CODE_PROPERTY}"),
        "locations": locations,
        "z": metric_z_values(&records, metric),
        "customdata": customdata,
        "hoverinfo": "text",
        "hovertext": hovertext,
        "colorscale": "YlOrRd",
        "colorbar": { "title": { "text": "Metric Value" } },
    });

    // Species is categorical: restore the labels on the colorbar from the
    // same first-seen encoding used for the z values.
    if !metric.is_numeric() {
        let species = species_in_order(&records);
        let tickvals: Vec<usize> = (0..species.len()).collect();
        trace["colorbar"]["tickvals"] = json!(tickvals);
        trace["colorbar"]["ticktext"] = json!(species);
    }

    Figure {
        data: vec![trace],
        layout: json!({
            "title": { "text": MAP_TITLE, "x": 0.5 },
            "margin": { "l": 10, "r": 10, "t": 30, "b": 10 },
            "paper_bgcolor": PLOT_BACKGROUND,
            "geo": {
                "fitbounds": "locations",
                "visible": true,
                "bgcolor": PLOT_BACKGROUND,
                "projection": { "type": "mercator" },
                "center": { "lat": MAP_CENTER.0, "lon": MAP_CENTER.1 },
                "scope": "world",
            },
        }),
    }
}

/// The placeholder returned instead of failing on an empty filtered set.
fn no_data_figure() -> Figure {
    Figure::empty(json!({
        "title": { "text": NO_DATA_TITLE },
        "paper_bgcolor": PLOT_BACKGROUND,
        "plot_bgcolor": PLOT_BACKGROUND,
    }))
}

/// Distinct species of the filtered records in first-seen order.
fn species_in_order(records: &[&IncidentRecord]) -> Vec<String> {
    let mut seen = Vec::new();
    for record in records {
        if let Some(species) = &record.species {
            if !seen.iter().any(|s| s == species) {
                seen.push(species.clone());
            }
        }
    }
    seen
}

/// The color values for the trace: the metric itself when numeric, or
/// first-seen species indices when categorical. Absent values are `null`.
fn metric_z_values(records: &[&IncidentRecord], metric: Metric) -> Vec<Option<f64>> {
    if metric.is_numeric() {
        records
            .iter()
            .map(|r| match r.metric_value(metric) {
                Some(MetricValue::Number(n)) => Some(n),
                _ => None,
            })
            .collect()
    } else {
        let species = species_in_order(records);
        records
            .iter()
            .map(|r| {
                r.species.as_ref().and_then(|s| {
                    #[allow(clippy::cast_precision_loss)]
                    species.iter().position(|x| x == s).map(|i| i as f64)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::GeoJson;
    use std::str::FromStr as _;

    fn geography() -> GeographyIndex {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "STATE_CODE": "1" },
                "geometry": { "type": "Polygon", "coordinates": [[[141.0,-34.0],[153.6,-34.0],[153.6,-28.2],[141.0,-28.2],[141.0,-34.0]]] }
            }]
        }"#;
        let GeoJson::FeatureCollection(collection) = GeoJson::from_str(raw).unwrap() else {
            panic!("fixture must be a feature collection");
        };
        GeographyIndex::from_collection(collection)
    }

    fn record(state: AusState, location: &str, species: &str, length: Option<f64>) -> IncidentRecord {
        IncidentRecord {
            state: Some(state),
            location: Some(location.to_string()),
            species: Some(species.to_string()),
            shark_length: length,
            victim_age: None,
            incident_year: Some(2020),
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn empty_filtered_set_yields_no_data_placeholder() {
        let table = IncidentTable::from_records(vec![record(
            AusState::NSW,
            "Bondi",
            "White Shark",
            Some(3.0),
        )]);
        let figure = build_choropleth(&table, &geography(), Some(AusState::TAS), Metric::VictimAge);
        assert!(figure.data.is_empty());
        assert_eq!(figure.layout["title"]["text"], NO_DATA_TITLE);
    }

    #[test]
    fn no_state_yields_no_data_placeholder() {
        let table = IncidentTable::from_records(vec![]);
        let figure = build_choropleth(&table, &geography(), None, Metric::VictimAge);
        assert!(figure.data.is_empty());
    }

    #[test]
    fn trace_joins_by_region_code_and_carries_location_customdata() {
        let table = IncidentTable::from_records(vec![
            record(AusState::NSW, "Bondi", "White Shark", Some(3.5)),
            record(AusState::NSW, "Manly", "Tiger Shark", None),
        ]);
        let figure =
            build_choropleth(&table, &geography(), Some(AusState::NSW), Metric::SharkLength);

        assert_eq!(figure.data.len(), 1);
        let trace = &figure.data[0];
        assert_eq!(trace["featureidkey"], "properties.STATE_CODE");
        assert_eq!(trace["locations"], json!(["1", "1"]));
        assert_eq!(trace["customdata"][0][0], "Bondi");
        assert_eq!(trace["customdata"][1][0], "Manly");
        // Absent metric values serialize as null, not zero.
        assert_eq!(trace["z"], json!([3.5, null]));
    }

    #[test]
    fn categorical_metric_gets_colorbar_tick_labels() {
        let table = IncidentTable::from_records(vec![
            record(AusState::NSW, "Bondi", "White Shark", None),
            record(AusState::NSW, "Manly", "Tiger Shark", None),
            record(AusState::NSW, "Bondi", "White Shark", None),
        ]);
        let figure =
            build_choropleth(&table, &geography(), Some(AusState::NSW), Metric::SharkName);

        let trace = &figure.data[0];
        assert_eq!(trace["z"], json!([0.0, 1.0, 0.0]));
        assert_eq!(
            trace["colorbar"]["ticktext"],
            json!(["White Shark", "Tiger Shark"])
        );
    }
}
