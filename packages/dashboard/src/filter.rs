//! The top-level user-selected filter state.

use serde::{Deserialize, Serialize};
use shark_map_dataset::IncidentTable;
use shark_map_incident_models::{AusState, Metric};

use crate::regions::region_options;

/// The current user selections driving all derived views.
///
/// Invariant: `regions` is always a subset of the region options for
/// `state`; [`FilterState::retain_valid_regions`] restores the invariant
/// after a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Selected state, `None` before any selection.
    pub state: Option<AusState>,
    /// Selected metric.
    pub metric: Metric,
    /// Selected region names.
    pub regions: Vec<String>,
    /// Whether the "select all regions" checklist is checked.
    pub select_all: bool,
}

impl FilterState {
    /// The startup defaults: the first state present in the data, the
    /// species-name metric, and no region selection.
    #[must_use]
    pub fn defaults(table: &IncidentTable) -> Self {
        Self {
            state: table.states().first().copied(),
            metric: Metric::SharkName,
            regions: Vec::new(),
            select_all: false,
        }
    }

    /// Drops any selected region that is not an option for the current
    /// state, restoring the subset invariant.
    pub fn retain_valid_regions(&mut self, table: &IncidentTable) {
        let options = region_options(table, self.state);
        self.regions.retain(|region| options.contains(region));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shark_map_incident_models::IncidentRecord;

    fn record(state: AusState, location: &str) -> IncidentRecord {
        IncidentRecord {
            state: Some(state),
            location: Some(location.to_string()),
            species: Some("White Shark".to_string()),
            shark_length: Some(3.0),
            victim_age: Some(30.0),
            incident_year: Some(2020),
            latitude: Some(-33.0),
            longitude: Some(151.0),
        }
    }

    #[test]
    fn defaults_use_first_state_in_data() {
        let table = IncidentTable::from_records(vec![
            record(AusState::QLD, "Noosa"),
            record(AusState::NSW, "Bondi"),
        ]);
        let state = FilterState::defaults(&table);
        assert_eq!(state.state, Some(AusState::QLD));
        assert_eq!(state.metric, Metric::SharkName);
        assert!(state.regions.is_empty());
        assert!(!state.select_all);
    }

    #[test]
    fn state_change_drops_stale_regions() {
        let table = IncidentTable::from_records(vec![
            record(AusState::NSW, "Bondi"),
            record(AusState::QLD, "Noosa"),
        ]);
        let mut state = FilterState {
            state: Some(AusState::QLD),
            metric: Metric::VictimAge,
            regions: vec!["Bondi".to_string(), "Noosa".to_string()],
            select_all: false,
        };
        state.retain_valid_regions(&table);
        assert_eq!(state.regions, vec!["Noosa".to_string()]);
    }
}
