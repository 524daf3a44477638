//! Region synchronizer: keeps the region multi-select and the "select
//! all" checklist consistent with the selected state.

use serde::{Deserialize, Serialize};
use shark_map_dataset::IncidentTable;
use shark_map_incident_models::AusState;

/// The options and selected values of the region multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSelect {
    /// Selectable region names, in dropdown order.
    pub options: Vec<String>,
    /// Currently selected region names.
    pub selected: Vec<String>,
}

/// Returns the region options for a state: the distinct, non-blank
/// location names of its records, with the unknown-location sentinel
/// substituted for missing values, sorted lexicographically.
///
/// The sort order is a contract, not an implementation detail: it is the
/// order the dropdown presents.
#[must_use]
pub fn region_options(table: &IncidentTable, state: Option<AusState>) -> Vec<String> {
    let Some(state) = state else {
        return Vec::new();
    };

    let mut regions: Vec<String> = table
        .records_for_state(state)
        .map(|record| record.location_or_unknown().trim().to_owned())
        .filter(|location| !location.is_empty())
        .collect();

    regions.sort();
    regions.dedup();
    regions
}

/// Recomputes the region multi-select for a state and "select all" flag.
///
/// With no state selected both lists are empty. With "select all" checked
/// the selection equals the full options list, otherwise it is empty.
#[must_use]
pub fn sync_region_select(
    table: &IncidentTable,
    state: Option<AusState>,
    select_all: bool,
) -> RegionSelect {
    let options = region_options(table, state);
    let selected = if select_all {
        options.clone()
    } else {
        Vec::new()
    };
    RegionSelect { options, selected }
}

/// The outcome of reconciling the "select all" checklist against the
/// current region selection.
///
/// [`ChecklistUpdate::NoChange`] is an explicit suppression: emitting an
/// update in those states would re-trigger the region-select callback and
/// oscillate forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChecklistUpdate {
    /// Suppress the update entirely.
    NoChange,
    /// Reset the checklist to its unchecked, empty-value configuration.
    SetUnchecked,
    /// Set the checklist to its checked configuration.
    SetChecked,
}

/// The checklist reconciliation state machine.
///
/// | condition | action |
/// |---|---|
/// | selected < options, unchecked | no change |
/// | selected < options, checked | reset to unchecked |
/// | selected == options, checked | no change |
/// | otherwise | set checked |
#[must_use]
pub const fn reconcile_select_all(
    selected_count: usize,
    options_count: usize,
    checked: bool,
) -> ChecklistUpdate {
    if selected_count < options_count {
        if checked {
            ChecklistUpdate::SetUnchecked
        } else {
            ChecklistUpdate::NoChange
        }
    } else if checked {
        ChecklistUpdate::NoChange
    } else {
        ChecklistUpdate::SetChecked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shark_map_incident_models::IncidentRecord;

    fn record(state: AusState, location: Option<&str>) -> IncidentRecord {
        IncidentRecord {
            state: Some(state),
            location: location.map(str::to_owned),
            species: None,
            shark_length: None,
            victim_age: None,
            incident_year: None,
            latitude: None,
            longitude: None,
        }
    }

    fn table() -> IncidentTable {
        IncidentTable::from_records(vec![
            record(AusState::NSW, Some("Manly")),
            record(AusState::NSW, Some("Bondi")),
            record(AusState::NSW, Some("Bondi")),
            record(AusState::NSW, None),
            record(AusState::QLD, Some("Noosa")),
        ])
    }

    #[test]
    fn options_are_sorted_deduplicated_with_sentinel() {
        let options = region_options(&table(), Some(AusState::NSW));
        assert_eq!(options, vec!["Bondi", "Manly", "Unknown Location"]);
    }

    #[test]
    fn no_state_means_no_options() {
        let select = sync_region_select(&table(), None, true);
        assert!(select.options.is_empty());
        assert!(select.selected.is_empty());
    }

    #[test]
    fn select_all_selects_every_option() {
        let select = sync_region_select(&table(), Some(AusState::NSW), true);
        assert_eq!(select.selected, select.options);

        let select = sync_region_select(&table(), Some(AusState::NSW), false);
        assert!(select.selected.is_empty());
        assert_eq!(select.options.len(), 3);
    }

    #[test]
    fn partial_selection_while_unchecked_is_suppressed() {
        // options=[A,B,C], selected=[A,B], unchecked: idempotent suppression.
        assert_eq!(reconcile_select_all(2, 3, false), ChecklistUpdate::NoChange);
    }

    #[test]
    fn partial_selection_while_checked_resets() {
        assert_eq!(
            reconcile_select_all(2, 3, true),
            ChecklistUpdate::SetUnchecked
        );
    }

    #[test]
    fn full_selection_while_checked_is_suppressed() {
        assert_eq!(reconcile_select_all(3, 3, true), ChecklistUpdate::NoChange);
    }

    #[test]
    fn full_selection_while_unchecked_checks() {
        // options=[A,B,C], selected=[A,B,C], unchecked: transition to checked.
        assert_eq!(reconcile_select_all(3, 3, false), ChecklistUpdate::SetChecked);
    }

    #[test]
    fn reconciliation_reaches_a_fixed_point() {
        // Whatever the starting configuration, applying the transition's
        // result once more must suppress. This is the no-oscillation
        // guarantee.
        for (selected, options) in [(0usize, 3usize), (2, 3), (3, 3), (0, 0)] {
            for checked in [false, true] {
                let next_checked = match reconcile_select_all(selected, options, checked) {
                    ChecklistUpdate::NoChange => checked,
                    ChecklistUpdate::SetUnchecked => false,
                    ChecklistUpdate::SetChecked => true,
                };
                assert_eq!(
                    reconcile_select_all(selected, options, next_checked),
                    ChecklistUpdate::NoChange,
                    "selected={selected} options={options} checked={checked}"
                );
            }
        }
    }
}
