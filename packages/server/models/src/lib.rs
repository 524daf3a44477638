#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the dashboard server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the core dashboard types to allow independent evolution of the
//! API contract.

use serde::{Deserialize, Serialize};
use shark_map_dashboard::{DetailRow, FilterState, SelectionEvent, SummaryRow};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// A dropdown option: what the user sees and what the callback receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOption {
    /// Display label.
    pub label: String,
    /// Value submitted on selection.
    pub value: String,
}

impl ApiOption {
    /// An option whose label equals its value.
    #[must_use]
    pub fn plain(value: &str) -> Self {
        Self {
            label: value.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// The control-panel configuration: dropdown options plus the startup
/// filter defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiControls {
    /// State dropdown options (distinct codes present in the data).
    pub states: Vec<ApiOption>,
    /// Metric dropdown options (the fixed four, two sharing a value).
    pub metrics: Vec<ApiOption>,
    /// Startup filter state.
    pub defaults: FilterState,
}

/// Query parameters for the region-select endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionQueryParams {
    /// Selected state code.
    pub state: Option<String>,
    /// Whether "select all regions" is checked.
    pub select_all: Option<bool>,
}

/// Response of the region-select endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRegionSelect {
    /// Region dropdown options in contract order.
    pub options: Vec<ApiOption>,
    /// Currently selected region values.
    pub value: Vec<String>,
}

/// Query parameters for the select-all checklist endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistQueryParams {
    /// Number of currently selected regions.
    pub selected: usize,
    /// Number of region options.
    pub options: usize,
    /// Whether the checklist is currently checked.
    pub checked: bool,
}

/// Response of the select-all checklist endpoint when an update is
/// emitted (suppression is a `204 No Content`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChecklist {
    /// The new checked state of the checklist.
    pub checked: bool,
}

/// Query parameters for the figure endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigureQueryParams {
    /// Selected state code.
    pub state: Option<String>,
    /// Selected metric column identifier.
    pub metric: Option<String>,
    /// Comma-separated locations to highlight (distribution plot only).
    pub highlighted: Option<String>,
}

/// Body of the selection-table endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    /// Selected state code.
    pub state: Option<String>,
    /// Selected metric column identifier.
    pub metric: Option<String>,
    /// The triggering selection event, absent when no chart has fired
    /// yet.
    pub event: Option<SelectionEvent>,
}

/// The metric summary table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSummaryTable {
    /// Column headers in display order.
    pub columns: Vec<String>,
    /// Table rows.
    pub rows: Vec<SummaryRow>,
}

impl ApiSummaryTable {
    /// Column headers of the metric summary table.
    #[must_use]
    pub fn columns() -> Vec<String> {
        [
            "Location",
            "Shark Species",
            "Incident Year",
            "Maximum Metric",
            "Minimum Metric",
        ]
        .iter()
        .map(|s| (*s).to_owned())
        .collect()
    }
}

/// The incident detail table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDetailTable {
    /// Column headers in display order.
    pub columns: Vec<String>,
    /// Table rows.
    pub rows: Vec<DetailRow>,
}

impl ApiDetailTable {
    /// Column headers of the incident detail table.
    #[must_use]
    pub fn columns() -> Vec<String> {
        ["Shark Species", "Location", "Incident Year", "Metric Summary"]
            .iter()
            .map(|s| (*s).to_owned())
            .collect()
    }
}
