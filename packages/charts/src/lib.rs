#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart-specification builders for the dashboard figures.
//!
//! Every builder is a pure function from the incident table (and, for the
//! map, the geography index) to a Plotly-style figure specification. The
//! builders never mutate anything and never fail: an empty filtered set
//! produces a placeholder figure, not an error.

pub mod choropleth;
pub mod distribution;
pub mod parcoords;

use serde::{Deserialize, Serialize};

/// Dashboard background color shared by every figure.
pub const PLOT_BACKGROUND: &str = "#171b26";

/// Axis and label font color shared by every figure.
pub const AXIS_COLOR: &str = "#737a8d";

/// A Plotly-style figure specification: a list of traces plus a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// The figure's traces.
    pub data: Vec<serde_json::Value>,
    /// The figure's layout.
    pub layout: serde_json::Value,
}

impl Figure {
    /// A figure with no traces and the given layout.
    #[must_use]
    pub const fn empty(layout: serde_json::Value) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }
}
