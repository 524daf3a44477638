#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reactive core of the shark incident dashboard.
//!
//! Everything in this crate is a pure function over the immutable
//! [`IncidentTable`](shark_map_dataset::IncidentTable): user input goes
//! in, derived view state comes out. No module here holds mutable shared
//! state, so concurrent handler invocations are safe by construction and
//! a newer event simply supersedes an older one's output.

pub mod filter;
pub mod regions;
pub mod selection;

pub use filter::FilterState;
pub use regions::{ChecklistUpdate, RegionSelect, reconcile_select_all, region_options, sync_region_select};
pub use selection::{
    DetailRow, SelectedPoint, SelectionEvent, SelectionSource, SummaryRow, incident_details,
    metric_summary,
};
