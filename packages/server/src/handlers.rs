//! HTTP handler functions for the dashboard API.
//!
//! Handlers are thin adapters: they parse query/body parameters into the
//! core's typed inputs, call the pure functions, and serialize the
//! results. Missing or unparseable selections degrade to empty views
//! rather than errors; the checklist's suppression state maps to
//! `204 No Content`.

use actix_web::{HttpResponse, web};
use shark_map_charts::{choropleth, distribution, parcoords};
use shark_map_dashboard::{
    ChecklistUpdate, FilterState, incident_details, metric_summary, reconcile_select_all,
    sync_region_select,
};
use shark_map_incident_models::{AusState, Metric};
use shark_map_server_models::{
    ApiChecklist, ApiControls, ApiDetailTable, ApiHealth, ApiOption, ApiRegionSelect,
    ApiSummaryTable, ChecklistQueryParams, FigureQueryParams, RegionQueryParams, SelectionRequest,
};

use crate::AppState;

/// Parses an optional state-code parameter; unrecognized codes degrade to
/// no selection.
fn parse_state(param: Option<&str>) -> Option<AusState> {
    param.and_then(|s| s.trim().parse().ok())
}

/// Parses an optional metric-column parameter, falling back to the
/// default metric.
fn parse_metric(param: Option<&str>) -> Metric {
    param
        .and_then(Metric::from_column)
        .unwrap_or(Metric::SharkName)
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/controls`
///
/// Returns the dropdown configuration: the distinct state codes present
/// in the data, the fixed metric options (two of which share a value),
/// and the startup filter defaults.
pub async fn controls(state: web::Data<AppState>) -> HttpResponse {
    let states: Vec<ApiOption> = state
        .table
        .states()
        .iter()
        .map(|s| ApiOption::plain(s.as_ref()))
        .collect();

    let metrics: Vec<ApiOption> = Metric::all()
        .iter()
        .map(|m| ApiOption {
            label: m.label().to_owned(),
            value: m.column().to_owned(),
        })
        .collect();

    HttpResponse::Ok().json(ApiControls {
        states,
        metrics,
        defaults: FilterState::defaults(&state.table),
    })
}

/// `GET /api/regions`
///
/// Recomputes the region multi-select options and selected values for a
/// state and "select all" flag.
pub async fn regions(
    state: web::Data<AppState>,
    params: web::Query<RegionQueryParams>,
) -> HttpResponse {
    let selected_state = parse_state(params.state.as_deref());
    let select = sync_region_select(
        &state.table,
        selected_state,
        params.select_all.unwrap_or(false),
    );

    HttpResponse::Ok().json(ApiRegionSelect {
        options: select
            .options
            .iter()
            .map(|o| ApiOption::plain(o))
            .collect(),
        value: select.selected,
    })
}

/// `GET /api/select-all`
///
/// Runs the checklist reconciliation state machine. A suppressed update
/// is a `204 No Content`; the client must leave the checklist untouched,
/// which is what breaks the mutual-update oscillation.
pub async fn select_all(params: web::Query<ChecklistQueryParams>) -> HttpResponse {
    match reconcile_select_all(params.selected, params.options, params.checked) {
        ChecklistUpdate::NoChange => HttpResponse::NoContent().finish(),
        ChecklistUpdate::SetUnchecked => HttpResponse::Ok().json(ApiChecklist { checked: false }),
        ChecklistUpdate::SetChecked => HttpResponse::Ok().json(ApiChecklist { checked: true }),
    }
}

/// `GET /api/map`
///
/// Returns the choropleth figure for the selected state and metric.
pub async fn geo_map(
    state: web::Data<AppState>,
    params: web::Query<FigureQueryParams>,
) -> HttpResponse {
    let figure = choropleth::build_choropleth(
        &state.table,
        &state.geography,
        parse_state(params.state.as_deref()),
        parse_metric(params.metric.as_deref()),
    );
    HttpResponse::Ok().json(figure)
}

/// `GET /api/parallel-coordinates`
///
/// Returns the parallel-coordinates figure over the full dataset. This
/// figure deliberately ignores the state/region filters.
pub async fn parallel_coordinates(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(parcoords::build_parallel_coordinates(&state.table))
}

/// `GET /api/distribution`
///
/// Returns the metric-by-species distribution figure.
pub async fn distribution(
    state: web::Data<AppState>,
    params: web::Query<FigureQueryParams>,
) -> HttpResponse {
    let highlighted: Vec<String> = params
        .highlighted
        .as_deref()
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    let figure = distribution::build_distribution(
        &state.table,
        parse_state(params.state.as_deref()),
        parse_metric(params.metric.as_deref()),
        &highlighted,
    );
    HttpResponse::Ok().json(figure)
}

/// `POST /api/selection/summary`
///
/// Returns the metric summary table for a tagged selection event.
pub async fn selection_summary(
    state: web::Data<AppState>,
    body: web::Json<SelectionRequest>,
) -> HttpResponse {
    let rows = metric_summary(
        &state.table,
        body.event.as_ref(),
        parse_state(body.state.as_deref()),
        parse_metric(body.metric.as_deref()),
    );

    HttpResponse::Ok().json(ApiSummaryTable {
        columns: ApiSummaryTable::columns(),
        rows,
    })
}

/// `POST /api/selection/details`
///
/// Returns the incident detail table for a tagged selection event.
pub async fn selection_details(
    state: web::Data<AppState>,
    body: web::Json<SelectionRequest>,
) -> HttpResponse {
    let rows = incident_details(
        &state.table,
        body.event.as_ref(),
        parse_state(body.state.as_deref()),
        parse_metric(body.metric.as_deref()),
    );

    HttpResponse::Ok().json(ApiDetailTable {
        columns: ApiDetailTable::columns(),
        rows,
    })
}
