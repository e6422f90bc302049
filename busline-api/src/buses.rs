use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use busline_core::{BusQuery, CoreError, RouteSearch, SortKey};
use busline_shared::{Bus, BusId};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBusesParams {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "type")]
    pub bus_type: Option<String>,
    pub sort_by: Option<String>,
}

impl TryFrom<ListBusesParams> for BusQuery {
    type Error = CoreError;

    fn try_from(params: ListBusesParams) -> Result<Self, Self::Error> {
        let sort_by = params
            .sort_by
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<SortKey>)
            .transpose()?;

        Ok(BusQuery {
            from: params.from,
            to: params.to,
            bus_type: params.bus_type,
            sort_by,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct BusListResponse {
    pub success: bool,
    pub buses: Vec<Bus>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct BusResponse {
    pub success: bool,
    pub bus: Bus,
    /// Fraction of the bus's capacity already sold
    pub utilization: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub count: usize,
    pub date: Option<NaiveDate>,
    pub buses: Vec<Bus>,
}

/// Travel dates are `YYYY-MM-DD` and may not lie before `today`
fn parse_travel_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, CoreError> {
    let raw = raw.trim();
    let date = (raw.len() == 10)
        .then(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .flatten()
        .ok_or_else(|| CoreError::validation("date", "must be in YYYY-MM-DD format"))?;

    if date < today {
        return Err(CoreError::validation("date", "cannot be in the past"));
    }
    Ok(date)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/buses", get(list_buses))
        .route("/api/buses/search", get(search_buses))
        .route("/api/buses/{id}", get(get_bus))
}

/// GET /api/buses
async fn list_buses(
    State(state): State<AppState>,
    params: Result<Query<ListBusesParams>, QueryRejection>,
) -> Result<Json<BusListResponse>, AppError> {
    let Query(params) = params?;
    let query = BusQuery::try_from(params)?;

    let buses = state.repository.list_buses(&query).await;
    Ok(Json(BusListResponse {
        success: true,
        total: buses.len(),
        buses,
    }))
}

/// GET /api/buses/search
async fn search_buses(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Query(params) = params?;
    let route = RouteSearch::new(params.from.as_deref(), params.to.as_deref())?;
    let date = params
        .date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(|d| parse_travel_date(d, Local::now().date_naive()))
        .transpose()?;

    let buses = state.repository.search_route(&route).await;
    if buses.is_empty() {
        return Err(CoreError::NotFound {
            entity: "Route",
            id: route.describe(),
        }
        .into());
    }

    Ok(Json(SearchResponse {
        success: true,
        count: buses.len(),
        date,
        buses,
    }))
}

/// GET /api/buses/{id}
async fn get_bus(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<BusResponse>, AppError> {
    let Path(id) = id?;
    let bus = state.repository.get_bus(BusId(id)).await?;
    Ok(Json(BusResponse {
        success: true,
        utilization: bus.utilization(),
        bus,
    }))
}
