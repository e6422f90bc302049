use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use busline_core::{BookingRequest, CancelOutcome, CoreError};
use busline_shared::{Booking, BusId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Booking body as posted by clients. Every field is optional here so that a
/// missing field is reported by name instead of as a generic parse failure.
/// Numeric fields are taken as raw JSON so that `"2"` is accepted and a bad
/// value is reported against its field.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookBody {
    pub bus_id: Option<Value>,
    pub passenger_name: Option<String>,
    pub email: Option<String>,
    pub seats: Option<Value>,
    pub payment_method: Option<String>,
}

impl TryFrom<BookBody> for BookingRequest {
    type Error = CoreError;

    fn try_from(body: BookBody) -> Result<Self, Self::Error> {
        let bus_id = whole_number("busId", required("busId", body.bus_id)?)?;
        let bus_id = u32::try_from(bus_id)
            .map_err(|_| CoreError::validation("busId", format!("no such bus id {bus_id}")))?;

        Ok(BookingRequest {
            bus_id: BusId(bus_id),
            passenger_name: required("passengerName", body.passenger_name)?,
            email: required("email", body.email)?,
            seats: whole_number("seats", required("seats", body.seats)?)?,
            payment_method: body.payment_method,
        })
    }
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::validation(field, "is required"))
}

/// Integer JSON numbers, integral floats such as `2.0`, and decimal strings
fn whole_number(field: &'static str, value: Value) -> Result<i64, CoreError> {
    let parsed = match &value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        CoreError::validation(field, format!("must be a whole number, got {value}"))
    })
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub success: bool,
    pub booking: Booking,
    pub pnr: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ListBookingsParams {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub success: bool,
    pub bookings: Vec<Booking>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub booking: Booking,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/book", post(book))
        .route("/api/bookings", get(list_bookings))
        .route("/api/bookings/{id}", get(get_booking))
        .route("/api/bookings/{id}/cancel", post(cancel_booking))
}

/// POST /api/book
async fn book(
    State(state): State<AppState>,
    body: Result<Json<BookBody>, JsonRejection>,
) -> Result<Json<BookResponse>, AppError> {
    let Json(body) = body?;
    let request = BookingRequest::try_from(body)?;

    let booking = state.repository.book(request).await?;
    Ok(Json(BookResponse {
        success: true,
        pnr: booking.pnr.clone(),
        message: "Booking confirmed successfully".to_string(),
        booking,
    }))
}

/// GET /api/bookings
async fn list_bookings(
    State(state): State<AppState>,
    params: Result<Query<ListBookingsParams>, QueryRejection>,
) -> Result<Json<BookingListResponse>, AppError> {
    let Query(params) = params?;
    let bookings = state.repository.list_bookings(params.email.as_deref()).await;
    Ok(Json(BookingListResponse {
        success: true,
        total: bookings.len(),
        bookings,
    }))
}

/// GET /api/bookings/{id}
async fn get_booking(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<BookingResponse>, AppError> {
    let Path(id) = id?;
    let booking = state.repository.get_booking(id).await?;
    Ok(Json(BookingResponse { success: true, booking }))
}

/// POST /api/bookings/{id}/cancel
async fn cancel_booking(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<CancelResponse>, AppError> {
    let Path(id) = id?;
    let message = match state.repository.cancel_booking(id).await? {
        CancelOutcome::Cancelled { .. } => "Booking cancelled successfully",
        CancelOutcome::AlreadyCancelled => "Booking was already cancelled",
    };
    Ok(Json(CancelResponse {
        success: true,
        message: message.to_string(),
    }))
}
