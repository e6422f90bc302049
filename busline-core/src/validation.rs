use crate::{BookingRequest, CoreError, CoreResult};

/// Upper bound on seats per booking when no policy overrides it
pub const DEFAULT_MAX_SEATS: u32 = 10;

/// A booking request whose fields have passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    pub passenger_name: String,
    pub email: String,
    pub seats: u32,
    pub payment_method: Option<String>,
}

/// Checks the caller-supplied fields of a booking. Bus existence,
/// availability and the per-booking seat limit are checked later, in that
/// order, once the bus is known.
pub fn validate_booking(request: &BookingRequest) -> CoreResult<ValidatedBooking> {
    let passenger_name = request.passenger_name.trim();
    if passenger_name.is_empty() {
        return Err(CoreError::validation("passengerName", "must not be empty"));
    }

    let email = request.email.trim();
    if !is_valid_email(email) {
        return Err(CoreError::validation(
            "email",
            "must look like name@domain.tld",
        ));
    }

    let seats = validate_seats(request.seats)?;

    let payment_method = request
        .payment_method
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    Ok(ValidatedBooking {
        passenger_name: passenger_name.to_string(),
        email: email.to_string(),
        seats,
        payment_method,
    })
}

/// At least one seat. Counts beyond `u32::MAX` saturate, so they fail the
/// capacity check rather than wrapping.
pub fn validate_seats(seats: i64) -> CoreResult<u32> {
    if seats < 1 {
        return Err(CoreError::validation(
            "seats",
            format!("must be at least 1, got {seats}"),
        ));
    }
    Ok(u32::try_from(seats).unwrap_or(u32::MAX))
}

pub fn check_seat_limit(seats: u32, max_seats: u32) -> CoreResult<()> {
    if seats > max_seats {
        return Err(CoreError::validation(
            "seats",
            format!("must be between 1 and {max_seats}, got {seats}"),
        ));
    }
    Ok(())
}

/// Simple `local@domain.tld` shape check: no whitespace, exactly one `@`,
/// and a dot inside the domain with non-empty labels around it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty() && !name.starts_with('.'),
        None => false,
    }
}
