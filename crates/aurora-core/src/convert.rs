// ── API-to-domain type conversions ──
//
// Bridges raw `aurora_api` wire types into `aurora_core::model` types and
// back, and implements `BookingGateway` for the HTTP client. Money crosses
// the wire as major units; dates as `YYYY-MM-DD` (responses may carry a
// full ISO-8601 timestamp instead).

use chrono::{DateTime, NaiveDate, Utc};
use secrecy::SecretString;
use uuid::Uuid;

use aurora_api::ApiClient;
use aurora_api::models::{
    BookingResponse, CreateBookingRequest, DestinationResponse, EntityRef,
    PaymentIntentRequest, PaymentUpdateRequest, TravelerInfo as WireTraveler,
    VacationPackageResponse,
};

use crate::error::CoreError;
use crate::gateway::{BookingGateway, NewBooking, PaymentUpdate};
use crate::model::{
    Booking, BookingRef, BookingStatus, Destination, Money, PaymentStatus, TravelerInfo,
    VacationPackage,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ── Helpers ────────────────────────────────────────────────────────

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::InvalidData {
        message: message.into(),
    }
}

/// Parse a calendar date given either as `YYYY-MM-DD` or as an ISO-8601
/// timestamp (the date part in UTC is kept).
pub fn parse_wire_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc).date_naive()))
        .map_err(|_| invalid(format!("unrecognised date {raw:?}")))
}

pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_money(raw: f64, field: &str) -> Result<Money, CoreError> {
    Money::from_major_f64(raw).ok_or_else(|| invalid(format!("{field} is not a valid amount: {raw}")))
}

fn parse_datetime(raw: Option<&String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn label(reference: &EntityRef) -> Option<String> {
    reference.display_name().map(str::to_owned)
}

// ── Catalog ────────────────────────────────────────────────────────

impl TryFrom<VacationPackageResponse> for VacationPackage {
    type Error = CoreError;

    fn try_from(raw: VacationPackageResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            price: parse_money(raw.price, "price")?,
            destination: raw
                .destination
                .as_ref()
                .map(|d| label(d).unwrap_or_else(|| d.id().to_owned())),
            id: raw.id,
            title: raw.title,
            duration_days: raw.duration,
            description: raw.description,
        })
    }
}

impl From<DestinationResponse> for Destination {
    fn from(raw: DestinationResponse) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            country: raw.country,
            description: raw.description,
        }
    }
}

// ── Bookings ───────────────────────────────────────────────────────

impl From<WireTraveler> for TravelerInfo {
    fn from(raw: WireTraveler) -> Self {
        Self {
            name: raw.name,
            email: raw.email,
            phone: raw.phone,
        }
    }
}

impl From<&TravelerInfo> for WireTraveler {
    fn from(t: &TravelerInfo) -> Self {
        Self {
            name: t.name.clone(),
            email: t.email.clone(),
            phone: t.phone.clone(),
        }
    }
}

impl TryFrom<BookingResponse> for Booking {
    type Error = CoreError;

    fn try_from(raw: BookingResponse) -> Result<Self, Self::Error> {
        let reference = match (&raw.vacation_package, &raw.destination) {
            (Some(pkg), _) => BookingRef::Package {
                id: pkg.id().to_owned(),
                title: label(pkg),
            },
            (None, Some(dest)) => BookingRef::Destination {
                id: dest.id().to_owned(),
                name: label(dest),
            },
            (None, None) => {
                return Err(invalid(format!(
                    "booking {} references neither a package nor a destination",
                    raw.id
                )));
            }
        };

        let payment_status: PaymentStatus = raw
            .payment_status
            .parse()
            .map_err(|_| invalid(format!("unknown payment status {:?}", raw.payment_status)))?;
        let status = match raw.status.as_deref() {
            None | Some("") => BookingStatus::default(),
            Some(s) => s
                .parse()
                .map_err(|_| invalid(format!("unknown booking status {s:?}")))?,
        };

        Ok(Self {
            reference,
            start_date: parse_wire_date(&raw.start_date)?,
            end_date: parse_wire_date(&raw.end_date)?,
            total_price: parse_money(raw.total_price, "totalPrice")?,
            created_at: parse_datetime(raw.created_at.as_ref()),
            special_requests: raw.special_requests.filter(|s| !s.trim().is_empty()),
            travelers: raw.traveler_info.into_iter().map(TravelerInfo::from).collect(),
            id: raw.id,
            adults: raw.adults,
            children: raw.children,
            payment_status,
            status,
            payment_id: raw.payment_id,
        })
    }
}

impl From<&NewBooking> for CreateBookingRequest {
    fn from(b: &NewBooking) -> Self {
        let (vacation_package, destination) = match &b.reference {
            BookingRef::Package { id, .. } => (Some(id.clone()), None),
            BookingRef::Destination { id, .. } => (None, Some(id.clone())),
        };
        Self {
            vacation_package,
            destination,
            start_date: format_wire_date(b.start_date),
            end_date: format_wire_date(b.end_date),
            adults: b.adults,
            children: b.children,
            special_requests: b.special_requests.clone(),
            traveler_info: b.travelers.iter().map(WireTraveler::from).collect(),
            total_price: b.total_price.to_major_f64(),
            payment_status: b.payment_status.to_string(),
            status: b.status.map(|s| s.to_string()),
        }
    }
}

impl From<&PaymentUpdate> for PaymentUpdateRequest {
    fn from(u: &PaymentUpdate) -> Self {
        Self {
            payment_id: u.payment_id.clone(),
            payment_status: u.payment_status.to_string(),
        }
    }
}

// ── Gateway over the HTTP client ───────────────────────────────────

impl BookingGateway for ApiClient {
    async fn create_booking(
        &self,
        booking: &NewBooking,
        idempotency_key: Uuid,
    ) -> Result<Booking, CoreError> {
        let request = CreateBookingRequest::from(booking);
        let raw = ApiClient::create_booking(self, &request, idempotency_key).await?;
        Booking::try_from(raw)
    }

    async fn update_booking_payment(
        &self,
        booking_id: &str,
        update: &PaymentUpdate,
    ) -> Result<(), CoreError> {
        ApiClient::update_booking_payment(self, booking_id, &PaymentUpdateRequest::from(update))
            .await
            .map_err(|e| CoreError::from(e).for_entity("Booking", booking_id))
    }

    async fn get_booking(&self, booking_id: &str) -> Result<Booking, CoreError> {
        let raw = ApiClient::get_booking(self, booking_id)
            .await
            .map_err(|e| CoreError::from(e).for_entity("Booking", booking_id))?;
        Booking::try_from(raw)
    }

    async fn create_payment_intent(
        &self,
        booking_id: &str,
        amount: Money,
    ) -> Result<SecretString, CoreError> {
        let request = PaymentIntentRequest {
            booking_id: booking_id.to_owned(),
            amount: amount.to_major_f64(),
        };
        let intent = ApiClient::create_payment_intent(self, &request).await?;
        Ok(SecretString::from(intent.client_secret))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn booking_response(value: serde_json::Value) -> BookingResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn wire_dates_accept_plain_dates_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(parse_wire_date("2025-06-01").unwrap(), expected);
        assert_eq!(parse_wire_date("2025-06-01T00:00:00.000Z").unwrap(), expected);
        assert!(parse_wire_date("June 1st").is_err());
        assert_eq!(format_wire_date(expected), "2025-06-01");
    }

    #[test]
    fn booking_with_populated_package() {
        let booking = Booking::try_from(booking_response(json!({
            "_id": "bk-1",
            "vacationPackage": { "_id": "pkg-7", "title": "Aegean Island Hopper" },
            "startDate": "2025-09-01T00:00:00.000Z",
            "endDate": "2025-09-10T00:00:00.000Z",
            "adults": 1,
            "children": 2,
            "specialRequests": "",
            "travelerInfo": [{ "name": "Grace", "email": "grace@example.com" }],
            "totalPrice": 1920,
            "paymentStatus": "paid",
            "status": "confirmed",
            "paymentId": "pi_1",
            "createdAt": "2025-05-01T10:00:00.000Z"
        })))
        .unwrap();

        assert_eq!(
            booking.reference,
            BookingRef::Package {
                id: "pkg-7".into(),
                title: Some("Aegean Island Hopper".into()),
            }
        );
        assert_eq!(booking.total_price, Money::from_major(1920));
        assert_eq!(booking.payment_status, PaymentStatus::Paid);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.special_requests, None);
        assert_eq!(booking.travelers[0].phone, "");
        assert!(booking.created_at.is_some());
    }

    #[test]
    fn booking_without_reference_is_rejected() {
        let err = Booking::try_from(booking_response(json!({
            "_id": "bk-2",
            "startDate": "2025-09-01",
            "endDate": "2025-09-10",
            "adults": 1,
            "totalPrice": 100
        })))
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidData { .. }));
    }

    #[test]
    fn new_booking_serializes_major_units_and_one_reference() {
        let new = NewBooking {
            reference: BookingRef::Destination {
                id: "dest-42".into(),
                name: Some("Lofoten".into()),
            },
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
            adults: 2,
            children: 1,
            special_requests: String::new(),
            travelers: vec![],
            total_price: Money::from_minor(117_050),
            payment_status: PaymentStatus::Pending,
            status: Some(BookingStatus::Pending),
        };
        let request = CreateBookingRequest::from(&new);
        assert_eq!(request.vacation_package, None);
        assert_eq!(request.destination.as_deref(), Some("dest-42"));
        assert_eq!(request.start_date, "2025-06-01");
        assert!((request.total_price - 1170.5).abs() < f64::EPSILON);
        assert_eq!(request.payment_status, "pending");
        assert_eq!(request.status.as_deref(), Some("pending"));
    }
}
