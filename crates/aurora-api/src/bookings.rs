// Booking endpoints
//
// A booking is created once, has its payment sub-state updated once, and is
// re-read after the update to pick up server-computed fields.

use tracing::debug;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{BookingResponse, CreateBookingRequest, PaymentUpdateRequest};

/// Header carrying the client-generated key that deduplicates creation.
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

impl ApiClient {
    /// Create a booking.
    ///
    /// `POST /api/bookings` with an `Idempotency-Key` header so a resubmitted
    /// draft maps onto the same server record.
    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
        idempotency_key: Uuid,
    ) -> Result<BookingResponse, Error> {
        debug!(%idempotency_key, "creating booking");
        self.post(
            &["bookings"],
            request,
            &[(IDEMPOTENCY_HEADER, idempotency_key.to_string())],
        )
        .await
    }

    /// Record the outcome of a card payment on a booking.
    ///
    /// `PUT /api/bookings/:id/payment` with `{"paymentId", "paymentStatus"}`
    pub async fn update_booking_payment(
        &self,
        booking_id: &str,
        update: &PaymentUpdateRequest,
    ) -> Result<(), Error> {
        debug!(booking_id, payment_id = %update.payment_id, "recording payment");
        self.put_no_response(&["bookings", booking_id, "payment"], update)
            .await
    }

    /// Fetch a booking.
    ///
    /// `GET /api/bookings/:id`
    pub async fn get_booking(&self, booking_id: &str) -> Result<BookingResponse, Error> {
        debug!(booking_id, "fetching booking");
        self.get(&["bookings", booking_id]).await
    }
}
