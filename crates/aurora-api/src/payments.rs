// Payment endpoints
//
// The backend creates the provider-side payment intent and hands back the
// client secret the card confirmation needs.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{PaymentIntentRequest, PaymentIntentResponse};

impl ApiClient {
    /// Create a payment intent for a booking.
    ///
    /// `POST /api/payments/create-payment-intent` with `{"bookingId", "amount"}`
    pub async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, Error> {
        debug!(booking_id = %request.booking_id, amount = request.amount, "creating payment intent");
        self.post(&["payments", "create-payment-intent"], request, &[])
            .await
    }
}
