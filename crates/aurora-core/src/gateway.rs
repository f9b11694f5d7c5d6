// ── Persistence and payment seams ──
//
// The checkout never talks HTTP directly. It drives a `BookingGateway`
// (implemented for `aurora_api::ApiClient` in `convert`) and an opaque
// `PaymentProvider` that confirms card payments.

use std::future::Future;

use chrono::NaiveDate;
use secrecy::SecretString;
use strum::{Display, EnumString};
use thiserror::Error;
use uuid::Uuid;

use crate::error::CoreError;
use crate::model::{Booking, BookingRef, BookingStatus, Money, PaymentStatus, TravelerInfo};
use crate::session::User;

// ── Booking persistence ──────────────────────────────────────────────

/// A booking ready to be created on the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub reference: BookingRef,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub special_requests: String,
    pub travelers: Vec<TravelerInfo>,
    pub total_price: Money,
    pub payment_status: PaymentStatus,
    /// Sent only by the booking form; the checkout leaves it to the server.
    pub status: Option<BookingStatus>,
}

/// Payment record attached to an existing booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentUpdate {
    pub payment_id: String,
    pub payment_status: PaymentStatus,
}

pub trait BookingGateway: Send + Sync {
    /// Create a booking. `idempotency_key` identifies the draft so a
    /// resubmission cannot create a duplicate.
    fn create_booking(
        &self,
        booking: &NewBooking,
        idempotency_key: Uuid,
    ) -> impl Future<Output = Result<Booking, CoreError>> + Send;

    fn update_booking_payment(
        &self,
        booking_id: &str,
        update: &PaymentUpdate,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get_booking(&self, booking_id: &str)
    -> impl Future<Output = Result<Booking, CoreError>> + Send;

    /// Ask the backend to open a payment intent; returns its client secret.
    fn create_payment_intent(
        &self,
        booking_id: &str,
        amount: Money,
    ) -> impl Future<Output = Result<SecretString, CoreError>> + Send;
}

// ── Card payments ────────────────────────────────────────────────────

/// Opaque handle to card data collected by the payment provider's own
/// input element. Never holds a raw card number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardHandle(pub String);

/// Payer identity forwarded to the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingDetails {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<Option<&User>> for BillingDetails {
    fn from(user: Option<&User>) -> Self {
        user.map_or_else(Self::default, |u| Self {
            name: Some(u.name.clone()),
            email: Some(u.email.clone()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethodDetails {
    pub card: CardHandle,
    pub billing: BillingDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum IntentStatus {
    Succeeded,
    Processing,
    RequiresAction,
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresCapture,
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub status: IntentStatus,
}

/// Outcome of asking the provider to confirm a card payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentConfirmation {
    /// The provider refused the payment (declined card, failed 3-D Secure...).
    Failed { message: String },
    Intent(PaymentIntent),
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct PaymentProviderError {
    pub message: String,
}

pub trait PaymentProvider: Send + Sync {
    fn confirm_card_payment(
        &self,
        client_secret: &SecretString,
        details: &PaymentMethodDetails,
    ) -> impl Future<Output = Result<PaymentConfirmation, PaymentProviderError>> + Send;
}
