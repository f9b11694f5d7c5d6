// ── One-shot booking form ──
//
// The simpler booking page: validate, price with the flat rate, create the
// booking as `pending`. There is no payment step.

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::checkout::{BookingDraft, ValidationError};
use crate::error::CoreError;
use crate::gateway::BookingGateway;
use crate::model::{Booking, BookingStatus};
use crate::pricing::FlatRatePricing;

#[derive(Debug, Error)]
pub enum QuickBookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Could not create your booking: {0}")]
    Network(#[from] CoreError),
}

/// Validate `draft`, price it with `pricing` and create a pending booking.
///
/// Reuse the same `idempotency_key` when resubmitting the same form.
pub async fn submit_quick_booking<G: BookingGateway>(
    gateway: &G,
    draft: &BookingDraft,
    pricing: &FlatRatePricing,
    idempotency_key: Uuid,
) -> Result<Booking, QuickBookingError> {
    let payload = draft.to_new_booking(pricing, Some(BookingStatus::Pending))?;
    let booking = gateway.create_booking(&payload, idempotency_key).await?;
    info!(booking_id = %booking.id, total = %booking.total_price, "booking submitted");
    Ok(booking)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use secrecy::SecretString;

    use super::*;
    use crate::checkout::DetailsViolation;
    use crate::gateway::{NewBooking, PaymentUpdate};
    use crate::model::{BookingTarget, Money, PaymentStatus, VacationPackage};
    use crate::session::Session;

    #[derive(Default)]
    struct RecordingGateway {
        created: Mutex<Vec<NewBooking>>,
    }

    impl BookingGateway for RecordingGateway {
        async fn create_booking(
            &self,
            booking: &NewBooking,
            _idempotency_key: Uuid,
        ) -> Result<Booking, CoreError> {
            self.created.lock().unwrap().push(booking.clone());
            Ok(Booking {
                id: "bk-7".into(),
                reference: booking.reference.clone(),
                start_date: booking.start_date,
                end_date: booking.end_date,
                adults: booking.adults,
                children: booking.children,
                special_requests: None,
                travelers: booking.travelers.clone(),
                total_price: booking.total_price,
                payment_status: booking.payment_status,
                status: booking.status.unwrap_or_default(),
                payment_id: None,
                created_at: None,
            })
        }

        async fn update_booking_payment(
            &self,
            _booking_id: &str,
            _update: &PaymentUpdate,
        ) -> Result<(), CoreError> {
            unreachable!("the booking form never records payments")
        }

        async fn get_booking(&self, _booking_id: &str) -> Result<Booking, CoreError> {
            unreachable!("the booking form never refreshes")
        }

        async fn create_payment_intent(
            &self,
            _booking_id: &str,
            _amount: Money,
        ) -> Result<SecretString, CoreError> {
            unreachable!("the booking form has no payment step")
        }
    }

    fn package_draft() -> BookingDraft {
        let mut draft = BookingDraft::new(
            BookingTarget::Package(VacationPackage {
                id: "pkg-7".into(),
                title: "Aegean Island Hopper".into(),
                price: Money::from_major(800),
                duration_days: Some(10),
                destination: None,
                description: None,
            }),
            &Session::anonymous(),
        );
        let lead = draft.traveler_mut(0).unwrap();
        lead.name = "Grace Hopper".into();
        lead.email = "grace@example.com".into();
        draft
    }

    #[test]
    fn creates_a_pending_booking_at_the_flat_rate() {
        let gateway = RecordingGateway::default();
        let mut draft = package_draft();
        draft.start_date = Some("2025-09-01".parse().unwrap());
        draft.end_date = Some("2025-09-10".parse().unwrap());
        draft.children = 2;

        let booking = tokio_test::block_on(submit_quick_booking(
            &gateway,
            &draft,
            &FlatRatePricing::default(),
            Uuid::new_v4(),
        ))
        .unwrap();

        assert_eq!(booking.total_price, Money::from_major(2400));
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
        let created = gateway.created.lock().unwrap();
        assert_eq!(created[0].status, Some(BookingStatus::Pending));
    }

    #[test]
    fn invalid_form_is_not_submitted() {
        let gateway = RecordingGateway::default();
        let err = tokio_test::block_on(submit_quick_booking(
            &gateway,
            &package_draft(),
            &FlatRatePricing::default(),
            Uuid::new_v4(),
        ))
        .unwrap_err();

        assert!(matches!(
            err,
            QuickBookingError::Validation(ValidationError::Details(
                DetailsViolation::MissingStartDate
            ))
        ));
        assert!(gateway.created.lock().unwrap().is_empty());
    }
}
