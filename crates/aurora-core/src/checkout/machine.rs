// ── Checkout state machine ──
//
// Details → TravelerInfo → Payment → Confirmation. Every transition takes
// `&mut self`, so two transitions of one checkout can never overlap. A
// failed transition leaves the step unchanged and records a banner message.

use secrecy::SecretString;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::draft::BookingDraft;
use super::step::CheckoutStep;
use super::validate::ValidationError;
use crate::error::CoreError;
use crate::gateway::{
    BillingDetails, BookingGateway, CardHandle, IntentStatus, PaymentConfirmation,
    PaymentMethodDetails, PaymentProvider, PaymentProviderError, PaymentUpdate,
};
use crate::model::{Booking, BookingTarget, PaymentStatus};
use crate::pricing::{PriceQuote, PricingPolicy, TieredPricing};
use crate::session::{Session, User};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{action} is not available on the {step} step")]
    WrongStep {
        step: CheckoutStep,
        action: &'static str,
    },

    #[error("The booking has already been submitted and can no longer be edited")]
    DraftLocked,

    #[error("Could not {action}: {source}")]
    Network {
        action: &'static str,
        #[source]
        source: CoreError,
    },

    #[error("Payment failed: {message}")]
    PaymentDeclined { message: String },

    #[error("Payment was not completed (status: {status})")]
    PaymentIncomplete { status: IntentStatus },

    #[error("Payment provider error: {0}")]
    Provider(#[from] PaymentProviderError),

    #[error(
        "Your payment succeeded (reference {payment_id}) but booking {booking_id} could not be \
         updated and may not show it yet. Please contact support with your payment reference."
    )]
    PaymentNotRecorded {
        booking_id: String,
        payment_id: String,
        #[source]
        source: CoreError,
    },

    #[error(
        "Payment {payment_id} for booking {booking_id} was already taken. Please contact support \
         instead of paying again."
    )]
    PaymentAlreadyTaken {
        booking_id: String,
        payment_id: String,
    },
}

impl CheckoutError {
    /// Money moved but the booking does not reflect it.
    pub fn is_partial_failure(&self) -> bool {
        matches!(
            self,
            Self::PaymentNotRecorded { .. } | Self::PaymentAlreadyTaken { .. }
        )
    }

    /// The payment provider refused or did not finish the payment.
    pub fn is_payment_failure(&self) -> bool {
        matches!(
            self,
            Self::PaymentDeclined { .. } | Self::PaymentIncomplete { .. } | Self::Provider(_)
        )
    }
}

/// Result of pressing Back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Moved to the previous step.
    Moved(CheckoutStep),
    /// Back from the first step: the caller navigates away from checkout.
    LeaveFlow,
    /// No Back from the confirmation screen.
    Unavailable,
}

/// One customer's run through the checkout wizard.
#[derive(Debug)]
pub struct Checkout {
    step: CheckoutStep,
    /// Discarded on reaching Confirmation.
    draft: Option<BookingDraft>,
    payer: Option<User>,
    pricing: TieredPricing,
    idempotency_key: Uuid,
    booking: Option<Booking>,
    client_secret: Option<SecretString>,
    /// Set when a payment went through but could not be recorded.
    unrecorded_payment: Option<String>,
    banner: Option<String>,
}

impl Checkout {
    pub fn new(target: BookingTarget, session: &Session) -> Self {
        Self::with_pricing(target, session, TieredPricing::default())
    }

    pub fn with_pricing(target: BookingTarget, session: &Session, pricing: TieredPricing) -> Self {
        let idempotency_key = Uuid::new_v4();
        debug!(target_id = target.id(), %idempotency_key, "starting checkout");
        Self {
            step: CheckoutStep::Details,
            draft: Some(BookingDraft::new(target, session)),
            payer: session.user().cloned(),
            pricing,
            idempotency_key,
            booking: None,
            client_secret: None,
            unrecorded_payment: None,
            banner: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// The draft, until the checkout reaches Confirmation.
    pub fn draft(&self) -> Option<&BookingDraft> {
        self.draft.as_ref()
    }

    /// Mutable draft access, only while no booking has been created.
    pub fn draft_mut(&mut self) -> Result<&mut BookingDraft, CheckoutError> {
        if self.booking.is_some() {
            return Err(CheckoutError::DraftLocked);
        }
        let step = self.step;
        self.draft.as_mut().ok_or(CheckoutError::WrongStep {
            step,
            action: "Editing the booking",
        })
    }

    /// The created booking, once step 2 has been submitted.
    pub fn booking(&self) -> Option<&Booking> {
        self.booking.as_ref()
    }

    pub fn idempotency_key(&self) -> Uuid {
        self.idempotency_key
    }

    /// Current price of the draft under the checkout's pricing, or `None`
    /// when there is no draft or its party is too large to price.
    pub fn quote(&self) -> Option<PriceQuote> {
        self.draft.as_ref().and_then(|d| d.quote(&self.pricing).ok())
    }

    /// Last user-facing error, cleared by the next successful transition.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    // ── Traveler list ────────────────────────────────────────────────

    pub fn add_traveler(&mut self) -> Result<(), CheckoutError> {
        self.traveler_list("Adding a traveler")?.add_traveler();
        Ok(())
    }

    /// Returns `false` when nothing was removed (last entry or bad index).
    pub fn remove_traveler(&mut self, index: usize) -> Result<bool, CheckoutError> {
        Ok(self
            .traveler_list("Removing a traveler")?
            .remove_traveler(index))
    }

    fn traveler_list(&mut self, action: &'static str) -> Result<&mut BookingDraft, CheckoutError> {
        if !self.step.allows_traveler_edits() {
            return Err(CheckoutError::WrongStep {
                step: self.step,
                action,
            });
        }
        self.draft_mut()
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Details → TravelerInfo.
    pub fn advance_details(&mut self) -> Result<CheckoutStep, CheckoutError> {
        self.require_step(CheckoutStep::Details, "Continuing to traveler details")?;
        let checked = match &self.draft {
            Some(draft) => draft
                .validate_details()
                .map_err(ValidationError::from)
                .and_then(|()| draft.quote(&self.pricing).map_err(ValidationError::from)),
            None => return Err(self.wrong_step("Continuing to traveler details")),
        };
        if let Err(e) = checked {
            return Err(self.fail(e.into()));
        }
        Ok(self.move_to(CheckoutStep::TravelerInfo))
    }

    /// TravelerInfo → Payment, creating the booking on the first pass.
    pub async fn submit_travelers<G: BookingGateway>(
        &mut self,
        gateway: &G,
    ) -> Result<CheckoutStep, CheckoutError> {
        self.require_step(CheckoutStep::TravelerInfo, "Continuing to payment")?;

        if let Some(existing) = &self.booking {
            info!(booking_id = %existing.id, "reusing booking created earlier in this checkout");
            return Ok(self.move_to(CheckoutStep::Payment));
        }

        let payload = match &self.draft {
            Some(draft) => draft.to_new_booking(&self.pricing, None),
            None => return Err(self.wrong_step("Continuing to payment")),
        };
        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail(e.into())),
        };

        match gateway.create_booking(&payload, self.idempotency_key).await {
            Ok(booking) => {
                info!(booking_id = %booking.id, total = %booking.total_price, "booking created");
                self.booking = Some(booking);
                Ok(self.move_to(CheckoutStep::Payment))
            }
            Err(source) => Err(self.fail(CheckoutError::Network {
                action: "create your booking",
                source,
            })),
        }
    }

    /// Payment → Confirmation: confirm the card payment, record it on the
    /// booking, then refresh the booking.
    pub async fn confirm_payment<G: BookingGateway, P: PaymentProvider>(
        &mut self,
        gateway: &G,
        provider: &P,
        card: CardHandle,
    ) -> Result<CheckoutStep, CheckoutError> {
        self.require_step(CheckoutStep::Payment, "Paying")?;
        let Some((booking_id, amount)) = self
            .booking
            .as_ref()
            .map(|b| (b.id.clone(), b.total_price))
        else {
            return Err(self.wrong_step("Paying"));
        };

        if let Some(payment_id) = self.unrecorded_payment.clone() {
            return Err(self.fail(CheckoutError::PaymentAlreadyTaken {
                booking_id,
                payment_id,
            }));
        }

        let secret = if let Some(secret) = &self.client_secret {
            secret.clone()
        } else {
            match gateway.create_payment_intent(&booking_id, amount).await {
                Ok(secret) => {
                    self.client_secret = Some(secret.clone());
                    secret
                }
                Err(source) => {
                    return Err(self.fail(CheckoutError::Network {
                        action: "start the payment",
                        source,
                    }));
                }
            }
        };

        let details = PaymentMethodDetails {
            card,
            billing: BillingDetails::from(self.payer.as_ref()),
        };
        let intent = match provider.confirm_card_payment(&secret, &details).await {
            Ok(PaymentConfirmation::Intent(intent)) => intent,
            Ok(PaymentConfirmation::Failed { message }) => {
                return Err(self.fail(CheckoutError::PaymentDeclined { message }));
            }
            Err(e) => return Err(self.fail(e.into())),
        };
        if intent.status != IntentStatus::Succeeded {
            return Err(self.fail(CheckoutError::PaymentIncomplete {
                status: intent.status,
            }));
        }

        let update = PaymentUpdate {
            payment_id: intent.id.clone(),
            payment_status: PaymentStatus::Paid,
        };
        if let Err(source) = gateway.update_booking_payment(&booking_id, &update).await {
            error!(
                booking_id = %booking_id,
                payment_id = %intent.id,
                error = %source,
                "payment succeeded but could not be recorded"
            );
            self.unrecorded_payment = Some(intent.id.clone());
            return Err(self.fail(CheckoutError::PaymentNotRecorded {
                booking_id,
                payment_id: intent.id,
                source,
            }));
        }

        let refreshed = match gateway.get_booking(&booking_id).await {
            Ok(booking) => Some(booking),
            Err(e) => {
                warn!(booking_id = %booking_id, error = %e, "could not refresh booking after payment");
                None
            }
        };
        let booking = match (refreshed, self.booking.take()) {
            (Some(fresh), _) => Some(fresh),
            (None, Some(mut local)) => {
                local.payment_status = PaymentStatus::Paid;
                local.payment_id = Some(intent.id.clone());
                Some(local)
            }
            (None, None) => None,
        };
        self.booking = booking;
        self.draft = None;
        self.client_secret = None;
        info!(booking_id = %booking_id, payment_id = %intent.id, "payment confirmed");
        Ok(self.move_to(CheckoutStep::Confirmation))
    }

    /// Step back one screen. The draft keeps its values.
    pub fn back(&mut self) -> BackOutcome {
        match self.step {
            CheckoutStep::Details => BackOutcome::LeaveFlow,
            CheckoutStep::Confirmation => BackOutcome::Unavailable,
            step => match step.previous() {
                Some(previous) => BackOutcome::Moved(self.move_to(previous)),
                None => BackOutcome::LeaveFlow,
            },
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn require_step(
        &self,
        expected: CheckoutStep,
        action: &'static str,
    ) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::WrongStep {
                step: self.step,
                action,
            })
        }
    }

    fn wrong_step(&self, action: &'static str) -> CheckoutError {
        CheckoutError::WrongStep {
            step: self.step,
            action,
        }
    }

    fn move_to(&mut self, step: CheckoutStep) -> CheckoutStep {
        debug!(from = %self.step, to = %step, "checkout step");
        self.step = step;
        self.banner = None;
        step
    }

    fn fail(&mut self, err: CheckoutError) -> CheckoutError {
        debug!(step = %self.step, error = %err, "checkout transition failed");
        self.banner = Some(err.to_string());
        err
    }
}
