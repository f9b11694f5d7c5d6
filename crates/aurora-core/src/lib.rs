//! Booking domain layer between `aurora-api` and the `aurora` CLI.
//!
//! - **Pricing** ([`pricing`]): [`TieredPricing`] for the multi-step
//!   checkout (duration and child discounts) and [`FlatRatePricing`] for the
//!   one-shot booking form, both behind [`PricingPolicy`].
//!
//! - **[`Checkout`]**: the four-step wizard state machine (details,
//!   travelers, payment, confirmation). It owns a [`BookingDraft`], creates
//!   the booking once, and drives a [`BookingGateway`] and a
//!   [`PaymentProvider`] it is handed per transition.
//!
//! - **[`Storefront`]**: facade binding a [`Session`] and a [`ClientConfig`]
//!   to the HTTP client: catalog lookups, booking lookups, checkouts and the
//!   booking form.
//!
//! - **Domain model** ([`model`]): [`Booking`], [`VacationPackage`],
//!   [`Destination`] and [`Money`] (integer cents).

pub mod checkout;
pub mod config;
pub mod convert;
pub mod error;
pub mod gateway;
pub mod model;
pub mod pricing;
pub mod quick;
pub mod session;
pub mod storefront;

// ── Primary re-exports ──────────────────────────────────────────────
pub use checkout::{
    BackOutcome, BookingDraft, Checkout, CheckoutError, CheckoutStep, DetailsViolation,
    TravelerProblem, ValidationError,
};
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use gateway::{
    BillingDetails, BookingGateway, CardHandle, IntentStatus, NewBooking, PaymentConfirmation,
    PaymentIntent, PaymentMethodDetails, PaymentProvider, PaymentProviderError, PaymentUpdate,
};
pub use model::{
    Booking, BookingRef, BookingStatus, BookingTarget, BookingType, Destination, Money,
    PaymentStatus, TravelerInfo, VacationPackage,
};
pub use pricing::{
    FlatRatePricing, PriceOverflow, PriceQuote, PricedItem, PricingInput, PricingPolicy,
    TieredPricing,
};
pub use quick::{QuickBookingError, submit_quick_booking};
pub use session::{Session, User};
pub use storefront::Storefront;
