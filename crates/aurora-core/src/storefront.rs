// ── Storefront facade ──
//
// Binds a `Session` and a `ClientConfig` to the HTTP client: loads catalog
// entries, looks up bookings, and hands out checkouts. The storefront is
// itself the `BookingGateway` passed to checkout transitions.

use tracing::debug;
use uuid::Uuid;

use aurora_api::ApiClient;

use crate::checkout::{BookingDraft, Checkout};
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::gateway::BookingGateway;
use crate::model::{Booking, BookingTarget, BookingType, Destination, VacationPackage};
use crate::pricing::FlatRatePricing;
use crate::quick::{QuickBookingError, submit_quick_booking};
use crate::session::Session;

pub struct Storefront {
    api: ApiClient,
    session: Session,
    config: ClientConfig,
}

impl Storefront {
    pub fn new(config: ClientConfig, session: Session) -> Result<Self, CoreError> {
        let mut transport = config.transport();
        if let Some(token) = session.token() {
            transport = transport.with_auth_token(token.clone());
        }
        let api = ApiClient::new(config.api_url.as_str(), &transport)?;
        debug!(base_url = %api.base_url(), authenticated = session.is_authenticated(), "storefront ready");
        Ok(Self {
            api,
            session,
            config,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The gateway checkout transitions should be driven with.
    pub fn gateway(&self) -> &ApiClient {
        &self.api
    }

    // ── Catalog ──────────────────────────────────────────────────────

    pub async fn package(&self, id: &str) -> Result<VacationPackage, CoreError> {
        let raw = self
            .api
            .get_vacation(id)
            .await
            .map_err(|e| CoreError::from(e).for_entity("Vacation package", id))?;
        VacationPackage::try_from(raw)
    }

    pub async fn destination(&self, id: &str) -> Result<Destination, CoreError> {
        let raw = self
            .api
            .get_destination(id)
            .await
            .map_err(|e| CoreError::from(e).for_entity("Destination", id))?;
        Ok(Destination::from(raw))
    }

    /// Load whatever a booking of `kind` would refer to.
    pub async fn target(&self, kind: BookingType, id: &str) -> Result<BookingTarget, CoreError> {
        match kind {
            BookingType::Package => self.package(id).await.map(BookingTarget::Package),
            BookingType::Destination => self.destination(id).await.map(BookingTarget::Destination),
        }
    }

    // ── Bookings ─────────────────────────────────────────────────────

    pub async fn booking(&self, id: &str) -> Result<Booking, CoreError> {
        BookingGateway::get_booking(&self.api, id).await
    }

    pub fn start_checkout(&self, target: BookingTarget) -> Checkout {
        Checkout::new(target, &self.session)
    }

    /// Start a booking-form draft pre-filled from the session user.
    pub fn new_draft(&self, target: BookingTarget) -> BookingDraft {
        BookingDraft::new(target, &self.session)
    }

    /// Submit the one-shot booking form.
    pub async fn quick_booking(&self, draft: &BookingDraft) -> Result<Booking, QuickBookingError> {
        submit_quick_booking(
            &self.api,
            draft,
            &FlatRatePricing::default(),
            Uuid::new_v4(),
        )
        .await
    }
}
