// ── Booking draft ──
//
// Client-side state of a booking being assembled. The traveler list is
// private so it can never drop below one entry.

use chrono::NaiveDate;

use super::validate::{self, DetailsViolation, ValidationError};
use crate::gateway::NewBooking;
use crate::model::{BookingRef, BookingStatus, BookingTarget, BookingType, PaymentStatus, TravelerInfo};
use crate::pricing::{PriceOverflow, PriceQuote, PricedItem, PricingInput, PricingPolicy};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    target: BookingTarget,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub adults: u32,
    pub children: u32,
    pub special_requests: String,
    travelers: Vec<TravelerInfo>,
}

impl BookingDraft {
    /// Start a draft with one adult and the first traveler pre-filled from
    /// the session user.
    pub fn new(target: BookingTarget, session: &Session) -> Self {
        let lead = session
            .user()
            .map(|user| TravelerInfo {
                name: user.name.clone(),
                email: user.email.clone(),
                phone: String::new(),
            })
            .unwrap_or_default();

        Self {
            target,
            start_date: None,
            end_date: None,
            adults: 1,
            children: 0,
            special_requests: String::new(),
            travelers: vec![lead],
        }
    }

    pub fn target(&self) -> &BookingTarget {
        &self.target
    }

    pub fn booking_type(&self) -> BookingType {
        self.target.booking_type()
    }

    // ── Travelers ────────────────────────────────────────────────────

    pub fn travelers(&self) -> &[TravelerInfo] {
        &self.travelers
    }

    pub fn traveler_mut(&mut self, index: usize) -> Option<&mut TravelerInfo> {
        self.travelers.get_mut(index)
    }

    /// Append an empty traveler entry.
    pub fn add_traveler(&mut self) {
        self.travelers.push(TravelerInfo::default());
    }

    /// Remove the entry at `index`. No-op (returns `false`) when it is the
    /// last remaining entry or the index is out of range.
    pub fn remove_traveler(&mut self, index: usize) -> bool {
        if self.travelers.len() <= 1 || index >= self.travelers.len() {
            return false;
        }
        self.travelers.remove(index);
        true
    }

    // ── Pricing & validation ─────────────────────────────────────────

    pub fn pricing_input(&self) -> PricingInput {
        let item = match &self.target {
            BookingTarget::Package(pkg) => PricedItem::Package { price: pkg.price },
            BookingTarget::Destination(_) => PricedItem::Destination,
        };
        PricingInput {
            item,
            start_date: self.start_date,
            end_date: self.end_date,
            adults: self.adults,
            children: self.children,
        }
    }

    pub fn quote<P: PricingPolicy + ?Sized>(
        &self,
        policy: &P,
    ) -> Result<PriceQuote, PriceOverflow> {
        policy.quote(&self.pricing_input())
    }

    pub fn validate_details(&self) -> Result<(), DetailsViolation> {
        validate::validate_details(self.start_date, self.end_date, self.adults)
    }

    pub fn validate_travelers(&self) -> Result<(), ValidationError> {
        validate::validate_travelers(&self.travelers)
    }

    /// Validate everything and build the create-booking payload, priced by
    /// `policy`.
    pub fn to_new_booking<P: PricingPolicy + ?Sized>(
        &self,
        policy: &P,
        status: Option<BookingStatus>,
    ) -> Result<NewBooking, ValidationError> {
        self.validate_details()?;
        self.validate_travelers()?;
        let (Some(start_date), Some(end_date)) = (self.start_date, self.end_date) else {
            return Err(DetailsViolation::MissingStartDate.into());
        };

        let reference = match &self.target {
            BookingTarget::Package(pkg) => BookingRef::Package {
                id: pkg.id.clone(),
                title: Some(pkg.title.clone()),
            },
            BookingTarget::Destination(dest) => BookingRef::Destination {
                id: dest.id.clone(),
                name: Some(dest.name.clone()),
            },
        };

        Ok(NewBooking {
            reference,
            start_date,
            end_date,
            adults: self.adults,
            children: self.children,
            special_requests: self.special_requests.trim().to_owned(),
            travelers: self
                .travelers
                .iter()
                .map(|t| TravelerInfo {
                    name: t.name.trim().to_owned(),
                    email: t.email.trim().to_owned(),
                    phone: t.phone.trim().to_owned(),
                })
                .collect(),
            total_price: self.quote(policy)?.total,
            payment_status: PaymentStatus::Pending,
            status,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Destination, Money, VacationPackage};
    use crate::pricing::{FlatRatePricing, TieredPricing};
    use crate::session::User;
    use pretty_assertions::assert_eq;
    use secrecy::SecretString;

    fn destination() -> BookingTarget {
        BookingTarget::Destination(Destination {
            id: "dest-42".into(),
            name: "Lofoten".into(),
            country: Some("Norway".into()),
            description: None,
        })
    }

    fn session() -> Session {
        Session::authenticated(
            User {
                id: "u-1".into(),
                name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
            },
            SecretString::from("tok".to_string()),
        )
    }

    #[test]
    fn first_traveler_comes_from_the_session() {
        let draft = BookingDraft::new(destination(), &session());
        assert_eq!(draft.travelers().len(), 1);
        assert_eq!(draft.travelers()[0].name, "Ada Lovelace");
        assert_eq!(draft.travelers()[0].email, "ada@example.com");
        assert_eq!(draft.adults, 1);

        let anonymous = BookingDraft::new(destination(), &Session::anonymous());
        assert_eq!(anonymous.travelers()[0], TravelerInfo::default());
    }

    #[test]
    fn traveler_list_never_empties() {
        let mut draft = BookingDraft::new(destination(), &session());
        assert!(!draft.remove_traveler(0));
        assert_eq!(draft.travelers().len(), 1);

        draft.add_traveler();
        draft.add_traveler();
        assert!(!draft.remove_traveler(7));
        assert!(draft.remove_traveler(1));
        assert!(draft.remove_traveler(0));
        assert!(!draft.remove_traveler(0));
        assert_eq!(draft.travelers().len(), 1);
    }

    #[test]
    fn payload_is_priced_by_the_given_policy() {
        let mut draft = BookingDraft::new(destination(), &session());
        draft.start_date = Some("2025-06-01".parse().unwrap());
        draft.end_date = Some("2025-06-07".parse().unwrap());
        draft.adults = 2;
        draft.children = 1;
        draft.special_requests = "  Sea view ".into();

        let tiered = draft.to_new_booking(&TieredPricing::default(), None).unwrap();
        assert_eq!(tiered.total_price, Money::from_major(1170));
        assert_eq!(tiered.special_requests, "Sea view");
        assert_eq!(tiered.payment_status, PaymentStatus::Pending);
        assert_eq!(tiered.status, None);
        assert_eq!(tiered.reference.id(), "dest-42");

        let flat = draft
            .to_new_booking(&FlatRatePricing::default(), Some(BookingStatus::Pending))
            .unwrap();
        assert_eq!(flat.total_price, Money::from_major(2100));
        assert_eq!(flat.status, Some(BookingStatus::Pending));
    }

    #[test]
    fn payload_requires_valid_details() {
        let draft = BookingDraft::new(
            BookingTarget::Package(VacationPackage {
                id: "pkg-7".into(),
                title: "Aegean Island Hopper".into(),
                price: Money::from_major(800),
                duration_days: Some(10),
                destination: None,
                description: None,
            }),
            &session(),
        );
        assert_eq!(
            draft.to_new_booking(&TieredPricing::default(), None),
            Err(ValidationError::Details(DetailsViolation::MissingStartDate))
        );
    }

    #[test]
    fn payload_refuses_a_total_past_the_money_range() {
        let mut draft = BookingDraft::new(
            BookingTarget::Package(VacationPackage {
                id: "pkg-7".into(),
                title: "Aegean Island Hopper".into(),
                price: Money::from_major(100_000_000),
                duration_days: None,
                destination: None,
                description: None,
            }),
            &session(),
        );
        draft.start_date = Some("2025-06-01".parse().unwrap());
        draft.end_date = Some("2025-06-07".parse().unwrap());
        draft.adults = 4_000_000_000;

        assert_eq!(
            draft.to_new_booking(&FlatRatePricing::default(), None),
            Err(ValidationError::Price(PriceOverflow))
        );
    }
}
