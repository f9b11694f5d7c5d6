// ── Booking price calculation ──
//
// Two independent policies. `TieredPricing` drives the multi-step checkout
// (duration discounts for destinations, child discounts for both kinds);
// `FlatRatePricing` drives the one-shot booking form (per-person-per-day
// destinations, no child discount). Both are pure functions of their input.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::model::Money;

/// Per-person base price of a destination in the checkout wizard.
pub const CHECKOUT_DESTINATION_BASE: Money = Money::from_major(500);

/// Per-person daily rate of a destination on the booking form.
pub const FORM_DESTINATION_DAILY_RATE: Money = Money::from_major(100);

/// Day count the booking form assumes when the dates don't give one.
pub const FORM_DEFAULT_DAYS: u32 = 3;

/// Child share of the adult price for a destination (checkout).
pub const DESTINATION_CHILD_PCT: u32 = 60;

/// Child share of the package price (checkout).
pub const PACKAGE_CHILD_PCT: u32 = 70;

/// What is being priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricedItem {
    /// Flat per-person package price.
    Package { price: Money },
    Destination,
}

/// Inputs to a pricing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingInput {
    pub item: PricedItem,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub adults: u32,
    pub children: u32,
}

/// Result of pricing a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    /// Duration multiplier applied to the destination base (100 = none).
    pub duration_factor_pct: u32,
    /// Trip length the quote was computed for, if any.
    pub days: Option<u32>,
    pub adult_price: Money,
    pub child_price: Money,
    pub total: Money,
}

/// The party is too large for its total to fit in a [`Money`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("The booking total is too large to price")]
pub struct PriceOverflow;

pub trait PricingPolicy {
    fn quote(&self, input: &PricingInput) -> Result<PriceQuote, PriceOverflow>;
}

/// Inclusive day count of a trip, or `None` when either date is missing or
/// the end precedes the start.
pub fn trip_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<u32> {
    let (start, end) = (start?, end?);
    let span = (end - start).num_days();
    u32::try_from(span).ok().map(|d| d.saturating_add(1))
}

/// Duration multiplier for a destination trip of `days` days.
pub fn duration_factor_pct(days: Option<u32>) -> u32 {
    match days {
        None | Some(0..=3) => 100,
        Some(4..=7) => 90,
        Some(8..=14) => 80,
        Some(_) => 70,
    }
}

fn total(
    adult_price: Money,
    child_price: Money,
    input: &PricingInput,
) -> Result<Money, PriceOverflow> {
    let adults = adult_price.checked_times(input.adults).ok_or(PriceOverflow)?;
    let children = child_price.checked_times(input.children).ok_or(PriceOverflow)?;
    adults.checked_add(children).ok_or(PriceOverflow)
}

// ── Tiered (checkout) ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TieredPricing {
    pub destination_base: Money,
}

impl Default for TieredPricing {
    fn default() -> Self {
        Self {
            destination_base: CHECKOUT_DESTINATION_BASE,
        }
    }
}

impl PricingPolicy for TieredPricing {
    fn quote(&self, input: &PricingInput) -> Result<PriceQuote, PriceOverflow> {
        let days = trip_days(input.start_date, input.end_date);
        let (factor, adult_price, child_pct) = match input.item {
            PricedItem::Destination => {
                let factor = duration_factor_pct(days);
                let adult = self
                    .destination_base
                    .checked_percent(factor)
                    .ok_or(PriceOverflow)?;
                (factor, adult, DESTINATION_CHILD_PCT)
            }
            PricedItem::Package { price } => (100, price, PACKAGE_CHILD_PCT),
        };
        let child_price = adult_price.checked_percent(child_pct).ok_or(PriceOverflow)?;
        Ok(PriceQuote {
            duration_factor_pct: factor,
            days,
            adult_price,
            child_price,
            total: total(adult_price, child_price, input)?,
        })
    }
}

// ── Flat rate (booking form) ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRatePricing {
    pub daily_rate: Money,
    pub default_days: u32,
}

impl Default for FlatRatePricing {
    fn default() -> Self {
        Self {
            daily_rate: FORM_DESTINATION_DAILY_RATE,
            default_days: FORM_DEFAULT_DAYS,
        }
    }
}

impl PricingPolicy for FlatRatePricing {
    fn quote(&self, input: &PricingInput) -> Result<PriceQuote, PriceOverflow> {
        let days = trip_days(input.start_date, input.end_date);
        let per_person = match input.item {
            PricedItem::Destination => self
                .daily_rate
                .checked_times(days.unwrap_or(self.default_days))
                .ok_or(PriceOverflow)?,
            PricedItem::Package { price } => price,
        };
        Ok(PriceQuote {
            duration_factor_pct: 100,
            days,
            adult_price: per_person,
            child_price: per_person,
            total: total(per_person, per_person, input)?,
        })
    }
}
