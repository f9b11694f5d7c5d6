// ── Catalog domain types ──

use serde::{Deserialize, Serialize};

use super::booking::BookingType;
use super::money::Money;

/// A bookable vacation package with a flat per-person price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationPackage {
    pub id: String,
    pub title: String,
    pub price: Money,
    /// Length of the package in days (informational).
    pub duration_days: Option<u32>,
    /// Destination name when the backend populated it, else its id.
    pub destination: Option<String>,
    pub description: Option<String>,
}

/// A destination priced per person per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub country: Option<String>,
    pub description: Option<String>,
}

/// What a draft books: fixes the booking type for the draft's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BookingTarget {
    Package(VacationPackage),
    Destination(Destination),
}

impl BookingTarget {
    pub fn booking_type(&self) -> BookingType {
        match self {
            Self::Package(_) => BookingType::Package,
            Self::Destination(_) => BookingType::Destination,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Package(p) => &p.id,
            Self::Destination(d) => &d.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Package(p) => &p.title,
            Self::Destination(d) => &d.name,
        }
    }
}
