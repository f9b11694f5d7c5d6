// ── Booking domain types ──

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::money::Money;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BookingType {
    Package,
    Destination,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

/// One traveler on a booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// The package or destination a booking refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BookingRef {
    Package { id: String, title: Option<String> },
    Destination { id: String, name: Option<String> },
}

impl BookingRef {
    pub fn booking_type(&self) -> BookingType {
        match self {
            Self::Package { .. } => BookingType::Package,
            Self::Destination { .. } => BookingType::Destination,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Package { id, .. } | Self::Destination { id, .. } => id,
        }
    }

    /// Populated title/name, falling back to the id.
    pub fn label(&self) -> &str {
        match self {
            Self::Package { id, title } => title.as_deref().unwrap_or(id),
            Self::Destination { id, name } => name.as_deref().unwrap_or(id),
        }
    }
}

/// A booking record owned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub reference: BookingRef,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub special_requests: Option<String>,
    pub travelers: Vec<TravelerInfo>,
    pub total_price: Money,
    pub payment_status: PaymentStatus,
    pub status: BookingStatus,
    pub payment_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}
