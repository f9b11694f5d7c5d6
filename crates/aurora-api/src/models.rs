// Booking API wire types
//
// Shapes of the JSON documents exchanged with the Aurora backend. Field
// names are camelCase on the wire and ids arrive as `_id`. Optional fields
// use `#[serde(default)]` because older records omit them.

use serde::{Deserialize, Serialize};

// ── References ───────────────────────────────────────────────────────

/// A reference to another document.
///
/// The backend returns either the bare id or, when the route populates the
/// relation, the full object. Only the id and a display name are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(String),
    Populated(PopulatedRef),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulatedRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl EntityRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated(p) => &p.id,
        }
    }

    /// Display name of a populated reference (`name`, falling back to `title`).
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Populated(p) => p.name.as_deref().or(p.title.as_deref()),
        }
    }
}

// ── Catalog ──────────────────────────────────────────────────────────

/// `GET /vacations/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationPackageResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Flat per-person price in major currency units.
    pub price: f64,
    /// Length of the package in days.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub destination: Option<EntityRef>,
    #[serde(default)]
    pub description: Option<String>,
}

/// `GET /destinations/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// ── Bookings ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Body of `POST /bookings`.
///
/// Exactly one of `vacation_package` / `destination` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacation_package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
    pub adults: u32,
    pub children: u32,
    pub special_requests: String,
    pub traveler_info: Vec<TravelerInfo>,
    pub total_price: f64,
    pub payment_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A booking record as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub vacation_package: Option<EntityRef>,
    #[serde(default)]
    pub destination: Option<EntityRef>,
    /// `YYYY-MM-DD` or a full ISO-8601 timestamp.
    pub start_date: String,
    pub end_date: String,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub traveler_info: Vec<TravelerInfo>,
    pub total_price: f64,
    #[serde(default = "default_payment_status")]
    pub payment_status: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_payment_status() -> String {
    "pending".into()
}

/// Body of `PUT /bookings/:id/payment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdateRequest {
    pub payment_id: String,
    pub payment_status: String,
}

// ── Payments ─────────────────────────────────────────────────────────

/// Body of `POST /payments/create-payment-intent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub booking_id: String,
    /// Amount in major currency units.
    pub amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entity_ref_accepts_bare_id_and_populated_object() {
        let bare: EntityRef = serde_json::from_value(json!("64f0c2")).unwrap();
        assert_eq!(bare.id(), "64f0c2");
        assert_eq!(bare.display_name(), None);

        let populated: EntityRef =
            serde_json::from_value(json!({ "_id": "64f0c3", "title": "Nordic Lights" })).unwrap();
        assert_eq!(populated.id(), "64f0c3");
        assert_eq!(populated.display_name(), Some("Nordic Lights"));
    }

    #[test]
    fn create_request_omits_the_unused_reference() {
        let req = CreateBookingRequest {
            vacation_package: None,
            destination: Some("dest-1".into()),
            start_date: "2025-06-01".into(),
            end_date: "2025-06-07".into(),
            adults: 2,
            children: 1,
            special_requests: String::new(),
            traveler_info: vec![],
            total_price: 1170.0,
            payment_status: "pending".into(),
            status: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("vacationPackage").is_none());
        assert!(value.get("status").is_none());
        assert_eq!(value["destination"], "dest-1");
        assert_eq!(value["travelerInfo"], json!([]));
        assert_eq!(value["totalPrice"], json!(1170.0));
    }

    #[test]
    fn booking_response_defaults_payment_status() {
        let booking: BookingResponse = serde_json::from_value(json!({
            "_id": "b1",
            "destination": "d1",
            "startDate": "2025-06-01T00:00:00.000Z",
            "endDate": "2025-06-07T00:00:00.000Z",
            "adults": 1,
            "totalPrice": 500
        }))
        .unwrap();
        assert_eq!(booking.payment_status, "pending");
        assert_eq!(booking.children, 0);
        assert!(booking.traveler_info.is_empty());
    }
}
