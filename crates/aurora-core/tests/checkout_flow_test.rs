#![allow(clippy::unwrap_used)]
// End-to-end checkout against a mocked booking backend.

use std::sync::Mutex;

use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aurora_core::{
    BackOutcome, BookingType, CardHandle, CheckoutError, CheckoutStep, ClientConfig, CoreError,
    IntentStatus, Money, PaymentConfirmation, PaymentIntent, PaymentMethodDetails,
    PaymentProvider, PaymentProviderError, PaymentStatus, Session, Storefront, User,
};

// ── Helpers ─────────────────────────────────────────────────────────

struct ApprovingProvider {
    secrets: Mutex<Vec<String>>,
}

impl PaymentProvider for ApprovingProvider {
    async fn confirm_card_payment(
        &self,
        client_secret: &SecretString,
        _details: &PaymentMethodDetails,
    ) -> Result<PaymentConfirmation, PaymentProviderError> {
        self.secrets
            .lock()
            .unwrap()
            .push(client_secret.expose_secret().to_owned());
        Ok(PaymentConfirmation::Intent(PaymentIntent {
            id: "pi_123".into(),
            status: IntentStatus::Succeeded,
        }))
    }
}

fn provider() -> ApprovingProvider {
    ApprovingProvider {
        secrets: Mutex::new(Vec::new()),
    }
}

fn storefront(server: &MockServer) -> Storefront {
    let session = Session::authenticated(
        User {
            id: "u-1".into(),
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
        },
        SecretString::from("tok-abc".to_string()),
    );
    let config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
    Storefront::new(config, session).unwrap()
}

fn booking_body(payment_status: &str) -> serde_json::Value {
    json!({
        "_id": "bk-1",
        "destination": { "_id": "dest-42", "name": "Lofoten" },
        "startDate": "2025-06-01T00:00:00.000Z",
        "endDate": "2025-06-07T00:00:00.000Z",
        "adults": 2,
        "children": 1,
        "specialRequests": "",
        "travelerInfo": [{ "name": "Ada Lovelace", "email": "ada@example.com", "phone": "" }],
        "totalPrice": 1170,
        "paymentStatus": payment_status,
        "status": "pending"
    })
}

async fn mount_destination(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/destinations/dest-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "dest-42",
            "name": "Lofoten",
            "country": "Norway"
        })))
        .mount(server)
        .await;
}

async fn mount_create(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(header("x-auth-token", "tok-abc"))
        .and(header_exists("Idempotency-Key"))
        .and(body_json(json!({
            "destination": "dest-42",
            "startDate": "2025-06-01",
            "endDate": "2025-06-07",
            "adults": 2,
            "children": 1,
            "specialRequests": "",
            "travelerInfo": [{ "name": "Ada Lovelace", "email": "ada@example.com", "phone": "" }],
            "totalPrice": 1170.0,
            "paymentStatus": "pending"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(booking_body("pending")))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/payments/create-payment-intent"))
        .and(body_json(json!({ "bookingId": "bk-1", "amount": 1170.0 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "clientSecret": "pi_123_secret" })),
        )
        .mount(server)
        .await;
}

// ── Flows ───────────────────────────────────────────────────────────

#[tokio::test]
async fn destination_checkout_end_to_end() {
    let server = MockServer::start().await;
    mount_destination(&server).await;
    mount_create(&server).await;

    Mock::given(method("PUT"))
        .and(path("/api/bookings/bk-1/payment"))
        .and(body_json(json!({ "paymentId": "pi_123", "paymentStatus": "paid" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_body("paid")))
        .expect(1)
        .mount(&server)
        .await;

    let mut paid = booking_body("paid");
    paid["paymentId"] = json!("pi_123");
    paid["status"] = json!("confirmed");
    Mock::given(method("GET"))
        .and(path("/api/bookings/bk-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paid))
        .mount(&server)
        .await;

    let store = storefront(&server);
    let target = store.target(BookingType::Destination, "dest-42").await.unwrap();
    let mut checkout = store.start_checkout(target);

    {
        let draft = checkout.draft_mut().unwrap();
        draft.start_date = Some("2025-06-01".parse().unwrap());
        draft.end_date = Some("2025-06-07".parse().unwrap());
        draft.adults = 2;
        draft.children = 1;
    }
    assert_eq!(checkout.quote().unwrap().total, Money::from_major(1170));

    checkout.advance_details().unwrap();
    checkout.submit_travelers(store.gateway()).await.unwrap();
    assert_eq!(checkout.step(), CheckoutStep::Payment);

    // Back and forward again reuses the booking (the create mock expects 1 call).
    assert_eq!(checkout.back(), BackOutcome::Moved(CheckoutStep::TravelerInfo));
    checkout.submit_travelers(store.gateway()).await.unwrap();

    let provider = provider();
    checkout
        .confirm_payment(store.gateway(), &provider, CardHandle("card".into()))
        .await
        .unwrap();

    assert_eq!(checkout.step(), CheckoutStep::Confirmation);
    let booking = checkout.booking().unwrap();
    assert_eq!(booking.payment_status, PaymentStatus::Paid);
    assert_eq!(booking.payment_id.as_deref(), Some("pi_123"));
    assert_eq!(
        provider.secrets.lock().unwrap().clone(),
        vec!["pi_123_secret".to_string()]
    );
}

#[tokio::test]
async fn payment_recorded_failure_stays_on_payment() {
    let server = MockServer::start().await;
    mount_destination(&server).await;
    mount_create(&server).await;

    Mock::given(method("PUT"))
        .and(path("/api/bookings/bk-1/payment"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "msg": "Server Error" })))
        .mount(&server)
        .await;

    let store = storefront(&server);
    let target = store.target(BookingType::Destination, "dest-42").await.unwrap();
    let mut checkout = store.start_checkout(target);
    {
        let draft = checkout.draft_mut().unwrap();
        draft.start_date = Some("2025-06-01".parse().unwrap());
        draft.end_date = Some("2025-06-07".parse().unwrap());
        draft.adults = 2;
        draft.children = 1;
    }
    checkout.advance_details().unwrap();
    checkout.submit_travelers(store.gateway()).await.unwrap();

    let err = checkout
        .confirm_payment(store.gateway(), &provider(), CardHandle("card".into()))
        .await
        .unwrap_err();

    match err {
        CheckoutError::PaymentNotRecorded {
            ref booking_id,
            ref payment_id,
            ..
        } => {
            assert_eq!(booking_id, "bk-1");
            assert_eq!(payment_id, "pi_123");
        }
        other => panic!("expected PaymentNotRecorded, got: {other:?}"),
    }
    assert_eq!(checkout.step(), CheckoutStep::Payment);
    assert!(checkout.banner().unwrap().contains("contact support"));
}

#[tokio::test]
async fn missing_package_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vacations/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "msg": "Not found" })))
        .mount(&server)
        .await;

    let err = storefront(&server).package("nope").await.unwrap_err();

    assert_eq!(err.to_string(), "Vacation package not found: nope");
}

#[tokio::test]
async fn booking_form_creates_pending_booking() {
    let server = MockServer::start().await;
    mount_destination(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(body_json(json!({
            "destination": "dest-42",
            "startDate": "2025-06-01",
            "endDate": "2025-06-07",
            "adults": 2,
            "children": 1,
            "specialRequests": "",
            "travelerInfo": [{ "name": "Ada Lovelace", "email": "ada@example.com", "phone": "" }],
            "totalPrice": 2100.0,
            "paymentStatus": "pending",
            "status": "pending"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(booking_body("pending")))
        .expect(1)
        .mount(&server)
        .await;

    let store = storefront(&server);
    let target = store.target(BookingType::Destination, "dest-42").await.unwrap();
    let mut draft = store.new_draft(target);
    draft.start_date = Some("2025-06-01".parse().unwrap());
    draft.end_date = Some("2025-06-07".parse().unwrap());
    draft.adults = 2;
    draft.children = 1;

    let booking = store.quick_booking(&draft).await.unwrap();
    assert_eq!(booking.id, "bk-1");
    assert_eq!(booking.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn create_timeout_surfaces_as_timed_out() {
    let server = MockServer::start().await;
    mount_destination(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(booking_body("pending"))
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let session = Session::with_token(SecretString::from("tok-abc".to_string()));
    let mut config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
    config.timeout = std::time::Duration::from_millis(200);
    let store = Storefront::new(config, session).unwrap();

    let target = store.target(BookingType::Destination, "dest-42").await.unwrap();
    let mut checkout = store.start_checkout(target);
    {
        let draft = checkout.draft_mut().unwrap();
        draft.start_date = Some("2025-06-01".parse().unwrap());
        draft.end_date = Some("2025-06-03".parse().unwrap());
        let lead = draft.traveler_mut(0).unwrap();
        lead.name = "Ada".into();
        lead.email = "ada@example.com".into();
    }
    checkout.advance_details().unwrap();

    let err = checkout.submit_travelers(store.gateway()).await.unwrap_err();

    match err {
        CheckoutError::Network { ref source, .. } => {
            assert!(matches!(source, CoreError::Timeout { .. }));
        }
        other => panic!("expected Network timeout, got: {other:?}"),
    }
    assert!(checkout.banner().unwrap().contains("timed out"));
    assert_eq!(checkout.step(), CheckoutStep::TravelerInfo);
}
