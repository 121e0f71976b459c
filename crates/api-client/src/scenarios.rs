//! End-to-end behaviour across the configuration guard, executor, table
//! helpers and per-table APIs, driven through a recording transport

use crate::endpoints::bookings::{BookingFilter, BookingStatus, NewBooking};
use crate::endpoints::hotel_applications::{
    ApplicationStatus, HotelApplication, HotelApplicationPatch,
};
use crate::endpoints::properties::PropertyFilter;
use crate::endpoints::users::{UserFilter, UserRole};
use crate::error::ApiError;
use crate::testing::{
    booking_row, configured_client, property_row, unconfigured_client, user_row, MockTransport,
};
use chrono::NaiveDate;
use serde_json::{json, Value};

fn booking() -> NewBooking {
    NewBooking {
        user_id: "u1".to_string(),
        property_id: "p1".to_string(),
        room_id: "r1".to_string(),
        check_in_date: NaiveDate::from_ymd_opt(2025, 8, 10).unwrap(),
        check_out_date: NaiveDate::from_ymd_opt(2025, 8, 12).unwrap(),
        nights: 2,
        adults: 2,
        children: Some(1),
        room_price: 3200.0,
        total_price: 6400.0,
        guest_name: "Ayşe Yılmaz".to_string(),
        guest_email: "ayse@example.com".to_string(),
        guest_phone: Some("+90 555 000 00 00".to_string()),
        special_requests: None,
    }
}

#[tokio::test]
async fn unconfigured_backend_lists_nothing() {
    let mock = MockTransport::replying_json(200, &json!([booking_row("b1", "u1", "confirmed")]));
    let client = unconfigured_client(&mock);

    assert!(!client.is_configured());
    let bookings = client.bookings().list(&BookingFilter::new().with_limit(10)).await;
    assert!(bookings.is_empty());
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn default_property_listing() {
    let rows = json!([property_row("p1", "o1", "Antalya", "hotel")]);
    let mock = MockTransport::replying_json(200, &rows);
    let client = configured_client(&mock);

    let properties = client.properties().list(&PropertyFilter::default()).await;
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].id, "p1");
    assert_eq!(properties[0].city, "Antalya");

    let request = mock.last_request().unwrap();
    assert_eq!(request.method.as_str(), "GET");
    assert_eq!(
        request.url,
        "https://test.supabase.co/rest/v1/properties?select=*&order=created_at.desc&limit=50"
    );
    assert_eq!(request.header("apikey"), Some("anon-key"));
    assert_eq!(request.header("authorization"), Some("Bearer anon-key"));
}

#[tokio::test]
async fn created_booking_is_unwrapped() {
    let mut row = booking_row("b1", "u1", "confirmed");
    row["booking_number"] = json!("ROT-1");
    let mock = MockTransport::replying_json(201, &json!([row]));
    let client = configured_client(&mock);

    let created = client.bookings().create(&booking()).await.unwrap();
    assert_eq!(created.id, "b1");
    assert_eq!(created.booking_number, "ROT-1");
    assert_eq!(created.status, BookingStatus::Confirmed);

    let request = mock.last_request().unwrap();
    assert_eq!(request.method.as_str(), "POST");
    assert!(request.url.ends_with("/rest/v1/bookings"));
    assert_eq!(request.header("prefer"), Some("return=representation"));
}

#[tokio::test]
async fn failed_application_update_keeps_backend_message() {
    let mock = MockTransport::replying(500, "internal error");
    let client = configured_client(&mock);
    let patch = HotelApplicationPatch::status(ApplicationStatus::Approved);

    assert!(client.hotel_applications().update("a1", &patch).await.is_none());

    let err = client
        .update::<HotelApplication, _>("hotel_applications", "a1", &patch)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ApiResponse { status: 500, .. }));
    assert!(err.is_server_error());
    assert_eq!(err.message(), "internal error");

    let request = mock.last_request().unwrap();
    assert_eq!(request.method.as_str(), "PATCH");
    assert!(request.url.ends_with("/hotel_applications?id=eq.a1"));
    assert_eq!(request.body, Some(json!({"status": "approved"})));
}

#[tokio::test]
async fn admins_outside_the_fetch_window_are_missed() {
    // The backend honours limit=200 and every one of the 200 newest users is
    // a customer; the admins are older and never come back.
    let newest: Vec<Value> = (0..200)
        .map(|i| user_row(&format!("c{i}"), "customer", 28))
        .collect();
    let mock = MockTransport::replying_json(200, &Value::Array(newest));
    let client = configured_client(&mock);

    let admins = client
        .users()
        .list(&UserFilter::new().with_role(UserRole::Admin).with_limit(200))
        .await;
    assert!(admins.is_empty());

    let url = mock.last_request().unwrap().url;
    assert!(url.contains("limit=200"));
    assert!(!url.contains("role="));
}

#[tokio::test]
async fn select_rows_reports_what_select_hides() {
    let mock = MockTransport::failing("connection refused");
    let client = configured_client(&mock);
    let query = crate::query::SelectQuery::newest_first();

    let rows: Vec<Value> = client.select("bookings", &query).await;
    assert!(rows.is_empty());

    let err = client.select_rows::<Value>("bookings", &query).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));

    let unconfigured = unconfigured_client(&mock);
    let err = unconfigured
        .select_rows::<Value>("bookings", &query)
        .await
        .unwrap_err();
    assert!(err.is_not_configured());
}
