//! Bookings and booking payments
//!
//! Maps to the `bookings` and `booking_payments` tables:
//! - List bookings, optionally narrowed by guest, property or status
//! - Get a single booking by ID
//! - Create a booking (confirmed, paid at the property, in TRY)
//! - Record a payment against a booking

use super::{find_by_id, written, Record};
use crate::client::RotalyClient;
use crate::payload::Payload;
use crate::query::SelectQuery;
use chrono::{DateTime, NaiveDate, Utc};
use rotaly_core::validation::{ValidationResult, Validator};
use serde::{Deserialize, Serialize};

const BOOKINGS: &str = "bookings";
const BOOKING_PAYMENTS: &str = "booking_payments";

/// Default number of newest bookings fetched by [`BookingsApi::list`]
pub const DEFAULT_LIMIT: u32 = 100;

/// Currency every booking is priced in
pub const CURRENCY: &str = "TRY";

/// Bookings API interface
#[derive(Clone)]
pub struct BookingsApi {
    client: RotalyClient,
}

impl BookingsApi {
    pub(crate) fn new(client: RotalyClient) -> Self {
        Self { client }
    }

    /// List the newest bookings, then apply the filter in memory
    pub async fn list(&self, filter: &BookingFilter) -> Vec<Booking> {
        let query = SelectQuery::newest_first().limit(filter.limit.unwrap_or(DEFAULT_LIMIT));
        self.client
            .select::<Booking>(BOOKINGS, &query)
            .await
            .into_iter()
            .filter(|b| filter.matches(b))
            .collect()
    }

    /// Get a single booking by ID
    pub async fn get(&self, id: &str) -> Option<Booking> {
        find_by_id(&self.client, BOOKINGS, id).await
    }

    /// Create a booking
    ///
    /// The stored row is `confirmed`, `paid`, payable at the property and
    /// priced in TRY.
    pub async fn create(&self, booking: &NewBooking) -> Option<Booking> {
        let payload = BookingInsert {
            booking,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Paid,
            payment_method: PaymentMethod::PayAtProperty,
            currency: CURRENCY,
        };
        written(BOOKINGS, self.client.insert(BOOKINGS, &payload).await)
    }

    /// Record a payment; status defaults to `paid`, stamped with the current time
    pub async fn create_payment(&self, payment: &NewBookingPayment) -> Option<BookingPayment> {
        let payload = BookingPaymentInsert {
            booking_id: &payment.booking_id,
            amount: payment.amount,
            payment_method: payment.payment_method,
            status: payment.status.unwrap_or(PaymentStatus::Paid),
            currency: CURRENCY,
            paid_at: Utc::now(),
        };
        written(
            BOOKING_PAYMENTS,
            self.client.insert(BOOKING_PAYMENTS, &payload).await,
        )
    }
}

// ============================================================================
// Records
// ============================================================================

/// Booking lifecycle status; transitions are enforced by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
    PartiallyRefunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
    PayAtProperty,
}

/// Booking row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub booking_number: String,
    pub user_id: String,
    pub property_id: String,
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: u32,
    pub adults: u32,
    pub children: u32,
    pub room_price: f64,
    pub total_price: f64,
    pub currency: String,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Booking {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Booking payment row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingPayment {
    pub id: String,
    pub booking_id: String,
    pub amount: f64,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Filters and payloads
// ============================================================================

/// Client-side narrowing for [`BookingsApi::list`]
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub user_id: Option<String>,
    pub property_id: Option<String>,
    pub status: Option<BookingStatus>,
    /// Newest rows fetched before filtering (default 100)
    pub limit: Option<u32>,
}

impl BookingFilter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Only bookings made by this user
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Only bookings at this property
    pub fn with_property(mut self, property_id: impl Into<String>) -> Self {
        self.property_id = Some(property_id.into());
        self
    }

    /// Only bookings in this status
    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Fetch window size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, booking: &Booking) -> bool {
        self.user_id.as_ref().is_none_or(|u| *u == booking.user_id)
            && self
                .property_id
                .as_ref()
                .is_none_or(|p| *p == booking.property_id)
            && self.status.is_none_or(|s| s == booking.status)
    }
}

/// Fields supplied by the guest when booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub user_id: String,
    pub property_id: String,
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: u32,
    pub adults: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<u32>,
    pub room_price: f64,
    pub total_price: f64,
    pub guest_name: String,
    pub guest_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl NewBooking {
    fn check(&self) -> ValidationResult {
        let stay = (self.check_out_date - self.check_in_date).num_days();
        Validator::new()
            .required("user_id", &self.user_id)
            .required("property_id", &self.property_id)
            .required("room_id", &self.room_id)
            .required("guest_name", &self.guest_name)
            .max_length("guest_name", &self.guest_name, 200)
            .email("guest_email", &self.guest_email)
            .range("nights", self.nights, 1, 365)
            .range("adults", self.adults, 1, 20)
            .non_negative("room_price", self.room_price)
            .non_negative("total_price", self.total_price)
            .custom("check_out_date", || {
                (stay <= 0).then(|| format!("Must be after {}", self.check_in_date))
            })
            .custom("nights", || {
                (stay > 0 && stay != i64::from(self.nights))
                    .then(|| format!("Must equal the stay length ({stay})"))
            })
            .validate()
    }
}

#[derive(Serialize)]
struct BookingInsert<'a> {
    #[serde(flatten)]
    booking: &'a NewBooking,
    status: BookingStatus,
    payment_status: PaymentStatus,
    payment_method: PaymentMethod,
    currency: &'static str,
}

impl Payload for BookingInsert<'_> {
    fn validate(&self) -> ValidationResult {
        self.booking.check()
    }
}

/// Payment to record against an existing booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBookingPayment {
    pub booking_id: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    /// Defaults to `paid`
    pub status: Option<PaymentStatus>,
}

#[derive(Serialize)]
struct BookingPaymentInsert<'a> {
    booking_id: &'a str,
    amount: f64,
    payment_method: PaymentMethod,
    status: PaymentStatus,
    currency: &'static str,
    paid_at: DateTime<Utc>,
}

impl Payload for BookingPaymentInsert<'_> {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("booking_id", self.booking_id)
            .non_negative("amount", self.amount)
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{booking_row, configured_client, unconfigured_client, MockTransport};
    use serde_json::json;

    fn new_booking() -> NewBooking {
        NewBooking {
            user_id: "u1".to_string(),
            property_id: "p1".to_string(),
            room_id: "r1".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
            nights: 3,
            adults: 2,
            children: None,
            room_price: 2500.0,
            total_price: 7500.0,
            guest_name: "Ayşe Yılmaz".to_string(),
            guest_email: "ayse@example.com".to_string(),
            guest_phone: None,
            special_requests: Some("Sea view".to_string()),
        }
    }

    #[test]
    fn test_booking_deserialize() {
        let booking: Booking =
            serde_json::from_value(booking_row("b1", "u1", "confirmed")).unwrap();
        assert_eq!(booking.id, "b1");
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.payment_method, Some(PaymentMethod::PayAtProperty));
        assert_eq!(booking.nights, 3);
    }

    #[test]
    fn test_incomplete_booking_is_rejected() {
        let mut row = booking_row("b1", "u1", "confirmed");
        row.as_object_mut().unwrap().remove("guest_email");
        assert!(serde_json::from_value::<Booking>(row).is_err());
    }

    #[test]
    fn test_insert_payload_carries_business_defaults() {
        let booking = new_booking();
        let payload = BookingInsert {
            booking: &booking,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Paid,
            payment_method: PaymentMethod::PayAtProperty,
            currency: CURRENCY,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["status"], "confirmed");
        assert_eq!(value["payment_status"], "paid");
        assert_eq!(value["payment_method"], "pay_at_property");
        assert_eq!(value["currency"], "TRY");
        assert_eq!(value["check_in_date"], "2025-07-01");
        assert!(value.get("children").is_none());
        assert!(payload.validate().is_valid());
    }

    #[test]
    fn test_booking_validation() {
        let mut booking = new_booking();
        booking.check_out_date = booking.check_in_date;
        booking.guest_email = "ayse".to_string();
        booking.adults = 0;

        let result = booking.check();
        let fields: Vec<_> = result.errors().iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"check_out_date"));
        assert!(fields.contains(&"guest_email"));
        assert!(fields.contains(&"adults"));

        let mut booking = new_booking();
        booking.nights = 2;
        assert!(!booking.check().is_valid());
    }

    #[test]
    fn test_filter_matches() {
        let booking: Booking =
            serde_json::from_value(booking_row("b1", "u1", "cancelled")).unwrap();
        assert!(BookingFilter::new().matches(&booking));
        assert!(BookingFilter::new().with_user("u1").matches(&booking));
        assert!(!BookingFilter::new().with_user("u2").matches(&booking));
        assert!(
            BookingFilter::new()
                .with_property("p1")
                .with_status(BookingStatus::Cancelled)
                .matches(&booking)
        );
        assert!(!BookingFilter::new().with_status(BookingStatus::Pending).matches(&booking));
    }

    #[tokio::test]
    async fn test_list_unconfigured_is_empty() {
        let mock = MockTransport::replying(200, "[]");
        let client = unconfigured_client(&mock);

        let bookings = client.bookings().list(&BookingFilter::new().with_limit(10)).await;
        assert!(bookings.is_empty());
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_list_filters_after_fetch() {
        let rows = json!([
            booking_row("b1", "u1", "confirmed"),
            booking_row("b2", "u2", "confirmed"),
            booking_row("b3", "u1", "cancelled"),
        ]);
        let mock = MockTransport::replying_json(200, &rows);
        let client = configured_client(&mock);

        let filter = BookingFilter::new().with_user("u1").with_status(BookingStatus::Confirmed);
        let bookings = client.bookings().list(&filter).await;
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id, "b1");

        let sent = mock.last_request().unwrap();
        assert!(sent.url.ends_with("/bookings?select=*&order=created_at.desc&limit=100"));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let mock = MockTransport::replying_json(200, &json!([booking_row("b7", "u1", "pending")]));
        let client = configured_client(&mock);

        let booking = client.bookings().get("b7").await.unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(mock.last_request().unwrap().url.ends_with("/bookings?select=*&limit=1&id=eq.b7"));

        assert!(client.bookings().get("other").await.is_none());
    }

    #[tokio::test]
    async fn test_create_payment_defaults() {
        let stored = json!([{
            "id": "pay1",
            "booking_id": "b1",
            "amount": 7500.0,
            "currency": "TRY",
            "payment_method": "credit_card",
            "status": "paid",
            "transaction_id": null,
            "paid_at": "2025-06-01T09:00:00+00:00",
            "created_at": "2025-06-01T09:00:00+00:00"
        }]);
        let mock = MockTransport::replying_json(201, &stored);
        let client = configured_client(&mock);

        let payment = client
            .bookings()
            .create_payment(&NewBookingPayment {
                booking_id: "b1".to_string(),
                amount: 7500.0,
                payment_method: PaymentMethod::CreditCard,
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(payment.id, "pay1");

        let body = mock.last_request().unwrap().body.unwrap();
        assert_eq!(body["status"], "paid");
        assert_eq!(body["currency"], "TRY");
        assert!(body["paid_at"].is_string());
        assert!(mock.last_request().unwrap().url.ends_with("/booking_payments"));
    }

    #[tokio::test]
    async fn test_invalid_booking_is_not_sent() {
        let mock = MockTransport::replying(201, "[]");
        let client = configured_client(&mock);

        let mut booking = new_booking();
        booking.guest_name = String::new();
        assert!(client.bookings().create(&booking).await.is_none());
        assert_eq!(mock.calls(), 0);
    }
}
