//! Test doubles and fixtures shared by the unit tests

use crate::client::RotalyClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::transport::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

enum Reply {
    Response(HttpResponse),
    Fail(String),
}

/// Transport that answers every request with one canned reply and records
/// what it was sent
pub struct MockTransport {
    reply: Reply,
    calls: AtomicUsize,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn replying(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Response(HttpResponse {
                status,
                body: body.into(),
            }),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn replying_json(status: u16, body: &Value) -> Arc<Self> {
        Self::replying(status, body.to_string())
    }

    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Fail(message.into()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Reply::Response(response) => Ok(response.clone()),
            Reply::Fail(message) => Err(ApiError::Transport(message.clone())),
        }
    }
}

pub fn configured_client(mock: &Arc<MockTransport>) -> RotalyClient {
    RotalyClient::with_transport(
        ClientConfig::new("https://test.supabase.co", "anon-key"),
        mock.clone(),
    )
    .unwrap()
}

pub fn unconfigured_client(mock: &Arc<MockTransport>) -> RotalyClient {
    RotalyClient::with_transport(ClientConfig::default(), mock.clone()).unwrap()
}

/// `2025-06-<day>T09:00:00+00:00`
pub fn stamp(day: u32) -> String {
    format!("2025-06-{day:02}T09:00:00+00:00")
}

pub fn booking_row(id: &str, user_id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "booking_number": format!("ROT-{id}"),
        "user_id": user_id,
        "property_id": "p1",
        "room_id": "r1",
        "check_in_date": "2025-07-01",
        "check_out_date": "2025-07-04",
        "nights": 3,
        "adults": 2,
        "children": 0,
        "room_price": 2500.0,
        "total_price": 7500.0,
        "currency": "TRY",
        "status": status,
        "payment_status": "paid",
        "payment_method": "pay_at_property",
        "guest_name": "Ayşe Yılmaz",
        "guest_email": "ayse@example.com",
        "guest_phone": null,
        "special_requests": null,
        "created_at": stamp(1),
        "updated_at": stamp(1)
    })
}

pub fn property_row(id: &str, owner_id: &str, city: &str, property_type: &str) -> Value {
    json!({
        "id": id,
        "owner_id": owner_id,
        "property_type": property_type,
        "slug": format!("{}-{id}", city.to_lowercase()),
        "star_rating": 4,
        "address": "Lara Cd. 12",
        "city": city,
        "state": null,
        "postal_code": "07230",
        "country": "TR",
        "phone": null,
        "email": "info@example.com",
        "website": null,
        "check_in_time": "14:00",
        "check_out_time": "12:00",
        "min_stay_nights": 1,
        "max_stay_nights": 30,
        "cancellation_days": 3,
        "is_active": true,
        "is_verified": true,
        "is_featured": false,
        "total_rooms": 42,
        "avg_rating": 4.6,
        "review_count": 128,
        "created_at": stamp(2),
        "updated_at": stamp(2)
    })
}

pub fn user_row(id: &str, role: &str, day: u32) -> Value {
    json!({
        "id": id,
        "email": format!("{id}@example.com"),
        "full_name": null,
        "phone": null,
        "avatar_url": null,
        "role": role,
        "preferred_language": "tr",
        "email_verified": true,
        "phone_verified": false,
        "is_active": true,
        "must_change_password": false,
        "last_login_at": null,
        "created_at": stamp(day),
        "updated_at": stamp(day)
    })
}

pub fn application_row(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "application_number": format!("APP-{id}"),
        "business_name": "Deniz Otel",
        "contact_name": "Mehmet Kaya",
        "contact_email": "mehmet@example.com",
        "contact_phone": null,
        "property_type": "hotel",
        "address": "Atatürk Blv. 5",
        "city": "Bodrum",
        "state": null,
        "postal_code": null,
        "country": "TR",
        "description": null,
        "status": status,
        "reviewed_by": null,
        "reviewed_at": null,
        "rejection_reason": null,
        "created_user_id": null,
        "created_property_id": null,
        "created_at": stamp(3),
        "updated_at": stamp(3)
    })
}

pub fn ticket_row(id: &str, user_id: &str, status: &str, priority: &str) -> Value {
    json!({
        "id": id,
        "ticket_number": format!("TKT-{id}"),
        "user_id": user_id,
        "category_id": null,
        "booking_id": null,
        "subject": "Late check-in",
        "status": status,
        "priority": priority,
        "assigned_to": null,
        "resolved_at": null,
        "closed_at": null,
        "created_at": stamp(4),
        "updated_at": stamp(4)
    })
}

pub fn review_row(id: &str, property_id: &str, approved: bool) -> Value {
    json!({
        "id": id,
        "booking_id": "b1",
        "user_id": "u1",
        "property_id": property_id,
        "overall_rating": 5,
        "cleanliness_rating": 5,
        "location_rating": 4,
        "service_rating": null,
        "value_rating": null,
        "title": "Harika",
        "comment": null,
        "is_approved": approved,
        "is_featured": false,
        "owner_response": null,
        "owner_response_at": null,
        "created_at": stamp(5),
        "updated_at": stamp(5)
    })
}
