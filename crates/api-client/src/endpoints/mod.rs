//! Per-table APIs
//!
//! Each module wraps one or two PostgREST tables in a typed interface.
//!
//! | Module | Tables | Default list limit |
//! |--------|--------|--------------------|
//! | `bookings` | `bookings`, `booking_payments` | 100 |
//! | `properties` | `properties` | 50 |
//! | `users` | `users` | 100 |
//! | `hotel_applications` | `hotel_applications` | 100 |
//! | `support_tickets` | `support_tickets` | 100 |
//! | `reviews` | `reviews` | none |
//!
//! List getters fetch the newest `limit` rows and then filter in memory.
//! Rows outside that window are never considered, so a narrow filter with a
//! small limit can miss older matches.

pub mod bookings;
pub mod hotel_applications;
pub mod properties;
pub mod reviews;
pub mod support_tickets;
pub mod users;

pub use bookings::BookingsApi;
pub use hotel_applications::HotelApplicationsApi;
pub use properties::PropertiesApi;
pub use reviews::ReviewsApi;
pub use support_tickets::SupportTicketsApi;
pub use users::UsersApi;

use crate::client::RotalyClient;
use crate::error::ApiResult;
use crate::query::SelectQuery;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Rows addressable by a string id
pub trait Record: DeserializeOwned {
    /// Primary key
    fn id(&self) -> &str;
}

/// Fetch one row by id, confirming the id on the decoded record
pub(crate) async fn find_by_id<T: Record>(
    client: &RotalyClient,
    table: &str,
    id: &str,
) -> Option<T> {
    let query = SelectQuery::new().columns("*").limit(1).eq("id", id);
    client
        .select::<T>(table, &query)
        .await
        .into_iter()
        .find(|row| row.id() == id)
}

/// Reduce a write result to the record, logging why it is missing
pub(crate) fn written<T>(table: &str, result: ApiResult<Option<T>>) -> Option<T> {
    match result {
        Ok(row) => row,
        Err(e) if e.is_not_configured() => {
            debug!(table = %table, "Write skipped, backend not configured");
            None
        }
        Err(e) => {
            warn!(table = %table, error = %e, "Write failed");
            None
        }
    }
}
