//! REST client for the Rotaly PostgREST backend
//!
//! This crate talks to a Supabase-hosted PostgREST API and degrades to empty
//! results when no backend is configured, so callers can always render an
//! empty state instead of handling a hard failure.
//!
//! # Features
//!
//! - **Environment-based configuration**: URL and anon key from `SUPABASE_*`
//!   (or `NEXT_PUBLIC_SUPABASE_*`) variables
//! - **Configuration guard**: unconfigured clients never touch the network
//! - **Typed tables**: bookings, properties, users, hotel applications,
//!   support tickets and reviews
//! - **Payload validation**: typed writes are checked before they are sent
//! - **Request correlation**: every request carries a unique `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use rotaly_api_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RotalyClient::new()?;
//!
//!     // Empty when the backend is not configured
//!     let filter = PropertyFilter::new().with_city("Antalya");
//!     let properties = client.properties().list(&filter).await;
//!     println!("{} properties", properties.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod payload;
pub mod query;
pub mod transport;

#[cfg(test)]
mod scenarios;
#[cfg(test)]
mod testing;

pub use client::RotalyClient;
pub use config::{is_api_configured, ClientConfig};
pub use error::{ApiError, ApiResult};
pub use payload::Payload;
pub use query::SelectQuery;
pub use transport::{HttpMethod, Transport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::RotalyClient;
    pub use crate::config::{is_api_configured, ClientConfig};
    pub use crate::endpoints::bookings::{Booking, BookingFilter, NewBooking, NewBookingPayment};
    pub use crate::endpoints::hotel_applications::{
        ApplicationFilter, ApplicationStatus, HotelApplication, HotelApplicationPatch,
        NewHotelApplication,
    };
    pub use crate::endpoints::properties::{
        NewProperty, Property, PropertyFilter, PropertyPatch, PropertyType,
    };
    pub use crate::endpoints::reviews::{NewReview, Review};
    pub use crate::endpoints::support_tickets::{
        NewSupportTicket, SupportTicket, SupportTicketPatch, TicketFilter, TicketPriority,
        TicketStatus,
    };
    pub use crate::endpoints::users::{User, UserFilter, UserPatch, UserRole};
    pub use crate::endpoints::{
        BookingsApi, HotelApplicationsApi, PropertiesApi, ReviewsApi, SupportTicketsApi, UsersApi,
    };
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::query::SelectQuery;
}
