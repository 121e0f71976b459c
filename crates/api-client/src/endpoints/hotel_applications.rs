//! Hotel application endpoints
//!
//! Prospective owners apply to list a property. Review outcomes are written
//! back through [`HotelApplicationsApi::update`]; the backend decides what an
//! approval creates.

use super::properties::PropertyType;
use super::{find_by_id, written, Record};
use crate::client::RotalyClient;
use crate::payload::Payload;
use crate::query::SelectQuery;
use chrono::{DateTime, Utc};
use rotaly_core::validation::{ValidationResult, Validator};
use serde::{Deserialize, Serialize};

const HOTEL_APPLICATIONS: &str = "hotel_applications";

/// Country recorded when an application leaves it blank
pub const DEFAULT_COUNTRY: &str = "TR";

pub const DEFAULT_LIMIT: u32 = 100;

/// Hotel applications API interface
#[derive(Clone)]
pub struct HotelApplicationsApi {
    client: RotalyClient,
}

impl HotelApplicationsApi {
    pub(crate) fn new(client: RotalyClient) -> Self {
        Self { client }
    }

    /// List the newest applications, optionally keeping one status
    pub async fn list(&self, filter: &ApplicationFilter) -> Vec<HotelApplication> {
        let query = SelectQuery::newest_first().limit(filter.limit.unwrap_or(DEFAULT_LIMIT));
        self.client
            .select::<HotelApplication>(HOTEL_APPLICATIONS, &query)
            .await
            .into_iter()
            .filter(|a| filter.status.is_none_or(|s| s == a.status))
            .collect()
    }

    pub async fn get(&self, id: &str) -> Option<HotelApplication> {
        find_by_id(&self.client, HOTEL_APPLICATIONS, id).await
    }

    /// Submit an application; a missing country becomes `TR`
    pub async fn create(&self, application: &NewHotelApplication) -> Option<HotelApplication> {
        let payload = NewHotelApplication {
            country: application
                .country
                .clone()
                .filter(|c| !c.trim().is_empty())
                .or_else(|| Some(DEFAULT_COUNTRY.to_string())),
            ..application.clone()
        };
        written(
            HOTEL_APPLICATIONS,
            self.client.insert(HOTEL_APPLICATIONS, &payload).await,
        )
    }

    pub async fn update(
        &self,
        id: &str,
        patch: &HotelApplicationPatch,
    ) -> Option<HotelApplication> {
        written(
            HOTEL_APPLICATIONS,
            self.client.update(HOTEL_APPLICATIONS, id, patch).await,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

/// Hotel application row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelApplication {
    pub id: String,
    pub application_number: String,
    pub business_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub property_type: PropertyType,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
    pub description: Option<String>,
    pub status: ApplicationStatus,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_user_id: Option<String>,
    pub created_property_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for HotelApplication {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub limit: Option<u32>,
}

impl ApplicationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Application form contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHotelApplication {
    pub business_name: String,
    pub contact_name: String,
    pub contact_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub property_type: PropertyType,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Payload for NewHotelApplication {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("business_name", &self.business_name)
            .max_length("business_name", &self.business_name, 200)
            .required("contact_name", &self.contact_name)
            .email("contact_email", &self.contact_email)
            .required("address", &self.address)
            .required("city", &self.city)
            .validate()
    }
}

/// Review outcome or correction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotelApplicationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_property_id: Option<String>,
}

impl HotelApplicationPatch {
    /// Patch that only sets the status
    pub fn status(status: ApplicationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Payload for HotelApplicationPatch {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .custom("rejection_reason", || match (self.status, &self.rejection_reason) {
                (Some(ApplicationStatus::Rejected), Some(reason)) if reason.trim().is_empty() => {
                    Some("Must not be blank when rejecting".to_string())
                }
                _ => None,
            })
            .validate()
    }
}
