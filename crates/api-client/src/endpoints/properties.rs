//! Properties API endpoints
//!
//! Maps to the `properties` table:
//! - List properties, optionally narrowed by city or type
//! - Get a single property by ID
//! - List the properties of one owner
//! - Create and update properties

use super::{find_by_id, written, Record};
use crate::client::RotalyClient;
use crate::payload::Payload;
use crate::query::SelectQuery;
use chrono::{DateTime, Utc};
use rotaly_core::validation::{ValidationResult, Validator};
use serde::{Deserialize, Serialize};

const PROPERTIES: &str = "properties";

/// Default number of newest properties fetched by [`PropertiesApi::list`]
pub const DEFAULT_LIMIT: u32 = 50;

/// Properties API interface
#[derive(Clone)]
pub struct PropertiesApi {
    client: RotalyClient,
}

impl PropertiesApi {
    pub(crate) fn new(client: RotalyClient) -> Self {
        Self { client }
    }

    /// List the newest properties, then apply the filter in memory
    ///
    /// City comparison ignores case.
    pub async fn list(&self, filter: &PropertyFilter) -> Vec<Property> {
        let query = SelectQuery::newest_first().limit(filter.limit.unwrap_or(DEFAULT_LIMIT));
        self.client
            .select::<Property>(PROPERTIES, &query)
            .await
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect()
    }

    /// Get a single property by ID
    pub async fn get(&self, id: &str) -> Option<Property> {
        find_by_id(&self.client, PROPERTIES, id).await
    }

    /// Every property owned by `owner_id`, newest first
    ///
    /// No limit is sent; the backend's own row cap applies.
    pub async fn by_owner(&self, owner_id: &str) -> Vec<Property> {
        self.client
            .select::<Property>(PROPERTIES, &SelectQuery::newest_first())
            .await
            .into_iter()
            .filter(|p| p.owner_id == owner_id)
            .collect()
    }

    /// Create a property
    pub async fn create(&self, property: &NewProperty) -> Option<Property> {
        written(PROPERTIES, self.client.insert(PROPERTIES, property).await)
    }

    /// Update a property; only the fields set in `patch` are sent
    pub async fn update(&self, id: &str, patch: &PropertyPatch) -> Option<Property> {
        written(PROPERTIES, self.client.update(PROPERTIES, id, patch).await)
    }
}

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Hotel,
    Villa,
    Apartment,
    Bungalow,
    Hostel,
    Camp,
}

/// Property row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub owner_id: String,
    pub property_type: PropertyType,
    pub slug: String,
    pub star_rating: Option<u8>,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    /// Local time, e.g. `14:00`
    pub check_in_time: String,
    pub check_out_time: String,
    pub min_stay_nights: u32,
    pub max_stay_nights: u32,
    pub cancellation_days: u32,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_featured: bool,
    pub total_rooms: u32,
    pub avg_rating: f64,
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Property {
    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// Filters and payloads
// ============================================================================

/// Client-side narrowing for [`PropertiesApi::list`]
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub city: Option<String>,
    pub property_type: Option<PropertyType>,
    /// Newest rows fetched before filtering (default 50)
    pub limit: Option<u32>,
}

impl PropertyFilter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Only properties in this city (case-insensitive)
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Only properties of this type
    pub fn with_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    /// Fetch window size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, property: &Property) -> bool {
        self.city
            .as_ref()
            .is_none_or(|c| c.to_lowercase() == property.city.to_lowercase())
            && self.property_type.is_none_or(|t| t == property.property_type)
    }
}

/// Fields required to list a new property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: String,
    pub property_type: PropertyType,
    pub slug: String,
    pub address: String,
    pub city: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rooms: Option<u32>,
}

impl Payload for NewProperty {
    fn validate(&self) -> ValidationResult {
        let mut result = Validator::new()
            .required("owner_id", &self.owner_id)
            .required("slug", &self.slug)
            .max_length("slug", &self.slug, 120)
            .required("address", &self.address)
            .required("city", &self.city)
            .required("country", &self.country)
            .optional_email("email", self.email.as_deref())
            .validate();
        result.merge(check_star_rating(self.star_rating));
        result
    }
}

/// Partial property update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stay_nights: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stay_nights: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl Payload for PropertyPatch {
    fn validate(&self) -> ValidationResult {
        let mut result = Validator::new()
            .optional_email("email", self.email.as_deref())
            .custom("max_stay_nights", || match (self.min_stay_nights, self.max_stay_nights) {
                (Some(min), Some(max)) if max < min => {
                    Some(format!("Must not be below min_stay_nights ({min})"))
                }
                _ => None,
            })
            .validate();
        result.merge(check_star_rating(self.star_rating));
        result
    }
}

fn check_star_rating(star_rating: Option<u8>) -> ValidationResult {
    match star_rating {
        Some(stars) => Validator::new().range("star_rating", stars, 1, 5).validate(),
        None => ValidationResult::new(),
    }
}
