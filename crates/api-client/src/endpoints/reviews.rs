//! Review endpoints
//!
//! Guests submit reviews unapproved; moderation happens elsewhere. Property
//! pages only ever see approved reviews.

use super::{find_by_id, written, Record};
use crate::client::RotalyClient;
use crate::payload::Payload;
use crate::query::SelectQuery;
use chrono::{DateTime, Utc};
use rotaly_core::validation::{ValidationResult, Validator};
use serde::{Deserialize, Serialize};

const REVIEWS: &str = "reviews";

/// Reviews API interface
#[derive(Clone)]
pub struct ReviewsApi {
    client: RotalyClient,
}

impl ReviewsApi {
    pub(crate) fn new(client: RotalyClient) -> Self {
        Self { client }
    }

    /// Approved reviews of a property, newest first
    pub async fn by_property(&self, property_id: &str) -> Vec<Review> {
        self.client
            .select::<Review>(REVIEWS, &SelectQuery::newest_first())
            .await
            .into_iter()
            .filter(|r| r.property_id == property_id && r.is_approved)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Option<Review> {
        find_by_id(&self.client, REVIEWS, id).await
    }

    /// Submit a review; it stays hidden until approved
    pub async fn create(&self, review: &NewReview) -> Option<Review> {
        let payload = ReviewInsert {
            review,
            is_approved: false,
            is_featured: false,
        };
        written(REVIEWS, self.client.insert(REVIEWS, &payload).await)
    }
}

/// Review row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub booking_id: String,
    pub user_id: String,
    pub property_id: String,
    pub overall_rating: u8,
    pub cleanliness_rating: Option<u8>,
    pub location_rating: Option<u8>,
    pub service_rating: Option<u8>,
    pub value_rating: Option<u8>,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub is_approved: bool,
    pub is_featured: bool,
    pub owner_response: Option<String>,
    pub owner_response_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Review {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A guest's review of a completed stay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub booking_id: String,
    pub user_id: String,
    pub property_id: String,
    pub overall_rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanliness_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl NewReview {
    fn check(&self) -> ValidationResult {
        let mut v = Validator::new()
            .required("booking_id", &self.booking_id)
            .required("user_id", &self.user_id)
            .required("property_id", &self.property_id)
            .range("overall_rating", self.overall_rating, 1, 5);

        let optional = [
            ("cleanliness_rating", self.cleanliness_rating),
            ("location_rating", self.location_rating),
            ("service_rating", self.service_rating),
            ("value_rating", self.value_rating),
        ];
        for (field, rating) in optional {
            if let Some(rating) = rating {
                v = v.range(field, rating, 1, 5);
            }
        }
        if let Some(title) = &self.title {
            v = v.max_length("title", title, 150);
        }
        v.validate()
    }
}

#[derive(Serialize)]
struct ReviewInsert<'a> {
    #[serde(flatten)]
    review: &'a NewReview,
    is_approved: bool,
    is_featured: bool,
}

impl Payload for ReviewInsert<'_> {
    fn validate(&self) -> ValidationResult {
        self.review.check()
    }
}
