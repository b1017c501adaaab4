use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use super::coerce::{exact_int, is_truthy};
use super::{timestamp, ValidationError};
use crate::database::models::review::{MAX_RATING, MIN_RATING};
use crate::database::models::Review;
use crate::database::Document;

fn rating(value: &Value) -> Result<i64, ValidationError> {
    exact_int(value)
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .ok_or(ValidationError::RatingOutOfRange)
}

pub fn create(body: &Document, now: DateTime<Utc>) -> Result<Review, ValidationError> {
    if ["productId", "userId", "rating"]
        .iter()
        .any(|key| !is_truthy(body.get(*key)))
    {
        return Err(ValidationError::MissingReviewFields);
    }
    let rating = rating(&body["rating"])?;

    let comment = match body.get("comment") {
        Some(c) if is_truthy(Some(c)) => c.clone(),
        _ => json!(""),
    };

    Ok(Review {
        product_id: body["productId"].clone(),
        user_id: body["userId"].clone(),
        rating,
        comment,
        created_at: now,
        updated_at: now,
    })
}

/// Only `rating` and `comment` are editable on a review.
pub fn update(body: &Document, now: DateTime<Utc>) -> Result<Document, ValidationError> {
    let mut set = Document::new();

    if is_truthy(body.get("rating")) {
        set.insert("rating".into(), json!(rating(&body["rating"])?));
    }
    if let Some(comment) = body.get("comment") {
        set.insert("comment".into(), comment.clone());
    }

    set.insert("updatedAt".into(), timestamp(now));
    Ok(set)
}
