use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use super::coerce::{is_truthy, parse_float, parse_int};
use super::{strip_server_fields, text, ValidationError};
use crate::database::models::Product;
use crate::database::Document;

/// Validate a new product. `price` and `stock` may arrive as strings.
pub fn create(body: &Document, now: DateTime<Utc>) -> Result<Product, ValidationError> {
    let (Some(name), Some(category)) = (text(body, "name"), text(body, "category")) else {
        return Err(ValidationError::MissingProductFields);
    };
    let price = body.get("price");
    if !is_truthy(price) {
        return Err(ValidationError::MissingProductFields);
    }
    let price = price
        .and_then(parse_float)
        .ok_or(ValidationError::InvalidPrice)?;

    // Unparseable stock falls back to zero rather than failing the create.
    let stock = body.get("stock").and_then(parse_int).unwrap_or(0);

    Ok(Product {
        name: name.to_string(),
        description: text(body, "description").unwrap_or_default().to_string(),
        price,
        category: category.to_string(),
        image_url: text(body, "imageUrl").unwrap_or_default().to_string(),
        stock,
        created_at: now,
    })
}

/// Build the `$set` for a product update.
///
/// Null and empty-string values are dropped; `price` and `stock` are
/// re-parsed when present. Fails when nothing is left to set.
pub fn update(body: &Document) -> Result<Document, ValidationError> {
    let mut set: Document = strip_server_fields(body.clone())
        .into_iter()
        .filter(|(_, v)| !matches!(v, Value::Null) && v.as_str() != Some(""))
        .collect();

    if is_truthy(set.get("price")) {
        let price = set
            .get("price")
            .and_then(parse_float)
            .ok_or(ValidationError::InvalidPrice)?;
        set.insert("price".into(), json!(price));
    }

    if is_truthy(set.get("stock")) {
        let stock = set
            .get("stock")
            .and_then(parse_int)
            .ok_or(ValidationError::InvalidStock)?;
        set.insert("stock".into(), json!(stock));
    }

    if set.is_empty() {
        return Err(ValidationError::NoUpdatableFields);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(v: Value) -> Document {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn create_parses_string_numbers() {
        let product = create(
            &body(json!({"name": "Lamp", "price": "149.99", "category": "Home", "stock": "15"})),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(product.price, 149.99);
        assert_eq!(product.stock, 15);
        assert_eq!(product.description, "");
        assert_eq!(product.image_url, "");
    }

    #[test]
    fn create_defaults_stock() {
        let now = Utc::now();
        let absent = create(&body(json!({"name": "A", "price": 1, "category": "c"})), now).unwrap();
        assert_eq!(absent.stock, 0);
        let garbage = create(
            &body(json!({"name": "A", "price": 1, "category": "c", "stock": "lots"})),
            now,
        )
        .unwrap();
        assert_eq!(garbage.stock, 0);
    }

    #[test]
    fn create_requires_name_price_category() {
        let now = Utc::now();
        for payload in [
            json!({"price": 1, "category": "c"}),
            json!({"name": "A", "category": "c"}),
            json!({"name": "A", "price": 1}),
            json!({"name": "A", "price": 0, "category": "c"}),
            json!({"name": 7, "price": 1, "category": "c"}),
        ] {
            assert_eq!(
                create(&body(payload), now).unwrap_err(),
                ValidationError::MissingProductFields
            );
        }
    }

    #[test]
    fn create_rejects_unparseable_price() {
        let err = create(&body(json!({"name": "A", "price": "free", "category": "c"})), Utc::now())
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidPrice);
    }

    #[test]
    fn create_keeps_negative_values() {
        let product = create(
            &body(json!({"name": "A", "price": -5, "category": "c", "stock": -2})),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(product.price, -5.0);
        assert_eq!(product.stock, -2);
    }

    #[test]
    fn update_drops_empty_values_and_reparses() {
        let set = update(&body(json!({
            "_id": "507f1f77bcf86cd799439011",
            "name": "",
            "description": null,
            "price": "20.5",
            "stock": "3",
            "category": "Kitchen"
        })))
        .unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set["price"], json!(20.5));
        assert_eq!(set["stock"], json!(3));
        assert_eq!(set["category"], json!("Kitchen"));
    }

    #[test]
    fn update_with_nothing_left_fails() {
        assert_eq!(
            update(&body(json!({"name": "", "imageUrl": null}))).unwrap_err(),
            ValidationError::NoUpdatableFields
        );
        assert_eq!(update(&Document::new()).unwrap_err(), ValidationError::NoUpdatableFields);
    }

    #[test]
    fn update_rejects_bad_numbers() {
        assert_eq!(update(&body(json!({"price": "abc"}))).unwrap_err(), ValidationError::InvalidPrice);
        assert_eq!(update(&body(json!({"stock": "many"}))).unwrap_err(), ValidationError::InvalidStock);
    }
}
