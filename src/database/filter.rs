use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::object_id::ObjectId;

/// A stored document: a JSON object whose `_id` key holds the 24-hex identifier.
pub type Document = Map<String, Value>;

/// Key under which every document carries its identifier.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "$eq")]
    Eq,
    #[serde(rename = "$ne")]
    Ne,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

/// Conjunction of top-level field conditions. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: ObjectId) -> Self {
        Self::new().eq(ID_FIELD, id.to_hex())
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition {
            field: field.into(),
            op: FilterOp::Eq,
            value: value.into(),
        });
        self
    }

    pub fn ne(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition {
            field: field.into(),
            op: FilterOp::Ne,
            value: value.into(),
        });
        self
    }

    /// Evaluate the filter against a document. A missing field compares equal to `null`.
    pub fn matches(&self, doc: &Document) -> bool {
        self.conditions.iter().all(|c| {
            let actual = doc.get(&c.field).unwrap_or(&Value::Null);
            let equal = values_equal(actual, &c.value);
            match c.op {
                FilterOp::Eq => equal,
                FilterOp::Ne => !equal,
            }
        })
    }
}

/// JSON equality that treats `2` and `2.0` as the same number.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> Document {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::new().matches(&doc(json!({"a": 1}))));
        assert!(Filter::new().matches(&Document::new()));
    }

    #[test]
    fn eq_and_ne_combine_as_conjunction() {
        let d = doc(json!({"_id": "aaaaaaaaaaaaaaaaaaaaaaaa", "email": "a@b.com"}));
        let same_email_other_user = Filter::new()
            .eq("email", "a@b.com")
            .ne("_id", "aaaaaaaaaaaaaaaaaaaaaaaa");
        assert!(!same_email_other_user.matches(&d));
        assert!(Filter::new().eq("email", "a@b.com").matches(&d));
    }

    #[test]
    fn missing_field_never_equals_a_value() {
        let d = doc(json!({"name": "x"}));
        assert!(!Filter::new().eq("userId", "u1").matches(&d));
        assert!(Filter::new().ne("userId", "u1").matches(&d));
    }

    #[test]
    fn numbers_compare_by_value() {
        let d = doc(json!({"quantity": 2.0}));
        assert!(Filter::new().eq("quantity", 2).matches(&d));
    }
}
