use std::fmt;
use std::str::FromStr;

use bson::oid;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid object id: {0:?}")]
pub struct ObjectIdError(pub String);

/// Document identifier, rendered as 24 lowercase hex characters.
///
/// Wraps the BSON object id so that JSON carries the plain hex string rather
/// than the extended-JSON `{"$oid": ...}` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(oid::ObjectId);

impl ObjectId {
    pub fn new() -> Self {
        Self(oid::ObjectId::new())
    }

    /// Parse a 24-character hex string. Upper and lower case are both accepted.
    pub fn parse(s: &str) -> Result<Self, ObjectIdError> {
        oid::ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| ObjectIdError(s.to_string()))
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
