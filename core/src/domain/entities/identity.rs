//! Identity claim embedded in every token.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ClaimError;

/// Field holding the user identifier
pub const USER_ID_FIELD: &str = "userId";

/// Registered JWT claim names; an identity claim may not shadow them
pub const RESERVED_CLAIMS: [&str; 8] = ["iss", "aud", "sub", "exp", "nbf", "iat", "jti", "typ"];

/// Opaque set of fields identifying the token holder.
///
/// Always carries a non-empty string `userId`. Other fields are free-form
/// JSON and round-trip through a token unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct IdentityClaim(Map<String, Value>);

impl IdentityClaim {
    /// Build a claim from an arbitrary JSON object
    pub fn new(fields: Map<String, Value>) -> Result<Self, ClaimError> {
        if let Some(field) = fields.keys().find(|k| RESERVED_CLAIMS.contains(&k.as_str())) {
            return Err(ClaimError::ReservedField {
                field: field.clone(),
            });
        }
        match fields.get(USER_ID_FIELD) {
            Some(Value::String(id)) if !id.trim().is_empty() => Ok(Self(fields)),
            _ => Err(ClaimError::MissingUserId),
        }
    }

    /// Claim holding only `userId`
    pub fn for_user(user_id: impl Into<String>) -> Result<Self, ClaimError> {
        let mut fields = Map::new();
        fields.insert(USER_ID_FIELD.to_string(), Value::String(user_id.into()));
        Self::new(fields)
    }

    /// Parse a claim from a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self, ClaimError> {
        match value {
            Value::Object(fields) => Self::new(fields),
            _ => Err(ClaimError::NotAnObject),
        }
    }

    /// Add a field
    pub fn with_field(self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self, ClaimError> {
        let mut fields = self.0;
        fields.insert(key.into(), value.into());
        Self::new(fields)
    }

    pub fn user_id(&self) -> &str {
        self.0
            .get(USER_ID_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl TryFrom<Map<String, Value>> for IdentityClaim {
    type Error = ClaimError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

impl From<IdentityClaim> for Map<String, Value> {
    fn from(claim: IdentityClaim) -> Self {
        claim.0
    }
}

impl From<IdentityClaim> for Value {
    fn from(claim: IdentityClaim) -> Self {
        Value::Object(claim.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_for_user() {
        let claim = IdentityClaim::for_user("u1").unwrap();
        assert_eq!(claim.user_id(), "u1");
        assert_eq!(Value::from(claim), json!({"userId": "u1"}));
    }

    #[test]
    fn test_user_id_is_required() {
        assert_eq!(IdentityClaim::for_user("  "), Err(ClaimError::MissingUserId));
        assert_eq!(
            IdentityClaim::from_value(json!({"role": "editor"})),
            Err(ClaimError::MissingUserId)
        );
        assert_eq!(
            IdentityClaim::from_value(json!({"userId": 42})),
            Err(ClaimError::MissingUserId)
        );
        assert_eq!(
            IdentityClaim::from_value(json!(["u1"])),
            Err(ClaimError::NotAnObject)
        );
    }

    #[test]
    fn test_reserved_fields_rejected() {
        let result = IdentityClaim::from_value(json!({"userId": "u1", "exp": 0}));
        assert_eq!(
            result,
            Err(ClaimError::ReservedField {
                field: "exp".to_string()
            })
        );

        let result = IdentityClaim::for_user("u1").unwrap().with_field("typ", "refresh");
        assert!(matches!(result, Err(ClaimError::ReservedField { .. })));
    }

    #[test]
    fn test_extra_fields_survive_serde() {
        let claim = IdentityClaim::for_user("u1")
            .unwrap()
            .with_field("role", "admin")
            .unwrap()
            .with_field("blogs", json!([1, 2, 3]))
            .unwrap();

        let json = serde_json::to_string(&claim).unwrap();
        let back: IdentityClaim = serde_json::from_str(&json).unwrap();
        assert_eq!(back, claim);
        assert_eq!(back.get("role"), Some(&json!("admin")));
    }

    #[test]
    fn test_deserialize_validates() {
        let result: Result<IdentityClaim, _> = serde_json::from_str(r#"{"name":"x"}"#);
        assert!(result.is_err());
    }
}
