//! Strongly-typed identifier value objects.
//!
//! Schools, plans, and users are all identified by opaque strings issued by
//! external systems (the school database and the identity provider), so these
//! identifiers validate non-emptiness rather than any particular format.
//! Provider-issued handles (order ids, payment ids, subscription ids) stay
//! plain `String`s at the port boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Identifier of a school whose subscription is being managed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolId(String);

impl SchoolId {
    /// Creates a new SchoolId, returning an error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("school_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a subscription plan (e.g. "basic", "pro").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(String);

impl PlanId {
    /// Creates a new PlanId, returning an error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("plan_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning an error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn school_id_accepts_non_empty_string() {
        let id = SchoolId::new("school-42").unwrap();
        assert_eq!(id.as_str(), "school-42");
    }

    #[test]
    fn school_id_rejects_empty_string() {
        let result = SchoolId::new("");
        match result {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "school_id"),
            other => panic!("Expected EmptyField error, got {:?}", other),
        }
    }

    #[test]
    fn school_id_serializes_transparently() {
        let id = SchoolId::new("school-42").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"school-42\"");
    }

    #[test]
    fn plan_id_accepts_non_empty_string() {
        let id = PlanId::new("basic").unwrap();
        assert_eq!(id.as_str(), "basic");
    }

    #[test]
    fn plan_id_rejects_empty_string() {
        let result = PlanId::new("");
        match result {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "plan_id"),
            other => panic!("Expected EmptyField error, got {:?}", other),
        }
    }

    #[test]
    fn user_id_accepts_non_empty_string() {
        let id = UserId::new("user-123").unwrap();
        assert_eq!(id.as_str(), "user-123");
    }

    #[test]
    fn user_id_rejects_empty_string() {
        let result = UserId::new("");
        match result {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "user_id"),
            other => panic!("Expected EmptyField error, got {:?}", other),
        }
    }

    #[test]
    fn user_id_displays_correctly() {
        let id = UserId::new("user-456").unwrap();
        assert_eq!(format!("{}", id), "user-456");
    }

    #[test]
    fn ids_deserialize_from_plain_strings() {
        let school: SchoolId = serde_json::from_str("\"school-1\"").unwrap();
        let plan: PlanId = serde_json::from_str("\"pro\"").unwrap();
        assert_eq!(school.as_str(), "school-1");
        assert_eq!(plan.as_str(), "pro");
    }
}
