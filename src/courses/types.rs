//! Course record types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary key of a course, assigned by the repository when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub u64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CourseId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(CourseId)
    }
}

/// A stored course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub coursename: String,
}

/// Request body for creating or replacing a course.
///
/// Without an `id` the repository assigns a fresh one; with an `id` the
/// record under that key is inserted or overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CourseId>,
    pub coursename: String,
}

impl CoursePayload {
    /// Payload for a new course with a repository-assigned id.
    pub fn named(coursename: impl Into<String>) -> Self {
        Self {
            id: None,
            coursename: coursename.into(),
        }
    }

    /// Payload that targets a specific id.
    pub fn with_id(id: u64, coursename: impl Into<String>) -> Self {
        Self {
            id: Some(CourseId(id)),
            coursename: coursename.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_json_shape() {
        let course = Course {
            id: CourseId(7),
            coursename: "Algebra".to_string(),
        };
        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "coursename": "Algebra"}));
    }

    #[test]
    fn test_payload_id_is_optional() {
        let payload: CoursePayload = serde_json::from_str(r#"{"coursename":"Algebra"}"#).unwrap();
        assert_eq!(payload, CoursePayload::named("Algebra"));

        let payload: CoursePayload =
            serde_json::from_str(r#"{"id":42,"coursename":"Geometry"}"#).unwrap();
        assert_eq!(payload.id, Some(CourseId(42)));
    }

    #[test]
    fn test_course_id_parse() {
        assert_eq!("42".parse::<CourseId>().unwrap(), CourseId(42));
        assert!("forty-two".parse::<CourseId>().is_err());
        assert!("-1".parse::<CourseId>().is_err());
    }
}
