//! Request entities: named values placed either in the headers or in the
//! query string of an outgoing request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where an entity ends up on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestEntityType {
    Parameter,
    Header,
}

impl fmt::Display for RestEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestEntityType::Parameter => write!(f, "PARAMETER"),
            RestEntityType::Header => write!(f, "HEADER"),
        }
    }
}

/// A `(name, value)` pair tagged as header or query parameter.
///
/// Values are stored in their string form, so anything `Display` can be
/// passed: strings, integers, floats, booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestEntity {
    kind: RestEntityType,
    name: String,
    value: String,
}

impl RestEntity {
    pub fn new(kind: RestEntityType, name: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            kind,
            name: name.into(),
            value: value.to_string(),
        }
    }

    /// A query parameter entity.
    pub fn parameter(name: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(RestEntityType::Parameter, name, value)
    }

    /// A header entity.
    pub fn header(name: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(RestEntityType::Header, name, value)
    }

    pub fn kind(&self) -> RestEntityType {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_header(&self) -> bool {
        self.kind == RestEntityType::Header
    }
}

/// Entities of one kind, in their original order.
pub fn by_type(entities: &[RestEntity], kind: RestEntityType) -> Vec<&RestEntity> {
    entities.iter().filter(|e| e.kind == kind).collect()
}

/// Entities split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedRestEntity<'a> {
    pub headers: Vec<&'a RestEntity>,
    pub parameters: Vec<&'a RestEntity>,
}

impl<'a> TypedRestEntity<'a> {
    pub fn from_entities(entities: &'a [RestEntity]) -> Self {
        Self {
            headers: by_type(entities, RestEntityType::Header),
            parameters: by_type(entities, RestEntityType::Parameter),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.parameters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_tag_and_stringify() {
        let limit = RestEntity::parameter("limit", 25);
        assert_eq!(limit.kind(), RestEntityType::Parameter);
        assert_eq!(limit.name(), "limit");
        assert_eq!(limit.value(), "25");

        let flag = RestEntity::header("X-Debug", true);
        assert!(flag.is_header());
        assert_eq!(flag.value(), "true");

        assert_eq!(RestEntity::parameter("ratio", 0.5).value(), "0.5");
        assert_eq!(RestEntity::parameter("scale", 2.5f32).value(), "2.5");
    }

    #[test]
    fn split_keeps_order_within_each_kind() {
        let entities = vec![
            RestEntity::header("Accept", "application/json"),
            RestEntity::parameter("page", 1),
            RestEntity::header("X-Trace", "abc"),
            RestEntity::parameter("page", 2),
        ];
        let typed = TypedRestEntity::from_entities(&entities);

        let headers: Vec<_> = typed.headers.iter().map(|e| e.name()).collect();
        assert_eq!(headers, ["Accept", "X-Trace"]);
        let pages: Vec<_> = typed.parameters.iter().map(|e| e.value()).collect();
        assert_eq!(pages, ["1", "2"]);
    }

    #[test]
    fn no_entities_yield_empty_lists() {
        let typed = TypedRestEntity::from_entities(&[]);
        assert!(typed.headers.is_empty());
        assert!(typed.parameters.is_empty());
        assert!(typed.is_empty());
    }

    #[test]
    fn kind_renders_in_upper_case() {
        assert_eq!(RestEntityType::Header.to_string(), "HEADER");
        assert_eq!(
            serde_json::to_string(&RestEntityType::Parameter).unwrap(),
            r#""PARAMETER""#
        );
    }
}
