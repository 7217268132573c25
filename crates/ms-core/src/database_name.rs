//! Strongly-typed database and object names.

use crate::error::{CoreError, CoreResult};
use crate::newtype_string::define_validated_string;

fn is_valid_database_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

fn is_valid_object_name(name: &str) -> bool {
    !name.is_empty()
}

define_validated_string! {
    /// Name of a database (schema) on the server.
    ///
    /// Never empty and never contains whitespace. A name that breaks this rule
    /// points at a broken configuration, so callers treat it as fatal.
    pub struct DatabaseName;
    valid = is_valid_database_name;
    message = "database name must be non-empty and contain no whitespace";
}

define_validated_string! {
    /// Name of a table or trigger inside a database.
    pub struct ObjectName;
    valid = is_valid_object_name;
    message = "object name must not be empty";
}

impl DatabaseName {
    /// Validate a raw database segment, reporting the offending value.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        Self::try_new(raw).ok_or_else(|| CoreError::InvalidDatabaseName {
            name: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_name_plain() {
        let db = DatabaseName::parse("shop").unwrap();
        assert_eq!(db, "shop");
        assert_eq!(db.to_string(), "shop");
    }

    #[test]
    fn test_database_name_rejects_space() {
        let err = DatabaseName::parse("my shop").unwrap_err();
        assert!(matches!(err, CoreError::InvalidDatabaseName { ref name } if name == "my shop"));
    }

    #[test]
    fn test_database_name_rejects_tab_and_newline() {
        assert!(DatabaseName::try_new("a\tb").is_none());
        assert!(DatabaseName::try_new("a\nb").is_none());
    }

    #[test]
    fn test_database_name_rejects_empty() {
        assert!(DatabaseName::try_new("").is_none());
    }

    #[test]
    fn test_object_name_allows_anything_non_empty() {
        assert!(ObjectName::try_new("order items").is_some());
        assert!(ObjectName::try_new("").is_none());
    }

    #[test]
    fn test_database_name_deserialize_rejects_whitespace() {
        let result: Result<DatabaseName, _> = serde_yaml::from_str("\"bad name\"");
        assert!(result.is_err());
    }
}
