use napi::bindgen_prelude::*;
use quire_collections::{CollectionRegistry, EntryError, default_site_registry};
use quire_core::{FieldPath, ValidationError};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::types::FieldIssue;

/// Reads a registry passed from JS, falling back to the built-in site.
pub(crate) fn registry_from_js(registry: Option<JsonValue>) -> Result<CollectionRegistry> {
    match registry {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| Error::from_reason(format!("Invalid collection registry: {e}"))),
        None => Ok(default_site_registry()),
    }
}

pub(crate) fn validation_issues(err: &ValidationError) -> Vec<FieldIssue> {
    err.violations()
        .iter()
        .map(|violation| FieldIssue {
            path: violation.path.to_string(),
            message: violation.message(),
        })
        .collect()
}

/// Flattens a per-file error; non-schema failures become one root issue.
pub(crate) fn entry_issues(err: &EntryError) -> Vec<FieldIssue> {
    match err.validation() {
        Some(validation) => validation_issues(validation),
        None => vec![FieldIssue {
            path: FieldPath::root().to_string(),
            message: err.to_string(),
        }],
    }
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<JsonValue> {
    serde_json::to_value(value)
        .map_err(|e| Error::from_reason(format!("Failed to serialize entry: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_core::ViolationKind;

    #[test]
    fn flattens_violations_in_order() {
        let mut err = ValidationError::new();
        err.push("title", ViolationKind::Required);
        err.push(FieldPath::field("tags").index(1), ViolationKind::InvalidType {
            expected: "string",
            received: "number",
        });
        assert_eq!(
            validation_issues(&err),
            vec![
                FieldIssue {
                    path: "title".into(),
                    message: "Required".into(),
                },
                FieldIssue {
                    path: "tags[1]".into(),
                    message: "Expected string, received number".into(),
                },
            ]
        );
    }

    #[test]
    fn rejects_malformed_registry() {
        let err = registry_from_js(Some(serde_json::json!({"collections": 3}))).unwrap_err();
        assert!(err.reason.starts_with("Invalid collection registry"));
    }

    #[test]
    fn defaults_to_site_registry() {
        let registry = registry_from_js(None).unwrap();
        assert!(registry.contains("blog"));
        assert!(registry.contains("docs"));
    }
}
