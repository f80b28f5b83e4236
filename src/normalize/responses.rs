use indexmap::IndexMap;
use openapiv3::{MediaType, Operation, ReferenceOr, Schema};

use super::error::NormalizeError;
use super::schema::Resolver;
use crate::ir::Success;

/// Normalizes the success response of an operation.
///
/// The response table must contain exactly the single status "200" (a
/// `default` entry counts against that), and the 200 response must carry
/// JSON content with a schema.
pub fn normalize_success(
    op: &Operation,
    resolver: &Resolver,
    op_location: &str,
) -> Result<Success, NormalizeError> {
    let mut found: Vec<String> = op.responses.responses.keys().map(|k| k.to_string()).collect();
    if op.responses.default.is_some() {
        found.push("default".to_string());
    }
    found.sort();
    if found != ["200"] {
        return Err(NormalizeError::ResponsesNot200 {
            location: op_location.to_string(),
            found: found.join(", "),
        });
    }

    let location = format!("{op_location} responses.200");
    let response = match op.responses.responses.values().next() {
        Some(ReferenceOr::Item(response)) => response,
        Some(ReferenceOr::Reference { .. }) => {
            return Err(NormalizeError::RefResponse { location })
        }
        None => {
            // Unreachable given the exact-200 check above.
            return Err(NormalizeError::ResponsesNot200 {
                location: op_location.to_string(),
                found: String::new(),
            });
        }
    };

    let Some((_, schema_ref)) = find_json_content(&response.content) else {
        return Err(NormalizeError::MissingJsonContent { location });
    };
    let ty = resolver.resolve(schema_ref, &location)?;

    Ok(Success {
        status: "200".to_string(),
        ty,
    })
}

/// Finds the first content entry whose media type is JSON, allowing
/// parameter suffixes such as `application/json; charset=utf-8`. Insertion
/// order decides ties, which is deterministic for a given document.
pub(crate) fn find_json_content(
    content: &IndexMap<String, MediaType>,
) -> Option<(&str, &ReferenceOr<Schema>)> {
    content.iter().find_map(|(media_type, value)| {
        let normalized = media_type.trim().to_ascii_lowercase();
        if normalized.starts_with("application/json") {
            value.schema.as_ref().map(|schema| (media_type.as_str(), schema))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn resolver() -> Resolver {
        Resolver::new(BTreeSet::from(["User".to_string()]))
    }

    fn operation(yaml: &str) -> Operation {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn exactly_200_accepted() {
        let op = operation(
            "operationId: getUser\nresponses:\n  \"200\":\n    description: ok\n    content:\n      application/json:\n        schema:\n          $ref: \"#/components/schemas/User\"\n",
        );
        let success = normalize_success(&op, &resolver(), "GET /users/{id}").unwrap();
        assert_eq!(success.status, "200");
    }

    #[test]
    fn charset_suffix_accepted() {
        let op = operation(
            "operationId: getUser\nresponses:\n  \"200\":\n    description: ok\n    content:\n      application/json; charset=utf-8:\n        schema:\n          type: string\n",
        );
        assert!(normalize_success(&op, &resolver(), "GET /u").is_ok());
    }

    #[test]
    fn extra_statuses_rejected() {
        let op = operation(
            "operationId: getUser\nresponses:\n  \"200\":\n    description: ok\n    content:\n      application/json:\n        schema:\n          type: string\n  \"404\":\n    description: nope\n",
        );
        let err = normalize_success(&op, &resolver(), "GET /u").unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::ResponsesNot200 { ref found, .. } if found == "200, 404"
        ));
    }

    #[test]
    fn default_response_rejected() {
        let op = operation(
            "operationId: getUser\nresponses:\n  \"200\":\n    description: ok\n    content:\n      application/json:\n        schema:\n          type: string\n  default:\n    description: fallback\n",
        );
        let err = normalize_success(&op, &resolver(), "GET /u").unwrap_err();
        assert!(matches!(err, NormalizeError::ResponsesNot200 { .. }));
    }

    #[test]
    fn non_json_content_rejected() {
        let op = operation(
            "operationId: getUser\nresponses:\n  \"200\":\n    description: ok\n    content:\n      text/plain:\n        schema:\n          type: string\n",
        );
        let err = normalize_success(&op, &resolver(), "GET /u").unwrap_err();
        assert!(matches!(err, NormalizeError::MissingJsonContent { .. }));
    }
}
