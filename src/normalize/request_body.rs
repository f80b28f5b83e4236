use openapiv3::{Operation, ReferenceOr};

use super::error::NormalizeError;
use super::responses::find_json_content;
use super::schema::Resolver;
use crate::ir::Body;

/// Normalizes a POST request body, if the operation declares one.
///
/// The first JSON-prefixed content entry wins; a declared body without JSON
/// content (or without a schema under it) is a shape error. Absence of a
/// body is fine — POST bodies are optional.
pub fn normalize_request_body(
    op: &Operation,
    resolver: &Resolver,
    op_location: &str,
) -> Result<Option<Body>, NormalizeError> {
    let Some(body_ref) = &op.request_body else {
        return Ok(None);
    };
    let body = match body_ref {
        ReferenceOr::Reference { .. } => {
            return Err(NormalizeError::RefRequestBody {
                location: op_location.to_string(),
            })
        }
        ReferenceOr::Item(body) => body,
    };

    let location = format!("{op_location} requestBody");
    let Some((_, schema_ref)) = find_json_content(&body.content) else {
        return Err(NormalizeError::MissingJsonContent { location });
    };
    let ty = resolver.resolve(schema_ref, &location)?;

    Ok(Some(Body {
        required: body.required,
        ty,
    }))
}
