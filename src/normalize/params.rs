use std::collections::BTreeSet;

use openapiv3::{
    Operation, Parameter, ParameterSchemaOrContent, PathItem, ReferenceOr,
};

use super::error::NormalizeError;
use super::schema::Resolver;
use crate::ir::Param;

/// Merges the path-item and operation parameter lists into (path, query)
/// IR parameters.
///
/// Operation-level declarations win on an `{in, name}` collision: the
/// operation list is walked first and the first occurrence of a key is
/// kept. Only path/query locations are accepted, path parameters are forced
/// required, and both result lists are name-sorted so downstream output is
/// reproducible.
pub fn collect_params(
    item: &PathItem,
    op: &Operation,
    resolver: &Resolver,
    op_location: &str,
) -> Result<(Vec<Param>, Vec<Param>), NormalizeError> {
    let mut seen: BTreeSet<(&'static str, String)> = BTreeSet::new();
    let mut path_params = Vec::new();
    let mut query_params = Vec::new();

    for param_ref in op.parameters.iter().chain(item.parameters.iter()) {
        let param = match param_ref {
            ReferenceOr::Reference { .. } => {
                return Err(NormalizeError::RefParam {
                    location: op_location.to_string(),
                })
            }
            ReferenceOr::Item(param) => param,
        };
        let data = param.parameter_data_ref();

        let name = data.name.trim().to_string();
        if name.is_empty() {
            return Err(NormalizeError::EmptyParamName {
                location: op_location.to_string(),
            });
        }

        let place = match param {
            Parameter::Path { .. } => "path",
            Parameter::Query { .. } => "query",
            Parameter::Header { .. } => "header",
            Parameter::Cookie { .. } => "cookie",
        };
        if place != "path" && place != "query" {
            return Err(NormalizeError::UnsupportedParamLocation {
                location: op_location.to_string(),
                name,
                place: place.to_string(),
            });
        }

        if !seen.insert((place, name.clone())) {
            continue;
        }

        let schema_ref = match &data.format {
            ParameterSchemaOrContent::Schema(schema_ref) => schema_ref,
            ParameterSchemaOrContent::Content(_) => {
                return Err(NormalizeError::ParamMissingSchema {
                    location: op_location.to_string(),
                    name,
                })
            }
        };

        let location = format!("{op_location} parameter {name:?}");
        let ty = resolver.resolve(schema_ref, &location)?;

        // Path parameters are required no matter what the source declared.
        let required = place == "path" || data.required;

        let param = Param { name, required, ty };
        if place == "path" {
            path_params.push(param);
        } else {
            query_params.push(param);
        }
    }

    path_params.sort_by(|a, b| a.name.cmp(&b.name));
    query_params.sort_by(|a, b| a.name.cmp(&b.name));

    Ok((path_params, query_params))
}
