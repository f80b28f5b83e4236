use std::collections::{BTreeMap, BTreeSet};

use openapiv3::{OpenAPI, ReferenceOr};

use super::error::NormalizeError;
use super::schema::Resolver;
use crate::ir::TypeDecl;

/// Collects `components.schemas` into named IR type declarations.
///
/// Entries must be defined inline; a `$ref` at the table root is rejected so
/// the type table can never chain through itself. The returned resolver
/// carries every declared name, including ones whose bodies appear later in
/// the table, so forward references between components work.
pub fn collect_component_schemas(
    doc: &OpenAPI,
) -> Result<(BTreeMap<String, TypeDecl>, Resolver), NormalizeError> {
    let schemas = doc.components.as_ref().map(|c| &c.schemas);

    let mut names = BTreeSet::new();
    if let Some(schemas) = schemas {
        for name in schemas.keys() {
            if name.trim().is_empty() {
                return Err(NormalizeError::EmptyComponentName);
            }
            names.insert(name.clone());
        }
    }
    let resolver = Resolver::new(names);

    let mut types = BTreeMap::new();
    if let Some(schemas) = schemas {
        for (name, schema_ref) in schemas {
            match schema_ref {
                ReferenceOr::Reference { .. } => {
                    return Err(NormalizeError::IndirectComponent { name: name.clone() })
                }
                ReferenceOr::Item(schema) => {
                    let location = format!("components.schemas.{name}");
                    let ty = resolver.schema_to_type(schema, &location)?;
                    types.insert(name.clone(), TypeDecl { name: name.clone(), ty });
                }
            }
        }
    }

    Ok((types, resolver))
}
