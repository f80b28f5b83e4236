use std::collections::BTreeSet;

use openapiv3::{AnySchema, ReferenceOr, Schema, SchemaKind, Type as SchemaType};

use super::error::NormalizeError;
use crate::ir::{Field, Scalar, Type, TypeKind, TypeRef};

const COMPONENT_REF_PREFIX: &str = "#/components/schemas/";

/// Resolves one OpenAPI schema node into an IR type reference, rejecting
/// everything outside the dual-target subset: combinators, open objects,
/// untyped nodes, non-string enums, and references that do not point at a
/// declared component schema.
///
/// The resolver carries the set of component names so reference closure
/// holds by construction: a `TypeRef::Named` can only be produced for a
/// name that keys the component table.
#[derive(Debug)]
pub struct Resolver {
    component_names: BTreeSet<String>,
}

impl Resolver {
    pub fn new(component_names: BTreeSet<String>) -> Self {
        Self { component_names }
    }

    pub fn resolve(
        &self,
        schema_ref: &ReferenceOr<Schema>,
        location: &str,
    ) -> Result<TypeRef, NormalizeError> {
        match schema_ref {
            ReferenceOr::Reference { reference } => self.resolve_reference(reference, location),
            ReferenceOr::Item(schema) => Ok(TypeRef::Inline(Box::new(
                self.schema_to_type(schema, location)?,
            ))),
        }
    }

    /// Same as [`Resolver::resolve`] for the boxed form openapiv3 uses on
    /// object properties and array items.
    pub fn resolve_boxed(
        &self,
        schema_ref: &ReferenceOr<Box<Schema>>,
        location: &str,
    ) -> Result<TypeRef, NormalizeError> {
        match schema_ref {
            ReferenceOr::Reference { reference } => self.resolve_reference(reference, location),
            ReferenceOr::Item(schema) => Ok(TypeRef::Inline(Box::new(
                self.schema_to_type(schema, location)?,
            ))),
        }
    }

    fn resolve_reference(
        &self,
        reference: &str,
        location: &str,
    ) -> Result<TypeRef, NormalizeError> {
        let name = reference
            .strip_prefix(COMPONENT_REF_PREFIX)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| NormalizeError::ForeignRef {
                location: location.to_string(),
                reference: reference.to_string(),
            })?;
        if !self.component_names.contains(name) {
            return Err(NormalizeError::DanglingRef {
                location: location.to_string(),
                name: name.to_string(),
            });
        }
        Ok(TypeRef::Named(name.to_string()))
    }

    pub fn schema_to_type(
        &self,
        schema: &Schema,
        location: &str,
    ) -> Result<Type, NormalizeError> {
        let kind = match &schema.schema_kind {
            SchemaKind::OneOf { .. } => return Err(combinator(location, "oneOf")),
            SchemaKind::AnyOf { .. } => return Err(combinator(location, "anyOf")),
            SchemaKind::AllOf { .. } => return Err(combinator(location, "allOf")),
            SchemaKind::Not { .. } => return Err(combinator(location, "not")),
            SchemaKind::Type(typed) => self.typed_schema(typed, location)?,
            SchemaKind::Any(any) => self.untyped_schema(any, location)?,
        };
        Ok(Type {
            kind,
            nullable: schema.schema_data.nullable,
        })
    }

    fn typed_schema(
        &self,
        typed: &SchemaType,
        location: &str,
    ) -> Result<TypeKind, NormalizeError> {
        match typed {
            SchemaType::String(string_type) => {
                if !string_type.enumeration.is_empty() {
                    let mut values = Vec::with_capacity(string_type.enumeration.len());
                    for value in &string_type.enumeration {
                        match value {
                            Some(value) => values.push(value.clone()),
                            // `enum: [a, null]` — null is not a string literal.
                            None => {
                                return Err(NormalizeError::NonStringEnum {
                                    location: location.to_string(),
                                })
                            }
                        }
                    }
                    return Ok(TypeKind::Enum(values));
                }
                Ok(TypeKind::Scalar(Scalar::String))
            }
            SchemaType::Number(number_type) => {
                if !number_type.enumeration.is_empty() {
                    return Err(NormalizeError::NonStringEnum {
                        location: location.to_string(),
                    });
                }
                Ok(TypeKind::Scalar(Scalar::Number))
            }
            SchemaType::Integer(integer_type) => {
                if !integer_type.enumeration.is_empty() {
                    return Err(NormalizeError::NonStringEnum {
                        location: location.to_string(),
                    });
                }
                Ok(TypeKind::Scalar(Scalar::Integer))
            }
            SchemaType::Boolean(_) => Ok(TypeKind::Scalar(Scalar::Boolean)),
            SchemaType::Array(array_type) => {
                let items = array_type
                    .items
                    .as_ref()
                    .ok_or_else(|| NormalizeError::MissingItems {
                        location: location.to_string(),
                    })?;
                let elem = self.resolve_boxed(items, &format!("{location}.items"))?;
                Ok(TypeKind::Array(Box::new(elem)))
            }
            SchemaType::Object(object_type) => {
                if object_type.additional_properties.is_some() {
                    return Err(NormalizeError::OpenObject {
                        location: location.to_string(),
                    });
                }
                let mut fields = Vec::with_capacity(object_type.properties.len());
                for (name, property) in &object_type.properties {
                    let ty = self
                        .resolve_boxed(property, &format!("{location}.properties.{name}"))?;
                    fields.push(Field {
                        name: name.clone(),
                        required: object_type.required.iter().any(|r| r == name),
                        ty,
                    });
                }
                Ok(TypeKind::Object(fields))
            }
        }
    }

    /// Nodes without a recognized `type` land here. A bare string enum is
    /// still accepted (enums may omit `type: string`); everything else is
    /// either a combinator smuggled past the typed variants or an
    /// implicitly/unsupportedly typed node.
    fn untyped_schema(
        &self,
        any: &AnySchema,
        location: &str,
    ) -> Result<TypeKind, NormalizeError> {
        if !any.one_of.is_empty() {
            return Err(combinator(location, "oneOf"));
        }
        if !any.any_of.is_empty() {
            return Err(combinator(location, "anyOf"));
        }
        if !any.all_of.is_empty() {
            return Err(combinator(location, "allOf"));
        }
        if any.not.is_some() {
            return Err(combinator(location, "not"));
        }
        if any.additional_properties.is_some() {
            return Err(NormalizeError::OpenObject {
                location: location.to_string(),
            });
        }
        if !any.enumeration.is_empty() {
            let mut values = Vec::with_capacity(any.enumeration.len());
            for value in &any.enumeration {
                match value.as_str() {
                    Some(value) => values.push(value.to_string()),
                    None => {
                        return Err(NormalizeError::NonStringEnum {
                            location: location.to_string(),
                        })
                    }
                }
            }
            return Ok(TypeKind::Enum(values));
        }
        match any.typ.as_deref() {
            Some(typ) => Err(NormalizeError::UnsupportedType {
                location: location.to_string(),
                typ: typ.to_string(),
            }),
            None => Err(NormalizeError::UntypedSchema {
                location: location.to_string(),
            }),
        }
    }
}

fn combinator(location: &str, keyword: &'static str) -> NormalizeError {
    NormalizeError::Combinator {
        location: location.to_string(),
        keyword,
    }
}
