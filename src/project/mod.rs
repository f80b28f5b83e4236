//! Shared type-projection core.
//!
//! Both target backends render IR types through one walk; a [`Dialect`]
//! supplies the per-target syntax for scalars, arrays, enums, inline
//! objects, nullable wrapping, and optional-slot wrapping. Keeping the walk
//! in one place means required/optional and nullable/non-nullable semantics
//! cannot drift between backends.
//!
//! The two optionality axes stay distinguishable in every rendering: the Go
//! dialect carries the required-nullable vs optional-non-null distinction in
//! the struct tag (`,omitempty` only on optional fields), the TypeScript
//! dialect in `?` vs `| null`.

pub mod golang;
pub mod typescript;

use anyhow::Result;

use crate::ir::{Scalar, Type, TypeKind, TypeRef};

/// One object field after its type has been rendered, before the dialect
/// assembles the surrounding object syntax.
#[derive(Debug, Clone)]
pub struct ProjectedField {
    pub name: String,
    pub optional: bool,
    pub ty: String,
}

/// Per-target rendering strategy. `named` and `object` are fallible because
/// they sanitize source names, and an unsanitizable name is an error, never
/// a silent fallback.
pub trait Dialect {
    fn scalar(&self, scalar: Scalar) -> &'static str;
    /// Renders a reference to a named declaration.
    fn named(&self, name: &str) -> Result<String>;
    fn array(&self, elem: String) -> String;
    fn enumeration(&self, values: &[String]) -> String;
    fn object(&self, fields: &[ProjectedField]) -> Result<String>;
    /// Wraps a type whose value may be null.
    fn nullable(&self, base: String) -> String;
    /// Wraps a type sitting in a slot that may be absent.
    fn optional(&self, base: String) -> String;
}

/// Walks IR types and renders them through a dialect.
pub struct Projector<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> Projector<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Projects a type reference occupying a slot. `required = false` slots
    /// get the dialect's optional wrapping on top of the base rendering.
    pub fn type_ref(&self, type_ref: &TypeRef, required: bool) -> Result<String> {
        let base = match type_ref {
            TypeRef::Named(name) => self.dialect.named(name)?,
            TypeRef::Inline(ty) => self.ty(ty)?,
        };
        Ok(if required {
            base
        } else {
            self.dialect.optional(base)
        })
    }

    /// Projects an inline type, applying nullable wrapping last so it sits
    /// outermost in the rendering.
    pub fn ty(&self, ty: &Type) -> Result<String> {
        let base = match &ty.kind {
            TypeKind::Scalar(scalar) => self.dialect.scalar(*scalar).to_string(),
            TypeKind::Enum(values) => self.dialect.enumeration(values),
            TypeKind::Array(elem) => {
                let rendered = self.type_ref(elem, true)?;
                self.dialect.array(rendered)
            }
            TypeKind::Object(fields) => {
                let mut projected = Vec::with_capacity(fields.len());
                for field in fields {
                    projected.push(ProjectedField {
                        name: field.name.clone(),
                        optional: !field.required,
                        ty: self.type_ref(&field.ty, field.required)?,
                    });
                }
                self.dialect.object(&projected)?
            }
        };
        Ok(if ty.nullable {
            self.dialect.nullable(base)
        } else {
            base
        })
    }
}
