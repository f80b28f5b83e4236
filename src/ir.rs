use serde::Serialize;
use std::collections::BTreeMap;

/// Grouping key used when an operation declares no tags, or when its first
/// tag sanitizes to nothing usable.
pub const DEFAULT_TAG: &str = "Default";

/// Canonical intermediate representation built once per run by
/// `normalize::to_ir` and consumed read-only by every projection.
///
/// Determinism contract: `types` iterates lexicographically (BTreeMap) and
/// `routes` is sorted by `(tag, name)`, so downstream output is
/// byte-reproducible for an unchanged document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spec {
    pub meta: Meta,
    pub types: BTreeMap<String, TypeDecl>,
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meta {
    pub base_url: String,
}

/// A named type from `components.schemas`. Created once, immutable after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDecl {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Type {
    pub kind: TypeKind,
    /// The value itself may be null, independent of whether the slot
    /// holding it is optional.
    pub nullable: bool,
}

/// Closed sum over the accepted schema shapes. Exhaustive matching at every
/// projection and validation site is the point; do not add a catch-all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum TypeKind {
    Scalar(Scalar),
    /// Non-empty; order preserves the source declaration, never sorted.
    Enum(Vec<String>),
    Array(Box<TypeRef>),
    /// Field order = source property order, never sorted.
    Object(Vec<Field>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scalar {
    String,
    Number,
    Integer,
    Boolean,
}

impl Scalar {
    pub fn as_str(self) -> &'static str {
        match self {
            Scalar::String => "string",
            Scalar::Number => "number",
            Scalar::Integer => "integer",
            Scalar::Boolean => "boolean",
        }
    }
}

/// Either a reference to a named declaration in `Spec::types` or an inline
/// anonymous type. Every `Named` value is guaranteed by the normalizer to
/// key an entry in the type map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeRef {
    Named(String),
    Inline(Box<Type>),
}

/// `required = false` means the key may be absent; orthogonal to the type's
/// own `nullable`. Both may hold at once and must survive projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub required: bool,
    pub ty: TypeRef,
}

/// One accepted operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// The operationId; globally unique across the document.
    pub name: String,
    /// Sanitized grouping key; [`DEFAULT_TAG`] when the source had none.
    pub tag: String,
    pub method: Method,
    /// URL template with `{param}` placeholders.
    pub path: String,
    pub path_params: Vec<Param>,
    pub query_params: Vec<Param>,
    /// Only ever set for POST.
    pub request_body: Option<Body>,
    pub success: Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Path parameters always carry `required = true`, whatever the source said.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub required: bool,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    pub required: bool,
    pub ty: TypeRef,
}

/// The single accepted response; `status` is always "200".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Success {
    pub status: String,
    pub ty: TypeRef,
}
