use anyhow::{bail, Result};
use serde::Serialize;

use super::{Dialect, ProjectedField, Projector};
use crate::ident::public_ident;
use crate::ir::{Route, Scalar, Spec, TypeDecl, TypeKind, TypeRef};

/// Go rendering strategy.
///
/// Optional slots and nullable values both become pointers, never doubled.
/// An optional slice stays a bare slice (nil already encodes absence), but
/// a nullable slice gets a pointer: nil-slice and explicit null are
/// different wire values. The required/nullable distinction on non-slice
/// fields survives in the struct tag: only optional fields carry
/// `,omitempty`.
pub struct GoDialect;

impl Dialect for GoDialect {
    fn scalar(&self, scalar: Scalar) -> &'static str {
        match scalar {
            Scalar::String => "string",
            Scalar::Number => "float64",
            Scalar::Integer => "int64",
            Scalar::Boolean => "bool",
        }
    }

    fn named(&self, name: &str) -> Result<String> {
        let ident = public_ident(name);
        if ident.is_empty() {
            bail!("type name {name:?} does not sanitize to a Go identifier");
        }
        Ok(ident)
    }

    fn array(&self, elem: String) -> String {
        format!("[]{elem}")
    }

    fn enumeration(&self, _values: &[String]) -> String {
        // Inline enums degrade to their backing scalar; named enums get a
        // declared type of their own in the server model.
        "string".to_string()
    }

    fn object(&self, fields: &[ProjectedField]) -> Result<String> {
        let mut out = String::from("struct {\n");
        for field in fields {
            let name = public_ident(&field.name);
            if name.is_empty() {
                bail!("field name {:?} does not sanitize to a Go identifier", field.name);
            }
            out.push('\t');
            out.push_str(&name);
            out.push(' ');
            out.push_str(&field.ty);
            out.push(' ');
            out.push_str(&json_tag(&field.name, !field.optional));
            out.push('\n');
        }
        out.push('}');
        Ok(out)
    }

    fn nullable(&self, base: String) -> String {
        if base.starts_with('*') {
            base
        } else {
            format!("*{base}")
        }
    }

    fn optional(&self, base: String) -> String {
        pointer(base)
    }
}

fn pointer(base: String) -> String {
    if base.starts_with('*') || base.starts_with("[]") {
        base
    } else {
        format!("*{base}")
    }
}

fn json_tag(json_name: &str, required: bool) -> String {
    if required {
        format!("`json:\"{json_name}\"`")
    } else {
        format!("`json:\"{json_name},omitempty\"`")
    }
}

/// Template data for the generated Go server file. Built purely from the
/// IR; the template layer must not re-derive any semantics.
#[derive(Debug, Clone, Serialize)]
pub struct GoServerModel {
    pub package: String,
    pub base_url: String,
    pub types: Vec<GoTypeDecl>,
    pub tags: Vec<GoTagGroup>,
    /// True when any query field parses as a non-string kind, which is the
    /// only thing that pulls `strconv` into the generated imports.
    pub needs_strconv: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoTypeDecl {
    pub name: String,
    /// "struct" | "enum" | "alias"
    pub kind: String,
    pub struct_fields: Vec<GoField>,
    pub enum_values: Vec<GoEnumValue>,
    pub alias: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoEnumValue {
    /// Exported constant name, e.g. `StatusInProgress`.
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoField {
    pub name: String,
    pub json_name: String,
    pub ty: String,
    pub tag: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoTagGroup {
    pub name: String,
    pub routes: Vec<GoRoute>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoRoute {
    /// The operationId as declared.
    pub name: String,
    /// Exported form of the operationId, used for type and method names.
    pub op_name: String,
    pub method: String,
    pub path: String,
    pub tag_name: String,

    pub path_type: String,
    pub query_type: String,
    pub body_type: String,
    pub resp_type: String,

    pub has_path: bool,
    pub has_query: bool,
    pub has_body: bool,

    /// Local type declarations are only generated for inline schemas;
    /// `$ref` bodies/responses reuse the named declaration.
    pub body_inline: bool,
    pub resp_inline: bool,
    pub body_literal: String,
    pub resp_literal: String,

    pub path_fields: Vec<GoField>,
    pub query_fields: Vec<GoQueryField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoQueryField {
    pub name: String,
    pub json_name: String,
    pub ty: String,
    /// `ty` stripped of its pointer, used to convert the parsed raw value.
    pub elem_ty: String,
    pub tag: String,
    pub required: bool,
    /// How the raw query string value parses: string|int64|float64|bool.
    pub parse_kind: String,
    pub is_pointer: bool,
}

pub fn build_server_model(spec: &Spec, package: &str) -> Result<GoServerModel> {
    let package = if package.is_empty() { "server" } else { package };
    let projector = Projector::new(&GoDialect);

    let mut types = Vec::with_capacity(spec.types.len());
    for decl in spec.types.values() {
        types.push(build_type_decl(&projector, decl)?);
    }

    let tags = build_tag_groups(spec, &projector)?;
    let needs_strconv = tags
        .iter()
        .flat_map(|t| &t.routes)
        .flat_map(|r| &r.query_fields)
        .any(|f| f.parse_kind != "string");

    Ok(GoServerModel {
        package: package.to_string(),
        base_url: spec.meta.base_url.clone(),
        types,
        tags,
        needs_strconv,
    })
}

fn build_type_decl(projector: &Projector<'_>, decl: &TypeDecl) -> Result<GoTypeDecl> {
    let name = GoDialect.named(&decl.name)?;

    match &decl.ty.kind {
        TypeKind::Object(fields) => {
            let mut struct_fields = Vec::with_capacity(fields.len());
            for field in fields {
                let field_name = public_ident(&field.name);
                if field_name.is_empty() {
                    bail!(
                        "field name {:?} on type {:?} does not sanitize to a Go identifier",
                        field.name,
                        decl.name
                    );
                }
                struct_fields.push(GoField {
                    name: field_name,
                    json_name: field.name.clone(),
                    ty: projector.type_ref(&field.ty, field.required)?,
                    tag: json_tag(&field.name, field.required),
                });
            }
            Ok(GoTypeDecl {
                name,
                kind: "struct".to_string(),
                struct_fields,
                enum_values: vec![],
                alias: String::new(),
            })
        }
        TypeKind::Enum(values) => {
            let mut enum_values = Vec::with_capacity(values.len());
            for value in values {
                let suffix = public_ident(value);
                if suffix.is_empty() {
                    bail!(
                        "enum value {value:?} on type {:?} cannot be named as a Go constant",
                        decl.name
                    );
                }
                enum_values.push(GoEnumValue {
                    name: format!("{name}{suffix}"),
                    value: value.clone(),
                });
            }
            Ok(GoTypeDecl {
                name,
                kind: "enum".to_string(),
                struct_fields: vec![],
                enum_values,
                alias: String::new(),
            })
        }
        TypeKind::Scalar(_) | TypeKind::Array(_) => Ok(GoTypeDecl {
            name,
            kind: "alias".to_string(),
            struct_fields: vec![],
            enum_values: vec![],
            alias: projector.ty(&decl.ty)?,
        }),
    }
}

fn build_tag_groups(spec: &Spec, projector: &Projector<'_>) -> Result<Vec<GoTagGroup>> {
    // Routes arrive sorted by (tag, name), so groups are contiguous.
    let mut groups: Vec<GoTagGroup> = Vec::new();
    for route in &spec.routes {
        let go_route = build_route(spec, projector, route)?;
        match groups.last_mut() {
            Some(group) if group.name == route.tag => group.routes.push(go_route),
            _ => groups.push(GoTagGroup {
                name: route.tag.clone(),
                routes: vec![go_route],
            }),
        }
    }
    Ok(groups)
}

fn build_route(spec: &Spec, projector: &Projector<'_>, route: &Route) -> Result<GoRoute> {
    let op_name = public_ident(&route.name);
    if op_name.is_empty() {
        bail!("operationId {:?} does not sanitize to a Go identifier", route.name);
    }

    let has_path = !route.path_params.is_empty();
    let has_query = !route.query_params.is_empty();
    let has_body = route.request_body.is_some();

    let path_type = if has_path { format!("{op_name}Path") } else { String::new() };
    let query_type = if has_query { format!("{op_name}Query") } else { String::new() };

    let mut body_type = String::new();
    let mut body_inline = false;
    let mut body_literal = String::new();
    if let Some(body) = &route.request_body {
        match &body.ty {
            TypeRef::Named(name) => body_type = GoDialect.named(name)?,
            TypeRef::Inline(ty) => {
                body_type = format!("{op_name}Body");
                body_inline = true;
                body_literal = projector.ty(ty)?;
            }
        }
    }

    // "Result" rather than "Response" to avoid colliding with net/http names.
    let (resp_type, resp_inline, resp_literal) = match &route.success.ty {
        TypeRef::Named(name) => (GoDialect.named(name)?, false, String::new()),
        TypeRef::Inline(ty) => (format!("{op_name}Result"), true, projector.ty(ty)?),
    };

    let mut path_fields = Vec::with_capacity(route.path_params.len());
    for param in &route.path_params {
        let field_name = public_ident(&param.name);
        if field_name.is_empty() {
            bail!(
                "{}: path parameter {:?} does not sanitize to a Go identifier",
                route.name,
                param.name
            );
        }
        path_fields.push(GoField {
            name: field_name,
            json_name: param.name.clone(),
            // Path segments arrive as raw strings; handlers convert as needed.
            ty: "string".to_string(),
            tag: String::new(),
        });
    }

    let mut query_fields = Vec::with_capacity(route.query_params.len());
    for param in &route.query_params {
        let field_name = public_ident(&param.name);
        if field_name.is_empty() {
            bail!(
                "{}: query parameter {:?} does not sanitize to a Go identifier",
                route.name,
                param.name
            );
        }
        let Some(scalar) = query_scalar_kind(&param.ty, spec) else {
            bail!(
                "{}: query parameter {:?} must be a scalar or enum type",
                route.name,
                param.name
            );
        };
        let ty = projector.type_ref(&param.ty, param.required)?;
        let is_pointer = ty.starts_with('*');
        query_fields.push(GoQueryField {
            name: field_name,
            json_name: param.name.clone(),
            elem_ty: ty.trim_start_matches('*').to_string(),
            is_pointer,
            tag: json_tag(&param.name, param.required),
            required: param.required,
            parse_kind: parse_kind(scalar).to_string(),
            ty,
        });
    }

    Ok(GoRoute {
        name: route.name.clone(),
        op_name,
        method: route.method.as_str().to_string(),
        path: route.path.clone(),
        tag_name: route.tag.clone(),
        path_type,
        query_type,
        body_type,
        resp_type,
        has_path,
        has_query,
        has_body,
        body_inline,
        resp_inline,
        body_literal,
        resp_literal,
        path_fields,
        query_fields,
    })
}

/// Effective scalar kind of a query parameter, chasing one level of naming.
/// Enums deliberately resolve to string here: the query layer parses the
/// raw value and the handler narrows it.
fn query_scalar_kind(type_ref: &TypeRef, spec: &Spec) -> Option<Scalar> {
    let kind = match type_ref {
        TypeRef::Inline(ty) => &ty.kind,
        TypeRef::Named(name) => &spec.types.get(name)?.ty.kind,
    };
    match kind {
        TypeKind::Scalar(scalar) => Some(*scalar),
        TypeKind::Enum(_) => Some(Scalar::String),
        TypeKind::Array(_) | TypeKind::Object(_) => None,
    }
}

fn parse_kind(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::String => "string",
        Scalar::Integer => "int64",
        Scalar::Number => "float64",
        Scalar::Boolean => "bool",
    }
}
