use anyhow::{bail, Result};
use serde::Serialize;

use super::{Dialect, ProjectedField, Projector};
use crate::ident::safe_ident;
use crate::ir::{Param, Route, Scalar, Spec, TypeDecl, TypeKind};

/// TypeScript rendering strategy.
///
/// Nullable values become `T | null`; slot optionality is expressed by the
/// container's `?` marker, never folded into the type expression. Enums
/// render as closed literal unions, never as plain `string`.
pub struct TsDialect {
    /// Prefix for named references: "" inside the types file, "T." inside
    /// the client file (which imports the types module as `T`).
    ref_prefix: &'static str,
}

impl TsDialect {
    pub fn types_file() -> Self {
        Self { ref_prefix: "" }
    }

    pub fn client_file() -> Self {
        Self { ref_prefix: "T." }
    }
}

impl Dialect for TsDialect {
    fn scalar(&self, scalar: Scalar) -> &'static str {
        match scalar {
            Scalar::String => "string",
            Scalar::Number | Scalar::Integer => "number",
            Scalar::Boolean => "boolean",
        }
    }

    fn named(&self, name: &str) -> Result<String> {
        let ident = safe_ident(name);
        if ident.is_empty() {
            bail!("type name {name:?} does not sanitize to a TypeScript identifier");
        }
        Ok(format!("{}{}", self.ref_prefix, ident))
    }

    fn array(&self, elem: String) -> String {
        // Union elements need parentheses: `(string | null)[]`.
        if elem.contains(' ') {
            format!("({elem})[]")
        } else {
            format!("{elem}[]")
        }
    }

    fn enumeration(&self, values: &[String]) -> String {
        if values.is_empty() {
            return "never".to_string();
        }
        values
            .iter()
            .map(|v| format!("{v:?}"))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    fn object(&self, fields: &[ProjectedField]) -> Result<String> {
        let mut out = String::from("{ ");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push_str("; ");
            }
            out.push_str(&prop_name(&field.name));
            if field.optional {
                out.push('?');
            }
            out.push_str(": ");
            out.push_str(&field.ty);
        }
        out.push_str(" }");
        Ok(out)
    }

    fn nullable(&self, base: String) -> String {
        format!("{base} | null")
    }

    fn optional(&self, base: String) -> String {
        base
    }
}

/// Quotes a property name unless it is already a safe TS property.
fn prop_name(name: &str) -> String {
    if is_safe_prop(name) {
        name.to_string()
    } else {
        format!("{name:?}")
    }
}

fn is_safe_prop(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Template data for the generated `types.gen.ts` file.
#[derive(Debug, Clone, Serialize)]
pub struct TsTypesModel {
    pub types: Vec<TsNamedType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TsNamedType {
    pub name: String,
    /// "object" | "enum" | "alias"
    pub kind: String,
    pub fields: Vec<TsField>,
    pub enum_union: String,
    pub alias: String,
    /// Nullability of a named object is surfaced as a separate
    /// `<Name>OrNull` alias; non-object kinds fold `| null` into the alias.
    pub nullable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TsField {
    pub prop: String,
    pub optional: bool,
    pub ty: String,
}

/// Template data for the generated `client.gen.ts` file.
#[derive(Debug, Clone, Serialize)]
pub struct TsClientModel {
    pub base_url: String,
    pub tags: Vec<TsTagGroup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TsTagGroup {
    pub name: String,
    pub routes: Vec<TsClientRoute>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TsClientRoute {
    pub name: String,
    pub method: String,
    /// Either a quoted string or a template literal with path params
    /// interpolated.
    pub path_expr: String,
    /// Rendered argument list, e.g. `body: T.CreateUser, query?: { ... }`.
    pub signature: String,
    pub return_type: String,
    pub body_var: String,
    pub query_var: String,
}

pub fn build_types_model(spec: &Spec) -> Result<TsTypesModel> {
    let dialect = TsDialect::types_file();
    let projector = Projector::new(&dialect);

    let mut types = Vec::with_capacity(spec.types.len());
    for decl in spec.types.values() {
        types.push(build_named_type(&dialect, &projector, decl)?);
    }
    Ok(TsTypesModel { types })
}

fn build_named_type(
    dialect: &TsDialect,
    projector: &Projector<'_>,
    decl: &TypeDecl,
) -> Result<TsNamedType> {
    let name = dialect.named(&decl.name)?;

    match &decl.ty.kind {
        TypeKind::Object(fields) => {
            let mut out = Vec::with_capacity(fields.len());
            for field in fields {
                out.push(TsField {
                    prop: prop_name(&field.name),
                    optional: !field.required,
                    ty: projector.type_ref(&field.ty, field.required)?,
                });
            }
            Ok(TsNamedType {
                name,
                kind: "object".to_string(),
                fields: out,
                enum_union: String::new(),
                alias: String::new(),
                nullable: decl.ty.nullable,
            })
        }
        TypeKind::Enum(values) => Ok(TsNamedType {
            name,
            kind: "enum".to_string(),
            fields: vec![],
            enum_union: dialect.enumeration(values),
            alias: String::new(),
            nullable: decl.ty.nullable,
        }),
        TypeKind::Scalar(_) | TypeKind::Array(_) => Ok(TsNamedType {
            name,
            kind: "alias".to_string(),
            fields: vec![],
            enum_union: String::new(),
            // `| null` is already folded in by the projector here.
            alias: projector.ty(&decl.ty)?,
            nullable: false,
        }),
    }
}

pub fn build_client_model(spec: &Spec) -> Result<TsClientModel> {
    let dialect = TsDialect::client_file();
    let projector = Projector::new(&dialect);

    // Routes arrive sorted by (tag, name), so groups are contiguous.
    let mut tags: Vec<TsTagGroup> = Vec::new();
    for route in &spec.routes {
        let client_route = build_client_route(&projector, route)?;
        match tags.last_mut() {
            Some(group) if group.name == route.tag => group.routes.push(client_route),
            _ => tags.push(TsTagGroup {
                name: route.tag.clone(),
                routes: vec![client_route],
            }),
        }
    }

    Ok(TsClientModel {
        base_url: spec.meta.base_url.clone(),
        tags,
    })
}

fn build_client_route(projector: &Projector<'_>, route: &Route) -> Result<TsClientRoute> {
    let return_type = projector.type_ref(&route.success.ty, true)?;

    // Signature order: body (POST only), then path, then optional query.
    let mut args = Vec::new();
    if let Some(body) = &route.request_body {
        args.push(format!("body: {}", projector.type_ref(&body.ty, true)?));
    }
    if !route.path_params.is_empty() {
        args.push(format!(
            "path: {}",
            params_object_type(projector, &route.path_params)?
        ));
    }
    if !route.query_params.is_empty() {
        args.push(format!(
            "query?: {}",
            params_object_type(projector, &route.query_params)?
        ));
    }

    let body_var = if route.request_body.is_some() {
        "body"
    } else {
        "undefined"
    };
    let query_var = if route.query_params.is_empty() {
        "undefined"
    } else {
        "query"
    };

    Ok(TsClientRoute {
        name: route.name.clone(),
        method: route.method.as_str().to_string(),
        path_expr: path_expr(&route.path, &route.path_params),
        signature: args.join(", "),
        return_type,
        body_var: body_var.to_string(),
        query_var: query_var.to_string(),
    })
}

fn params_object_type(projector: &Projector<'_>, params: &[Param]) -> Result<String> {
    let mut out = String::from("{ ");
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        out.push_str(&prop_name(&param.name));
        if !param.required {
            out.push('?');
        }
        out.push_str(": ");
        out.push_str(&projector.type_ref(&param.ty, param.required)?);
    }
    out.push_str(" }");
    Ok(out)
}

/// Renders the request path: a plain quoted string when there are no path
/// parameters, otherwise a template literal interpolating each `{param}`.
fn path_expr(path: &str, params: &[Param]) -> String {
    if params.is_empty() {
        return format!("{path:?}");
    }
    let mut out = path.to_string();
    for param in params {
        let needle = format!("{{{}}}", param.name);
        let access = if is_safe_prop(&param.name) {
            format!("path.{}", param.name)
        } else {
            format!("path[{:?}]", param.name)
        };
        let replacement = format!("${{encodeURIComponent(String({access}))}}");
        out = out.replace(&needle, &replacement);
    }
    format!("`{out}`")
}
