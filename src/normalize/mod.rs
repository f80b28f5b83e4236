//! Normalization: strict conversion of a validated OpenAPI document into
//! the canonical IR.
//!
//! This stage trusts the document's structure (the loader's job) and
//! performs only semantic subset validation on top of it: every construct
//! the dual-target type projection cannot express losslessly is rejected
//! with an error naming the offending location. There is no partial
//! success; the first violation aborts the run.

mod components;
mod error;
mod params;
mod request_body;
mod responses;
mod schema;

pub use error::NormalizeError;
pub use schema::Resolver;

use std::collections::BTreeMap;

use openapiv3::{OpenAPI, Operation, PathItem, ReferenceOr};

use crate::ident;
use crate::ir::{self, Method, Route, Spec};

/// Caller-supplied knobs for a single normalization run.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Overrides `servers[0].url` unconditionally when set and non-empty.
    pub base_url_override: Option<String>,
}

/// Builds the immutable IR from a structurally valid document.
///
/// The result is fully deterministic: the type table iterates
/// lexicographically and routes are sorted by `(tag, name)`, so two runs
/// over the same document produce identical specs.
pub fn to_ir(doc: &OpenAPI, opts: &Options) -> Result<Spec, NormalizeError> {
    let base_url = base_url(doc, opts)?;
    let (types, resolver) = components::collect_component_schemas(doc)?;

    // operationId -> location of its first occurrence; scoped to this run.
    let mut seen_ops: BTreeMap<String, String> = BTreeMap::new();
    let mut routes = Vec::new();

    for (path, item_ref) in &doc.paths.paths {
        let item = match item_ref {
            ReferenceOr::Reference { .. } => {
                return Err(NormalizeError::RefPathItem { path: path.clone() })
            }
            ReferenceOr::Item(item) => item,
        };

        reject_unsupported_methods(path, item)?;

        for (method, op) in [(Method::Get, &item.get), (Method::Post, &item.post)] {
            if let Some(op) = op {
                routes.push(normalize_operation(
                    path,
                    method,
                    item,
                    op,
                    &resolver,
                    &mut seen_ops,
                )?);
            }
        }
    }

    routes.sort_by(|a, b| {
        (a.tag.as_str(), a.name.as_str()).cmp(&(b.tag.as_str(), b.name.as_str()))
    });

    Ok(Spec {
        meta: ir::Meta { base_url },
        types,
        routes,
    })
}

fn base_url(doc: &OpenAPI, opts: &Options) -> Result<String, NormalizeError> {
    if let Some(url) = opts.base_url_override.as_deref() {
        let url = url.trim();
        if !url.is_empty() {
            return Ok(url.to_string());
        }
    }
    doc.servers
        .first()
        .map(|server| server.url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or(NormalizeError::MissingBaseUrl)
}

fn reject_unsupported_methods(path: &str, item: &PathItem) -> Result<(), NormalizeError> {
    let others = [
        ("put", &item.put),
        ("delete", &item.delete),
        ("patch", &item.patch),
        ("head", &item.head),
        ("options", &item.options),
        ("trace", &item.trace),
    ];
    for (method, op) in others {
        if op.is_some() {
            return Err(NormalizeError::UnsupportedMethod {
                path: path.to_string(),
                method: method.to_string(),
            });
        }
    }
    Ok(())
}

fn normalize_operation(
    path: &str,
    method: Method,
    item: &PathItem,
    op: &Operation,
    resolver: &Resolver,
    seen_ops: &mut BTreeMap<String, String>,
) -> Result<Route, NormalizeError> {
    let op_location = format!("{} {}", method.as_str(), path);

    let name = op.operation_id.as_deref().map(str::trim).unwrap_or("");
    if name.is_empty() {
        return Err(NormalizeError::MissingOperationId {
            location: op_location,
        });
    }
    if !ident::is_legal_ident(name) {
        return Err(NormalizeError::IllegalOperationId {
            location: op_location,
            name: name.to_string(),
        });
    }
    if let Some(first) = seen_ops.get(name) {
        return Err(NormalizeError::DuplicateOperationId {
            location: op_location,
            name: name.to_string(),
            first: first.clone(),
        });
    }
    seen_ops.insert(name.to_string(), op_location.clone());

    let tag = op
        .tags
        .first()
        .map(|t| ident::public_ident(t))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| ir::DEFAULT_TAG.to_string());

    if method == Method::Get && op.request_body.is_some() {
        return Err(NormalizeError::BodyOnRead {
            location: op_location,
        });
    }

    let (path_params, query_params) =
        params::collect_params(item, op, resolver, &op_location)?;

    let request_body = if method == Method::Post {
        request_body::normalize_request_body(op, resolver, &op_location)?
    } else {
        None
    };

    let success = responses::normalize_success(op, resolver, &op_location)?;

    Ok(Route {
        name: name.to_string(),
        tag,
        method,
        path: path.to_string(),
        path_params,
        query_params,
        request_body,
        success,
    })
}
