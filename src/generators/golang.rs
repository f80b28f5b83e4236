use anyhow::{Context as _, Result};
use tera::{Context, Tera};

use super::{GeneratedFile, Generator, GeneratorOptions};
use crate::ir::Spec;
use crate::project::golang::build_server_model;

const SERVER_TEMPLATE: &str = include_str!("../../templates/go_server.go.tera");

/// Emits `server.gen.go`: type declarations, per-tag handler interfaces,
/// and `http.ServeMux` registration functions with request decoding.
pub struct GoServerGenerator;

impl Generator for GoServerGenerator {
    fn name(&self) -> &str {
        "go-server"
    }

    fn generate(&self, spec: &Spec, opts: &GeneratorOptions) -> Result<Vec<GeneratedFile>> {
        let model = build_server_model(spec, &opts.go_package)?;

        let mut tera = Tera::default();
        tera.add_raw_template("go_server.go.tera", SERVER_TEMPLATE)?;

        let mut context = Context::new();
        context.insert("model", &model);

        let content = tera
            .render("go_server.go.tera", &context)
            .context("Failed to render Go server template")?;

        Ok(vec![GeneratedFile {
            filename: "server.gen.go".to_string(),
            content,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{
        Field, Meta, Method, Param, Route, Scalar, Success, Type, TypeDecl, TypeKind, TypeRef,
    };
    use std::collections::BTreeMap;

    fn sample_spec() -> Spec {
        let mut types = BTreeMap::new();
        types.insert(
            "User".to_string(),
            TypeDecl {
                name: "User".to_string(),
                ty: Type {
                    kind: TypeKind::Object(vec![
                        Field {
                            name: "id".into(),
                            required: true,
                            ty: TypeRef::Inline(Box::new(Type {
                                kind: TypeKind::Scalar(Scalar::String),
                                nullable: false,
                            })),
                        },
                        Field {
                            name: "nickname".into(),
                            required: false,
                            ty: TypeRef::Inline(Box::new(Type {
                                kind: TypeKind::Scalar(Scalar::String),
                                nullable: true,
                            })),
                        },
                    ]),
                    nullable: false,
                },
            },
        );
        Spec {
            meta: Meta {
                base_url: "https://api.example.com".into(),
            },
            types,
            routes: vec![Route {
                name: "getUser".into(),
                tag: "Default".into(),
                method: Method::Get,
                path: "/users/{id}".into(),
                path_params: vec![Param {
                    name: "id".into(),
                    required: true,
                    ty: TypeRef::Inline(Box::new(Type {
                        kind: TypeKind::Scalar(Scalar::String),
                        nullable: false,
                    })),
                }],
                query_params: vec![Param {
                    name: "limit".into(),
                    required: false,
                    ty: TypeRef::Inline(Box::new(Type {
                        kind: TypeKind::Scalar(Scalar::Integer),
                        nullable: false,
                    })),
                }],
                request_body: None,
                success: Success {
                    status: "200".into(),
                    ty: TypeRef::Named("User".into()),
                },
            }],
        }
    }

    #[test]
    fn renders_complete_server_file() {
        let files = GoServerGenerator
            .generate(&sample_spec(), &GeneratorOptions::default())
            .unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "server.gen.go");

        let out = &files[0].content;
        assert!(out.contains("package server"));
        assert!(out.contains("const BaseURL = \"https://api.example.com\""));
        assert!(out.contains("type User struct {"));
        assert!(out.contains("Nickname *string `json:\"nickname,omitempty\"`"));
        assert!(out.contains("type DefaultHandler interface {"));
        assert!(out.contains(
            "GetUser(r *http.Request, path GetUserPath, query GetUserQuery) (User, error)"
        ));
        assert!(out.contains("mux.HandleFunc(\"GET /users/{id}\""));
        assert!(out.contains("req.PathValue(\"id\")"));
        // Integer query params parse through strconv.
        assert!(out.contains("\"strconv\""));
        assert!(out.contains("strconv.ParseInt(raw, 10, 64)"));
    }
}
