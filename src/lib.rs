//! duplexgen generates a typed Go server and a typed TypeScript client
//! from a deliberately restricted OpenAPI 3.0 subset.
//!
//! The pipeline: load and structurally validate the document ([`loader`]),
//! normalize it into a canonical intermediate representation ([`normalize`],
//! [`ir`]), then project the IR into per-target rendering models
//! ([`project`]) consumed by the template-driven generators ([`generators`]).
//! Normalization rejects every schema construct that cannot be expressed
//! losslessly in both target type systems, with an error naming the exact
//! offending location.

pub mod config;
pub mod generators;
pub mod ident;
pub mod ir;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod project;
