use anyhow::{Context as _, Result};
use tera::{Context, Tera};

use super::{GeneratedFile, Generator, GeneratorOptions};
use crate::ir::Spec;
use crate::project::typescript::{build_client_model, build_types_model};

const TYPES_TEMPLATE: &str = include_str!("../../templates/ts_types.ts.tera");
const CLIENT_TEMPLATE: &str = include_str!("../../templates/ts_client.ts.tera");

/// Emits `types.gen.ts` (named type declarations) and `client.gen.ts`
/// (per-tag method groups over a shared fetch wrapper).
pub struct TypeScriptClientGenerator;

impl Generator for TypeScriptClientGenerator {
    fn name(&self) -> &str {
        "ts-client"
    }

    fn generate(&self, spec: &Spec, _opts: &GeneratorOptions) -> Result<Vec<GeneratedFile>> {
        let mut tera = Tera::default();
        tera.add_raw_template("ts_types.ts.tera", TYPES_TEMPLATE)?;
        tera.add_raw_template("ts_client.ts.tera", CLIENT_TEMPLATE)?;

        let types_model = build_types_model(spec)?;
        let mut context = Context::new();
        context.insert("model", &types_model);
        let types_content = tera
            .render("ts_types.ts.tera", &context)
            .context("Failed to render TypeScript types template")?;

        let client_model = build_client_model(spec)?;
        let mut context = Context::new();
        context.insert("model", &client_model);
        let client_content = tera
            .render("ts_client.ts.tera", &context)
            .context("Failed to render TypeScript client template")?;

        Ok(vec![
            GeneratedFile {
                filename: "types.gen.ts".to_string(),
                content: types_content,
            },
            GeneratedFile {
                filename: "client.gen.ts".to_string(),
                content: client_content,
            },
        ])
    }
}
