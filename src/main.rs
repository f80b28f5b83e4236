use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use duplexgen::config::{load_config, merge_with_cli_args};
use duplexgen::generators::{GeneratorOptions, GeneratorRegistry};
use duplexgen::output::{write_file, WriteOptions};
use duplexgen::{loader, normalize};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the OpenAPI specification file (YAML or JSON)
    #[arg(short, long)]
    spec: Option<PathBuf>,

    /// Output directory for generated code
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generators to run (comma-separated); defaults to all
    #[arg(short, long, value_delimiter = ',')]
    targets: Vec<String>,

    /// Override the base URL taken from servers[0].url
    #[arg(long)]
    base_url: Option<String>,

    /// Package name for the generated Go file
    #[arg(long)]
    go_package: Option<String>,

    /// Fail if any generated file is missing or out of date, writing nothing
    #[arg(long)]
    check: bool,

    /// Path to config file (overrides default location)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = load_config(args.config.as_deref())?;
    let config = merge_with_cli_args(
        config,
        args.spec,
        args.output,
        args.base_url,
        args.go_package,
        args.targets,
    );

    let spec_path = config.spec.ok_or_else(|| {
        anyhow::anyhow!("No spec specified. Use --spec or configure spec in config file")
    })?;

    println!("📖 Reading spec from: {:?}", spec_path);
    let doc = loader::load_document(&spec_path)?;

    let normalize_opts = normalize::Options {
        base_url_override: config.base_url.clone(),
    };
    let spec = normalize::to_ir(&doc, &normalize_opts)
        .context("Spec uses constructs outside the supported OpenAPI subset")?;

    println!(
        "✅ Normalized {} type(s) and {} route(s)",
        spec.types.len(),
        spec.routes.len()
    );

    let registry = GeneratorRegistry::new();
    let targets: Vec<String> = if config.targets.is_empty() {
        registry
            .available_generators()
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        config.targets.clone()
    };

    let output_dir = config.output.unwrap_or_else(|| PathBuf::from("generated"));
    let gen_opts = GeneratorOptions {
        go_package: config.go_package.unwrap_or_else(|| "server".to_string()),
    };
    let write_opts = WriteOptions { check: args.check };

    let mut written = 0;
    for target in &targets {
        let generator = registry.get(target).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown generator: {} (available: {})",
                target,
                registry.available_generators().join(", ")
            )
        })?;

        println!("🔧 Generating with '{}'...", target);
        let files = generator
            .generate(&spec, &gen_opts)
            .with_context(|| format!("Failed to generate with '{}'", target))?;

        for file in files {
            let path = output_dir.join(&file.filename);
            if write_file(&path, &file.content, write_opts)? {
                println!("✅ Generated: {:?}", path);
                written += 1;
            } else {
                println!("⏭️  Up to date: {:?}", path);
            }
        }
    }

    if args.check {
        println!("🎉 All generated files are up to date.");
    } else if written == 0 {
        println!("🎉 Nothing to write, everything up to date.");
    } else {
        println!("🎉 Successfully generated {} file(s)!", written);
    }

    Ok(())
}
