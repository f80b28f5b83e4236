pub mod golang;
pub mod typescript;

use anyhow::Result;
use std::collections::HashMap;

use crate::ir::Spec;

pub use golang::GoServerGenerator;
pub use typescript::TypeScriptClientGenerator;

/// One file emitted by a generator.
#[derive(Debug)]
pub struct GeneratedFile {
    pub filename: String,
    pub content: String,
}

/// Knobs shared by every generator invocation.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Package name for the generated Go file.
    pub go_package: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            go_package: "server".to_string(),
        }
    }
}

/// Generator trait - converts the IR into target language source files.
pub trait Generator: Send + Sync {
    /// Unique name of the generator (e.g., "go-server", "ts-client")
    fn name(&self) -> &str;

    /// Generate code from the normalized spec
    fn generate(&self, spec: &Spec, opts: &GeneratorOptions) -> Result<Vec<GeneratedFile>>;
}

/// Generator registry for managing available code generators
pub struct GeneratorRegistry {
    generators: HashMap<String, Box<dyn Generator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            generators: HashMap::new(),
        };

        // Register built-in generators
        registry.register(Box::new(GoServerGenerator));
        registry.register(Box::new(TypeScriptClientGenerator));

        registry
    }

    pub fn register(&mut self, generator: Box<dyn Generator>) {
        self.generators
            .insert(generator.name().to_string(), generator);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Generator> {
        self.generators.get(name).map(|g| g.as_ref())
    }

    pub fn available_generators(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.generators.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_knows_both_targets() {
        let registry = GeneratorRegistry::new();
        assert_eq!(registry.available_generators(), vec!["go-server", "ts-client"]);
        assert!(registry.get("go-server").is_some());
        assert!(registry.get("python").is_none());
    }
}
