//! Code generation: walks the execution chain of a blueprint and stitches
//! together what each node contributes.

mod context;
pub mod dialect;
mod prepare;
pub mod text;
mod walker;

pub use context::ResolutionContext;
pub use dialect::{Dialect, ModuleType, ScriptType};
pub use prepare::PrepareList;
pub use text::{indent_block, pin_var_name};

use crate::document::Blueprint;
use crate::error::CompileError;
use serde::{Deserialize, Serialize};
use walker::CodeGenerator;

/// Settings for one compile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    pub dialect: Dialect,
    /// Prefix every node's code with a comment naming the node.
    pub print_comment: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            print_comment: true,
        }
    }
}

impl CompilerOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

pub struct CodeCompiler<'a> {
    blueprint: &'a Blueprint,
    options: CompilerOptions,
}

pub struct CompilerBuilder<'a> {
    blueprint: &'a Blueprint,
    options: CompilerOptions,
}

impl<'a> CompilerBuilder<'a> {
    pub fn new(blueprint: &'a Blueprint) -> Self {
        Self {
            blueprint,
            options: CompilerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.options.dialect = dialect;
        self
    }

    pub fn with_comments(mut self, print_comment: bool) -> Self {
        self.options.print_comment = print_comment;
        self
    }

    pub fn build(self) -> CodeCompiler<'a> {
        CodeCompiler {
            blueprint: self.blueprint,
            options: self.options,
        }
    }
}

impl<'a> CodeCompiler<'a> {
    pub fn builder(blueprint: &'a Blueprint) -> CompilerBuilder<'a> {
        CompilerBuilder::new(blueprint)
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Compiles the blueprint into a single source text.
    ///
    /// Fails when the graph has no unique entry node, when an exec output is
    /// wired to more than one node, or when control or data flow loops back
    /// on itself. Dangling references only degrade the output.
    pub fn generate(&self) -> Result<String, CompileError> {
        let graph = self.blueprint.graph();
        tracing::info!(
            nodes = graph.node_count(),
            connections = graph.connections().len(),
            variables = self.blueprint.variables().len(),
            "Compiling blueprint"
        );

        let generator = CodeGenerator::new(
            self.blueprint.registry(),
            graph,
            self.blueprint.variables(),
            &self.options,
        );
        let code = generator.generate().inspect_err(|e| {
            tracing::warn!("Compilation failed: {}", e);
        })?;

        tracing::info!(bytes = code.len(), "Compilation finished");
        Ok(code)
    }
}
