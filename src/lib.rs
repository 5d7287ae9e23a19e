//! # Codeck - Blueprint Graph Compiler
//!
//! **Codeck** turns a visual-scripting blueprint into source text. A blueprint
//! is a graph of typed node instances joined by connections between their
//! pins: *exec* pins say what runs next, *data* pins carry values. The
//! compiler walks the execution chain from the single `Begin` node and lets
//! every node type contribute its own fragment of code.
//!
//! ## Core Workflow
//!
//! 1.  **Register Node Types**: Fill a `NodeRegistry` with `NodeDefinition`s
//!     (or take the built-in library via `Blueprint::with_builtin_nodes`).
//! 2.  **Edit the Graph**: Create nodes, connect pins and declare variables on
//!     a `Blueprint`, or load a saved `BlueprintSnapshot`.
//! 3.  **Compile**: Use `CodeCompiler::builder` to pick a dialect and produce
//!     the program text.
//!
//! ## Quick Start
//!
//! ```rust
//! use codeck::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut blueprint = Blueprint::with_builtin_nodes();
//!
//!     let log = blueprint.create_node("log", Position::new(200.0, 10.0))?;
//!     blueprint.graph_mut().set_node_data(&log, "message", "Hello");
//!     blueprint.connect(BEGIN_NODE_ID, STANDARD_PIN_EXEC_OUT, &log, STANDARD_PIN_EXEC_IN)?;
//!
//!     let code = CodeCompiler::builder(&blueprint)
//!         .with_comments(false)
//!         .build()
//!         .generate()?;
//!     assert_eq!(code, "console.log(\"Hello\");\n");
//!     Ok(())
//! }
//! ```

pub mod compiler;
pub mod definition;
pub mod document;
pub mod error;
pub mod graph;
pub mod nodes;
pub mod prelude;
pub mod value;
