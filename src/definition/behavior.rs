use crate::compiler::ResolutionContext;
use crate::error::CompileError;
use ahash::AHashMap;

/// Defines the contract a node type fulfils during code generation.
///
/// Both hooks default to "contributes nothing", which is what pure
/// shape-only nodes want.
pub trait NodeBehavior: Send + Sync {
    /// Called once per node instance on the execution walk. `None` means the
    /// node type has no statement code of its own.
    fn contribute(
        &self,
        _ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        Ok(None)
    }

    /// Called lazily when another node reads one of this node's data outputs.
    /// `None` falls back to the pin's derived variable name.
    fn contribute_output(
        &self,
        _pin: &str,
        _ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        Ok(None)
    }
}

/// Behavior of nodes that only carry pin shapes.
pub struct PassThrough;

impl NodeBehavior for PassThrough {}

pub type CodeFn =
    dyn Fn(&mut ResolutionContext<'_, '_>) -> Result<String, CompileError> + Send + Sync;

/// A behavior assembled from closures, for node types defined at runtime.
#[derive(Default)]
pub struct FnBehavior {
    code: Option<Box<CodeFn>>,
    outputs: AHashMap<String, Box<CodeFn>>,
}

impl FnBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut ResolutionContext<'_, '_>) -> Result<String, CompileError>
            + Send
            + Sync
            + 'static,
    {
        self.code = Some(Box::new(f));
        self
    }

    pub fn output<F>(mut self, pin: &str, f: F) -> Self
    where
        F: Fn(&mut ResolutionContext<'_, '_>) -> Result<String, CompileError>
            + Send
            + Sync
            + 'static,
    {
        self.outputs.insert(pin.to_string(), Box::new(f));
        self
    }
}

impl NodeBehavior for FnBehavior {
    fn contribute(
        &self,
        ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        self.code.as_ref().map(|f| f(ctx)).transpose()
    }

    fn contribute_output(
        &self,
        pin: &str,
        ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        self.outputs.get(pin).map(|f| f(ctx)).transpose()
    }
}
