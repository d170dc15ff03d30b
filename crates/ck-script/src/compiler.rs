//! The compiler seam: source text in, installable scripts out.

use std::path::Path;

use ck_agent::Classifier;
use ck_core::ScriptNo;

use crate::ScriptResult;

/// One script to place in the [`Scriptorium`][crate::Scriptorium].
pub struct ScriptInstall<S> {
    pub classifier: Classifier,
    pub selector:   ScriptNo,
    pub script:     S,
}

/// Everything one source file produced.
pub struct CompiledUnit<S> {
    pub installs:  Vec<ScriptInstall<S>>,
    /// Body to run once, immediately after installing, with no owner.
    pub installer: Option<S>,
}

impl<S> Default for CompiledUnit<S> {
    fn default() -> Self {
        Self { installs: Vec::new(), installer: None }
    }
}

pub trait ScriptCompiler {
    type Script;

    /// Compile `source`, read from `path`.  `path` is used for diagnostics.
    fn compile(&mut self, path: &Path, source: &str) -> ScriptResult<CompiledUnit<Self::Script>>;
}
