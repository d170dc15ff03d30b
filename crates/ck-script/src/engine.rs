//! Traits the scripting collaborator implements.

use ck_core::{AgentRef, InterpreterId, ScriptValue};

use crate::{ScriptEnv, ScriptResult};

/// A reusable execution context.
///
/// The pool hands one out per event.  The orchestrator calls, in order:
/// `bind`, `set_variables`, `run`, `unbind`.  `unbind` must leave the
/// instance ready for a different agent: owner cleared and any
/// per-invocation state reset.
pub trait Interpreter {
    type Script;

    fn bind(&mut self, owner: AgentRef);

    fn unbind(&mut self);

    /// The agent this instance currently runs for.
    fn owner(&self) -> Option<AgentRef>;

    /// Seed the invocation: who raised the event and its two parameters.
    fn set_variables(&mut self, from: AgentRef, p0: ScriptValue, p1: ScriptValue);

    /// Run `script` to completion.  Never yields back to the kernel.
    fn run(&mut self, script: &Self::Script, env: &mut ScriptEnv<'_>) -> ScriptResult<()>;
}

/// Factory for interpreter instances.
///
/// Construction is infallible: an engine that cannot build an interpreter
/// has no way to run any scripted behavior, so it should panic instead.
pub trait ScriptEngine {
    type Script;
    type Interpreter: Interpreter<Script = Self::Script>;

    fn new_interpreter(&mut self, id: InterpreterId) -> Self::Interpreter;
}
