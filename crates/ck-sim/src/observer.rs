//! Diagnostic collaborator: the orchestrator's only outward channel.

use std::path::Path;

use ck_agent::AgentState;
use ck_behavior::BehaviorError;
use ck_core::{AgentRef, ScriptNo, Tick};
use ck_script::ScriptError;

use crate::TickReport;

/// Callbacks invoked by [`World`][crate::World] at key points in the tick.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — fault counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Faults(usize);
///
/// impl SimObserver for Faults {
///     fn on_script_fault(&mut self, _: Tick, _: AgentRef, _: ScriptNo, _: &ScriptError) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of each tick that runs, after the quit/save check.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick that runs.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// An agent's update returned an error.  Its intents were discarded.
    fn on_agent_fault(&mut self, _tick: Tick, _agent: AgentRef, _error: &BehaviorError) {}

    /// Event `selector` on `agent` failed.  Intents it emitted before
    /// failing were applied.
    fn on_script_fault(&mut self, _tick: Tick, _agent: AgentRef, _selector: ScriptNo, _error: &ScriptError) {}

    /// `agent` was removed from the world during the kill drain.  `state` is
    /// dropped when this returns.
    fn on_agent_destroyed(&mut self, _tick: Tick, _agent: AgentRef, _state: &AgentState) {}

    /// A save was requested.  The persistence layer takes it from here.
    fn on_save_requested(&mut self, _tick: Tick) {}

    /// The world stopped at the start of `tick`.  Called once.
    fn on_quit(&mut self, _tick: Tick) {}

    /// A bootstrap script could not be read, compiled or installed.
    fn on_bootstrap_failure(&mut self, _path: &Path, _error: &ScriptError) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
