//! The `BehaviorModel` trait — the per-agent update hook.

use ck_agent::AgentState;
use ck_core::{AgentRef, ScriptNo, SimRng};

use crate::{BehaviorResult, Intent, TickContext};

/// Pluggable agent behavior.
///
/// # Required methods
///
/// Only [`tick`][Self::tick] is required.  Event gating defaults to "always
/// fire".
///
/// # Example
///
/// ```rust,ignore
/// struct Drift;
///
/// impl BehaviorModel for Drift {
///     fn tick(&self, _agent: AgentRef, state: &mut AgentState, _ctx: &TickContext, _rng: &mut SimRng)
///         -> BehaviorResult<Vec<Intent>>
///     {
///         state.position = state.position.offset(1, 0);
///         Ok(vec![])
///     }
/// }
/// ```
pub trait BehaviorModel: 'static {
    /// Called once per live agent per tick, in spawn order.
    ///
    /// Mutate `state` directly for the agent's own changes; return intents
    /// for anything else.  An `Err` is reported and the agent's remaining
    /// work for this tick is abandoned.  Intents are only applied on `Ok`.
    fn tick(
        &self,
        agent: AgentRef,
        state: &mut AgentState,
        ctx:   &TickContext,
        rng:   &mut SimRng,
    ) -> BehaviorResult<Vec<Intent>>;

    /// Whether a queued event `selector` should actually run on `agent`.
    ///
    /// Consulted during the event drain after the liveness check.  Returning
    /// `false` drops the event silently.
    fn should_fire(&self, _agent: AgentRef, _state: &AgentState, _selector: ScriptNo) -> bool {
        true
    }
}
