//! A no-op behavior model — agents never act on their own.

use ck_agent::AgentState;
use ck_core::{AgentRef, SimRng};

use crate::{BehaviorModel, BehaviorResult, Intent, TickContext};

/// A [`BehaviorModel`] that always returns an empty intent list and lets
/// every event fire.
///
/// Useful when all activity is script-driven, and in tests.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn tick(
        &self,
        _agent: AgentRef,
        _state: &mut AgentState,
        _ctx:   &TickContext,
        _rng:   &mut SimRng,
    ) -> BehaviorResult<Vec<Intent>> {
        Ok(vec![])
    }
}
