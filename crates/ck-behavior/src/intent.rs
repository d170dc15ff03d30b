//! Agent intents — the world-level effects an update can request.

use ck_core::{AgentRef, ScriptNo, ScriptValue};

/// Something an agent wants the world to do on its behalf.
///
/// Returned by [`BehaviorModel::tick`][crate::BehaviorModel::tick] and also
/// emitted by running scripts.  Intents are applied in the order returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Raise script `selector` on `target`.  Runs during this tick's event
    /// drain when queued from an update, or next tick when queued from a
    /// script that is itself being dispatched.
    ///
    /// `target` must not be null.
    QueueScript {
        selector: ScriptNo,
        target:   AgentRef,
        origin:   AgentRef,
        p0:       ScriptValue,
        p1:       ScriptValue,
    },

    /// Flag `agent` as dying.  It is destroyed at the end of the tick.
    Kill(AgentRef),

    /// Move `agent` to a new draw / hit-test rank.
    SetZOrder {
        agent:  AgentRef,
        zorder: i32,
    },

    /// Stop the world at the next tick boundary.
    Quit,

    /// Ask the persistence collaborator for a save at the next tick boundary.
    Save,
}

impl Intent {
    /// A `QueueScript` with no origin and null parameters.
    pub fn script(selector: ScriptNo, target: AgentRef) -> Self {
        Intent::QueueScript {
            selector,
            target,
            origin: AgentRef::NULL,
            p0: ScriptValue::Null,
            p1: ScriptValue::Null,
        }
    }
}
