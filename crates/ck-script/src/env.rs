//! `ScriptEnv` — the world as seen from inside one script run.
//!
//! A script gets mutable access to its owner's state and nothing else.
//! Every effect on other agents or on the world is recorded as an
//! [`Intent`] and applied by the orchestrator after the run returns, in the
//! order recorded.  Intents recorded before a fault are still applied.

use ck_agent::AgentState;
use ck_behavior::Intent;
use ck_core::{AgentRef, ScriptNo, ScriptValue, Tick};

use crate::{ScriptError, ScriptResult};

pub struct ScriptEnv<'a> {
    owner:   AgentRef,
    state:   Option<&'a mut AgentState>,
    tick:    Tick,
    intents: Vec<Intent>,
}

impl<'a> ScriptEnv<'a> {
    /// Environment for an event dispatched to `owner`.
    pub fn for_agent(owner: AgentRef, state: &'a mut AgentState, tick: Tick) -> Self {
        Self { owner, state: Some(state), tick, intents: Vec::new() }
    }

    /// Environment with no owner, for installer scripts run at startup.
    pub fn detached(tick: Tick) -> Self {
        Self { owner: AgentRef::NULL, state: None, tick, intents: Vec::new() }
    }

    pub fn owner(&self) -> Option<AgentRef> {
        (!self.owner.is_null()).then_some(self.owner)
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn state(&self) -> ScriptResult<&AgentState> {
        self.state.as_deref().ok_or(ScriptError::NoOwner)
    }

    pub fn state_mut(&mut self) -> ScriptResult<&mut AgentState> {
        self.state.as_deref_mut().ok_or(ScriptError::NoOwner)
    }

    /// Owner's object variable `n`.
    pub fn var(&self, n: usize) -> ScriptResult<&ScriptValue> {
        self.state()?.var(n).ok_or(ScriptError::BadVariable(n))
    }

    pub fn set_var(&mut self, n: usize, value: ScriptValue) -> ScriptResult<()> {
        if self.state_mut()?.set_var(n, value) {
            Ok(())
        } else {
            Err(ScriptError::BadVariable(n))
        }
    }

    // ── Effects ───────────────────────────────────────────────────────────

    /// Raise `selector` on `target` with this script's owner as origin.
    /// Runs in the next tick's drain.
    pub fn queue_script(
        &mut self,
        selector: ScriptNo,
        target:   AgentRef,
        p0:       ScriptValue,
        p1:       ScriptValue,
    ) -> ScriptResult<()> {
        if target.is_null() {
            return Err(ScriptError::NullTarget);
        }
        self.intents.push(Intent::QueueScript { selector, target, origin: self.owner, p0, p1 });
        Ok(())
    }

    pub fn kill(&mut self, agent: AgentRef) -> ScriptResult<()> {
        if agent.is_null() {
            return Err(ScriptError::NullTarget);
        }
        self.intents.push(Intent::Kill(agent));
        Ok(())
    }

    pub fn kill_self(&mut self) -> ScriptResult<()> {
        let owner = self.owner().ok_or(ScriptError::NoOwner)?;
        self.kill(owner)
    }

    pub fn set_zorder(&mut self, agent: AgentRef, zorder: i32) -> ScriptResult<()> {
        if agent.is_null() {
            return Err(ScriptError::NullTarget);
        }
        self.intents.push(Intent::SetZOrder { agent, zorder });
        Ok(())
    }

    pub fn quit(&mut self) {
        self.intents.push(Intent::Quit);
    }

    pub fn save(&mut self) {
        self.intents.push(Intent::Save);
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn into_intents(self) -> Vec<Intent> {
        self.intents
    }
}
