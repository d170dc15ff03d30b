//! `AgentTable` — the authoritative owner of every live agent.
//!
//! # Layout
//!
//! Agents live in a slot arena indexed by `AgentId`.  Each slot carries a
//! generation that is bumped whenever its occupant is removed, so stale
//! [`AgentRef`]s stop resolving instead of aliasing the next occupant.
//! Freed slots are recycled LIFO.
//!
//! A separate `order` list records spawn order.  The orchestrator walks it
//! by index during the update phase; since membership only changes inside
//! [`AgentTable::drain_kills`], that walk never observes a removal.
//!
//! # Deferred destruction
//!
//! [`AgentTable::mark_dying`] sets the irreversible `dying` flag and appends
//! the agent to the kill list.  Nothing is freed until the orchestrator
//! reaches its safe point and calls `drain_kills`.

use rustc_hash::FxHashSet;

use ck_core::{AgentId, AgentRef};

use crate::AgentState;

struct Slot {
    generation: u32,
    agent:      Option<AgentState>,
}

/// Generational arena of agents plus the pending kill list.
#[derive(Default)]
pub struct AgentTable {
    slots: Vec<Slot>,
    free:  Vec<AgentId>,
    /// Live agents in spawn order.
    order: Vec<AgentRef>,
    /// Agents flagged dying, in the order they were flagged.
    pub(crate) kill_list: Vec<AgentRef>,
}

impl AgentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `state` and return a weak reference to it.
    ///
    /// Only the orchestrator calls this, never during a traversal.
    pub fn insert(&mut self, state: AgentState) -> AgentRef {
        let agent = match self.free.pop() {
            Some(id) => {
                let slot = &mut self.slots[id.index()];
                debug_assert!(slot.agent.is_none());
                slot.agent = Some(state);
                AgentRef::new(id, slot.generation)
            }
            None => {
                let id = AgentId(self.slots.len() as u32);
                self.slots.push(Slot { generation: 0, agent: Some(state) });
                AgentRef::new(id, 0)
            }
        };
        self.order.push(agent);
        agent
    }

    fn slot(&self, agent: AgentRef) -> Option<&Slot> {
        if agent.is_null() {
            return None;
        }
        self.slots
            .get(agent.id.index())
            .filter(|s| s.generation == agent.generation)
    }

    /// Resolve `agent` whether or not it is dying.
    pub fn get(&self, agent: AgentRef) -> Option<&AgentState> {
        self.slot(agent).and_then(|s| s.agent.as_ref())
    }

    /// Mutable access whether or not the agent is dying.
    pub fn get_mut(&mut self, agent: AgentRef) -> Option<&mut AgentState> {
        if agent.is_null() {
            return None;
        }
        self.slots
            .get_mut(agent.id.index())
            .filter(|s| s.generation == agent.generation)
            .and_then(|s| s.agent.as_mut())
    }

    /// Resolve `agent` only if it exists and has not been flagged dying.
    ///
    /// This is the check every weak back-reference goes through.
    pub fn resolve(&self, agent: AgentRef) -> Option<&AgentState> {
        self.get(agent).filter(|a| !a.dying)
    }

    pub fn resolve_mut(&mut self, agent: AgentRef) -> Option<&mut AgentState> {
        self.get_mut(agent).filter(|a| !a.dying)
    }

    #[inline]
    pub fn is_alive(&self, agent: AgentRef) -> bool {
        self.resolve(agent).is_some()
    }

    /// Flag `agent` as dying and queue it for destruction.
    ///
    /// Returns `false` if the agent is already dying or no longer exists.
    pub fn mark_dying(&mut self, agent: AgentRef) -> bool {
        let Some(state) = self.resolve_mut(agent) else {
            return false;
        };
        state.dying = true;
        self.kill_list.push(agent);
        true
    }

    /// Agents flagged dying since the last drain, in flag order.
    pub fn kill_list(&self) -> &[AgentRef] {
        &self.kill_list
    }

    /// Remove every agent on the kill list and hand back ownership, in flag
    /// order.  The caller drops them once other indices are updated.
    ///
    /// # Panics
    /// Panics if a kill-list entry is not flagged dying or has already been
    /// removed; either means the table has been corrupted.
    pub fn drain_kills(&mut self) -> Vec<(AgentRef, AgentState)> {
        if self.kill_list.is_empty() {
            return Vec::new();
        }

        let doomed = std::mem::take(&mut self.kill_list);
        let mut removed = Vec::with_capacity(doomed.len());
        let mut gone: FxHashSet<AgentRef> = FxHashSet::default();

        for agent in doomed {
            let slot = self
                .slots
                .get_mut(agent.id.index())
                .filter(|s| s.generation == agent.generation)
                .unwrap_or_else(|| panic!("kill list holds stale reference {agent}"));
            let state = slot
                .agent
                .take()
                .unwrap_or_else(|| panic!("kill list holds empty slot {agent}"));
            assert!(state.dying, "agent {agent} on kill list is not dying");

            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(agent.id);
            gone.insert(agent);
            removed.push((agent, state));
        }

        self.order.retain(|a| !gone.contains(a));
        removed
    }

    /// Live agents (dying ones included until drained) in spawn order.
    pub fn order(&self) -> &[AgentRef] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentRef, &AgentState)> + '_ {
        self.order
            .iter()
            .filter_map(move |&a| self.get(a).map(|s| (a, s)))
    }

    /// Number of agents present, dying ones included.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of arena slots ever allocated.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
