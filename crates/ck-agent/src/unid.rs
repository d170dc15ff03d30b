//! `UnidRegistry` — process-unique agent ids handed out on demand.
//!
//! Ids are drawn uniformly from the whole id space and re-drawn on collision
//! (rejection sampling).  While the map is sparse this takes one draw in
//! expectation; it degrades only as the registry approaches `u32::MAX`
//! entries, which no realistic population reaches.
//!
//! The map holds weak references.  It never keeps an agent alive and is not
//! cleaned up on agent death: callers release ids explicitly.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use ck_core::{AgentRef, SimRng, Unid};

use crate::AgentTable;

#[derive(Default)]
pub struct UnidRegistry {
    map: FxHashMap<Unid, AgentRef>,
}

impl UnidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a fresh id to `owner`.  The `INVALID` sentinel is never returned.
    pub fn allocate(&mut self, owner: AgentRef, rng: &mut SimRng) -> Unid {
        loop {
            let candidate = Unid(rng.gen_range(0..u32::MAX));
            if let Entry::Vacant(slot) = self.map.entry(candidate) {
                slot.insert(owner);
                return candidate;
            }
        }
    }

    /// The agent's UNID, allocating and caching one on first use.
    ///
    /// Returns `None` if `agent` is dead or dying.
    pub fn unid_for(
        &mut self,
        table: &mut AgentTable,
        agent: AgentRef,
        rng:   &mut SimRng,
    ) -> Option<Unid> {
        let state = table.resolve_mut(agent)?;
        if let Some(unid) = state.unid() {
            return Some(unid);
        }
        let unid = self.allocate(agent, rng);
        state.set_unid(unid);
        Some(unid)
    }

    /// Unmap `unid`, returning whoever it pointed at.  No ownership check.
    pub fn release(&mut self, unid: Unid) -> Option<AgentRef> {
        self.map.remove(&unid)
    }

    /// Release `unid` and, if its owner still exists, forget the cached id so
    /// the next `unid_for` allocates a new one.
    pub fn release_from(&mut self, table: &mut AgentTable, unid: Unid) -> Option<AgentRef> {
        let owner = self.release(unid)?;
        if let Some(state) = table.get_mut(owner) {
            if state.unid() == Some(unid) {
                state.clear_unid();
            }
        }
        Some(owner)
    }

    /// The agent `unid` was allocated for, if it is still mapped.  The agent
    /// itself may since have died; resolve the result through the table.
    pub fn lookup(&self, unid: Unid) -> Option<AgentRef> {
        self.map.get(&unid).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
