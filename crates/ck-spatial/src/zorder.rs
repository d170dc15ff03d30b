//! `ZOrderIndex` — every renderable part, ordered front to back.
//!
//! # Ordering
//!
//! Entries are keyed by `(Reverse(rank), seq)`: higher rank sorts first
//! (front-most), and among equal ranks the part registered earlier wins.
//! `seq` is assigned once per part and survives re-ranking, so the
//! tie-break is a stable identity rather than an accident of insertion.
//!
//! # Hit-testing
//!
//! [`ZOrderIndex::part_at`] scans front to back and returns the first part
//! that accepts the point.  Owners are resolved through the `AgentTable`;
//! an owner that is dying (flagged but not yet drained) is skipped, so the
//! index never hands out a part whose agent is on its way out.
//!
//! Part rectangles are half-open, so a part `w` pixels wide answers for
//! exactly `w` columns; its right and bottom edges are not part of it.
//! A point whose offset from an owner overflows `i32` misses that owner.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use ck_agent::AgentTable;
use ck_core::{AgentRef, PartId, Point};

// ── Keys ──────────────────────────────────────────────────────────────────────

/// One part of one agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct PartRef {
    pub agent: AgentRef,
    pub part:  PartId,
}

impl PartRef {
    pub fn new(agent: AgentRef, part: PartId) -> Self {
        Self { agent, part }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
struct ZKey {
    rank: Reverse<i32>,
    seq:  u64,
}

// ── HitQuery ──────────────────────────────────────────────────────────────────

/// Parameters of a point pick.
#[derive(Copy, Clone, Debug)]
pub struct HitQuery {
    pub point:                 Point,
    /// Honour see-through pixels on every part, not just root parts.
    pub obey_all_transparency: bool,
    /// Only accept parts whose owner is mouseable.
    pub needs_mouseable:       bool,
    /// The pointer agent; never hit by its own queries.
    pub pointer:               Option<AgentRef>,
}

impl HitQuery {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            point:                 Point::new(x, y),
            obey_all_transparency: false,
            needs_mouseable:       false,
            pointer:               None,
        }
    }

    pub fn obey_all_transparency(mut self, yes: bool) -> Self {
        self.obey_all_transparency = yes;
        self
    }

    pub fn needs_mouseable(mut self, yes: bool) -> Self {
        self.needs_mouseable = yes;
        self
    }

    pub fn excluding(mut self, pointer: Option<AgentRef>) -> Self {
        self.pointer = pointer;
        self
    }
}

// ── ZOrderIndex ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct ZOrderIndex {
    entries:  BTreeMap<ZKey, PartRef>,
    keys:     FxHashMap<PartRef, ZKey>,
    by_agent: FxHashMap<AgentRef, Vec<PartId>>,
    next_seq: u64,
}

impl ZOrderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `part` at `rank`, or move it there if already present.
    pub fn insert(&mut self, part: PartRef, rank: i32) {
        if let Some(old) = self.keys.get(&part).copied() {
            self.rekey(part, old, rank);
            return;
        }
        let key = ZKey { rank: Reverse(rank), seq: self.next_seq };
        self.next_seq += 1;
        self.entries.insert(key, part);
        self.keys.insert(part, key);
        self.by_agent.entry(part.agent).or_default().push(part.part);
    }

    /// Change the rank of an existing part.  Returns `false` if absent.
    pub fn set_rank(&mut self, part: PartRef, rank: i32) -> bool {
        match self.keys.get(&part).copied() {
            Some(old) => {
                self.rekey(part, old, rank);
                true
            }
            None => false,
        }
    }

    fn rekey(&mut self, part: PartRef, old: ZKey, rank: i32) {
        if old.rank.0 == rank {
            return;
        }
        self.entries.remove(&old);
        let key = ZKey { rank: Reverse(rank), seq: old.seq };
        self.entries.insert(key, part);
        self.keys.insert(part, key);
    }

    pub fn remove(&mut self, part: PartRef) -> bool {
        let Some(key) = self.keys.remove(&part) else {
            return false;
        };
        self.entries.remove(&key);
        if let Some(parts) = self.by_agent.get_mut(&part.agent) {
            parts.retain(|&p| p != part.part);
            if parts.is_empty() {
                self.by_agent.remove(&part.agent);
            }
        }
        true
    }

    /// Remove every part owned by `agent`.  Returns how many were removed.
    pub fn remove_agent(&mut self, agent: AgentRef) -> usize {
        let Some(parts) = self.by_agent.remove(&agent) else {
            return 0;
        };
        for &part in &parts {
            if let Some(key) = self.keys.remove(&PartRef::new(agent, part)) {
                self.entries.remove(&key);
            }
        }
        parts.len()
    }

    pub fn rank_of(&self, part: PartRef) -> Option<i32> {
        self.keys.get(&part).map(|k| k.rank.0)
    }

    pub fn contains_agent(&self, agent: AgentRef) -> bool {
        self.by_agent.contains_key(&agent)
    }

    /// Parts registered for `agent`, in registration order.
    pub fn parts_of(&self, agent: AgentRef) -> &[PartId] {
        self.by_agent.get(&agent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(rank, part)` from front-most to back-most.
    pub fn iter_front_to_back(&self) -> impl DoubleEndedIterator<Item = (i32, PartRef)> + '_ {
        self.entries.iter().map(|(k, &p)| (k.rank.0, p))
    }

    /// `(rank, part)` in painter's order (back-most first).
    pub fn iter_back_to_front(&self) -> impl Iterator<Item = (i32, PartRef)> + '_ {
        self.iter_front_to_back().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The front-most part accepting `query`, if any.
    pub fn part_at(&self, agents: &AgentTable, query: &HitQuery) -> Option<PartRef> {
        for &entry in self.entries.values() {
            let Some(owner) = agents.resolve(entry.agent) else {
                continue;
            };
            let Some(part) = owner.parts.get(entry.part) else {
                continue;
            };

            // Too far from the owner to be inside any part.
            let Some(local) = query.point.relative_to(owner.position) else {
                continue;
            };
            if !part.local_rect().contains(local) {
                continue;
            }
            if query.pointer == Some(entry.agent) {
                continue;
            }
            if part.is_transparent()
                && (query.obey_all_transparency || part.is_root())
                && local.relative_to(part.offset).is_some_and(|p| part.transparent_at(p))
            {
                continue;
            }
            if query.needs_mouseable && !owner.mouseable {
                continue;
            }
            return Some(entry);
        }
        None
    }

    /// Owner of [`part_at`](Self::part_at)'s result.
    pub fn agent_at(&self, agents: &AgentTable, query: &HitQuery) -> Option<AgentRef> {
        self.part_at(agents, query).map(|p| p.agent)
    }
}
