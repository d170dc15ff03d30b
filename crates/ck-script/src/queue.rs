//! `ScriptEventQueue` — pending script invocations, drained once per tick.
//!
//! # Drain semantics
//!
//! [`drain_all`](ScriptEventQueue::drain_all) takes the whole backlog and
//! leaves the queue empty.  Anything enqueued while that batch is being
//! dispatched lands in the fresh queue and waits for the next tick's drain,
//! so a script that raises an event on itself cannot loop within one tick.

use std::collections::VecDeque;

use ck_core::{AgentRef, ScriptNo, ScriptValue};

/// One queued invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptEvent {
    pub selector: ScriptNo,
    /// Weak; re-checked at drain time.
    pub target:   AgentRef,
    /// Weak; `AgentRef::NULL` when unattributed.
    pub origin:   AgentRef,
    pub p0:       ScriptValue,
    pub p1:       ScriptValue,
}

#[derive(Default, Debug)]
pub struct ScriptEventQueue {
    pending:  VecDeque<ScriptEvent>,
    /// Events ever enqueued; monotonically increasing.
    enqueued: u64,
}

impl ScriptEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the tail.
    ///
    /// # Panics
    ///
    /// If `target` is null.
    pub fn enqueue(
        &mut self,
        selector: ScriptNo,
        target:   AgentRef,
        origin:   AgentRef,
        p0:       ScriptValue,
        p1:       ScriptValue,
    ) {
        self.push(ScriptEvent { selector, target, origin, p0, p1 });
    }

    /// Like [`enqueue`](Self::enqueue) with a prebuilt event.
    pub fn push(&mut self, event: ScriptEvent) {
        assert!(!event.target.is_null(), "script event {} queued against a null target", event.selector);
        self.pending.push_back(event);
        self.enqueued += 1;
    }

    /// Take every pending event in FIFO order, leaving the queue empty.
    pub fn drain_all(&mut self) -> VecDeque<ScriptEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn total_enqueued(&self) -> u64 {
        self.enqueued
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptEvent> + '_ {
        self.pending.iter()
    }
}
