//! Read-only tick facts passed to every behavior callback.

use ck_core::{AgentRef, Tick};

/// Built once per tick by ck-sim and shared across all agent updates.
///
/// Holds no borrow of the agent table: the agent being updated is handed to
/// the model separately as `&mut AgentState`, and cross-agent effects go
/// through [`Intent`][crate::Intent]s.
#[derive(Copy, Clone, Debug)]
pub struct TickContext {
    /// Tick being processed.
    pub tick: Tick,

    /// How many milliseconds one tick represents.
    pub tick_duration_ms: u32,

    /// The pointer agent, if the world has one.
    pub pointer: Option<AgentRef>,

    /// Agents alive and not dying at the start of the update phase.  Deaths
    /// flagged during the phase are not subtracted.
    pub population: usize,
}

impl TickContext {
    #[inline]
    pub fn new(tick: Tick, tick_duration_ms: u32, pointer: Option<AgentRef>, population: usize) -> Self {
        Self { tick, tick_duration_ms, pointer, population }
    }
}
