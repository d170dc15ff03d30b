//! Per-agent state owned by the `AgentTable`.

use std::fmt;

use ck_core::{InterpreterId, Point, Rect, ScriptValue, Unid};

use crate::PartSet;

/// Number of object variables (`OV00`–`OV99`) each agent carries.
pub const OBJECT_VAR_COUNT: usize = 100;

// ── Classifier ────────────────────────────────────────────────────────────────

/// Family / genus / species triple.  Scripts are installed per classifier and
/// `0` in any position acts as a wildcard at lookup time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classifier {
    pub family:  u8,
    pub genus:   u8,
    pub species: u16,
}

impl Classifier {
    pub const fn new(family: u8, genus: u8, species: u16) -> Self {
        Self { family, genus, species }
    }

    /// Lookup chain from most to least specific:
    /// `f g s`, `f g 0`, `f 0 0`, `0 0 0`.
    pub fn fallbacks(self) -> [Classifier; 4] {
        [
            self,
            Classifier::new(self.family, self.genus, 0),
            Classifier::new(self.family, 0, 0),
            Classifier::new(0, 0, 0),
        ]
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.family, self.genus, self.species)
    }
}

// ── AgentState ────────────────────────────────────────────────────────────────

/// Everything the kernel knows about one agent.
///
/// Position, z-order and flags are public so behavior models and scripts can
/// move the agent around.  `dying`, the UNID and the bound interpreter are
/// only changed through the table / orchestrator so their invariants hold.
#[derive(Clone, Debug)]
pub struct AgentState {
    pub classifier: Classifier,
    /// World position of the agent's origin (its root part's offset is
    /// relative to this).
    pub position:   Point,
    /// Base draw / hit-test rank.  Higher is closer to the viewer.
    pub zorder:     i32,
    pub mouseable:  bool,
    pub parts:      PartSet,
    /// Object variables `OV00`–`OV99`.
    pub vars:       Vec<ScriptValue>,

    pub(crate) dying:       bool,
    pub(crate) unid:        Option<Unid>,
    pub(crate) interpreter: Option<InterpreterId>,
}

impl AgentState {
    pub(crate) fn new(classifier: Classifier, position: Point, zorder: i32, parts: PartSet) -> Self {
        Self {
            classifier,
            position,
            zorder,
            mouseable: false,
            parts,
            vars: vec![ScriptValue::Null; OBJECT_VAR_COUNT],
            dying: false,
            unid: None,
            interpreter: None,
        }
    }

    /// Set once by the table when the agent is queued for destruction.
    #[inline]
    pub fn is_dying(&self) -> bool {
        self.dying
    }

    #[inline]
    pub fn unid(&self) -> Option<Unid> {
        self.unid
    }

    pub(crate) fn set_unid(&mut self, unid: Unid) {
        self.unid = Some(unid);
    }

    pub(crate) fn clear_unid(&mut self) {
        self.unid = None;
    }

    /// The interpreter currently executing an event against this agent.
    #[inline]
    pub fn interpreter(&self) -> Option<InterpreterId> {
        self.interpreter
    }

    /// Record that `id` is running an event against this agent.
    ///
    /// # Panics
    /// Panics if another interpreter is already bound.  Events
    /// against one agent never nest.
    pub fn bind_interpreter(&mut self, id: InterpreterId) {
        assert!(
            self.interpreter.is_none(),
            "agent already bound to {:?}",
            self.interpreter
        );
        self.interpreter = Some(id);
    }

    pub fn unbind_interpreter(&mut self) -> Option<InterpreterId> {
        self.interpreter.take()
    }

    /// Width and height of the root part.
    pub fn size(&self) -> (u32, u32) {
        let root = self.parts.root();
        (root.width, root.height)
    }

    /// World-space bounding rectangle of the root part.
    pub fn bounds(&self) -> Rect {
        self.parts.root().local_rect().translated(self.position)
    }

    /// Draw rank of one of this agent's parts.
    #[inline]
    pub fn part_zorder(&self, z_offset: i32) -> i32 {
        self.zorder.saturating_add(z_offset)
    }

    pub fn var(&self, n: usize) -> Option<&ScriptValue> {
        self.vars.get(n)
    }

    pub fn set_var(&mut self, n: usize, value: ScriptValue) -> bool {
        match self.vars.get_mut(n) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}
