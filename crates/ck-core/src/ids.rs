//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  `AgentId` is a slot index into the
//! agent arena; on its own it is *not* a safe reference because slots are
//! reused.  Anything that outlives a tick must hold an [`AgentRef`] instead.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — the inner type's `MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Slot index of an agent in the `AgentTable` arena.
    pub struct AgentId(u32);
}

typed_id! {
    /// Process-unique agent identifier handed out on demand by the UNID
    /// registry.  Unrelated to the arena slot.
    pub struct Unid(u32);
}

typed_id! {
    /// Part number within an agent.  Part 0 is always the root part.
    pub struct PartId(u16);
}

typed_id! {
    /// Event / script selector (e.g. 1 = activate, 9 = timer).
    pub struct ScriptNo(u16);
}

typed_id! {
    /// Metaroom identifier as registered with the world map.
    pub struct MetaRoomId(u32);
}

typed_id! {
    /// Serial number of a pooled interpreter instance.  Stable for the life
    /// of the pool, so reuse is observable.
    pub struct InterpreterId(u32);
}

impl PartId {
    /// The primary part every agent owns.
    pub const ROOT: PartId = PartId(0);
}

// ── AgentRef ──────────────────────────────────────────────────────────────────

/// A weak, non-owning reference to an agent.
///
/// Pairs the arena slot with the generation the slot had when the agent was
/// spawned.  When the agent is destroyed its slot's generation is bumped, so
/// every outstanding `AgentRef` to it stops resolving, and never aliases
/// whatever agent reuses the slot.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentRef {
    pub id:         AgentId,
    pub generation: u32,
}

impl AgentRef {
    /// A reference that never resolves.
    pub const NULL: AgentRef = AgentRef { id: AgentId::INVALID, generation: 0 };

    #[inline]
    pub fn new(id: AgentId, generation: u32) -> Self {
        Self { id, generation }
    }

    #[inline]
    pub fn is_null(self) -> bool {
        !self.id.is_valid()
    }
}

impl Default for AgentRef {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for AgentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("AgentRef(null)")
        } else {
            write!(f, "AgentRef({}#{})", self.id.0, self.generation)
        }
    }
}
