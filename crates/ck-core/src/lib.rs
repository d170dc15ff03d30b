//! `ck-core` — foundational types for the `rust_ck` simulation kernel.
//!
//! This crate is a dependency of every other `ck-*` crate.  It has no `ck-*`
//! dependencies and only `rand` externally, plus optional `serde`.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `Unid`, `PartId`, `ScriptNo`, `AgentRef`…  |
//! | [`geometry`]    | `Point`, `Rect`                                       |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` (world-level, seeded)                        |
//! | [`value`]       | `ScriptValue` — the scalar carried by events and vars |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, geometry, config.   |

pub mod geometry;
pub mod ids;
pub mod rng;
pub mod time;
pub mod value;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geometry::{Point, Rect};
pub use ids::{AgentId, AgentRef, InterpreterId, MetaRoomId, PartId, ScriptNo, Unid};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
pub use value::ScriptValue;
