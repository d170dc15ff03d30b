//! `ck-agent` — agent storage for the `rust_ck` kernel.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`agent`]     | `AgentState`, `Classifier`                                |
//! | [`part`]      | `Part`, `PartSet` (simple / compound), `AlphaMask`        |
//! | [`builder`]   | `AgentBuilder` (fluent construction + validation)         |
//! | [`table`]     | `AgentTable` — generational arena, spawn order, kill list |
//! | [`unid`]      | `UnidRegistry` — rejection-sampled unique ids             |
//! | [`error`]     | `AgentError`, `AgentResult<T>`                            |
//!
//! # Ownership
//!
//! `AgentTable` is the only owner of agent state.  Everything else (event
//! queue entries, the UNID map, spatial index entries, script variables)
//! holds an `AgentRef` and re-resolves it through the table, so a destroyed
//! agent simply stops resolving.

pub mod agent;
pub mod builder;
pub mod error;
pub mod part;
pub mod table;
pub mod unid;

#[cfg(test)]
mod tests;

pub use agent::{AgentState, Classifier, OBJECT_VAR_COUNT};
pub use builder::AgentBuilder;
pub use error::{AgentError, AgentResult};
pub use part::{AlphaMask, Part, PartSet};
pub use table::AgentTable;
pub use unid::UnidRegistry;
