//! `ck-behavior` — agent behavior model trait and intent types.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                           |
//! |-------------|--------------------------------------------------------------------|
//! | [`intent`]  | `Intent` enum (`QueueScript`, `Kill`, `SetZOrder`, `Quit`, `Save`) |
//! | [`context`] | `TickContext` — read-only tick facts shared by all agents          |
//! | [`model`]   | `BehaviorModel` trait                                              |
//! | [`noop`]    | `NoopBehavior` — agents that never act                             |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                               |
//!
//! # Design notes
//!
//! The update phase in ck-sim walks the live agents in spawn order.  Each
//! agent's `BehaviorModel::tick` may mutate that agent's own state
//! (position, variables, flags) and returns a list of [`Intent`]s for
//! everything that touches the rest of the world.  The orchestrator applies
//! those intents right after the call.  None of them change which agents
//! exist: a `Kill` only raises the `dying` flag, and destruction waits for
//! the kill drain at the end of the tick.

pub mod context;
pub mod error;
pub mod intent;
pub mod model;
pub mod noop;


pub use context::TickContext;
pub use error::{BehaviorError, BehaviorResult};
pub use intent::Intent;
pub use model::BehaviorModel;
pub use noop::NoopBehavior;
