//! `ck-sim` — tick orchestrator for the rust_ck kernel.
//!
//! # Tick
//!
//! ```text
//! World::tick():
//!   ⓪ Flags   — quit requested → stop for good (nothing below runs);
//!               save requested → SimObserver::on_save_requested, carry on.
//!   ① Update  — BehaviorModel::tick for every live agent, spawn order.
//!               Intents applied right after each call: queue events,
//!               flag deaths, re-rank.  Membership never changes here.
//!   ② Events  — drain the ScriptEventQueue once, FIFO.  Per event:
//!                 target dead/dying       → drop
//!                 should_fire == false    → drop
//!                 no installed script     → drop
//!                 else acquire interpreter, bind, run, unbind, release.
//!               Events raised by scripts wait for the next tick.
//!   ③ Kills   — drain the kill list, FIFO: unregister from the z-order
//!               index, remove from the table, drop.
//!   ④ Clock   — advance one tick.
//! ```
//!
//! A failing update or script is reported through [`SimObserver`] and a
//! `log::warn!` line; the tick carries on.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ck_behavior::NoopBehavior;
//! use ck_core::{Rect, SimConfig};
//! use ck_script::NativeEngine;
//! use ck_sim::{NoopObserver, WorldBuilder};
//!
//! let mut world = WorldBuilder::new(SimConfig::default(), NoopBehavior, NativeEngine::new())
//!     .metaroom(Rect::new(0, 0, 800, 600), "garden")
//!     .build()?;
//! world.run_ticks(100, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod render;
pub mod world;


pub use builder::WorldBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use render::{Frame, Renderable, Renderer};
pub use world::{BootstrapReport, TickOutcome, TickReport, World};
