//! Fluent builder for constructing a [`World`].

use ck_agent::AgentState;
use ck_behavior::BehaviorModel;
use ck_core::{Rect, SimConfig};
use ck_script::{ScriptEngine, Scriptorium};
use ck_spatial::MetaRoomMap;

use crate::{SimError, SimResult, World};

/// Fluent builder for [`World<B, E>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick length, seed, run length
/// - `B: BehaviorModel` — per-agent update and event gating
/// - `E: ScriptEngine` — builds interpreters for the pool
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                                  |
/// |-----------------------|------------------------------------------|
/// | `.metaroom(r, bg)`    | none (rendering then fails)              |
/// | `.scripts(s)`         | empty `Scriptorium`                      |
/// | `.agent(state)`       | no agents                                |
/// | `.pointer(state)`     | no pointer agent                         |
///
/// The camera starts in the first metaroom added.
pub struct WorldBuilder<B: BehaviorModel, E: ScriptEngine> {
    config:    SimConfig,
    behavior:  B,
    engine:    E,
    scripts:   Option<Scriptorium<E::Script>>,
    metarooms: Vec<(Rect, String)>,
    agents:    Vec<AgentState>,
    pointer:   Option<AgentState>,
}

impl<B: BehaviorModel, E: ScriptEngine> WorldBuilder<B, E> {
    pub fn new(config: SimConfig, behavior: B, engine: E) -> Self {
        Self {
            config,
            behavior,
            engine,
            scripts:   None,
            metarooms: Vec::new(),
            agents:    Vec::new(),
            pointer:   None,
        }
    }

    pub fn metaroom(mut self, bounds: Rect, background: impl Into<String>) -> Self {
        self.metarooms.push((bounds, background.into()));
        self
    }

    /// Scripts installed before any bootstrap runs.
    pub fn scripts(mut self, scripts: Scriptorium<E::Script>) -> Self {
        self.scripts = Some(scripts);
        self
    }

    /// Spawn `state` when the world is built, after the pointer.
    pub fn agent(mut self, state: AgentState) -> Self {
        self.agents.push(state);
        self
    }

    /// Spawn `state` first and make it the pointer agent, which hit-tests
    /// never return.
    pub fn pointer(mut self, state: AgentState) -> Self {
        self.pointer = Some(state);
        self
    }

    /// Validate inputs and return a world at tick 0.
    pub fn build(self) -> SimResult<World<B, E>> {
        if self.config.tick_duration_ms == 0 {
            return Err(SimError::Config("tick_duration_ms must be positive".into()));
        }

        let mut map = MetaRoomMap::new();
        for (bounds, background) in self.metarooms {
            map.add(bounds, background)?;
        }

        let mut world = World::new(
            self.config,
            self.behavior,
            self.engine,
            self.scripts.unwrap_or_default(),
            map,
        );

        if let Some(room) = world.metarooms.fallback() {
            world.camera.go_to_metaroom(room);
        }
        if let Some(state) = self.pointer {
            let pointer = world.spawn(state);
            world.set_pointer(Some(pointer));
        }
        for state in self.agents {
            world.spawn(state);
        }

        log::info!(
            "world: built with {} agent(s), {} metaroom(s), seed {}",
            world.population(),
            world.metarooms.len(),
            world.config.seed,
        );
        Ok(world)
    }
}
