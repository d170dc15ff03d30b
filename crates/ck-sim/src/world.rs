//! The `World` struct and its tick loop.

use std::path::{Path, PathBuf};

use ck_agent::{AgentState, AgentTable, UnidRegistry};
use ck_behavior::{BehaviorModel, Intent, TickContext};
use ck_core::{AgentRef, ScriptNo, ScriptValue, SimClock, SimConfig, SimRng, Tick, Unid};
use ck_script::{
    discover_bootstrap, InterpreterPool, ScriptCompiler, ScriptEngine, ScriptEnv, ScriptError,
    ScriptEvent, ScriptEventQueue, ScriptResult, Scriptorium,
};
use ck_spatial::{Camera, HitQuery, MetaRoomMap, PartRef, ZOrderIndex};

use crate::{Frame, Renderable, Renderer, SimObserver, SimResult};

// ── Reports ───────────────────────────────────────────────────────────────────

/// Counters for one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick:              Tick,
    /// Agents whose update ran (ok or not).
    pub agents_ticked:     usize,
    pub update_faults:     usize,
    /// Events whose script ran, including ones that faulted.
    pub events_dispatched: usize,
    /// Target dead or dying at drain time.
    pub events_dropped:    usize,
    /// Refused by the target's `should_fire`.
    pub events_gated:      usize,
    /// No script installed for the target's classifier and event number.
    pub events_unhandled:  usize,
    pub script_faults:     usize,
    /// Agents on the kill list when the kill drain began.
    pub agents_flagged:    usize,
    pub agents_destroyed:  usize,
}

impl TickReport {
    fn new(tick: Tick) -> Self {
        Self { tick, ..Self::default() }
    }
}

/// Result of one [`World::tick`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Ran(TickReport),
    /// The world has quit.  Nothing ran and nothing ever will.
    Stopped,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub executed: usize,
    pub failed:   usize,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// The simulation context: every kernel component, owned in one place.
///
/// Fields drop in declaration order, so the agents go before the pool and
/// script table their events ran on.
///
/// Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct World<B: BehaviorModel, E: ScriptEngine> {
    pub config:    SimConfig,
    pub clock:     SimClock,

    agents:        AgentTable,
    unids:         UnidRegistry,
    zorder:        ZOrderIndex,
    events:        ScriptEventQueue,

    /// Installed scripts, looked up per event by target classifier.
    pub scripts:   Scriptorium<E::Script>,
    pool:          InterpreterPool<E>,

    pub metarooms: MetaRoomMap,
    pub camera:    Camera,

    /// Called once per live agent per tick.
    pub behavior:  B,

    /// UNID sampling only.
    rng:           SimRng,
    /// Handed to `BehaviorModel::tick`.
    behavior_rng:  SimRng,

    pointer:       Option<AgentRef>,
    quitting:      bool,
    saving:        bool,
    stopped:       bool,

    // Reused per tick / frame.
    order_buf:     Vec<AgentRef>,
    render_buf:    Vec<Renderable>,
}

impl<B: BehaviorModel, E: ScriptEngine> World<B, E> {
    pub(crate) fn new(
        config:    SimConfig,
        behavior:  B,
        engine:    E,
        scripts:   Scriptorium<E::Script>,
        metarooms: MetaRoomMap,
    ) -> Self {
        let mut rng = SimRng::new(config.seed);
        let behavior_rng = rng.child(1);
        Self {
            clock: config.make_clock(),
            config,
            agents: AgentTable::new(),
            unids: UnidRegistry::new(),
            zorder: ZOrderIndex::new(),
            events: ScriptEventQueue::new(),
            scripts,
            pool: InterpreterPool::new(engine),
            metarooms,
            camera: Camera::new(),
            behavior,
            rng,
            behavior_rng,
            pointer: None,
            quitting: false,
            saving: false,
            stopped: false,
            order_buf: Vec::new(),
            render_buf: Vec::new(),
        }
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Advance the world by exactly one step.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) -> TickOutcome {
        let now = self.clock.current_tick;
        if self.stopped {
            return TickOutcome::Stopped;
        }

        // ── ⓪ Flags ───────────────────────────────────────────────────────
        if self.quitting {
            self.stopped = true;
            log::info!("tick={now} world: quit requested, stopping");
            observer.on_quit(now);
            return TickOutcome::Stopped;
        }
        if self.saving {
            self.saving = false;
            log::info!("tick={now} world: save requested");
            observer.on_save_requested(now);
        }

        observer.on_tick_start(now);
        let mut report = TickReport::new(now);

        self.update_agents(now, &mut report, observer);
        self.drain_events(now, &mut report, observer);
        self.drain_kills(now, &mut report, observer);

        log::debug!(
            "tick={now} world: ticked={} dispatched={} dropped={} destroyed={} faults={}",
            report.agents_ticked,
            report.events_dispatched,
            report.events_dropped,
            report.agents_destroyed,
            report.update_faults + report.script_faults,
        );
        observer.on_tick_end(now, &report);
        self.clock.advance();
        TickOutcome::Ran(report)
    }

    /// Run up to `n` ticks, stopping early if the world stops.  Returns how
    /// many ran.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> u64 {
        let mut ran = 0;
        for _ in 0..n {
            match self.tick(observer) {
                TickOutcome::Ran(_) => ran += 1,
                TickOutcome::Stopped => break,
            }
        }
        ran
    }

    /// Run until `config.end_tick()` or until the world stops.  With
    /// `total_ticks == 0` only a quit ends the run.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> u64 {
        let mut ran = 0;
        loop {
            if self.config.end_tick().is_some_and(|end| self.clock.current_tick >= end) {
                break;
            }
            match self.tick(observer) {
                TickOutcome::Ran(_) => ran += 1,
                TickOutcome::Stopped => break,
            }
        }
        ran
    }

    // ── ① Update ──────────────────────────────────────────────────────────

    fn update_agents<O: SimObserver>(&mut self, now: Tick, report: &mut TickReport, observer: &mut O) {
        let mut order = std::mem::take(&mut self.order_buf);
        order.clear();
        order.extend_from_slice(self.agents.order());

        let live = self.agents.len() - self.agents.kill_list().len();
        let ctx = TickContext::new(now, self.clock.tick_duration_ms, self.pointer, live);

        for &agent in &order {
            // Flagged earlier this tick (or by a previous tick's script).
            let Some(state) = self.agents.resolve_mut(agent) else {
                continue;
            };
            report.agents_ticked += 1;
            match self.behavior.tick(agent, state, &ctx, &mut self.behavior_rng) {
                Ok(intents) => self.apply_intents(intents),
                Err(e) => {
                    report.update_faults += 1;
                    log::warn!("tick={now} world: update of {agent} failed: {e}");
                    observer.on_agent_fault(now, agent, &e);
                }
            }
        }

        self.order_buf = order;
    }

    // ── ② Events ──────────────────────────────────────────────────────────

    fn drain_events<O: SimObserver>(&mut self, now: Tick, report: &mut TickReport, observer: &mut O) {
        for event in self.events.drain_all() {
            let ScriptEvent { selector, target, origin, p0, p1 } = event;

            let Some(state) = self.agents.resolve(target) else {
                report.events_dropped += 1;
                log::trace!("tick={now} world: dropped {selector} for dead {target}");
                continue;
            };
            if !self.behavior.should_fire(target, state, selector) {
                report.events_gated += 1;
                continue;
            }
            let Some(script) = self.scripts.find(state.classifier, selector) else {
                report.events_unhandled += 1;
                continue;
            };

            report.events_dispatched += 1;
            if let Err(e) = self.run_script(Some(target), origin, p0, p1, &script) {
                report.script_faults += 1;
                log::warn!("tick={now} world: {selector} on {target} failed: {e}");
                observer.on_script_fault(now, target, selector, &e);
            }
        }
    }

    /// Acquire, run once, release, then apply whatever the script emitted
    /// (also on failure).
    fn run_script(
        &mut self,
        owner:  Option<AgentRef>,
        from:   AgentRef,
        p0:     ScriptValue,
        p1:     ScriptValue,
        script: &E::Script,
    ) -> ScriptResult<()> {
        let now = self.clock.current_tick;
        let id = self.pool.acquire();

        let (result, intents) = match owner {
            Some(agent) => match self.agents.resolve_mut(agent) {
                Some(state) => {
                    state.bind_interpreter(id);
                    let mut env = ScriptEnv::for_agent(agent, state, now);
                    let result = self.pool.run_on(id, Some(agent), from, p0, p1, script, &mut env);
                    let intents = env.into_intents();
                    state.unbind_interpreter();
                    (result, intents)
                }
                None => (Err(ScriptError::DeadAgent(agent)), Vec::new()),
            },
            None => {
                let mut env = ScriptEnv::detached(now);
                let result = self.pool.run_on(id, None, from, p0, p1, script, &mut env);
                (result, env.into_intents())
            }
        };

        self.pool.release(id);
        self.apply_intents(intents);
        result
    }

    // ── ③ Kills ───────────────────────────────────────────────────────────

    fn drain_kills<O: SimObserver>(&mut self, now: Tick, report: &mut TickReport, observer: &mut O) {
        report.agents_flagged = self.agents.kill_list().len();
        for (agent, state) in self.agents.drain_kills() {
            self.zorder.remove_agent(agent);
            if self.pointer == Some(agent) {
                self.pointer = None;
            }
            observer.on_agent_destroyed(now, agent, &state);
            report.agents_destroyed += 1;
        }
        debug_assert_eq!(report.agents_flagged, report.agents_destroyed);
    }

    // ── Intents ───────────────────────────────────────────────────────────

    fn apply_intents(&mut self, intents: Vec<Intent>) {
        for intent in intents {
            match intent {
                Intent::QueueScript { selector, target, origin, p0, p1 } => {
                    self.events.enqueue(selector, target, origin, p0, p1);
                }
                Intent::Kill(agent) => {
                    self.agents.mark_dying(agent);
                }
                Intent::SetZOrder { agent, zorder } => {
                    self.set_zorder(agent, zorder);
                }
                Intent::Quit => self.quitting = true,
                Intent::Save => self.saving = true,
            }
        }
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Add an agent and register its parts for drawing and hit-testing.
    pub fn spawn(&mut self, state: AgentState) -> AgentRef {
        let agent = self.agents.insert(state);
        if let Some(state) = self.agents.get(agent) {
            for part in state.parts.iter() {
                self.zorder.insert(PartRef::new(agent, part.id), state.part_zorder(part.z_offset));
            }
        }
        agent
    }

    /// Flag `agent` as dying; it is destroyed at the end of the next tick's
    /// kill drain.  `false` if it is already dying or gone.
    pub fn kill(&mut self, agent: AgentRef) -> bool {
        self.agents.mark_dying(agent)
    }

    /// Move `agent` and all its parts to base rank `zorder`.
    pub fn set_zorder(&mut self, agent: AgentRef, zorder: i32) -> bool {
        let Some(state) = self.agents.resolve_mut(agent) else {
            return false;
        };
        state.zorder = zorder;
        for part in state.parts.iter() {
            self.zorder.set_rank(PartRef::new(agent, part.id), state.part_zorder(part.z_offset));
        }
        true
    }

    pub fn agent(&self, agent: AgentRef) -> Option<&AgentState> {
        self.agents.resolve(agent)
    }

    /// Mutable access for drivers between ticks (moving agents, toggling
    /// flags).  Population and liveness only change through the world.
    pub fn agent_mut(&mut self, agent: AgentRef) -> Option<&mut AgentState> {
        self.agents.resolve_mut(agent)
    }

    pub fn agents(&self) -> &AgentTable {
        &self.agents
    }

    pub fn zorder(&self) -> &ZOrderIndex {
        &self.zorder
    }

    pub fn population(&self) -> usize {
        self.agents.len()
    }

    // ── Events ────────────────────────────────────────────────────────────

    /// Raise an event from outside (input, collisions).  It runs in the next
    /// tick's drain.
    ///
    /// # Panics
    ///
    /// If `target` is null.
    pub fn queue_script(
        &mut self,
        selector: ScriptNo,
        target:   AgentRef,
        origin:   AgentRef,
        p0:       ScriptValue,
        p1:       ScriptValue,
    ) {
        self.events.enqueue(selector, target, origin, p0, p1);
    }

    pub fn events(&self) -> &ScriptEventQueue {
        &self.events
    }

    pub fn pool(&self) -> &InterpreterPool<E> {
        &self.pool
    }

    /// Run `script` once, synchronously, outside the tick loop.  Effects it
    /// emits are applied immediately (queued events wait for the next tick).
    pub fn execute_script(&mut self, script: &E::Script, owner: Option<AgentRef>) -> ScriptResult<()> {
        self.run_script(owner, AgentRef::NULL, ScriptValue::Null, ScriptValue::Null, script)
    }

    // ── Hit-testing ───────────────────────────────────────────────────────

    /// Front-most part at world `(x, y)`.  The pointer agent never matches.
    pub fn part_at(&self, x: i32, y: i32, obey_all_transparency: bool, needs_mouseable: bool) -> Option<PartRef> {
        let query = HitQuery::at(x, y)
            .obey_all_transparency(obey_all_transparency)
            .needs_mouseable(needs_mouseable)
            .excluding(self.pointer);
        self.zorder.part_at(&self.agents, &query)
    }

    pub fn agent_at(&self, x: i32, y: i32, obey_all_transparency: bool, needs_mouseable: bool) -> Option<AgentRef> {
        self.part_at(x, y, obey_all_transparency, needs_mouseable).map(|p| p.agent)
    }

    pub fn set_pointer(&mut self, pointer: Option<AgentRef>) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> Option<AgentRef> {
        self.pointer
    }

    // ── UNIDs ─────────────────────────────────────────────────────────────

    /// The agent's UNID, allocated on first request.  `None` if the agent is
    /// dead or dying.
    pub fn unid_of(&mut self, agent: AgentRef) -> Option<Unid> {
        self.unids.unid_for(&mut self.agents, agent, &mut self.rng)
    }

    /// The live agent `unid` maps to.
    pub fn lookup_unid(&self, unid: Unid) -> Option<AgentRef> {
        self.unids.lookup(unid).filter(|&a| self.agents.is_alive(a))
    }

    /// Unmap `unid`.  Agents do not release their UNIDs when they die.
    pub fn release_unid(&mut self, unid: Unid) -> Option<AgentRef> {
        self.unids.release_from(&mut self.agents, unid)
    }

    pub fn unids(&self) -> &UnidRegistry {
        &self.unids
    }

    // ── Flags ─────────────────────────────────────────────────────────────

    /// Stop at the start of the next tick.
    pub fn request_quit(&mut self) {
        self.quitting = true;
    }

    /// Hand off to persistence at the start of the next tick.
    pub fn request_save(&mut self) {
        self.saving = true;
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    /// Hand the current frame to `renderer`.
    ///
    /// Falls back to the map's fallback metaroom if the camera's room is
    /// gone.  [`SimError::NoMetaRooms`][crate::SimError::NoMetaRooms] if
    /// there is none; drivers treat that as fatal.
    pub fn render<R: Renderer>(&mut self, renderer: &mut R) -> SimResult<()> {
        let now = self.clock.current_tick;
        let metaroom = match self.camera.resolve(&self.metarooms) {
            Ok(room) => room,
            Err(e) => {
                log::error!("tick={now} world: cannot render: {e}");
                return Err(e.into());
            }
        };

        self.render_buf.clear();
        for (zorder, part_ref) in self.zorder.iter_back_to_front() {
            let Some(owner) = self.agents.resolve(part_ref.agent) else {
                continue;
            };
            let Some(part) = owner.parts.get(part_ref.part) else {
                continue;
            };
            self.render_buf.push(Renderable {
                part: part_ref,
                zorder,
                rect: part.local_rect().translated(owner.position),
            });
        }

        renderer.present(&Frame {
            tick:        now,
            offset:      self.camera.offset(),
            metaroom,
            renderables: &self.render_buf,
        });
        Ok(())
    }

    // ── Bootstrap ─────────────────────────────────────────────────────────

    /// Discover and run the bootstrap sets under `data_dirs`.  Never fails;
    /// problems are logged and reported to `observer`.
    pub fn bootstrap<C, O>(
        &mut self,
        compiler:  &mut C,
        data_dirs: &[PathBuf],
        switcher:  bool,
        observer:  &mut O,
    ) -> BootstrapReport
    where
        C: ScriptCompiler<Script = E::Script>,
        O: SimObserver,
    {
        match discover_bootstrap(data_dirs, switcher) {
            Ok(files) => self.run_bootstrap(compiler, &files, observer),
            Err(e) => {
                log::error!("bootstrap: discovery failed: {e}");
                BootstrapReport::default()
            }
        }
    }

    /// Compile, install and run each file's installer, in order.  A failing
    /// file is logged and skipped.
    pub fn run_bootstrap<C, O>(&mut self, compiler: &mut C, files: &[PathBuf], observer: &mut O) -> BootstrapReport
    where
        C: ScriptCompiler<Script = E::Script>,
        O: SimObserver,
    {
        let mut report = BootstrapReport::default();
        for path in files {
            log::info!("bootstrap: executing {}", path.display());
            match self.execute_file(compiler, path) {
                Ok(()) => report.executed += 1,
                Err(e) => {
                    report.failed += 1;
                    log::error!("bootstrap: {} failed: {e}", path.display());
                    observer.on_bootstrap_failure(path, &e);
                }
            }
        }
        report
    }

    fn execute_file<C>(&mut self, compiler: &mut C, path: &Path) -> ScriptResult<()>
    where
        C: ScriptCompiler<Script = E::Script>,
    {
        let source = std::fs::read_to_string(path)?;
        let unit = compiler.compile(path, &source)?;
        let installed = self.scripts.install_all(unit.installs);
        log::debug!("bootstrap: {} installed {installed} script(s)", path.display());
        match unit.installer {
            Some(installer) => self.execute_script(&installer, None),
            None => Ok(()),
        }
    }
}
