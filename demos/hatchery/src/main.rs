//! hatchery — smallest end-to-end run of the rust_ck kernel.
//!
//! Twelve critters wander two metarooms.  Each one ages every tick, raises a
//! timer event on itself at a fixed interval, and dies of old age.  A pointer
//! agent "clicks" on whatever is under it every few ticks, which pops the
//! critter it hit.  Once the pointer is alone it asks the world to quit.
//!
//! ```text
//! hatchery [config.json] [data_dir ...]
//! ```
//!
//! `config.json` is a serialized `SimConfig` (missing fields take their
//! defaults).  Any data directories are searched for bootstrap sets, whose
//! manifests may use the script bodies registered below.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use ck_agent::{AgentBuilder, AgentState, Classifier};
use ck_behavior::{BehaviorModel, BehaviorResult, Intent, TickContext};
use ck_core::{AgentRef, Point, Rect, ScriptNo, ScriptValue, SimConfig, SimRng, Tick};
use ck_script::{NativeCompiler, NativeEngine, NativeScript, ScriptCompiler, ScriptError};
use ck_sim::{Frame, Renderer, SimError, SimObserver, TickOutcome, TickReport, WorldBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const CRITTER_COUNT:  usize = 12;
const SEED:           u64   = 42;
const TICK_MS:        u32   = 50;
const TOTAL_TICKS:    u64   = 600;
const TIMER_INTERVAL: i32   = 20;
const LIFESPAN:       std::ops::Range<i32> = 150..450;
const CLICK_INTERVAL: u64   = 37;
const SAVE_AT:        Tick  = Tick(300);

const POINTER:  Classifier = Classifier::new(2, 1, 1);
const NORN:     Classifier = Classifier::new(4, 1, 1);
const ETTIN:    Classifier = Classifier::new(4, 1, 3);

const ACTIVATE: ScriptNo = ScriptNo(1);
const TIMER:    ScriptNo = ScriptNo(9);

// Object variable slots.
const OV_AGE:      usize = 0;
const OV_TIMERS:   usize = 1;
const OV_LIFESPAN: usize = 2;

// `scrp family genus species event body` lines; `0` is a wildcard.
const MANIFEST: &str = "\
* critters share one timer; norns and ettins pop differently\n\
scrp 4 1 0 9 timer\n\
scrp 4 1 1 1 pop\n\
scrp 4 1 3 1 shrug\n\
inst hello\n\
";

// ── Behavior model ────────────────────────────────────────────────────────────

/// Age, wander, raise the timer, and die when the lifespan runs out.
struct Critters;

impl BehaviorModel for Critters {
    fn tick(
        &self,
        agent: AgentRef,
        state: &mut AgentState,
        ctx:   &TickContext,
        rng:   &mut SimRng,
    ) -> BehaviorResult<Vec<Intent>> {
        if state.classifier == POINTER {
            // Only the pointer is left.
            return Ok(if ctx.population == 1 { vec![Intent::Quit] } else { vec![] });
        }

        let age = state.var(OV_AGE).and_then(ScriptValue::as_integer).unwrap_or(0) + 1;
        state.set_var(OV_AGE, age.into());
        state.position = state.position.offset(rng.gen_range(-2..=2), rng.gen_range(-1..=1));

        let lifespan = state.var(OV_LIFESPAN).and_then(ScriptValue::as_integer).unwrap_or(LIFESPAN.end);
        if age >= lifespan {
            return Ok(vec![Intent::Kill(agent)]);
        }
        if age % TIMER_INTERVAL == 0 {
            return Ok(vec![Intent::script(TIMER, agent)]);
        }
        Ok(vec![])
    }

    fn should_fire(&self, _agent: AgentRef, state: &AgentState, selector: ScriptNo) -> bool {
        // Newborns ignore clicks.
        selector != ACTIVATE || state.var(OV_AGE).and_then(ScriptValue::as_integer).unwrap_or(0) > 10
    }
}

// ── Script library ────────────────────────────────────────────────────────────

fn script_library() -> NativeCompiler {
    NativeCompiler::new()
        .with(NativeScript::new("timer", |_frame, env| {
            let owner = env.owner().ok_or(ScriptError::NoOwner)?;
            let timers = env.var(OV_TIMERS)?.as_integer().unwrap_or(0) + 1;
            env.set_var(OV_TIMERS, timers.into())?;
            // Older critters creep toward the front.
            env.set_zorder(owner, 1000 + timers)
        }))
        .with(NativeScript::new("pop", |frame, env| {
            log::info!("tick={} hatchery: {} popped by {}", env.tick(), env.owner().unwrap_or_default(), frame.from);
            env.kill_self()
        }))
        .with(NativeScript::new("shrug", |frame, env| {
            let from = frame.from;
            frame.set_local(0, ScriptValue::Agent(from))?;
            log::debug!("tick={} hatchery: ettin shrugged off a click", env.tick());
            Ok(())
        }))
        .with(NativeScript::new("hello", |_frame, env| {
            log::info!("tick={} hatchery: scripts installed", env.tick());
            Ok(())
        }))
}

// ── Collaborators ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tally {
    ticks:         u64,
    events:        usize,
    update_faults: usize,
    script_faults: usize,
    deaths:        usize,
    saves:         Vec<Tick>,
    quit_at:       Option<Tick>,
    boot_failures: usize,
}

impl SimObserver for Tally {
    fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
        self.ticks += 1;
        self.events += report.events_dispatched;
        self.update_faults += report.update_faults;
        self.script_faults += report.script_faults;
    }

    fn on_agent_destroyed(&mut self, _tick: Tick, _agent: AgentRef, _state: &AgentState) {
        self.deaths += 1;
    }

    fn on_save_requested(&mut self, tick: Tick) {
        self.saves.push(tick);
    }

    fn on_quit(&mut self, tick: Tick) {
        self.quit_at = Some(tick);
    }

    fn on_bootstrap_failure(&mut self, _path: &Path, _error: &ScriptError) {
        self.boot_failures += 1;
    }
}

/// Counts frames instead of drawing them.
#[derive(Default)]
struct FrameCounter {
    frames:       u64,
    busiest:      usize,
    last_room:    String,
}

impl Renderer for FrameCounter {
    fn present(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        self.busiest = self.busiest.max(frame.renderables.len());
        if self.last_room != frame.metaroom.background {
            self.last_room.clone_from(&frame.metaroom.background);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig { tick_duration_ms: TICK_MS, seed: SEED, total_ticks: TOTAL_TICKS });
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    let data_dirs: Vec<PathBuf> = args.iter().skip(1).map(PathBuf::from).collect();

    println!("=== hatchery — rust_ck kernel ===");
    println!(
        "Critters: {CRITTER_COUNT}  |  Ticks: {}  |  Seed: {}  |  {} ms/tick",
        config.total_ticks, config.seed, config.tick_duration_ms
    );
    println!();

    // 1. Spawn list.  Lifespans come from a side RNG so the world's own
    //    stream stays untouched.
    let mut spawn_rng = SimRng::new(config.seed ^ 0xC0FFEE);
    let mut critters = Vec::with_capacity(CRITTER_COUNT);
    for i in 0..CRITTER_COUNT {
        let (classifier, room_x) = if i % 3 == 2 { (ETTIN, 1000) } else { (NORN, 0) };
        let mut state = AgentBuilder::new(classifier)
            .position(room_x + 40 + 60 * (i as i32 % 6), 100 + 80 * (i as i32 / 6))
            .size(32, 32)
            .zorder(1000)
            .mouseable(true)
            .build()?;
        state.set_var(OV_LIFESPAN, spawn_rng.gen_range(LIFESPAN).into());
        critters.push(state);
    }
    let pointer = AgentBuilder::new(POINTER).size(8, 8).zorder(i32::MAX).build()?;

    // 2. Build the world.
    let mut builder = WorldBuilder::new(config.clone(), Critters, NativeEngine::new())
        .metaroom(Rect::new(0, 0, 800, 600), "nursery")
        .metaroom(Rect::new(1000, 0, 800, 600), "garden")
        .pointer(pointer);
    for state in critters {
        builder = builder.agent(state);
    }
    let mut world = builder.build()?;
    let mut tally = Tally::default();

    // 3. Scripts: the embedded manifest, then any bootstrap sets on disk.
    let mut compiler = script_library();
    let unit = compiler.compile(Path::new("<hatchery>"), MANIFEST)?;
    let installed = world.scripts.install_all(unit.installs);
    if let Some(installer) = unit.installer {
        world.execute_script(&installer, None)?;
    }
    println!("Installed {installed} scripts");
    if !data_dirs.is_empty() {
        let report = world.bootstrap(&mut compiler, &data_dirs, false, &mut tally);
        println!("Bootstrap: {} executed, {} failed", report.executed, report.failed);
    }
    println!();

    // 4. Run.
    let pointer = world.pointer();
    let mut renderer = FrameCounter::default();
    let mut clicks = 0usize;
    let t0 = Instant::now();
    loop {
        let now = world.current_tick();
        if config.end_tick().is_some_and(|end| now >= end) {
            break;
        }
        if now == SAVE_AT {
            world.request_save();
        }

        // Sweep the pointer across the nursery and click what is under it.
        if let Some(p) = pointer {
            if now.0 > 0 && now.0 % CLICK_INTERVAL == 0 {
                let at = Point::new((now.0 as i32 * 13) % 400 + 40, 100 + (now.0 as i32 % 2) * 80);
                if let Some(state) = world.agent_mut(p) {
                    state.position = at;
                }
                if let Some(target) = world.agent_at(at.x + 4, at.y + 4, true, true) {
                    world.queue_script(ACTIVATE, target, p, ScriptValue::Null, ScriptValue::Null);
                    clicks += 1;
                }
            }
        }

        if let TickOutcome::Stopped = world.tick(&mut tally) {
            break;
        }

        match world.render(&mut renderer) {
            Ok(()) => {}
            Err(SimError::NoMetaRooms) => {
                log::error!("hatchery: nothing to render, giving up");
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        }
    }
    let elapsed = t0.elapsed();

    // 5. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  ticks run        : {}", tally.ticks);
    println!("  frames presented : {} (busiest {} parts, last room {})",
        renderer.frames, renderer.busiest, renderer.last_room);
    println!("  events dispatched: {}", tally.events);
    println!("  clicks           : {clicks}");
    println!("  deaths           : {}", tally.deaths);
    println!("  faults           : {} update, {} script", tally.update_faults, tally.script_faults);
    println!("  interpreters     : {}", world.pool().instance_count());
    println!("  saves requested  : {:?}", tally.saves);
    match tally.quit_at {
        Some(tick) => println!("  quit at          : {tick}"),
        None => println!("  still running at : {}", world.current_tick()),
    }
    if tally.boot_failures > 0 {
        println!("  bootstrap errors : {}", tally.boot_failures);
    }
    println!();

    // 6. Survivors.
    let survivors: Vec<AgentRef> = world
        .agents()
        .order()
        .iter()
        .copied()
        .filter(|&a| Some(a) != pointer)
        .collect();
    println!("{:<10} {:<8} {:<12} {:<6} {:<6}", "Agent", "Kind", "Position", "Age", "UNID");
    println!("{}", "-".repeat(46));
    for agent in survivors {
        let unid = world.unid_of(agent);
        debug_assert_eq!(unid.and_then(|u| world.lookup_unid(u)), unid.map(|_| agent));
        let Some(state) = world.agent(agent) else { continue };
        let kind = if state.classifier == ETTIN { "ettin" } else { "norn" };
        let age = state.var(OV_AGE).and_then(ScriptValue::as_integer).unwrap_or(0);
        println!(
            "{:<10} {:<8} {:<12} {:<6} {}",
            agent.to_string(),
            kind,
            state.position.to_string(),
            age,
            unid.map(|u| u.0.to_string()).unwrap_or_else(|| "-".into()),
        );
    }

    Ok(())
}
