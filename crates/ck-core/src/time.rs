//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter advanced once per
//! orchestrator step.  The mapping to real time is held in `SimClock`:
//!
//!   elapsed_ms = tick * tick_duration_ms
//!
//! The default tick duration is 50 ms (20 steps per second), the rate the
//! renderer and input backends are paced at.  The kernel itself never
//! sleeps; pacing is the driver's job.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Step counter plus the real-time length of one step.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many real milliseconds one tick represents.  Default: 50.
    pub tick_duration_ms: u32,
    /// The current tick — advanced by `SimClock::advance()` once per step.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self { tick_duration_ms, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms as u64
    }

    /// How many ticks span `ms` milliseconds (rounds up).
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_duration_ms.max(1) as u64)
    }

    /// Ticks the driver owes after `backend_ms` of real time has passed since
    /// tick 0.  A driver calls `World::tick` this many times to catch up.
    #[inline]
    pub fn ticks_due(&self, backend_ms: u64) -> u64 {
        (backend_ms / self.tick_duration_ms.max(1) as u64).saturating_sub(self.current_tick.0)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(SimConfig::DEFAULT_TICK_MS)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{} ms)", self.current_tick, self.elapsed_ms())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Loaded from a JSON file by the driver binary (with the `serde` feature) or
/// built in code by tests.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Milliseconds per tick.  Default: 50.
    pub tick_duration_ms: u32,

    /// Master RNG seed (UNID sampling).  The same seed always produces the
    /// same id sequence.
    pub seed: u64,

    /// Number of ticks `World::run` executes.  `0` means run until the
    /// world is asked to quit.
    pub total_ticks: u64,
}

impl SimConfig {
    pub const DEFAULT_TICK_MS: u32 = 50;

    /// The tick at which a bounded run ends (exclusive), if any.
    #[inline]
    pub fn end_tick(&self) -> Option<Tick> {
        (self.total_ticks > 0).then_some(Tick(self.total_ticks))
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { tick_duration_ms: Self::DEFAULT_TICK_MS, seed: 0, total_ticks: 0 }
    }
}
