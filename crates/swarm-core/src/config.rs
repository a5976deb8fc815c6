//! Simulation configuration.
//!
//! There is no ambient global configuration: a `SimConfig` value is built
//! once (in code, or from TOML/JSON with the `serde` feature) and passed
//! explicitly into every constructor that needs it.  `SimConfig::validate`
//! runs at startup; a bad value aborts the run before any agent moves.

use crate::category::Category;
use crate::error::{CoreError, CoreResult};
use crate::time::SimClock;
use crate::time::Tick;
use crate::vec2::Vec2;

// ── Bounds ────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Clamp `p` into the rectangle.
    ///
    /// Returns the clamped point plus per-axis flags so the kinematics can
    /// zero the velocity component that hit the wall.
    pub fn clamp(&self, p: Vec2) -> (Vec2, bool, bool) {
        let x = p.x.clamp(self.min.x, self.max.x);
        let y = p.y.clamp(self.min.y, self.max.y);
        (Vec2::new(x, y), x != p.x, y != p.y)
    }

    fn is_valid(&self) -> bool {
        self.min.x < self.max.x && self.min.y < self.max.y
    }
}

// ── Kinematics ────────────────────────────────────────────────────────────────

/// Per-agent kinematic limits.  All values are per-second quantities.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicLimits {
    /// Maximum speed, units/s.
    pub max_speed: f32,
    /// Maximum steering-force magnitude, units/s².
    pub max_accel: f32,
    /// Maximum heading slew rate, rad/s.
    pub max_angular_speed: f32,
}

impl Default for KinematicLimits {
    fn default() -> Self {
        Self {
            max_speed: 50.0,
            max_accel: 25.0,
            max_angular_speed: 2.0,
        }
    }
}

/// How `TaskExecuting` steers toward pickup and delivery points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SteeringMode {
    /// Seek the target directly.
    #[default]
    Direct,
    /// Aisle-constrained: align horizontally first, then vertically.
    AxisAligned,
}

// ── Agent configuration ───────────────────────────────────────────────────────

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentConfig {
    /// Number of agents spawned at start.  Agents are never created or
    /// destroyed mid-run.
    pub quantity: usize,
    pub limits: KinematicLimits,
    /// Arrival radius: inside it, desired speed damps proportionally with
    /// remaining distance.
    pub arrival_radius: f32,
    /// Agent-to-agent observation/messaging range.  `<= 0` = unlimited.
    pub communication_radius: f32,
    /// Task perception range.  `<= 0` = unlimited.
    pub situation_awareness_radius: f32,
    /// Hard proximity threshold below which collision avoidance repels.
    pub avoidance_radius: f32,
    /// Work depleted from a task per second while working on it.
    pub work_rate: f32,
    /// Seconds an exploration waypoint is held before re-rolling.
    pub exploration_secs: f32,
    /// Where agents spawn.
    pub spawn_area: Bounds,
    /// Minimum separation between spawn positions.
    pub spawn_separation: f32,
    /// Track-history ring length (visualization only).
    pub track_len: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            quantity: 3,
            limits: KinematicLimits::default(),
            arrival_radius: 50.0,
            communication_radius: 300.0,
            situation_awareness_radius: 0.0,
            avoidance_radius: 30.0,
            work_rate: 10.0,
            exploration_secs: 5.0,
            spawn_area: Bounds::new(Vec2::new(350.0, -700.0), Vec2::new(600.0, 700.0)),
            spawn_separation: 30.0,
            track_len: 400,
        }
    }
}

// ── Task configuration ────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskConfig {
    /// Tasks created in the initial batch.
    pub quantity: usize,
    /// How many replacement tasks may be spawned dynamically (on pickup)
    /// over the whole run.
    pub spawn_budget: u32,
    /// Where dynamically spawned tasks appear.
    pub spawn_point: Vec2,
    /// Uniform range the initial work amount is drawn from.
    pub amount_min: f32,
    pub amount_max: f32,
    /// Task display radius = amount / radius_factor.
    pub radius_factor: f32,
    /// Distance (beyond the task radius, for pickups) at which arrival
    /// counts.
    pub arrival_threshold: f32,
    /// Where the initial batch is scattered.
    pub spawn_area: Bounds,
    /// Minimum separation between scattered tasks.
    pub spawn_separation: f32,
    /// Offset applied to a completed task's display anchor at its
    /// destination.
    pub anchor_offset: Vec2,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            quantity: 6,
            spawn_budget: 4,
            spawn_point: Vec2::new(300.0, 570.0),
            amount_min: 10.0,
            amount_max: 30.0,
            radius_factor: 2.0,
            arrival_threshold: 10.0,
            spawn_area: Bounds::new(Vec2::new(400.0, -700.0), Vec2::new(1000.0, 700.0)),
            spawn_separation: 40.0,
            anchor_offset: Vec2::new(200.0, 100.0),
        }
    }
}

// ── Destinations ──────────────────────────────────────────────────────────────

/// Immutable category → delivery-point table.
///
/// Complete by construction: every [`Category`] has exactly one entry, so
/// lookups are infallible.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DestinationTable {
    pub red: Vec2,
    pub blue: Vec2,
    pub yellow: Vec2,
}

impl DestinationTable {
    pub const fn new(red: Vec2, blue: Vec2, yellow: Vec2) -> Self {
        Self { red, blue, yellow }
    }

    #[inline]
    pub fn get(&self, category: Category) -> Vec2 {
        match category {
            Category::Red => self.red,
            Category::Blue => self.blue,
            Category::Yellow => self.yellow,
        }
    }
}

impl Default for DestinationTable {
    fn default() -> Self {
        Self {
            red: Vec2::new(1100.0, -400.0),
            blue: Vec2::new(1100.0, 0.0),
            yellow: Vec2::new(1100.0, 400.0),
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Ticks per simulated second.
    pub tick_hz: f32,
    /// Total ticks to simulate.
    pub total_ticks: u64,
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
    /// Rectangular world bound agents are clamped to.
    pub bounds: Bounds,
    /// How task execution steers (direct seek or aisle-constrained).
    pub steering: SteeringMode,
    /// Emit an observer snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
    pub agents: AgentConfig,
    pub tasks: TaskConfig,
    pub destinations: DestinationTable,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_hz: 20.0,
            total_ticks: 12_000,
            seed: 42,
            bounds: Bounds::new(Vec2::new(300.0, -800.0), Vec2::new(1200.0, 800.0)),
            steering: SteeringMode::Direct,
            snapshot_interval_ticks: 20,
            agents: AgentConfig::default(),
            tasks: TaskConfig::default(),
            destinations: DestinationTable::default(),
        }
    }
}

impl SimConfig {
    /// Seconds of simulated time per tick.
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_hz
    }

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Ticks an exploration waypoint is held before re-rolling.
    #[inline]
    pub fn exploration_ticks(&self) -> u64 {
        (self.agents.exploration_secs * self.tick_hz).ceil().max(1.0) as u64
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.dt())
    }

    /// Check the configuration for fatal errors.
    ///
    /// Called by the simulation builder; a failure here aborts startup.
    pub fn validate(&self) -> CoreResult<()> {
        fn fail(msg: impl Into<String>) -> CoreResult<()> {
            Err(CoreError::Config(msg.into()))
        }

        if !(self.tick_hz > 0.0) {
            return fail(format!("tick_hz must be positive, got {}", self.tick_hz));
        }
        if self.total_ticks == 0 {
            return fail("total_ticks must be at least 1");
        }
        if !self.bounds.is_valid() {
            return fail("bounds min must be strictly below max on both axes");
        }
        if self.agents.quantity == 0 {
            return fail("agents.quantity must be at least 1");
        }
        let lim = self.agents.limits;
        if !(lim.max_speed > 0.0) || !(lim.max_accel > 0.0) || !(lim.max_angular_speed > 0.0) {
            return fail("kinematic limits must all be positive");
        }
        if !(self.agents.arrival_radius > 0.0) {
            return fail("agents.arrival_radius must be positive");
        }
        if !(self.agents.exploration_secs > 0.0) {
            return fail("agents.exploration_secs must be positive");
        }
        if !self.agents.spawn_area.is_valid() || !self.tasks.spawn_area.is_valid() {
            return fail("spawn areas must have positive extent");
        }
        if self.tasks.quantity == 0 {
            return fail("tasks.quantity must be at least 1");
        }
        if !(self.tasks.amount_min > 0.0) || self.tasks.amount_max < self.tasks.amount_min {
            return fail("task amount range must be positive and ordered");
        }
        if !(self.tasks.radius_factor > 0.0) {
            return fail("tasks.radius_factor must be positive");
        }
        if !(self.tasks.arrival_threshold > 0.0) {
            return fail("tasks.arrival_threshold must be positive");
        }
        Ok(())
    }
}
