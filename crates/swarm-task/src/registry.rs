//! The owning task store.
//!
//! The registry is owned by the driver and shared read-mostly across
//! agents; agents hold only `TaskId`s into it.  Ids are dense indices, so
//! lookups are O(1) and a `TaskId` stays valid forever — tasks are marked
//! `Completed` and retained, never removed.

use swarm_core::{layout, Category, SimRng, TaskConfig, TaskId, Vec2};

use crate::task::Task;

/// All tasks in the world plus the dynamic-spawn quota.
pub struct TaskRegistry {
    tasks: Vec<Task>,
    cfg: TaskConfig,
    /// Replacement tasks spawned so far (bounded by `cfg.spawn_budget`).
    spawned: u32,
}

impl TaskRegistry {
    /// Generate the initial batch at scattered positions with random
    /// amounts and categories.
    pub fn generate(cfg: TaskConfig, rng: &mut SimRng) -> Self {
        let positions = layout::scatter(cfg.quantity, cfg.spawn_area, cfg.spawn_separation, rng);
        let tasks = positions
            .into_iter()
            .enumerate()
            .map(|(i, pos)| Self::make_task(TaskId(i as u32), pos, &cfg, rng))
            .collect();
        Self {
            tasks,
            cfg,
            spawned: 0,
        }
    }

    /// Build a registry from explicit tasks (tests, replays).
    pub fn from_tasks(tasks: Vec<Task>, cfg: TaskConfig) -> Self {
        Self {
            tasks,
            cfg,
            spawned: 0,
        }
    }

    fn make_task(id: TaskId, position: Vec2, cfg: &TaskConfig, rng: &mut SimRng) -> Task {
        let amount = rng.gen_range(cfg.amount_min..=cfg.amount_max);
        let category = *rng
            .choose(&Category::ALL)
            .expect("Category::ALL is non-empty");
        Task::new(id, position, amount, category, cfg.radius_factor)
    }

    // ── Access ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn config(&self) -> &TaskConfig {
        &self.cfg
    }

    // ── Dynamic spawning ──────────────────────────────────────────────────

    /// Spawn a replacement task if the quota allows.
    ///
    /// Called when a pickup event occurs.  The new task gets a fresh unique
    /// id and appears at the configured fixed spawn point.
    pub fn spawn_on_pickup(&mut self, rng: &mut SimRng) -> Option<TaskId> {
        if self.spawned >= self.cfg.spawn_budget {
            return None;
        }
        let id = TaskId(self.tasks.len() as u32);
        let task = Self::make_task(id, self.cfg.spawn_point, &self.cfg, rng);
        self.tasks.push(task);
        self.spawned += 1;
        Some(id)
    }

    /// Remaining dynamic-spawn quota.
    pub fn spawn_budget_left(&self) -> u32 {
        self.cfg.spawn_budget - self.spawned
    }

    // ── Aggregates ────────────────────────────────────────────────────────

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }

    /// `true` when every existing task is completed and no replacement can
    /// still appear.
    pub fn all_complete(&self) -> bool {
        self.spawn_budget_left() == 0 && self.tasks.iter().all(|t| t.is_completed())
    }
}
