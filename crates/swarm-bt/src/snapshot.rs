//! Immutable begin-of-tick world view.
//!
//! All sensing inside a tick reads this snapshot, never live agent state.
//! Every agent therefore perceives the same one-tick-old world regardless
//! of evaluation order, which keeps the ascending-id arbitration order an
//! implementation detail rather than an information advantage.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use swarm_agent::{Agent, Broadcast};
use swarm_core::{AgentId, Vec2};
use swarm_task::TaskRegistry;

use crate::blackboard::TaskView;

struct AgentPoint {
    pos: [f32; 2],
    id: AgentId,
}

impl RTreeObject for AgentPoint {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.pos)
    }
}

impl PointDistance for AgentPoint {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.pos[0] - point[0];
        let dy = self.pos[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Frozen agent broadcasts and task views for one tick, with a spatial
/// index over agent positions for radius queries.
pub struct WorldSnapshot {
    /// Indexed by `AgentId`.
    broadcasts: Vec<Broadcast>,
    tasks: Vec<TaskView>,
    index: RTree<AgentPoint>,
}

impl WorldSnapshot {
    pub fn build(agents: &[Agent], tasks: &TaskRegistry) -> Self {
        let broadcasts: Vec<Broadcast> = agents.iter().map(Agent::broadcast).collect();
        let points = broadcasts
            .iter()
            .map(|b| AgentPoint {
                pos: [b.position.x, b.position.y],
                id: b.id,
            })
            .collect();
        Self {
            broadcasts,
            tasks: tasks.iter().map(TaskView::from_task).collect(),
            index: RTree::bulk_load(points),
        }
    }

    pub fn broadcasts(&self) -> &[Broadcast] {
        &self.broadcasts
    }

    pub fn task_views(&self) -> &[TaskView] {
        &self.tasks
    }

    /// Broadcasts of agents within `radius` of `origin`, excluding `of`
    /// itself.  A non-positive radius means unlimited range.
    pub fn neighbors_within(&self, of: AgentId, origin: Vec2, radius: f32) -> Vec<Broadcast> {
        if radius <= 0.0 {
            return self
                .broadcasts
                .iter()
                .filter(|b| b.id != of)
                .copied()
                .collect();
        }
        let mut out: Vec<Broadcast> = self
            .index
            .locate_within_distance([origin.x, origin.y], radius * radius)
            .filter(|p| p.id != of)
            .map(|p| self.broadcasts[p.id.index()])
            .collect();
        // The r-tree yields in spatial order; callers expect id order.
        out.sort_by_key(|b| b.id);
        out
    }

    /// Uncompleted task views within `radius` of `origin`.  A non-positive
    /// radius means unlimited range.
    pub fn tasks_within(&self, origin: Vec2, radius: f32) -> Vec<TaskView> {
        self.tasks
            .iter()
            .filter(|t| t.state != swarm_task::TaskState::Completed)
            .filter(|t| radius <= 0.0 || t.position.distance(origin) <= radius)
            .copied()
            .collect()
    }
}
