//! Unit tests for the tree engine, the action nodes, and the policies.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use swarm_agent::{Agent, AgentState};
use swarm_core::{AgentId, AgentRng, Bounds, Category, SimConfig, SimRng, TaskId, Tick, Vec2};
use swarm_task::{Task, TaskRegistry, TaskState};

use crate::{
    build_tree, AllocationPolicy, BehaviorNode, Blackboard, BtError, DecisionMaking, Exploration,
    Fallback, FirstCome, LocalSensing, Nearest, NodeDef, Sequence, Status, TaskExecuting,
    TickContext, WorldSnapshot,
};

// ── Fixture ───────────────────────────────────────────────────────────────────

fn test_config() -> SimConfig {
    let mut cfg = SimConfig::default();
    cfg.bounds = Bounds::new(Vec2::new(-1_000.0, -1_000.0), Vec2::new(1_000.0, 1_000.0));
    cfg.agents.communication_radius = 0.0; // unlimited
    cfg.agents.situation_awareness_radius = 0.0; // unlimited
    cfg
}

fn make_task(id: u32, position: Vec2, amount: f32, category: Category) -> Task {
    Task::new(TaskId(id), position, amount, category, 2.0)
}

/// World-in-a-box: agents, tasks, and per-agent RNGs that persist across
/// ticks the way the driver keeps them.
struct Fixture {
    cfg: SimConfig,
    agents: Vec<Agent>,
    tasks: TaskRegistry,
    rngs: Vec<AgentRng>,
    spawn_rng: SimRng,
}

impl Fixture {
    fn new(cfg: SimConfig, agent_positions: &[Vec2], tasks: Vec<Task>) -> Self {
        let agents: Vec<Agent> = agent_positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| Agent::new(AgentId(i as u32), pos, &cfg.agents))
            .collect();
        let rngs = agents.iter().map(|a| AgentRng::new(cfg.seed, a.id)).collect();
        let tasks = TaskRegistry::from_tasks(tasks, cfg.tasks.clone());
        Self {
            cfg,
            agents,
            tasks,
            rngs,
            spawn_rng: SimRng::new(7),
        }
    }

    /// Snapshot the world, then tick `node` for agent `idx`.
    fn tick(&mut self, node: &mut dyn BehaviorNode, idx: usize, bb: &mut Blackboard) -> Status {
        let snapshot = WorldSnapshot::build(&self.agents, &self.tasks);
        let mut ctx = TickContext {
            tick: Tick(0),
            dt: self.cfg.dt(),
            config: &self.cfg,
            snapshot: &snapshot,
            tasks: &mut self.tasks,
            spawn_rng: &mut self.spawn_rng,
        };
        node.tick(&mut self.agents[idx], bb, &mut ctx, &mut self.rngs[idx])
    }
}

// ── Control-node truth tables ─────────────────────────────────────────────────

#[cfg(test)]
mod control {
    use super::*;

    /// Scripted leaf that returns a fixed status and counts its calls.
    struct Stub {
        result: Status,
        calls: Rc<Cell<usize>>,
    }

    fn stub(result: Status) -> (Box<dyn BehaviorNode>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Box::new(Stub {
                result,
                calls: Rc::clone(&calls),
            }),
            calls,
        )
    }

    impl BehaviorNode for Stub {
        fn name(&self) -> &'static str {
            "Stub"
        }

        fn tick(
            &mut self,
            _agent: &mut Agent,
            _bb: &mut Blackboard,
            _ctx: &mut TickContext<'_>,
            _rng: &mut AgentRng,
        ) -> Status {
            self.calls.set(self.calls.get() + 1);
            self.result
        }
    }

    fn run_root(mut node: Box<dyn BehaviorNode>) -> Status {
        let mut fx = Fixture::new(test_config(), &[Vec2::ZERO], vec![]);
        let mut bb = Blackboard::new();
        fx.tick(node.as_mut(), 0, &mut bb)
    }

    #[test]
    fn sequence_skips_running_children() {
        let (a, _) = stub(Status::Success);
        let (b, b_calls) = stub(Status::Running);
        let (c, c_calls) = stub(Status::Success);
        let status = run_root(Box::new(Sequence::new(vec![a, b, c])));
        assert_eq!(status, Status::Success);
        assert_eq!(b_calls.get(), 1);
        assert_eq!(c_calls.get(), 1);
    }

    #[test]
    fn sequence_aborts_on_first_failure() {
        let (a, _) = stub(Status::Success);
        let (b, _) = stub(Status::Failure);
        let (c, c_calls) = stub(Status::Success);
        let status = run_root(Box::new(Sequence::new(vec![a, b, c])));
        assert_eq!(status, Status::Failure);
        assert_eq!(c_calls.get(), 0, "child after the failure must not run");
    }

    #[test]
    fn fallback_skips_running_and_returns_first_success() {
        let (a, _) = stub(Status::Failure);
        let (b, b_calls) = stub(Status::Running);
        let (c, _) = stub(Status::Success);
        let status = run_root(Box::new(Fallback::new(vec![a, b, c])));
        assert_eq!(status, Status::Success);
        assert_eq!(b_calls.get(), 1);
    }

    #[test]
    fn fallback_fails_only_when_all_children_fail() {
        let (a, _) = stub(Status::Failure);
        let (b, _) = stub(Status::Failure);
        let status = run_root(Box::new(Fallback::new(vec![a, b])));
        assert_eq!(status, Status::Failure);
    }

    #[test]
    fn fallback_short_circuits_after_success() {
        let (a, _) = stub(Status::Success);
        let (b, b_calls) = stub(Status::Failure);
        let status = run_root(Box::new(Fallback::new(vec![a, b])));
        assert_eq!(status, Status::Success);
        assert_eq!(b_calls.get(), 0);
    }

    #[test]
    fn tree_run_clears_previous_action_results() {
        let mut fx = Fixture::new(test_config(), &[Vec2::ZERO], vec![]);
        let mut bb = Blackboard::new();
        bb.carrying = true;
        bb.record(LocalSensing::NAME, Status::Failure);

        let policy: Arc<dyn AllocationPolicy> = Arc::new(FirstCome);
        let mut tree = build_tree(&NodeDef::default_root(), &policy).unwrap();
        let snapshot = WorldSnapshot::build(&fx.agents, &fx.tasks);
        let mut ctx = TickContext {
            tick: Tick(0),
            dt: fx.cfg.dt(),
            config: &fx.cfg,
            snapshot: &snapshot,
            tasks: &mut fx.tasks,
            spawn_rng: &mut fx.spawn_rng,
        };
        tree.run(&mut fx.agents[0], &mut bb, &mut ctx, &mut fx.rngs[0]);

        // The stale key was cleared, then re-recorded by this evaluation.
        assert_eq!(bb.result(LocalSensing::NAME), Some(Status::Success));
        // Persistent fields survive the clear.
        assert!(bb.carrying);
    }
}

// ── Tree building ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    fn policy() -> Arc<dyn AllocationPolicy> {
        Arc::new(FirstCome)
    }

    #[test]
    fn default_root_builds() {
        assert!(build_tree(&NodeDef::default_root(), &policy()).is_ok());
    }

    #[test]
    fn unknown_node_kind_is_fatal() {
        let err = build_tree(&NodeDef::leaf("Teleport"), &policy()).unwrap_err();
        assert!(matches!(err, BtError::UnknownNode(kind) if kind == "Teleport"));
    }

    #[test]
    fn control_node_requires_children() {
        let err = build_tree(&NodeDef::branch("Sequence", vec![]), &policy()).unwrap_err();
        assert!(matches!(err, BtError::Definition(_)));
    }

    #[test]
    fn action_node_rejects_children() {
        let def = NodeDef::branch(LocalSensing::NAME, vec![NodeDef::leaf(Exploration::NAME)]);
        let err = build_tree(&def, &policy()).unwrap_err();
        assert!(matches!(err, BtError::Definition(_)));
    }
}

// ── LocalSensing ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod sensing {
    use super::*;

    #[test]
    fn unlimited_radii_see_everything_but_self() {
        let tasks = vec![
            make_task(0, Vec2::new(500.0, 0.0), 20.0, Category::Red),
            make_task(1, Vec2::new(-500.0, 0.0), 20.0, Category::Blue),
        ];
        let mut fx = Fixture::new(
            test_config(),
            &[Vec2::ZERO, Vec2::new(900.0, 900.0)],
            tasks,
        );
        let mut bb = Blackboard::new();
        let status = fx.tick(&mut LocalSensing, 0, &mut bb);

        assert_eq!(status, Status::Success);
        assert_eq!(bb.result(LocalSensing::NAME), Some(Status::Success));
        assert_eq!(bb.tasks_in_view.len(), 2);
        assert_eq!(bb.neighbors.len(), 1);
        assert_eq!(bb.neighbors[0].id, AgentId(1));
        assert_eq!(bb.position, Vec2::ZERO);
    }

    #[test]
    fn bounded_radii_filter_by_distance() {
        let mut cfg = test_config();
        cfg.agents.communication_radius = 50.0;
        cfg.agents.situation_awareness_radius = 50.0;

        let tasks = vec![
            make_task(0, Vec2::new(30.0, 0.0), 20.0, Category::Red),
            make_task(1, Vec2::new(300.0, 0.0), 20.0, Category::Red),
        ];
        let mut fx = Fixture::new(
            cfg,
            &[Vec2::ZERO, Vec2::new(40.0, 0.0), Vec2::new(400.0, 0.0)],
            tasks,
        );
        let mut bb = Blackboard::new();
        fx.tick(&mut LocalSensing, 0, &mut bb);

        assert_eq!(bb.tasks_in_view.len(), 1);
        assert_eq!(bb.tasks_in_view[0].id, TaskId(0));
        assert_eq!(bb.neighbors.len(), 1);
        assert_eq!(bb.neighbors[0].id, AgentId(1));
    }

    #[test]
    fn completed_tasks_are_invisible() {
        let mut done = make_task(0, Vec2::new(10.0, 0.0), 20.0, Category::Red);
        assert!(done.try_claim(AgentId(9)));
        done.load(AgentId(9)).unwrap();
        done.complete(Vec2::ZERO, Vec2::ZERO).unwrap();

        let mut fx = Fixture::new(test_config(), &[Vec2::ZERO], vec![done]);
        let mut bb = Blackboard::new();
        fx.tick(&mut LocalSensing, 0, &mut bb);
        assert!(bb.tasks_in_view.is_empty());
    }
}

// ── DecisionMaking + policies ─────────────────────────────────────────────────

#[cfg(test)]
mod deciding {
    use super::*;

    fn decision(policy: Arc<dyn AllocationPolicy>) -> DecisionMaking {
        DecisionMaking::new(policy)
    }

    fn sensed_fixture(tasks: Vec<Task>, agent_positions: &[Vec2]) -> (Fixture, Blackboard) {
        let mut fx = Fixture::new(test_config(), agent_positions, tasks);
        let mut bb = Blackboard::new();
        fx.tick(&mut LocalSensing, 0, &mut bb);
        (fx, bb)
    }

    #[test]
    fn carrying_agent_defers_with_running() {
        let (mut fx, mut bb) =
            sensed_fixture(vec![make_task(0, Vec2::new(10.0, 0.0), 20.0, Category::Red)], &[
                Vec2::ZERO,
            ]);
        bb.carrying = true;
        let status = fx.tick(&mut decision(Arc::new(FirstCome)), 0, &mut bb);
        assert_eq!(status, Status::Running);
        assert_eq!(fx.agents[0].assigned_task, None);
    }

    #[test]
    fn no_candidates_is_failure() {
        let (mut fx, mut bb) = sensed_fixture(vec![], &[Vec2::ZERO]);
        let status = fx.tick(&mut decision(Arc::new(FirstCome)), 0, &mut bb);
        assert_eq!(status, Status::Failure);
        assert_eq!(bb.result(DecisionMaking::NAME), Some(Status::Failure));
    }

    #[test]
    fn first_come_picks_lowest_id() {
        let tasks = vec![
            make_task(0, Vec2::new(800.0, 0.0), 20.0, Category::Red),
            make_task(1, Vec2::new(10.0, 0.0), 20.0, Category::Red),
        ];
        let (mut fx, mut bb) = sensed_fixture(tasks, &[Vec2::ZERO]);
        let status = fx.tick(&mut decision(Arc::new(FirstCome)), 0, &mut bb);
        assert_eq!(status, Status::Success);
        assert_eq!(fx.agents[0].assigned_task, Some(TaskId(0)));
        assert_eq!(fx.agents[0].planned, vec![TaskId(0)]);
        assert_eq!(bb.assigned_task, Some(TaskId(0)));
    }

    #[test]
    fn nearest_picks_closest_with_id_tiebreak() {
        let tasks = vec![
            make_task(0, Vec2::new(800.0, 0.0), 20.0, Category::Red),
            make_task(1, Vec2::new(10.0, 0.0), 20.0, Category::Red),
        ];
        let (mut fx, mut bb) = sensed_fixture(tasks, &[Vec2::ZERO]);
        let status = fx.tick(&mut decision(Arc::new(Nearest)), 0, &mut bb);
        assert_eq!(status, Status::Success);
        assert_eq!(fx.agents[0].assigned_task, Some(TaskId(1)));
    }

    #[test]
    fn claimed_tasks_are_not_candidates() {
        let mut claimed = make_task(0, Vec2::new(10.0, 0.0), 20.0, Category::Red);
        assert!(claimed.try_claim(AgentId(9)));
        let (mut fx, mut bb) = sensed_fixture(vec![claimed], &[Vec2::ZERO]);
        let status = fx.tick(&mut decision(Arc::new(FirstCome)), 0, &mut bb);
        assert_eq!(status, Status::Failure);
        assert!(bb.candidates.is_empty());
    }

    #[test]
    fn neighbor_broadcast_claims_are_respected() {
        let tasks = vec![
            make_task(0, Vec2::new(10.0, 0.0), 20.0, Category::Red),
            make_task(1, Vec2::new(20.0, 0.0), 20.0, Category::Red),
        ];
        let mut fx = Fixture::new(test_config(), &[Vec2::ZERO, Vec2::new(5.0, 0.0)], tasks);
        // Neighbor announces intent to service task 0 (not yet claimed).
        fx.agents[1].assigned_task = Some(TaskId(0));

        let mut bb = Blackboard::new();
        fx.tick(&mut LocalSensing, 0, &mut bb);
        let status = fx.tick(&mut decision(Arc::new(FirstCome)), 0, &mut bb);

        assert_eq!(status, Status::Success);
        assert_eq!(bb.candidates.len(), 1);
        assert_eq!(fx.agents[0].assigned_task, Some(TaskId(1)));
    }
}

// ── TaskExecuting ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod executing {
    use super::*;

    #[test]
    fn no_assignment_is_failure() {
        let mut fx = Fixture::new(test_config(), &[Vec2::ZERO], vec![]);
        let mut bb = Blackboard::new();
        let status = fx.tick(&mut TaskExecuting, 0, &mut bb);
        assert_eq!(status, Status::Failure);
        assert_eq!(bb.result(TaskExecuting::NAME), Some(Status::Failure));
    }

    #[test]
    fn drives_toward_assigned_task() {
        let tasks = vec![make_task(0, Vec2::new(500.0, 0.0), 20.0, Category::Red)];
        let mut fx = Fixture::new(test_config(), &[Vec2::ZERO], tasks);
        fx.agents[0].assigned_task = Some(TaskId(0));

        let mut bb = Blackboard::new();
        let status = fx.tick(&mut TaskExecuting, 0, &mut bb);

        assert_eq!(status, Status::Running);
        assert_eq!(fx.agents[0].state, AgentState::MovingToTask);
        assert!(fx.agents[0].acceleration.x > 0.0, "must steer toward the task");
        assert_eq!(fx.tasks.get(TaskId(0)).unwrap().state, TaskState::Unclaimed);
    }

    #[test]
    fn pickup_claims_loads_and_spawns_replacement() {
        // amount 20, radius_factor 2 → radius 10; +threshold 10 → range 20.
        let tasks = vec![make_task(0, Vec2::new(15.0, 0.0), 20.0, Category::Red)];
        let mut fx = Fixture::new(test_config(), &[Vec2::ZERO], tasks);
        fx.agents[0].assigned_task = Some(TaskId(0));

        let mut bb = Blackboard::new();
        let status = fx.tick(&mut TaskExecuting, 0, &mut bb);

        assert_eq!(status, Status::Running);
        assert!(bb.carrying);
        assert_eq!(fx.agents[0].state, AgentState::Carrying);
        let task = fx.tasks.get(TaskId(0)).unwrap();
        assert_eq!(task.state, TaskState::Loaded);
        assert_eq!(task.claimant, Some(AgentId(0)));
        // One replacement appeared at the fixed spawn point.
        assert_eq!(fx.tasks.len(), 2);
        let spawned = fx.tasks.get(TaskId(1)).unwrap();
        assert_eq!(spawned.position, fx.cfg.tasks.spawn_point);
    }

    #[test]
    fn lost_race_clears_assignment_and_fails() {
        let mut contested = make_task(0, Vec2::new(15.0, 0.0), 20.0, Category::Red);
        assert!(contested.try_claim(AgentId(1)));
        let mut fx = Fixture::new(test_config(), &[Vec2::ZERO], vec![contested]);
        fx.agents[0].assigned_task = Some(TaskId(0));
        fx.agents[0].planned = vec![TaskId(0)];

        let mut bb = Blackboard::new();
        let status = fx.tick(&mut TaskExecuting, 0, &mut bb);

        assert_eq!(status, Status::Failure);
        assert_eq!(fx.agents[0].assigned_task, None);
        assert!(fx.agents[0].planned.is_empty());
        // The rival's claim is untouched.
        assert_eq!(fx.tasks.get(TaskId(0)).unwrap().claimant, Some(AgentId(1)));
    }

    #[test]
    fn hauls_toward_category_destination() {
        let tasks = vec![make_task(0, Vec2::new(15.0, 0.0), 20.0, Category::Blue)];
        let mut fx = Fixture::new(test_config(), &[Vec2::ZERO], tasks);
        fx.agents[0].assigned_task = Some(TaskId(0));

        let mut bb = Blackboard::new();
        // Pickup tick, then a haul tick from far away.
        fx.tick(&mut TaskExecuting, 0, &mut bb);
        let mut exec = TaskExecuting;
        let status = fx.tick(&mut exec, 0, &mut bb);

        assert_eq!(status, Status::Running);
        assert!(bb.carrying);
        let dest = fx.cfg.destinations.blue;
        let toward = dest - fx.agents[0].position;
        // Steering force has a positive component toward the destination.
        let accel = fx.agents[0].acceleration;
        assert!(accel.x * toward.x + accel.y * toward.y > 0.0);
    }

    #[test]
    fn delivery_completes_and_relocates_anchor() {
        let mut loaded = make_task(0, Vec2::new(15.0, 0.0), 20.0, Category::Red);
        assert!(loaded.try_claim(AgentId(0)));
        loaded.load(AgentId(0)).unwrap();

        let mut cfg = test_config();
        cfg.destinations.red = Vec2::new(100.0, 100.0);
        let dest = cfg.destinations.red;
        let offset = cfg.tasks.anchor_offset;
        let mut fx = Fixture::new(cfg, &[dest], vec![loaded]);
        fx.agents[0].assigned_task = Some(TaskId(0));
        fx.agents[0].state = AgentState::Carrying;

        let mut bb = Blackboard::new();
        bb.carrying = true;
        let status = fx.tick(&mut TaskExecuting, 0, &mut bb);

        assert_eq!(status, Status::Success);
        assert!(!bb.carrying);
        assert_eq!(fx.agents[0].state, AgentState::Idle);
        assert_eq!(fx.agents[0].assigned_task, None);
        assert_eq!(fx.agents[0].work_done, 20.0);
        let task = fx.tasks.get(TaskId(0)).unwrap();
        assert_eq!(task.state, TaskState::Completed);
        assert_eq!(task.anchor, dest + offset);
    }
}

// ── Exploration ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod exploring {
    use super::*;

    #[test]
    fn waypoint_is_held_then_rerolled() {
        let mut cfg = test_config();
        // 0.15 s at 20 Hz → waypoint held for 3 ticks.
        cfg.agents.exploration_secs = 0.15;
        let area = cfg.tasks.spawn_area;
        let mut fx = Fixture::new(cfg, &[Vec2::ZERO], vec![]);

        let mut node = Exploration::new();
        let mut bb = Blackboard::new();

        let status = fx.tick(&mut node, 0, &mut bb);
        assert_eq!(status, Status::Running);
        let first = bb.waypoint.expect("waypoint must be set");
        assert!(area.contains(first), "waypoint outside spawn area: {first}");

        for _ in 0..2 {
            fx.tick(&mut node, 0, &mut bb);
            assert_eq!(bb.waypoint, Some(first), "waypoint re-rolled too early");
        }

        fx.tick(&mut node, 0, &mut bb);
        let next = bb.waypoint.unwrap();
        assert_ne!(next, first, "waypoint must re-roll after the hold expires");
        assert!(area.contains(next));
    }

    #[test]
    fn steers_toward_waypoint_and_stays_idle() {
        let mut fx = Fixture::new(test_config(), &[Vec2::ZERO], vec![]);
        let mut node = Exploration::new();
        let mut bb = Blackboard::new();
        fx.tick(&mut node, 0, &mut bb);

        assert_eq!(fx.agents[0].state, AgentState::Idle);
        assert!(fx.agents[0].acceleration != Vec2::ZERO);
        assert_eq!(bb.result(Exploration::NAME), Some(Status::Running));
    }
}

// ── Snapshot queries ──────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot {
    use super::*;

    #[test]
    fn neighbor_query_is_id_ordered_and_radius_bounded() {
        let fx = Fixture::new(
            test_config(),
            &[
                Vec2::ZERO,
                Vec2::new(30.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(500.0, 0.0),
            ],
            vec![],
        );
        let snap = WorldSnapshot::build(&fx.agents, &fx.tasks);
        let near = snap.neighbors_within(AgentId(0), Vec2::ZERO, 100.0);
        let ids: Vec<AgentId> = near.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![AgentId(1), AgentId(2)]);
    }

    #[test]
    fn zero_radius_means_unlimited() {
        let fx = Fixture::new(
            test_config(),
            &[Vec2::ZERO, Vec2::new(999.0, 999.0)],
            vec![],
        );
        let snap = WorldSnapshot::build(&fx.agents, &fx.tasks);
        assert_eq!(snap.neighbors_within(AgentId(0), Vec2::ZERO, 0.0).len(), 1);
        assert_eq!(snap.tasks_within(Vec2::ZERO, 0.0).len(), 0);
    }
}
