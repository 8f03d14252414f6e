//! Oriented-obstacle viewpoint tour planner: given a grid of oriented
//! obstacles and a start pose, computes a near-optimal sequence of robot
//! poses that visits a valid viewing pose for each reachable obstacle,
//! under fixed kinematic motion primitives and clearance constraints.
//!
//! [`plan`] is the single entry point. Everything it needs is built from a
//! [`PlannerConfig`] and a [`Grid`] of [`Obstacle`]s; the memo tables used
//! internally by the pose-space search ([`astar`]) live only for the
//! duration of one `plan()` call.

mod astar;
mod capture;
mod config;
mod error;
mod geometry;
mod grid;
mod motion;
mod pose;
mod tsp;
mod viewpoints;

pub use capture::RelativePosition;
pub use config::PlannerConfig;
pub use error::PlanError;
pub use geometry::Motion;
pub use grid::{Grid, Obstacle};
pub use motion::MotionPlan;
pub use pose::{CellState, Direction};

/// The full result of one `plan()` call.
#[derive(Debug, Clone)]
pub struct PlanOutput {
    /// The ordered pose sequence, start pose first. Empty iff no tour was
    /// found at all (see [`PlanOutput::cost`]).
    pub path: Vec<CellState>,
    /// `None` only when no subset of obstacles (including the empty one)
    /// admitted a finite-cost tour — a [`PlanError`] is not raised for
    /// this; callers render an empty `path` as an empty animation.
    pub cost: Option<i64>,
    /// Ids actually photographed, in visit order.
    pub visited_obstacle_ids: Vec<u32>,
    /// Ids with `Direction::Skip`, or dropped by subset/candidate selection.
    pub skipped_obstacle_ids: Vec<u32>,
    /// Motion-primitive reconstruction of `path`, with capture markers
    /// interleaved. `None` iff `path` is empty.
    pub motion_plan: Option<MotionPlan>,
}

/// Plans a visit to (a subset of) `grid`'s obstacles starting from
/// `config`'s start pose, minimizing a weighted sum of travel cost and
/// viewpoint-quality penalties.
///
/// Owns a fresh set of A* memo tables for the duration of this call; they
/// are discarded on return. Fatal errors (`InvalidRotation`,
/// `UnknownObstacleId`, `MotionReconstructionMiss`) indicate a bug in this
/// crate rather than in the caller's input and abort the call; see
/// [`PlanError`].
pub fn plan(config: &PlannerConfig, grid: &Grid) -> Result<PlanOutput, PlanError> {
    let start = CellState::new(config.start_x, config.start_y, config.start_direction);
    let mut tables = astar::PlannerTables::new();

    log::debug!(
        "plan: start=({},{},{:?}) obstacles={}",
        start.x,
        start.y,
        start.direction,
        grid.obstacles().len()
    );

    let tour = tsp::solve(config, grid, &start, &mut tables)?;

    let motion_plan = if tour.path.is_empty() {
        None
    } else {
        Some(motion::reconstruct(&tables, &tour.path)?)
    };

    log::info!(
        "plan: cost={:?} visited={} skipped={}",
        tour.cost,
        tour.visited_obstacle_ids.len(),
        tour.skipped_obstacle_ids.len()
    );

    Ok(PlanOutput {
        path: tour.path,
        cost: tour.cost,
        visited_obstacle_ids: tour.visited_obstacle_ids,
        skipped_obstacle_ids: tour.skipped_obstacle_ids,
        motion_plan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_plans_a_trivial_tour() {
        let config = PlannerConfig::default();
        let grid = Grid::default();
        let output = plan(&config, &grid).unwrap();
        assert_eq!(output.cost, Some(0));
        assert_eq!(output.path.len(), 1);
        assert!(output.motion_plan.is_some());
    }

    #[test]
    fn single_obstacle_plan_has_a_capture() {
        let config = PlannerConfig::default();
        let mut grid = Grid::default();
        grid.insert(Obstacle::new(10, 10, Direction::South, 1));
        let output = plan(&config, &grid).unwrap();
        assert_eq!(output.visited_obstacle_ids, vec![1]);
        let motions = output.motion_plan.unwrap();
        assert_eq!(motions.captured_obstacle_ids, vec![1]);
        assert!(motions.motions.contains(&Motion::Capture));
    }
}
