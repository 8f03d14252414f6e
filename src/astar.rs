//! Pose-space best-first search over `(x, y, direction)` nodes connected by
//! the fixed motion-primitive set, with a composite multiplicative edge
//! cost. Owns the per-planning-run memo tables (`path_table`,
//! `cost_table`, `motion_table`).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::FxHashMap;

use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::geometry::{half_turn_targets, rotation_cost, turn_targets, Motion};
use crate::grid::Grid;
use crate::pose::{CellState, Direction, PoseKey};

/// Same-heading straight moves, in a fixed enumeration order so that
/// search behavior is deterministic and reproducible across runs.
const MOVE_DIRECTIONS: [(i32, i32, Direction); 4] = [
    (1, 0, Direction::East),
    (-1, 0, Direction::West),
    (0, 1, Direction::North),
    (0, -1, Direction::South),
];

/// Owns the path/cost/motion memo tables for one planning run. Created
/// empty, discarded at the end of the top-level planning call.
#[derive(Default)]
pub struct PlannerTables {
    path_table: FxHashMap<(PoseKey, PoseKey), Vec<PoseKey>>,
    cost_table: FxHashMap<(PoseKey, PoseKey), i64>,
    /// Stored under exactly one of the two directed keys: a deliberate
    /// space optimization mirroring the teacher's single-parent-pointer
    /// -per-node storage (`pathfinding::astar::Parent`), which also
    /// reconstructs the reverse direction by inversion rather than storing
    /// both.
    motion_table: FxHashMap<(PoseKey, PoseKey), Motion>,
}

impl PlannerTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cost(&self, a: PoseKey, b: PoseKey) -> Option<i64> {
        self.cost_table.get(&(a, b)).copied()
    }

    pub fn path(&self, a: PoseKey, b: PoseKey) -> Option<&Vec<PoseKey>> {
        self.path_table.get(&(a, b))
    }

    /// Looks up the primitive that moves the robot from `a` to `b`,
    /// inverting the stored motion if only the reverse key is present.
    pub fn motion(&self, a: PoseKey, b: PoseKey) -> Option<Motion> {
        if let Some(m) = self.motion_table.get(&(a, b)) {
            Some(*m)
        } else {
            self.motion_table.get(&(b, a)).map(|m| m.inverse())
        }
    }

    fn record_motion(&mut self, a: PoseKey, b: PoseKey, m: Motion) {
        if !self.motion_table.contains_key(&(a, b)) && !self.motion_table.contains_key(&(b, a)) {
            self.motion_table.insert((a, b), m);
        }
    }

    fn record_path(&mut self, start: PoseKey, end: PoseKey, path: Vec<PoseKey>, cost: i64) {
        let mut reversed = path.clone();
        reversed.reverse();
        self.cost_table.insert((start, end), cost);
        self.cost_table.insert((end, start), cost);
        self.path_table.insert((start, end), path);
        self.path_table.insert((end, start), reversed);
    }

    /// Runs the search for `(start, end)` if it has not already been
    /// memoized, populating `path_table`/`cost_table`/`motion_table` as a
    /// side effect. Returns the g-cost of the found path, or `None` if the
    /// heap emptied without reaching `end`. Fails fatally only if neighbor
    /// generation ever proposes an illegal 180° heading change, which would
    /// indicate a bug in this module rather than in caller input.
    pub fn find_path(
        &mut self,
        config: &PlannerConfig,
        grid: &Grid,
        start: &CellState,
        end: &CellState,
    ) -> Result<Option<i64>, PlanError> {
        let start_key = start.key();
        let end_key = end.key();

        if let Some(cost) = self.cost_table.get(&(start_key, end_key)) {
            log::trace!("astar: memo hit ({start_key:?} -> {end_key:?}) = {cost}");
            return Ok(Some(*cost));
        }

        log::debug!(
            "astar: searching ({},{},{:?}) -> ({},{},{:?})",
            start_key.x, start_key.y, start_key.direction,
            end_key.x, end_key.y, end_key.direction,
        );

        let mut g: FxHashMap<PoseKey, i64> = FxHashMap::default();
        let mut parent: FxHashMap<PoseKey, PoseKey> = FxHashMap::default();
        let mut heap: BinaryHeap<HeapItem> = BinaryHeap::default();
        let mut seq: u64 = 0;

        g.insert(start_key, 0);
        heap.push(HeapItem {
            f: start_key.manhattan(end_key),
            seq,
            node: start_key,
        });

        let mut visited: fxhash::FxHashSet<PoseKey> = fxhash::FxHashSet::default();
        let mut found = false;
        while let Some(HeapItem { node, .. }) = heap.pop() {
            if node == end_key {
                found = true;
                break;
            }
            if !visited.insert(node) {
                continue;
            }

            let node_g = match g.get(&node) {
                Some(v) => *v,
                None => continue,
            };

            for (next, motion, proximity) in neighbors(config, grid, node) {
                if visited.contains(&next) {
                    continue;
                }
                self.record_motion(node, next, motion);

                let rotation = {
                    let r = config.turn_factor
                        * rotation_cost(node.direction, next.direction)
                            .ok_or(PlanError::InvalidRotation)?;
                    if r == 0 { 1 } else { r }
                };
                let reverse = {
                    let r = config.reverse_factor * motion.reverse_cost();
                    if r == 0 { 1 } else { r }
                };
                let half_turn = {
                    let r = config.half_turn_factor * motion.half_turn_cost();
                    if r == 0 { 1 } else { r }
                };
                let motion_cost = rotation * reverse * half_turn;

                let screenshot = if next == end_key { end.penalty } else { 0 };
                let tentative_g = node_g + motion_cost + proximity;

                if g.get(&next).map_or(true, |&cur| cur > tentative_g) {
                    g.insert(next, tentative_g);
                    parent.insert(next, node);
                    seq += 1;
                    let f = tentative_g + screenshot + next.manhattan(end_key);
                    heap.push(HeapItem { f, seq, node: next });
                }
            }
        }

        if !found {
            log::warn!(
                "astar: no path from ({},{},{:?}) to ({},{},{:?})",
                start_key.x, start_key.y, start_key.direction,
                end_key.x, end_key.y, end_key.direction,
            );
            return Ok(None);
        }

        let mut path = vec![end_key];
        let mut cursor = end_key;
        while let Some(&p) = parent.get(&cursor) {
            path.push(p);
            cursor = p;
        }
        path.reverse();

        let cost = g[&end_key];
        self.record_path(start_key, end_key, path, cost);
        Ok(Some(cost))
    }
}

/// Chebyshev-<=2 proximity check against every obstacle.
fn proximity_cost(config: &PlannerConfig, grid: &Grid, x: i32, y: i32) -> i64 {
    let unsafe_nearby = grid
        .obstacles()
        .iter()
        .any(|o| (o.x - x).abs() <= 2 && (o.y - y).abs() <= 2);
    if unsafe_nearby {
        config.safe_cost
    } else {
        0
    }
}

/// Enumerates every legal neighbor of `node`: same-heading
/// forward/reverse/half-turn moves, and 90° turn moves to the other three
/// headings. At most 6 same-heading + 4 turn neighbors per node (bounded
/// to 10, the fixed primitive count).
fn neighbors(
    config: &PlannerConfig,
    grid: &Grid,
    node: PoseKey,
) -> heapless::Vec<(PoseKey, Motion, i64), 10> {
    let mut out = heapless::Vec::new();
    let d = node.direction;

    for (dx, dy, md) in MOVE_DIRECTIONS {
        if md == d {
            let (fx, fy) = (node.x + dx, node.y + dy);
            if grid.reachable(fx, fy) {
                let _ = out.push((
                    PoseKey::new(fx, fy, d),
                    Motion::Forward,
                    proximity_cost(config, grid, fx, fy),
                ));
            }

            let (rx, ry) = (node.x - dx, node.y - dy);
            if grid.reachable(rx, ry) {
                let _ = out.push((
                    PoseKey::new(rx, ry, d),
                    Motion::Reverse,
                    proximity_cost(config, grid, rx, ry),
                ));
            }

            for (odx, ody, motion) in half_turn_targets(d, config.half_turns()) {
                let (ox, oy) = (node.x + odx, node.y + ody);
                if grid.half_turn_reachable(config, node.x, node.y, ox, oy) {
                    let _ = out.push((
                        PoseKey::new(ox, oy, d),
                        motion,
                        proximity_cost(config, grid, ox, oy),
                    ));
                }
            }
        } else if let Some(targets) = turn_targets(d, md, config.turns()) {
            for (tdx, tdy, motion) in targets {
                let (tx, ty) = (node.x + tdx, node.y + tdy);
                if grid.turn_reachable(config, node.x, node.y, tx, ty, d) {
                    // Turn edges add a flat +10 to the destination's
                    // proximity cost at enumeration time.
                    let _ = out.push((
                        PoseKey::new(tx, ty, md),
                        motion,
                        proximity_cost(config, grid, tx, ty) + 10,
                    ));
                }
            }
        }
    }

    out
}

struct HeapItem {
    f: i64,
    seq: u64,
    node: PoseKey,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}
impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    /// `BinaryHeap` is a max-heap; flipping both comparisons makes the
    /// smallest `f` pop first, and among equal `f`, the earliest-inserted
    /// (`seq`) pops first: ties are broken by heap insertion order, not by
    /// whatever order a plain `BinaryHeap` would happen to produce.
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Obstacle;

    #[test]
    fn finds_straight_path_with_no_obstacles() {
        let cfg = PlannerConfig::default();
        let grid = Grid::default();
        let mut tables = PlannerTables::new();
        let start = CellState::new(1, 1, Direction::North);
        let end = CellState::new(1, 10, Direction::North);
        let cost = tables.find_path(&cfg, &grid, &start, &end).unwrap();
        assert!(cost.is_some());
        let path = tables.path(start.key(), end.key()).unwrap();
        assert_eq!(path.first().copied(), Some(start.key()));
        assert_eq!(path.last().copied(), Some(end.key()));
    }

    #[test]
    fn cost_table_is_symmetric() {
        let cfg = PlannerConfig::default();
        let grid = Grid::default();
        let mut tables = PlannerTables::new();
        let start = CellState::new(1, 1, Direction::North);
        let end = CellState::new(5, 5, Direction::North);
        tables.find_path(&cfg, &grid, &start, &end).unwrap();
        assert_eq!(
            tables.cost(start.key(), end.key()),
            tables.cost(end.key(), start.key())
        );
    }

    #[test]
    fn path_table_is_reverse_symmetric() {
        let cfg = PlannerConfig::default();
        let grid = Grid::default();
        let mut tables = PlannerTables::new();
        let start = CellState::new(1, 1, Direction::North);
        let end = CellState::new(5, 5, Direction::North);
        tables.find_path(&cfg, &grid, &start, &end).unwrap();
        let fwd = tables.path(start.key(), end.key()).unwrap().clone();
        let bwd = tables.path(end.key(), start.key()).unwrap().clone();
        let mut rev = bwd.clone();
        rev.reverse();
        assert_eq!(fwd, rev);
    }

    #[test]
    fn memoized_second_call_is_a_no_op() {
        let cfg = PlannerConfig::default();
        let grid = Grid::default();
        let mut tables = PlannerTables::new();
        let start = CellState::new(1, 1, Direction::North);
        let end = CellState::new(5, 5, Direction::North);
        let first = tables.find_path(&cfg, &grid, &start, &end);
        let second = tables.find_path(&cfg, &grid, &start, &end);
        assert_eq!(first, second);
    }

    #[test]
    fn unreachable_goal_returns_none_and_stores_nothing() {
        let cfg = PlannerConfig::default();
        let mut grid = Grid::default();
        // Wall the goal off entirely with obstacles on all 4 sides, close
        // enough that every approach direction is blocked.
        for (x, y) in [(1, 1), (3, 1), (1, 3), (3, 3)] {
            grid.insert(Obstacle::new(x, y, Direction::Skip, 99));
        }
        let mut tables = PlannerTables::new();
        let start = CellState::new(1, 1, Direction::North);
        let end = CellState::new(2, 2, Direction::North);
        let cost = tables.find_path(&cfg, &grid, &start, &end);
        assert_eq!(cost, Ok(None));
        assert!(tables.cost(start.key(), end.key()).is_none());
    }

    #[test]
    fn every_edge_on_a_path_is_in_the_motion_table() {
        let cfg = PlannerConfig::default();
        let grid = Grid::default();
        let mut tables = PlannerTables::new();
        let start = CellState::new(1, 1, Direction::North);
        let end = CellState::new(1, 10, Direction::North);
        tables.find_path(&cfg, &grid, &start, &end).unwrap();
        let path = tables.path(start.key(), end.key()).unwrap().clone();
        for pair in path.windows(2) {
            assert!(tables.motion(pair[0], pair[1]).is_some());
        }
    }
}
