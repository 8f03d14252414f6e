//! Viewpoint selection and tour ordering: chooses which obstacles to visit,
//! which candidate viewing pose to use for each, and the order to visit
//! them in, by reducing the problem to an open-tour TSP solved exactly by
//! Held-Karp over a symmetric pairwise cost matrix built from [`crate::astar`]'s
//! memo tables.

use crate::astar::PlannerTables;
use crate::capture;
use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::grid::{Grid, Obstacle};
use crate::pose::CellState;
use crate::viewpoints;

/// Cost-matrix sentinel for an unreachable pair. Large enough that no
/// combination of real edge costs can compete with it.
const SENTINEL: i64 = 1_000_000_000;

/// The result of selecting and ordering a visit to some subset of the
/// grid's obstacles.
pub struct TourResult {
    pub path: Vec<CellState>,
    /// `None` when no subset (including the empty one, if obstacles exist)
    /// yielded a finite-cost tour.
    pub cost: Option<i64>,
    /// Ids actually photographed, in visit order.
    pub visited_obstacle_ids: Vec<u32>,
    /// Ids with `Direction::Skip`, ids with no reachable candidate viewing
    /// pose, or ids dropped by subset selection.
    pub skipped_obstacle_ids: Vec<u32>,
}

/// Chooses a subset of `grid`'s obstacles, a viewing pose per obstacle, and
/// a visit order, minimizing a weighted sum of travel cost and viewpoint
/// penalties. Subsets are tried by descending popcount; the first subset
/// (of any size) that admits any finite-cost tour wins outright — larger
/// subsets are preferred even when a smaller one would cost less. This is
/// intentional "visit more obstacles" policy, not a bug.
pub fn solve(
    config: &PlannerConfig,
    grid: &Grid,
    start: &CellState,
    tables: &mut PlannerTables,
) -> Result<TourResult, PlanError> {
    let mut skip_ids: Vec<u32> = grid
        .obstacles()
        .iter()
        .filter(|o| !o.direction.is_heading())
        .map(|o| o.id)
        .collect();

    let mut visitable: Vec<(&Obstacle, Vec<CellState>)> = Vec::new();
    for o in grid.obstacles().iter().filter(|o| o.direction.is_heading()) {
        let candidates = viewpoints::candidates(config, grid, o);
        if candidates.is_empty() {
            log::warn!("tsp: obstacle {} has no reachable candidate viewing pose", o.id);
            skip_ids.push(o.id);
        } else {
            visitable.push((o, candidates));
        }
    }

    let n = visitable.len();
    if n == 0 {
        return Ok(TourResult {
            path: vec![start.clone()],
            cost: Some(0),
            visited_obstacle_ids: Vec::new(),
            skipped_obstacle_ids: skip_ids,
        });
    }

    log::debug!("tsp: {n} visitable obstacle(s), enumerating subsets by descending popcount");

    let mut masks_by_popcount: Vec<Vec<usize>> = vec![Vec::new(); n + 1];
    for mask in 1..(1usize << n) {
        masks_by_popcount[mask.count_ones() as usize].push(mask);
    }

    for popcount in (1..=n).rev() {
        for mask in masks_by_popcount[popcount].iter().copied() {
            if let Some((cost, path, visited_obstacle_ids)) =
                evaluate_subset(config, grid, start, tables, &visitable, mask)?
            {
                let mut skipped_obstacle_ids = skip_ids.clone();
                for (i, (obstacle, _)) in visitable.iter().enumerate() {
                    if mask & (1 << i) == 0 {
                        skipped_obstacle_ids.push(obstacle.id);
                    }
                }
                log::info!(
                    "tsp: chose a subset of {popcount} obstacle(s) out of {n}, cost={cost}"
                );
                return Ok(TourResult {
                    path,
                    cost: Some(cost),
                    visited_obstacle_ids,
                    skipped_obstacle_ids,
                });
            }
        }
        log::warn!("tsp: no finite-cost tour at subset size {popcount}, trying a smaller subset");
    }

    log::warn!("tsp: no finite-cost tour found for any non-empty subset");
    Ok(TourResult {
        path: Vec::new(),
        cost: None,
        visited_obstacle_ids: Vec::new(),
        skipped_obstacle_ids: grid.obstacle_ids().collect(),
    })
}

/// Evaluates one obstacle subset (`mask`, a bit per index into `visitable`):
/// populates the A* memo tables for every pair among the subset's full
/// candidate lists, then searches candidate-slot assignments (one slot per
/// obstacle) bounded by `config.iterations`, keeping the cheapest finite
/// tour found. Returns `None` if no assignment yields a finite-cost tour.
fn evaluate_subset(
    config: &PlannerConfig,
    grid: &Grid,
    start: &CellState,
    tables: &mut PlannerTables,
    visitable: &[(&Obstacle, Vec<CellState>)],
    mask: usize,
) -> Result<Option<(i64, Vec<CellState>, Vec<u32>)>, PlanError> {
    let bits: Vec<usize> = (0..visitable.len()).filter(|i| mask & (1 << i) != 0).collect();

    let mut visit_states: Vec<CellState> = vec![start.clone()];
    let mut ranges: Vec<(usize, usize)> = Vec::with_capacity(bits.len());
    for &i in &bits {
        let lo = visit_states.len();
        let candidates = &visitable[i].1;
        visit_states.extend(candidates.iter().cloned());
        ranges.push((lo, candidates.len()));
    }

    for a in 0..visit_states.len() {
        for b in (a + 1)..visit_states.len() {
            tables.find_path(config, grid, &visit_states[a], &visit_states[b])?;
        }
    }

    let mut budget: i64 = config.iterations as i64;
    let mut chosen: Vec<usize> = Vec::with_capacity(bits.len());
    let mut best: Option<(i64, Vec<usize>)> = None;

    enumerate_assignments(&ranges, &mut chosen, 0, &mut budget, &mut |assignment| {
        let mut matrix_indices = Vec::with_capacity(assignment.len() + 1);
        matrix_indices.push(0usize);
        matrix_indices.extend_from_slice(assignment);

        let size = matrix_indices.len();
        let mut matrix = vec![vec![SENTINEL; size]; size];
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = 0;
        }
        for i in 0..size {
            for j in 0..size {
                if i == j {
                    continue;
                }
                let a = visit_states[matrix_indices[i]].key();
                let b = visit_states[matrix_indices[j]].key();
                if let Some(c) = tables.cost(a, b) {
                    matrix[i][j] = c;
                }
            }
        }
        // Returning to the start is free: makes this an open-tour TSP.
        for row in matrix.iter_mut() {
            row[0] = 0;
        }

        let Some((dp_cost, order)) = held_karp(&matrix) else {
            return;
        };
        let penalty_sum: i64 = assignment.iter().map(|&idx| visit_states[idx].penalty).sum();
        let total = dp_cost + penalty_sum;

        if best.as_ref().map_or(true, |(c, _)| total < *c) {
            best = Some((
                total,
                order.iter().map(|&node| matrix_indices[node]).collect(),
            ));
        }
    });

    let Some((cost, index_order)) = best else {
        return Ok(None);
    };

    let mut path = vec![start.clone()];
    let mut visited_obstacle_ids = Vec::with_capacity(bits.len());

    for pair in index_order.windows(2) {
        let (from_idx, to_idx) = (pair[0], pair[1]);
        let from_key = visit_states[from_idx].key();
        let to_key = visit_states[to_idx].key();
        let segment = tables
            .path(from_key, to_key)
            .expect("every pair among visit_states was memoized above")
            .clone();
        for key in segment.into_iter().skip(1) {
            path.push(CellState::new(key.x, key.y, key.direction));
        }

        if let Some(obstacle_pos) = ranges
            .iter()
            .position(|&(lo, len)| to_idx >= lo && to_idx < lo + len)
        {
            let obstacle = visitable[bits[obstacle_pos]].0;
            capture::annotate(grid, path.last_mut().unwrap(), obstacle.id)?;
            visited_obstacle_ids.push(obstacle.id);
        }
    }

    Ok(Some((cost, path, visited_obstacle_ids)))
}

/// DFS over candidate-slot assignments (one slot per obstacle in `ranges`),
/// counting `budget` down per complete assignment. When the budget is
/// exhausted mid-search, the remaining combinations are simply never
/// visited — a deliberate truncation for large obstacle counts, not a bug.
fn enumerate_assignments(
    ranges: &[(usize, usize)],
    chosen: &mut Vec<usize>,
    depth: usize,
    budget: &mut i64,
    on_assignment: &mut impl FnMut(&[usize]),
) {
    if *budget <= 0 {
        return;
    }
    if depth == ranges.len() {
        *budget -= 1;
        on_assignment(chosen);
        return;
    }
    let (lo, len) = ranges[depth];
    for slot in 0..len {
        if *budget <= 0 {
            break;
        }
        chosen.push(lo + slot);
        enumerate_assignments(ranges, chosen, depth + 1, budget, on_assignment);
        chosen.pop();
    }
}

/// Exact TSP over a symmetric `(k+1)x(k+1)` cost matrix (node 0 is the
/// start, nodes `1..=k` are the chosen obstacle viewpoints, column 0 is
/// forced to zero so returning to start is free) via the standard
/// bitmask-DP (Held-Karp) algorithm. Returns the optimal cost and the
/// visit order (node 0 first), or `None` if every completion is blocked
/// by the sentinel.
fn held_karp(matrix: &[Vec<i64>]) -> Option<(i64, Vec<usize>)> {
    let k = matrix.len() - 1;
    if k == 0 {
        return Some((0, vec![0]));
    }

    // `SENTINEL`-filled entries mean "no edge" (an unreachable pose pair);
    // `DP_UNREACHED` is a separate, much larger value meaning "this
    // (mask, j) state has not been reached by any combination of real
    // edges yet". Conflating the two would let a chain of `SENTINEL` edges
    // be summed into an ordinary (if very large) finite cost instead of
    // being rejected as blocked.
    const DP_UNREACHED: i64 = i64::MAX / 4;
    let full = 1usize << k;
    // dp[mask][j]: cheapest cost starting at node 0, visiting exactly the
    // nodes in `mask` (bit `j-1` set for node `j`), ending at node `j`.
    let mut dp = vec![vec![DP_UNREACHED; k + 1]; full];
    let mut parent = vec![vec![usize::MAX; k + 1]; full];

    for j in 1..=k {
        let mask = 1 << (j - 1);
        let c = matrix[0][j];
        if c < SENTINEL {
            dp[mask][j] = c;
        }
    }

    for mask in 1..full {
        for j in 1..=k {
            if mask & (1 << (j - 1)) == 0 {
                continue;
            }
            let cur = dp[mask][j];
            if cur >= DP_UNREACHED {
                continue;
            }
            for nj in 1..=k {
                if mask & (1 << (nj - 1)) != 0 {
                    continue;
                }
                if matrix[j][nj] >= SENTINEL {
                    continue;
                }
                let nmask = mask | (1 << (nj - 1));
                let candidate = cur + matrix[j][nj];
                if candidate < dp[nmask][nj] {
                    dp[nmask][nj] = candidate;
                    parent[nmask][nj] = j;
                }
            }
        }
    }

    let full_mask = full - 1;
    let mut best_cost = DP_UNREACHED;
    let mut best_j = 0;
    for j in 1..=k {
        if dp[full_mask][j] >= DP_UNREACHED {
            continue;
        }
        let c = dp[full_mask][j] + matrix[j][0];
        if c < best_cost {
            best_cost = c;
            best_j = j;
        }
    }
    if best_cost >= DP_UNREACHED {
        return None;
    }

    let mut order = vec![0usize; k];
    let mut mask = full_mask;
    let mut j = best_j;
    for slot in order.iter_mut().rev() {
        *slot = j;
        let pj = parent[mask][j];
        mask &= !(1 << (j - 1));
        j = pj;
    }

    let mut full_order = vec![0];
    full_order.extend(order);
    Some((best_cost, full_order))
}
