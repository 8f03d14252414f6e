//! For each obstacle, the ordered set of candidate robot poses from which a
//! photo is valid, each with a quality penalty.

use crate::config::PlannerConfig;
use crate::grid::{Grid, Obstacle};
use crate::pose::{CellState, Direction};

/// The five offsets `(dx, dy)` from the obstacle, one per slot, for an
/// obstacle facing `d`. Each facing gets its own sign table rather than a
/// single rotation formula: the reference implementation's lateral-slot
/// signs for east/west are not a mirror image of north/south's (both east
/// and west nudge the lateral slots by `+1`/`-1` on the same axis sense),
/// so this is preserved verbatim instead of "simplified" into one rule.
fn slot_offsets(d: Direction, offset: i32) -> [(i32, i32); 5] {
    match d {
        Direction::North => [
            (0, offset),
            (-1, offset + 2),
            (1, offset + 2),
            (0, offset + 1),
            (0, offset + 2),
        ],
        Direction::South => [
            (0, -offset),
            (1, -offset - 2),
            (-1, -offset - 2),
            (0, -offset - 1),
            (0, -offset - 2),
        ],
        Direction::East => [
            (offset, 0),
            (offset + 2, 1),
            (offset + 2, -1),
            (offset + 1, 0),
            (offset + 2, 0),
        ],
        Direction::West => [
            (-offset, 0),
            (-offset - 2, 1),
            (-offset - 2, -1),
            (-offset - 1, 0),
            (-offset - 2, 0),
        ],
        Direction::Skip => [(0, 0); 5],
    }
}

/// Builds the ordered candidate viewing-pose list for one obstacle.
/// Obstacles facing `Direction::Skip` contribute no candidates. Invalid
/// (off-grid or not [`Grid::reachable`]) candidates are dropped, preserving
/// slot order.
pub fn candidates(config: &PlannerConfig, grid: &Grid, obstacle: &Obstacle) -> Vec<CellState> {
    if !obstacle.direction.is_heading() {
        return Vec::new();
    }

    let facing = obstacle.direction;
    let robot_facing = facing.opposite();
    let offset = 2 * config.expanded_cell;
    let too_close = config.too_close_cost;
    let screenshot = config.screenshot_cost;

    let penalties = [too_close, screenshot, screenshot, too_close / 2, 0];

    slot_offsets(facing, offset)
        .into_iter()
        .map(|(dx, dy)| (obstacle.x + dx, obstacle.y + dy))
        .zip(penalties)
        .filter(|((x, y), _)| grid.reachable(*x, *y))
        .map(|((x, y), penalty)| CellState::with_penalty(x, y, robot_facing, penalty))
        .collect()
}
