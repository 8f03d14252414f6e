//! Tunable constants, exposed as configuration rather than baked into the
//! algorithm: every numeric constant that shapes planner behavior is a
//! struct field here, never a bare module constant read from deep inside
//! the search.
//!
//! Mirrors the shape of the teacher's `Pathfinder<F>` (`map_dimension`,
//! `offset`, `step_size` carried as struct fields instead of module
//! constants) generalized to this planner's larger constant set.

use crate::geometry::{
    EXPANDED_CELL, HALF_TURN_FACTOR, ITERATIONS, MID_TURN_PADDING, REVERSE_FACTOR, SAFE_COST,
    SCREENSHOT_COST, TOO_CLOSE_COST, TURN_FACTOR, TURN_PADDING, TURN_RADIUS,
};
use crate::pose::Direction;

/// Every tunable numeric constant the planner uses, plus grid size and the
/// default start pose. `Default` reproduces the reference constant table
/// verbatim.
#[derive(Debug, Clone, Copy)]
pub struct PlannerConfig {
    pub size_x: i32,
    pub size_y: i32,
    pub start_x: i32,
    pub start_y: i32,
    pub start_direction: Direction,

    pub turn_factor: i64,
    pub half_turn_factor: i64,
    pub reverse_factor: i64,
    pub safe_cost: i64,
    pub screenshot_cost: i64,
    pub too_close_cost: i64,
    pub turn_padding: f64,
    pub mid_turn_padding: f64,
    /// Scales [`PlannerConfig::turns`] and [`PlannerConfig::half_turns`];
    /// see those methods.
    pub turn_radius: i32,
    pub expanded_cell: i32,
    pub iterations: u32,
}

impl PlannerConfig {
    /// `[5, 3] * turn_radius`: the big/small leg lengths of a 90° turn
    /// primitive. Computed from `turn_radius` on every call (not cached),
    /// so changing `turn_radius` on a live config takes effect immediately.
    pub fn turns(&self) -> [i32; 2] {
        [5 * self.turn_radius, 3 * self.turn_radius]
    }

    /// `[4, 1] * turn_radius`: the longitudinal/lateral magnitudes of a
    /// half-turn (offset) primitive.
    pub fn half_turns(&self) -> [i32; 2] {
        [4 * self.turn_radius, 1 * self.turn_radius]
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            size_x: 20,
            size_y: 20,
            start_x: 1,
            start_y: 1,
            start_direction: Direction::North,

            turn_factor: TURN_FACTOR,
            half_turn_factor: HALF_TURN_FACTOR,
            reverse_factor: REVERSE_FACTOR,
            safe_cost: SAFE_COST,
            screenshot_cost: SCREENSHOT_COST,
            too_close_cost: TOO_CLOSE_COST,
            turn_padding: TURN_PADDING,
            mid_turn_padding: MID_TURN_PADDING,
            turn_radius: TURN_RADIUS,
            expanded_cell: EXPANDED_CELL,
            iterations: ITERATIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_turns_match_the_reference_table() {
        let cfg = PlannerConfig::default();
        assert_eq!(cfg.turns(), [5, 3]);
        assert_eq!(cfg.half_turns(), [4, 1]);
    }

    #[test]
    fn turn_radius_scales_turns_and_half_turns() {
        let mut cfg = PlannerConfig::default();
        cfg.turn_radius = 2;
        assert_eq!(cfg.turns(), [10, 6]);
        assert_eq!(cfg.half_turns(), [8, 2]);
    }
}
