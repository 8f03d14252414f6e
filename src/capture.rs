//! Relative-position labeling for a capture: where the photographed
//! obstacle sits in the frame (center, left, right) as seen from the
//! robot's arrival pose.

use crate::error::PlanError;
use crate::grid::{Grid, Obstacle};
use crate::pose::{CellState, Direction};

/// The three positions an obstacle's image can occupy in the robot's
/// viewfinder, given the robot's facing and the obstacle's coordinates
/// relative to the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativePosition {
    Center,
    Left,
    Right,
}

impl RelativePosition {
    fn tag(self) -> &'static str {
        match self {
            RelativePosition::Center => "C",
            RelativePosition::Left => "L",
            RelativePosition::Right => "R",
        }
    }
}

/// Computes the obstacle's position relative to a robot standing at
/// `(rx, ry)` facing `facing`, given the obstacle's `(ox, oy)`. The
/// left/right assignment flips with facing; only `Direction::Skip` is
/// unreachable here since capture poses are always a cardinal heading.
fn relative_position(facing: Direction, rx: i32, ry: i32, ox: i32, oy: i32) -> RelativePosition {
    use Direction::*;
    use RelativePosition::*;
    match facing {
        North => {
            if ox == rx && oy > ry {
                Center
            } else if ox < rx {
                Left
            } else {
                Right
            }
        }
        South => {
            if ox == rx && oy < ry {
                Center
            } else if ox < rx {
                Right
            } else {
                Left
            }
        }
        East => {
            if oy == ry && ox > rx {
                Center
            } else if oy < ry {
                Right
            } else {
                Left
            }
        }
        West => {
            if oy == ry && ox < rx {
                Center
            } else if oy < ry {
                Left
            } else {
                Right
            }
        }
        Skip => Center,
    }
}

/// Looks up `obstacle_id` in `grid`, computes its relative position from
/// `arrival`, and appends `"{obstacle_id}_{C|L|R}"` to `arrival.screenshots`.
pub fn annotate(grid: &Grid, arrival: &mut CellState, obstacle_id: u32) -> Result<(), PlanError> {
    let obstacle: &Obstacle = grid
        .obstacle_by_id(obstacle_id)
        .ok_or(PlanError::UnknownObstacleId(obstacle_id))?;
    let pos = relative_position(arrival.direction, arrival.x, arrival.y, obstacle.x, obstacle.y);
    arrival.screenshots.push(format!("{obstacle_id}_{}", pos.tag()));
    Ok(())
}
