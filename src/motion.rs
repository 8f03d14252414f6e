//! Recovers the motion primitive between each consecutive pair of an
//! optimal pose sequence, interleaving capture markers.

use crate::astar::PlannerTables;
use crate::error::PlanError;
use crate::geometry::Motion;
use crate::pose::CellState;

/// The motion list alongside the obstacle ids captured along the way and
/// the pose index each motion is derived from.
#[derive(Debug, Clone)]
pub struct MotionPlan {
    pub motions: Vec<Motion>,
    pub captured_obstacle_ids: Vec<u32>,
    /// `transition_at[i]` is the index into the source pose sequence that
    /// `motions[i]` was derived from (the "from" pose of a drive primitive,
    /// or the arrival pose of a `Capture`).
    pub transition_at: Vec<usize>,
}

/// Walks `path`, looking up the primitive between every consecutive pair
/// in `tables`' motion table (inverting on a reverse-key hit), and emits
/// one `Motion::Capture` per screenshot tag carried by the arrival pose.
pub fn reconstruct(tables: &PlannerTables, path: &[CellState]) -> Result<MotionPlan, PlanError> {
    let mut motions = Vec::new();
    let mut captured_obstacle_ids = Vec::new();
    let mut transition_at = Vec::new();

    for (i, pair) in path.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        let motion = tables.motion(from.key(), to.key()).ok_or_else(|| {
            PlanError::MotionReconstructionMiss {
                from: (from.x, from.y, direction_name(from.direction)),
                to: (to.x, to.y, direction_name(to.direction)),
            }
        })?;
        motions.push(motion);
        transition_at.push(i);

        for tag in &to.screenshots {
            let id = tag
                .split('_')
                .next()
                .and_then(|s| s.parse::<u32>().ok())
                .ok_or(PlanError::MotionReconstructionMiss {
                    from: (from.x, from.y, direction_name(from.direction)),
                    to: (to.x, to.y, direction_name(to.direction)),
                })?;
            motions.push(Motion::Capture);
            captured_obstacle_ids.push(id);
            transition_at.push(i + 1);
        }
    }

    Ok(MotionPlan {
        motions,
        captured_obstacle_ids,
        transition_at,
    })
}

fn direction_name(d: crate::pose::Direction) -> &'static str {
    use crate::pose::Direction::*;
    match d {
        North => "N",
        South => "S",
        East => "E",
        West => "W",
        Skip => "SKIP",
    }
}
