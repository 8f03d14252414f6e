use std::fmt::Display;

/// Fatal planner errors. `NoPathFound` and `NoTourFound` are deliberately
/// not variants here: the former is absorbed into the TSP cost matrix as a
/// large sentinel (a candidate ordering simply loses), and the latter is a
/// normal, successful, empty [`crate::PlanOutput`] that callers render as
/// an empty animation.
///
/// There is no `InvalidDirection` variant either: modeling
/// [`crate::pose::Direction`] as an exhaustive enum with exhaustive
/// `match` throughout removes that error class at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    /// A rotation-cost query asked for a 180° turn-in-place. Indicates a
    /// neighbor-generation bug: callers must never construct an edge
    /// between opposite headings.
    InvalidRotation,
    /// The capture annotator could not find the obstacle id referenced by
    /// an arrival pose. Indicates an inconsistent `visit_states` build.
    UnknownObstacleId(u32),
    /// Neither `motion_table[u -> v]` nor its inverse exists for a
    /// consecutive pair in the output path.
    MotionReconstructionMiss { from: (i32, i32, &'static str), to: (i32, i32, &'static str) },
}

impl Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRotation => write!(f, "rotation cost requested for an illegal 180\u{b0} turn"),
            Self::UnknownObstacleId(id) => write!(f, "no obstacle with id {id} in the grid"),
            Self::MotionReconstructionMiss { from, to } => write!(
                f,
                "no motion recorded between {from:?} and {to:?}"
            ),
        }
    }
}

impl std::error::Error for PlanError {}
