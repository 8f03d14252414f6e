//! Cardinal directions, rotation costs, the motion primitive table, and the
//! numeric constants that make up the planner's public behavior contract.

use crate::pose::Direction;

pub const TURN_FACTOR: i64 = 6;
pub const HALF_TURN_FACTOR: i64 = 10;
pub const REVERSE_FACTOR: i64 = 3;
pub const SAFE_COST: i64 = 1000;
pub const SCREENSHOT_COST: i64 = 100;
pub const TOO_CLOSE_COST: i64 = 50;
pub const TURN_PADDING: f64 = 2.0;
pub const MID_TURN_PADDING: f64 = 2.0;
pub const TURN_RADIUS: i32 = 1;
pub const TURNS: [i32; 2] = [5, 3];
pub const HALF_TURNS: [i32; 2] = [4, 1];
pub const EXPANDED_CELL: i32 = 1;
pub const ITERATIONS: u32 = 2000;

/// A tagged motion primitive. Numeric values match the reference table
/// verbatim so `value + inverse(value) == 10` holds for every drive
/// primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    ForwardLeftTurn = 0,
    ForwardOffsetLeft = 1,
    Forward = 2,
    ForwardOffsetRight = 3,
    ForwardRightTurn = 4,
    ReverseRightTurn = 6,
    ReverseOffsetLeft = 7,
    Reverse = 8,
    ReverseOffsetRight = 9,
    ReverseLeftTurn = 10,
    Capture = 1000,
}

impl Motion {
    pub fn value(self) -> i32 {
        self as i32
    }

    /// The inverse primitive: `m.value() + m.inverse().value() == 10` for
    /// every drive primitive; `Capture` is its own inverse.
    pub fn inverse(self) -> Motion {
        match self {
            Motion::ForwardLeftTurn => Motion::ReverseLeftTurn,
            Motion::ForwardOffsetLeft => Motion::ReverseOffsetRight,
            Motion::Forward => Motion::Reverse,
            Motion::ForwardOffsetRight => Motion::ReverseOffsetLeft,
            Motion::ForwardRightTurn => Motion::ReverseRightTurn,
            Motion::ReverseRightTurn => Motion::ForwardRightTurn,
            Motion::ReverseOffsetLeft => Motion::ForwardOffsetRight,
            Motion::Reverse => Motion::Forward,
            Motion::ReverseOffsetRight => Motion::ForwardOffsetLeft,
            Motion::ReverseLeftTurn => Motion::ForwardLeftTurn,
            Motion::Capture => Motion::Capture,
        }
    }

    /// 1 iff this primitive drives the robot backwards.
    pub fn reverse_cost(self) -> i64 {
        match self {
            Motion::ReverseRightTurn
            | Motion::ReverseOffsetLeft
            | Motion::Reverse
            | Motion::ReverseOffsetRight
            | Motion::ReverseLeftTurn => 1,
            _ => 0,
        }
    }

    /// 1 iff this primitive is a lateral offset ("half-turn").
    pub fn half_turn_cost(self) -> i64 {
        matches!(
            self,
            Motion::ForwardOffsetLeft
                | Motion::ForwardOffsetRight
                | Motion::ReverseOffsetLeft
                | Motion::ReverseOffsetRight
        ) as i64
    }

    /// True only for the two primitives that can be chained into a single
    /// straight run by downstream consumers (motion formatter, out of scope
    /// here, but the predicate belongs with the primitive table).
    pub fn is_combinable(self) -> bool {
        matches!(self, Motion::Forward | Motion::Reverse)
    }
}

/// Rotation cost between two headings. `None` signals an illegal 180°
/// turn-in-place — callers must never construct a neighbor edge between
/// opposite headings.
pub fn rotation_cost(from: Direction, to: Direction) -> Option<i64> {
    use Direction::*;
    match (from, to) {
        (North, North) | (South, South) | (East, East) | (West, West) => Some(0),
        (North, South) | (South, North) | (East, West) | (West, East) => None,
        (North, East) | (North, West) | (South, East) | (South, West) | (East, North)
        | (East, South) | (West, North) | (West, South) => Some(1),
        _ => None,
    }
}

/// Lateral half-turn displacement for a straight-offset move while facing
/// `d`, given the configured `[longitudinal, lateral]` magnitudes
/// (`HALF_TURNS` by default). Sign convention: for N/S axes the
/// displacement is `(lateral, longitudinal)`; for E/W axes the roles
/// swap to `(longitudinal, lateral)`. Preserved verbatim from the source
/// table.
pub fn half_turn_displacement(d: Direction, half_turns: [i32; 2]) -> (i32, i32) {
    match d {
        Direction::North => (half_turns[1], half_turns[0]),
        Direction::South => (-half_turns[1], -half_turns[0]),
        Direction::East => (half_turns[0], half_turns[1]),
        Direction::West => (-half_turns[0], -half_turns[1]),
        Direction::Skip => (0, 0),
    }
}

/// The four neighbor-target offsets `(dx, dy, Motion)` for a half-turn
/// move while facing `d`, derived from `half_turn_displacement`. Sign
/// assignment (which combination is "left" vs "right") is preserved
/// verbatim from the source's N/S-vs-E/W branch.
pub fn half_turn_targets(d: Direction, half_turns: [i32; 2]) -> [(i32, i32, Motion); 4] {
    let (dx, dy) = half_turn_displacement(d, half_turns);
    match d {
        Direction::North | Direction::South => [
            (dx, dy, Motion::ForwardOffsetRight),
            (-dx, dy, Motion::ForwardOffsetLeft),
            (dx, -dy, Motion::ReverseOffsetRight),
            (-dx, -dy, Motion::ReverseOffsetLeft),
        ],
        Direction::East | Direction::West => [
            (dx, -dy, Motion::ForwardOffsetRight),
            (dx, dy, Motion::ForwardOffsetLeft),
            (-dx, -dy, Motion::ReverseOffsetRight),
            (-dx, dy, Motion::ReverseOffsetLeft),
        ],
        Direction::Skip => [(0, 0, Motion::Capture); 4],
    }
}

/// The forward/reverse turn targets `(dx, dy, Motion)` for the 90° heading
/// change `d -> md`, given the configured `[big, small]` turn radii
/// (`TURNS` by default). Returns `None` for the two illegal U-turns and
/// for `d == md` (not a turn). Legal for the 8 ordered quarter-turn pairs;
/// signs preserved verbatim from the source.
pub fn turn_targets(
    d: Direction,
    md: Direction,
    turns: [i32; 2],
) -> Option<[(i32, i32, Motion); 2]> {
    let big = turns[0];
    let small = turns[1];
    use Direction::*;
    use Motion::*;
    Some(match (d, md) {
        (North, East) => [(big, small, ForwardRightTurn), (-small, -big, ReverseLeftTurn)],
        (East, North) => [(small, big, ForwardLeftTurn), (-big, -small, ReverseRightTurn)],
        (East, South) => [(small, -big, ForwardRightTurn), (-big, small, ReverseLeftTurn)],
        (South, East) => [(big, -small, ForwardLeftTurn), (-small, big, ReverseRightTurn)],
        (South, West) => [(-big, -small, ForwardRightTurn), (small, big, ReverseLeftTurn)],
        (West, South) => [(-small, -big, ForwardLeftTurn), (big, small, ReverseRightTurn)],
        (West, North) => [(-small, big, ForwardRightTurn), (big, -small, ReverseLeftTurn)],
        (North, West) => [(-big, small, ForwardLeftTurn), (small, -big, ReverseRightTurn)],
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_sums_to_ten() {
        for m in [
            Motion::ForwardLeftTurn,
            Motion::ForwardOffsetLeft,
            Motion::Forward,
            Motion::ForwardOffsetRight,
            Motion::ForwardRightTurn,
            Motion::ReverseRightTurn,
            Motion::ReverseOffsetLeft,
            Motion::Reverse,
            Motion::ReverseOffsetRight,
            Motion::ReverseLeftTurn,
        ] {
            assert_eq!(m.value() + m.inverse().value(), 10, "{m:?}");
        }
        assert_eq!(Motion::Capture.inverse(), Motion::Capture);
    }

    #[test]
    fn rotation_illegal_for_u_turns() {
        assert_eq!(rotation_cost(Direction::North, Direction::South), None);
        assert_eq!(rotation_cost(Direction::East, Direction::West), None);
    }

    #[test]
    fn rotation_zero_for_same_heading() {
        assert_eq!(rotation_cost(Direction::North, Direction::North), Some(0));
    }

    #[test]
    fn rotation_one_for_quarter_turn() {
        assert_eq!(rotation_cost(Direction::North, Direction::East), Some(1));
        assert_eq!(rotation_cost(Direction::South, Direction::West), Some(1));
    }

    #[test]
    fn is_combinable_only_forward_reverse() {
        assert!(Motion::Forward.is_combinable());
        assert!(Motion::Reverse.is_combinable());
        assert!(!Motion::ForwardOffsetLeft.is_combinable());
        assert!(!Motion::Capture.is_combinable());
    }

    #[test]
    fn half_turn_targets_have_displacement_set() {
        for d in Direction::ALL_HEADINGS {
            for (dx, dy, _) in half_turn_targets(d, HALF_TURNS) {
                let mut mags = [dx.abs(), dy.abs()];
                mags.sort_unstable();
                assert_eq!(mags, [HALF_TURNS[1], HALF_TURNS[0]]);
            }
        }
    }

    #[test]
    fn turn_targets_have_displacement_set() {
        for d in Direction::ALL_HEADINGS {
            for md in Direction::ALL_HEADINGS {
                let Some(targets) = turn_targets(d, md, TURNS) else {
                    continue;
                };
                for (dx, dy, _) in targets {
                    let mut mags = [dx.abs(), dy.abs()];
                    mags.sort_unstable();
                    assert_eq!(mags, [TURNS[1], TURNS[0]]);
                }
            }
        }
    }

    #[test]
    fn turn_targets_illegal_for_same_or_opposite_heading() {
        assert!(turn_targets(Direction::North, Direction::North, TURNS).is_none());
        assert!(turn_targets(Direction::North, Direction::South, TURNS).is_none());
        assert!(turn_targets(Direction::East, Direction::West, TURNS).is_none());
    }
}
