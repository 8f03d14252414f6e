use std::hash::{Hash, Hasher};

/// Cardinal heading of a robot pose, or the facing of an obstacle's image.
///
/// `Skip` only ever appears on an [`crate::grid::Obstacle`]; a robot pose
/// is always one of the four cardinal headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Skip,
}

impl Direction {
    /// The four headings a robot pose can take (`Skip` excluded, since it is
    /// never a heading the robot itself can face). [`crate::astar`]'s
    /// neighbor enumeration uses its own `MOVE_DIRECTIONS` table rather than
    /// this constant; this list is for code that just needs to iterate every
    /// heading once, in a fixed order.
    pub const ALL_HEADINGS: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The direction a robot must face to photograph an obstacle facing `self`.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Skip => Direction::Skip,
        }
    }

    pub fn is_heading(self) -> bool {
        !matches!(self, Direction::Skip)
    }
}

/// A grid position plus heading.
///
/// Equality and hashing are defined on `(x, y, direction)` only;
/// `penalty` and `screenshots` are metadata that must never affect memo
/// table lookups.
#[derive(Debug, Clone)]
pub struct CellState {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    /// Quality penalty of this pose as a viewing pose. Zero for poses that
    /// were never generated as a candidate (e.g. waypoints on a stitched path).
    pub penalty: i64,
    /// Append-only capture tags, e.g. `"3_L"`, set by [`crate::capture`].
    pub screenshots: Vec<String>,
}

impl CellState {
    pub fn new(x: i32, y: i32, direction: Direction) -> Self {
        Self {
            x,
            y,
            direction,
            penalty: 0,
            screenshots: Vec::new(),
        }
    }

    pub fn with_penalty(x: i32, y: i32, direction: Direction, penalty: i64) -> Self {
        Self {
            x,
            y,
            direction,
            penalty,
            screenshots: Vec::new(),
        }
    }

    pub fn key(&self) -> PoseKey {
        PoseKey {
            x: self.x,
            y: self.y,
            direction: self.direction,
        }
    }
}

impl PartialEq for CellState {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.direction == other.direction
    }
}
impl Eq for CellState {}

impl Hash for CellState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
        self.direction.hash(state);
    }
}

/// The structural part of a [`CellState`] used as a memo table key, with no
/// metadata attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoseKey {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

impl PoseKey {
    pub fn new(x: i32, y: i32, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    pub fn manhattan(self, other: PoseKey) -> i64 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as i64
    }
}

impl From<&CellState> for PoseKey {
    fn from(c: &CellState) -> Self {
        c.key()
    }
}
