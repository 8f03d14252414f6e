//! Bounds, obstacle bookkeeping, and the three clearance predicates used
//! throughout the planner.

use fxhash::FxHashSet;

use crate::config::PlannerConfig;
use crate::pose::Direction;

/// A fixed obstacle on the grid: a position, a facing (the direction the
/// obstacle's image faces), and an id used for capture annotation.
///
/// Does not derive `PartialEq`: [`Grid::insert`] dedups by `dedup_key()`,
/// which covers `(x, y, direction)` only and ignores `id`.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    pub id: u32,
}

impl Obstacle {
    pub fn new(x: i32, y: i32, direction: Direction, id: u32) -> Self {
        Self { x, y, direction, id }
    }

    fn dedup_key(&self) -> (i32, i32, u8) {
        let d = match self.direction {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
            Direction::Skip => 4,
        };
        (self.x, self.y, d)
    }
}

/// The discrete grid the robot and obstacles live on, plus its obstacle
/// set. `size_x`/`size_y` default to 20x20.
#[derive(Debug, Clone)]
pub struct Grid {
    pub size_x: i32,
    pub size_y: i32,
    obstacles: Vec<Obstacle>,
    seen: FxHashSet<(i32, i32, u8)>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(20, 20)
    }
}

impl Grid {
    pub fn new(size_x: i32, size_y: i32) -> Self {
        Self {
            size_x,
            size_y,
            obstacles: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.size_x, config.size_y)
    }

    /// Inserts an obstacle, silently dropping it if an obstacle with the
    /// same `(x, y, direction)` is already present.
    pub fn insert(&mut self, obstacle: Obstacle) {
        if self.seen.insert(obstacle.dedup_key()) {
            self.obstacles.push(obstacle);
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacle_by_id(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn obstacle_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.obstacles.iter().map(|o| o.id)
    }

    /// `1 <= x <= size_x-2`, `1 <= y <= size_y-2` — the one-cell border is
    /// always forbidden.
    pub fn is_interior(&self, x: i32, y: i32) -> bool {
        x >= 1 && x <= self.size_x - 2 && y >= 1 && y <= self.size_y - 2
    }

    /// Straight-move destination reachability: interior, and clear of every
    /// obstacle by both a Manhattan-\>2 and a Chebyshev-\>=2 test. The two
    /// checks are logically redundant (Chebyshev is strictly stronger at
    /// corners) but both are evaluated deliberately, matching the reference
    /// behavior rather than simplifying it away.
    pub fn reachable(&self, x: i32, y: i32) -> bool {
        if !self.is_interior(x, y) {
            return false;
        }
        self.obstacles.iter().all(|o| {
            let manhattan = (o.x - x).abs() + (o.y - y).abs();
            let chebyshev = (o.x - x).abs().max((o.y - y).abs());
            manhattan > 2 && chebyshev >= 2
        })
    }

    /// Half-turn (lateral offset) reachability: both endpoints interior,
    /// and no obstacle in the padded rectangle swept between them. The long
    /// axis of travel gets no padding; the short axis gets
    /// `2*expanded_cell` on each side.
    pub fn half_turn_reachable(
        &self,
        config: &PlannerConfig,
        x: i32,
        y: i32,
        x2: i32,
        y2: i32,
    ) -> bool {
        if !self.is_interior(x, y) || !self.is_interior(x2, y2) {
            return false;
        }
        let (lo_x, hi_x) = (x.min(x2), x.max(x2));
        let (lo_y, hi_y) = (y.min(y2), y.max(y2));
        let pad = 2 * config.expanded_cell;

        let (rx_lo, rx_hi, ry_lo, ry_hi) = if (hi_x - lo_x) > (hi_y - lo_y) {
            (lo_x, hi_x, lo_y - pad, hi_y + pad)
        } else {
            (lo_x - pad, hi_x + pad, lo_y, hi_y)
        };

        self.obstacles
            .iter()
            .all(|o| !(o.x >= rx_lo && o.x <= rx_hi && o.y >= ry_lo && o.y <= ry_hi))
    }

    /// Turn reachability: both endpoints interior; every obstacle must
    /// clear the start/end points by `turn_padding` and three curve-sample
    /// points by `mid_turn_padding`, all measured in Euclidean distance.
    pub fn turn_reachable(
        &self,
        config: &PlannerConfig,
        x: i32,
        y: i32,
        x2: i32,
        y2: i32,
        d: Direction,
    ) -> bool {
        if !self.is_interior(x, y) || !self.is_interior(x2, y2) {
            return false;
        }

        let (xf, yf, x2f, y2f) = (x as f64, y as f64, x2 as f64, y2 as f64);
        let mid = ((xf + x2f) / 2.0, (yf + y2f) / 2.0);
        let corner = if matches!(d, Direction::North | Direction::South) {
            (xf, y2f)
        } else {
            (x2f, yf)
        };

        let p1 = if matches!(d, Direction::North | Direction::South) {
            ((xf + mid.0) / 2.0, mid.1)
        } else {
            (mid.0, (yf + mid.1) / 2.0)
        };
        let p2 = ((corner.0 + mid.0) / 2.0, (corner.1 + mid.1) / 2.0);
        let p3 = if matches!(d, Direction::North | Direction::South) {
            (mid.0, (y2f + mid.1) / 2.0)
        } else {
            ((x2f + mid.0) / 2.0, mid.1)
        };

        self.obstacles.iter().all(|o| {
            let (ox, oy) = (o.x as f64, o.y as f64);
            let dist = |px: f64, py: f64| ((ox - px).powi(2) + (oy - py).powi(2)).sqrt();

            dist(xf, yf) >= config.turn_padding
                && dist(x2f, y2f) >= config.turn_padding
                && dist(p1.0, p1.1) >= config.mid_turn_padding
                && dist(p2.0, p2.1) >= config.mid_turn_padding
                && dist(p3.0, p3.1) >= config.mid_turn_padding
        })
    }
}
