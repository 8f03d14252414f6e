//! Black-box scenario tests against the public `plan()` API, covering the
//! canonical checks from the specification's scenario table.

use photo_tour_planner::{Direction, Grid, Motion, Obstacle, PlannerConfig};

fn default_config() -> PlannerConfig {
    PlannerConfig::default()
}

#[test]
fn single_obstacle_ahead_is_center_annotated() {
    let config = default_config();
    let mut grid = Grid::default();
    grid.insert(Obstacle::new(10, 10, Direction::South, 1));

    let output = photo_tour_planner::plan(&config, &grid).unwrap();
    assert!(output.cost.is_some());
    assert_eq!(output.visited_obstacle_ids, vec![1]);

    let arrival = output
        .path
        .iter()
        .find(|c| c.screenshots.iter().any(|t| t.starts_with("1_")))
        .expect("exactly one pose should carry a 1_* capture tag");
    assert_eq!(arrival.direction, Direction::North);
}

#[test]
fn two_obstacles_requiring_a_turn_are_both_visited() {
    let config = default_config();
    let mut grid = Grid::default();
    grid.insert(Obstacle::new(5, 5, Direction::West, 1));
    grid.insert(Obstacle::new(15, 15, Direction::East, 2));

    let output = photo_tour_planner::plan(&config, &grid).unwrap();
    assert!(output.cost.is_some());
    assert_eq!(output.visited_obstacle_ids.len(), 2);
    assert!(output.visited_obstacle_ids.contains(&1));
    assert!(output.visited_obstacle_ids.contains(&2));

    // Each arrival faces the opposite of its obstacle's facing.
    for (tag, expected_facing) in [("1_", Direction::East), ("2_", Direction::West)] {
        let arrival = output
            .path
            .iter()
            .find(|c| c.screenshots.iter().any(|t| t.starts_with(tag)))
            .unwrap_or_else(|| panic!("no arrival pose tagged {tag}*"));
        assert_eq!(arrival.direction, expected_facing);
    }
}

#[test]
fn race_day_seed_is_finite_and_annotates_reachable_obstacles() {
    let config = default_config();
    let mut grid = Grid::default();
    for (x, y, d, id) in [
        (0, 17, Direction::East, 1),
        (5, 12, Direction::South, 2),
        (7, 5, Direction::North, 3),
        (15, 2, Direction::West, 4),
        (11, 14, Direction::East, 5),
        (16, 19, Direction::South, 6),
        (19, 9, Direction::West, 7),
    ] {
        grid.insert(Obstacle::new(x, y, d, id));
    }

    let output = photo_tour_planner::plan(&config, &grid).unwrap();
    assert!(output.cost.is_some(), "race-day seed must yield a finite-cost tour");

    // Obstacles 1 and 6 sit on the border (x=0 / y=19) so their direct
    // "slot 0" viewing pose is off-grid; they must either be dropped or
    // visited via a non-zero candidate slot.
    let total_annotations: usize = output
        .path
        .iter()
        .map(|c| c.screenshots.len())
        .sum();
    assert_eq!(total_annotations, output.visited_obstacle_ids.len());
    assert!(!output.visited_obstacle_ids.is_empty());

    // Every input id lands in exactly one of visited/skipped; none is
    // silently dropped on the floor (e.g. by having zero reachable
    // candidate viewing poses).
    let mut accounted: Vec<u32> = output
        .visited_obstacle_ids
        .iter()
        .chain(output.skipped_obstacle_ids.iter())
        .copied()
        .collect();
    accounted.sort_unstable();
    assert_eq!(accounted, vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn obstacle_with_no_reachable_candidate_pose_is_skipped_not_dropped() {
    let config = default_config();
    let mut grid = Grid::default();
    // All 5 candidate slots for a North-facing obstacle this close to the
    // top border fall outside the interior bound (y <= size_y - 2 = 18),
    // so `viewpoints::candidates` returns an empty list for it.
    grid.insert(Obstacle::new(10, 17, Direction::North, 1));
    grid.insert(Obstacle::new(5, 5, Direction::South, 2));

    let output = photo_tour_planner::plan(&config, &grid).unwrap();
    assert_eq!(output.visited_obstacle_ids, vec![2]);
    assert!(
        output.skipped_obstacle_ids.contains(&1),
        "obstacle 1 has no reachable candidate pose and must appear in skipped_obstacle_ids, \
         not vanish from both lists entirely"
    );
}

#[test]
fn skip_obstacle_is_never_annotated() {
    let config = default_config();
    let mut grid = Grid::default();
    grid.insert(Obstacle::new(10, 10, Direction::Skip, 1));
    grid.insert(Obstacle::new(5, 5, Direction::South, 2));

    let output = photo_tour_planner::plan(&config, &grid).unwrap();
    assert_eq!(output.visited_obstacle_ids, vec![2]);
    assert!(output.skipped_obstacle_ids.contains(&1));
    for pose in &output.path {
        assert!(!pose.screenshots.iter().any(|t| t.starts_with('1')));
    }
}

#[test]
fn obstacle_unreachable_from_start_visits_only_the_other() {
    let config = default_config();
    let mut grid = Grid::default();

    // A dense band of `Skip` obstacles across the full interior width, five
    // rows thick. Every cell in the band itself sits exactly on an
    // obstacle, so no primitive can ever land there; and the band's
    // far-side-to-near-side span (6 rows) exceeds the largest possible
    // single-move displacement (5, from a turn primitive), so nothing can
    // hop clear over it either. This makes the two halves of the grid
    // genuinely disconnected for A*, not merely expensive to cross.
    for y in 9..=13 {
        for x in 1..=18 {
            grid.insert(Obstacle::new(x, y, Direction::Skip, 100 + y as u32 * 100 + x as u32));
        }
    }

    grid.insert(Obstacle::new(10, 5, Direction::South, 1));
    grid.insert(Obstacle::new(10, 14, Direction::North, 2));

    let output = photo_tour_planner::plan(&config, &grid).unwrap();
    assert!(output.cost.is_some());
    assert_eq!(output.visited_obstacle_ids, vec![1]);
}

#[test]
fn half_turn_sidestep_may_appear_in_a_blocked_tour() {
    let config = default_config();
    let mut grid = Grid::default();
    grid.insert(Obstacle::new(1, 18, Direction::South, 1));

    let output = photo_tour_planner::plan(&config, &grid).unwrap();
    assert!(output.cost.is_some());
    // Not every route needs an offset move, but the path must be internally
    // consistent: every consecutive pair is either same-heading-adjacent,
    // same-heading-offset, or a legal 90 degree turn.
    for pair in output.path.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        if a.direction == b.direction {
            let mag = {
                let mut m = [dx.abs(), dy.abs()];
                m.sort_unstable();
                m
            };
            assert!(
                mag == [0, 1] || mag == [1, 4],
                "unexpected same-heading displacement {dx},{dy}"
            );
        } else {
            let mag = {
                let mut m = [dx.abs(), dy.abs()];
                m.sort_unstable();
                m
            };
            assert_eq!(mag, [3, 5]);
        }
    }
}

#[test]
fn motion_reconstruction_round_trips_every_consecutive_pair() {
    let config = default_config();
    let mut grid = Grid::default();
    grid.insert(Obstacle::new(10, 10, Direction::South, 1));
    grid.insert(Obstacle::new(5, 5, Direction::West, 2));

    let output = photo_tour_planner::plan(&config, &grid).unwrap();
    let motion_plan = output.motion_plan.expect("a finite tour was found");
    // Every drive primitive's numeric value should sum to 10 with its
    // inverse, except Capture which is self-inverse.
    for m in &motion_plan.motions {
        if *m == Motion::Capture {
            continue;
        }
        assert_eq!(m.value() + m.inverse().value(), 10);
    }
}

#[test]
fn no_obstacles_returns_a_single_pose_zero_cost_plan() {
    let config = default_config();
    let grid = Grid::default();
    let output = photo_tour_planner::plan(&config, &grid).unwrap();
    assert_eq!(output.cost, Some(0));
    assert_eq!(output.path.len(), 1);
    assert!(output.visited_obstacle_ids.is_empty());
}
