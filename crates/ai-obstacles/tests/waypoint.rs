use ai_obstacles::{
    within_tolerance, Obstacles, Rect, RectWalkboxes, Vec2, Vec3, Walkbox, WalkableArea,
};

fn open_floor() -> RectWalkboxes {
    RectWalkboxes::flat(Rect::new(-500.0, -500.0, 500.0, 500.0), 0.0)
}

fn assert_close(actual: Vec3, expected: Vec3) {
    assert!(
        within_tolerance(actual.x, expected.x)
            && within_tolerance(actual.y, expected.y)
            && within_tolerance(actual.z, expected.z),
        "expected {expected:?}, got {actual:?}"
    );
}

/// One wall across the diagonal from (0, 0) to (100, 100); grown to (18, 38)-(82, 72).
fn diagonal_wall() -> Obstacles {
    let mut obstacles = Obstacles::default();
    obstacles.add(Rect::new(30.0, 50.0, 70.0, 60.0));
    obstacles
}

#[test]
fn clear_line_goes_straight_to_target() {
    let mut obstacles = Obstacles::default();
    obstacles.add(Rect::new(200.0, 0.0, 220.0, 20.0));

    let floor = RectWalkboxes::flat(Rect::new(-500.0, -500.0, 500.0, 500.0), 3.5);
    let to = Vec3::new(100.0, 0.0, 100.0);
    let waypoint = obstacles.find_next_waypoint(Vec3::ZERO, to, &floor);

    assert!(waypoint.success);
    assert_eq!(waypoint.position, Vec3::new(100.0, 3.5, 100.0));
    assert_eq!(obstacles.path(), &[Vec2::new(100.0, 100.0)]);
}

#[test]
fn blocked_line_steers_to_the_obstacle_corner() {
    let mut obstacles = diagonal_wall();
    let floor = open_floor();

    let waypoint =
        obstacles.find_next_waypoint(Vec3::ZERO, Vec3::new(100.0, 0.0, 100.0), &floor);

    assert!(waypoint.success);
    assert_close(waypoint.position, Vec3::new(82.0, 0.0, 38.0));

    // The returned point is one of the assembled path points.
    let next = waypoint.position;
    assert!(obstacles
        .path()
        .iter()
        .any(|p| p.x == next.x && p.y == next.z));
    assert_eq!(obstacles.path().last().copied(), Some(Vec2::new(100.0, 100.0)));
}

#[test]
fn from_a_corner_the_target_is_visible() {
    let mut obstacles = diagonal_wall();
    let floor = open_floor();
    let to = Vec3::new(100.0, 0.0, 100.0);

    let waypoint = obstacles.find_next_waypoint(Vec3::new(82.0, 0.0, 38.0), to, &floor);

    assert!(waypoint.success);
    assert_eq!(waypoint.position, to);
}

#[test]
fn unwalkable_detour_side_is_avoided() {
    let mut obstacles = diagonal_wall();
    // Floor ends at x = 80, so the shorter way round the right side is off limits.
    let floor = RectWalkboxes::flat(Rect::new(-100.0, -100.0, 80.0, 300.0), 0.0);

    let waypoint =
        obstacles.find_next_waypoint(Vec3::ZERO, Vec3::new(100.0, 0.0, 100.0), &floor);

    assert!(waypoint.success);
    assert_close(waypoint.position, Vec3::new(18.0, 0.0, 72.0));
}

#[test]
fn target_off_the_floor_keeps_origin_altitude() {
    let mut obstacles = Obstacles::default();
    let floor = RectWalkboxes::new(vec![Walkbox {
        rect: Rect::new(-10.0, -10.0, 10.0, 10.0),
        altitude: 2.0,
    }]);
    assert!(floor.find_walkbox(0.0, 0.0).is_some());

    let from = Vec3::new(0.0, 7.0, 0.0);
    let waypoint = obstacles.find_next_waypoint(from, Vec3::new(100.0, 0.0, 100.0), &floor);

    assert!(!waypoint.success);
    assert_eq!(waypoint.position, Vec3::new(100.0, 7.0, 100.0));
}

#[test]
fn consecutive_obstacles_are_each_detoured_once() {
    let mut obstacles = diagonal_wall();
    obstacles.add(Rect::new(130.0, 150.0, 170.0, 160.0));
    assert_eq!(obstacles.present_count(), 2);

    let floor = open_floor();
    let waypoint =
        obstacles.find_next_waypoint(Vec3::ZERO, Vec3::new(200.0, 0.0, 200.0), &floor);

    assert!(waypoint.success);
    assert_close(waypoint.position, Vec3::new(82.0, 0.0, 38.0));

    let path = obstacles.path();
    assert!(path.contains(&Vec2::new(82.0, 38.0)));
    assert!(path.contains(&Vec2::new(182.0, 138.0)));
    assert_eq!(path.last().copied(), Some(Vec2::new(200.0, 200.0)));
}

#[test]
fn waypoint_is_never_inside_an_obstacle() {
    let mut obstacles = diagonal_wall();
    let floor = open_floor();
    let waypoint =
        obstacles.find_next_waypoint(Vec3::ZERO, Vec3::new(100.0, 0.0, 100.0), &floor);

    let (_, poly) = obstacles.polygons().next().expect("wall present");
    let p = waypoint.position;
    let strictly_inside = p.x > poly.rect.x0 + 0.009
        && p.x < poly.rect.x1 - 0.009
        && p.z > poly.rect.y0 + 0.009
        && p.z < poly.rect.y1 - 0.009;
    assert!(!strictly_inside, "waypoint {p:?} is inside the wall");
}

#[test]
fn tiny_path_capacity_degrades_without_panicking() {
    let mut obstacles = Obstacles::new(ai_obstacles::ObstacleConfig {
        path_capacity: 2,
        ..Default::default()
    });
    obstacles.add(Rect::new(30.0, 50.0, 70.0, 60.0));

    let from = Vec3::ZERO;
    let waypoint = obstacles.find_next_waypoint(from, Vec3::new(100.0, 0.0, 100.0), &open_floor());

    // The detour does not fit, so nothing was assembled and the actor stays put.
    assert!(obstacles.path().is_empty());
    assert!(!waypoint.success);
    assert_eq!(waypoint.position, from);
}
