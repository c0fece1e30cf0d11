use ai_obstacles::{Obstacles, Polygon, PolygonId, Rect, Vec2};

fn sorted_points(poly: &Polygon) -> Vec<(f32, f32)> {
    let mut points: Vec<_> = poly
        .vertices
        .iter()
        .map(|v| (v.position.x, v.position.y))
        .collect();
    points.sort_by(|a, b| a.partial_cmp(b).expect("finite coordinates"));
    points
}

fn only_polygon(obstacles: &Obstacles) -> &Polygon {
    let mut present = obstacles.polygons();
    let (_, poly) = present.next().expect("one polygon");
    assert!(present.next().is_none(), "expected a single polygon");
    poly
}

fn assert_no_overlapping_boxes(obstacles: &Obstacles) {
    let polys: Vec<_> = obstacles.polygons().collect();
    for (i, (id_a, a)) in polys.iter().enumerate() {
        for (id_b, b) in &polys[i + 1..] {
            assert!(
                !a.rect.overlaps(&b.rect),
                "polygons {id_a:?} and {id_b:?} still overlap"
            );
        }
    }
}

#[test]
fn overlapping_rects_merge_into_one_polygon() {
    let mut obstacles = Obstacles::default();
    obstacles.add(Rect::new(0.0, 0.0, 10.0, 10.0));
    obstacles.add(Rect::new(8.0, 8.0, 18.0, 18.0));

    assert_eq!(obstacles.present_count(), 1);
    let poly = only_polygon(&obstacles);
    assert_eq!(poly.rect, Rect::new(-12.0, -12.0, 30.0, 30.0));
    assert_eq!(poly.len(), 8);

    // The first rect kept slot 0; the second rect's slot was freed by the merge.
    assert!(obstacles.polygon(PolygonId(0)).is_some());
    assert_eq!(obstacles.find_empty_polygon(), Some(PolygonId(1)));
}

#[test]
fn merge_is_order_independent() {
    let r1 = Rect::new(0.0, 0.0, 10.0, 10.0);
    let r2 = Rect::new(8.0, 8.0, 18.0, 18.0);

    let mut forward = Obstacles::default();
    forward.add(r1);
    forward.add(r2);

    let mut backward = Obstacles::default();
    backward.add(r2);
    backward.add(r1);

    let a = only_polygon(&forward);
    let b = only_polygon(&backward);
    assert_eq!(a.rect, b.rect);
    assert_eq!(sorted_points(a), sorted_points(b));
}

#[test]
fn crossing_rects_form_a_plus_outline() {
    let mut obstacles = Obstacles::default();
    // Tall and wide bars crossing in the middle.
    obstacles.add(Rect::new(40.0, 0.0, 60.0, 100.0));
    obstacles.add(Rect::new(0.0, 40.0, 100.0, 60.0));

    let poly = only_polygon(&obstacles);
    assert_eq!(poly.rect, Rect::new(-12.0, -12.0, 112.0, 112.0));
    assert_eq!(poly.len(), 12);
    for corner in [
        Vec2::new(28.0, 28.0),
        Vec2::new(72.0, 28.0),
        Vec2::new(72.0, 72.0),
        Vec2::new(28.0, 72.0),
    ] {
        assert!(
            poly.vertices.iter().any(|v| v.position == corner),
            "missing inner corner {corner:?}"
        );
    }
}

#[test]
fn enclosed_rect_does_not_grow_the_outline() {
    for order in [[0, 1], [1, 0]] {
        let rects = [
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(40.0, 40.0, 50.0, 50.0),
        ];
        let mut obstacles = Obstacles::default();
        for i in order {
            obstacles.add(rects[i]);
        }

        let poly = only_polygon(&obstacles);
        assert_eq!(poly.len(), 4);
        assert_eq!(poly.rect, Rect::new(-12.0, -12.0, 112.0, 112.0));
    }
}

#[test]
fn adding_inside_a_merged_polygon_keeps_vertex_count() {
    let mut obstacles = Obstacles::default();
    obstacles.add(Rect::new(0.0, 0.0, 10.0, 10.0));
    obstacles.add(Rect::new(8.0, 8.0, 18.0, 18.0));
    let before = only_polygon(&obstacles).len();

    obstacles.add(Rect::new(0.0, 0.0, 4.0, 4.0));
    assert_eq!(obstacles.present_count(), 1);
    assert_eq!(only_polygon(&obstacles).len(), before);
}

#[test]
fn a_bridging_rect_merges_two_polygons() {
    let mut obstacles = Obstacles::default();
    obstacles.add(Rect::new(0.0, 0.0, 10.0, 10.0));
    obstacles.add(Rect::new(100.0, 0.0, 110.0, 10.0));
    assert_eq!(obstacles.present_count(), 2);

    obstacles.add(Rect::new(20.0, 2.0, 90.0, 8.0));
    assert_eq!(obstacles.present_count(), 1);
    assert_eq!(
        only_polygon(&obstacles).rect,
        Rect::new(-12.0, -12.0, 122.0, 22.0)
    );
    assert_no_overlapping_boxes(&obstacles);
}

#[test]
fn separate_rects_stay_separate() {
    let mut obstacles = Obstacles::default();
    obstacles.add(Rect::new(0.0, 0.0, 10.0, 10.0));
    obstacles.add(Rect::new(50.0, 0.0, 60.0, 10.0));
    obstacles.add(Rect::new(0.0, 50.0, 10.0, 60.0));

    assert_eq!(obstacles.present_count(), 3);
    assert_no_overlapping_boxes(&obstacles);
}
