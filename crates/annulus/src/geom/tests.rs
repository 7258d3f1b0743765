use super::*;

#[test]
fn bisector_special_and_regular_cases() {
    // Equal x -> horizontal line through the midpoint.
    let b = bisector(Vec2::new(2.0, 0.0), Vec2::new(2.0, 4.0));
    assert_eq!(b.eq, LineEq::Slanted { k: 0.0, n: 2.0 });

    // Equal y -> vertical line through the midpoint.
    let b = bisector(Vec2::new(0.0, 1.0), Vec2::new(6.0, 1.0));
    assert_eq!(b.eq, LineEq::Vertical { x: 3.0 });

    // Regular case: bisector of (0,0)-(2,2) is y = -x + 2.
    let b = bisector(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
    match b.eq {
        LineEq::Slanted { k, n } => {
            assert!((k + 1.0).abs() < 1e-12);
            assert!((n - 2.0).abs() < 1e-12);
        }
        _ => panic!("expected slanted bisector"),
    }
}

#[test]
fn turn_and_same_side() {
    let a = Vec2::new(0.0, 0.0);
    let b = Vec2::new(1.0, 0.0);
    assert_eq!(turn(a, b, Vec2::new(1.0, 1.0)), 1);
    assert_eq!(turn(a, b, Vec2::new(1.0, -1.0)), -1);
    assert_eq!(turn(a, b, Vec2::new(2.0, 0.0)), 0);

    let c = Vec2::new(0.0, -1.0);
    let d = Vec2::new(0.0, 1.0);
    assert_eq!(same_side(Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0), c, d), 1);
    assert_eq!(same_side(Vec2::new(-1.0, 0.0), Vec2::new(2.0, 0.0), c, d), -1);
    assert_eq!(same_side(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), c, d), 0);
}

#[test]
fn segment_intersection_is_closed() {
    let a = Vec2::new(0.0, 0.0);
    let b = Vec2::new(2.0, 2.0);
    assert!(do_intersect(a, b, Vec2::new(0.0, 2.0), Vec2::new(2.0, 0.0)));
    // Shared endpoint counts.
    assert!(do_intersect(a, b, b, Vec2::new(3.0, 0.0)));
    // Parallel disjoint segments do not.
    assert!(!do_intersect(a, b, Vec2::new(0.0, 1.0), Vec2::new(2.0, 3.0)));
}

#[test]
fn circumcenter_of_right_triangle() {
    let c = circumcenter(
        Vec2::new(0.0, 0.0),
        Vec2::new(2.0, 0.0),
        Vec2::new(0.0, 2.0),
    );
    assert!((c - Vec2::new(1.0, 1.0)).norm() < 1e-12);
}

#[test]
fn parabola_intersect_picks_breakpoint_root() {
    // Foci at different heights: swapping the arguments selects the other
    // root of the same quadratic.
    let l = Vec2::new(0.0, 2.0);
    let r = Vec2::new(3.0, 1.0);
    let sweep = 0.0;
    let lr = parabola_intersect(l, r, sweep);
    let rl = parabola_intersect(r, l, sweep);
    assert!(lr.x < rl.x);
    // Both returned points are equidistant from focus and directrix.
    for (f, p) in [(l, lr), (r, lr), (l, rl), (r, rl)] {
        assert!((dist(f, p) - (p.y - sweep)).abs() < 1e-9);
    }
}

#[test]
fn parabola_intersect_focus_on_sweep() {
    // A focus on the directrix pins the breakpoint to its x.
    let l = Vec2::new(1.0, 0.0);
    let r = Vec2::new(4.0, 3.0);
    let p = parabola_intersect(l, r, 0.0);
    assert_eq!(p.x, 1.0);
    assert!((dist(r, p) - p.y).abs() < 1e-9);
}

#[test]
fn parabola_intersect_equal_heights() {
    // Equal focal heights: single intersection on the vertical bisector.
    let p = parabola_intersect(Vec2::new(0.0, 2.0), Vec2::new(4.0, 2.0), 0.0);
    assert!((p.x - 2.0).abs() < 1e-12);
}

#[test]
fn rect_halfline_exits_once() {
    let rect = Rect {
        x1: -10.0,
        x2: 10.0,
        y1: -10.0,
        y2: 10.0,
    };
    let mut line = Line::vertical(3.0);
    line.dir = Dir::Up;
    let p = rect_halfline_intersect(rect, line, Vec2::new(3.0, 0.0));
    assert!((p - Vec2::new(3.0, 10.0)).norm() < 1e-12);

    let mut line = Line::slanted(1.0, 0.0);
    line.dir = Dir::Left;
    let p = rect_halfline_intersect(rect, line, Vec2::new(0.0, 0.0));
    assert!((p - Vec2::new(-10.0, -10.0)).norm() < 1e-12);
}

#[test]
fn forward_point_follows_dir() {
    let mut line = Line::slanted(2.0, 1.0);
    line.dir = Dir::Right;
    let p = line.forward_point(Vec2::new(0.0, 1.0));
    assert!(p.x > 0.0);
    assert!((p.y - (2.0 * p.x + 1.0)).abs() < 1e-12);

    line.dir = Dir::Left;
    assert!(line.forward_point(Vec2::new(0.0, 1.0)).x < 0.0);
}

#[test]
fn check_order_uses_bounding_box() {
    let a = Vec2::new(0.0, 0.0);
    let c = Vec2::new(4.0, 2.0);
    assert!(check_order(a, Vec2::new(2.0, 1.0), c));
    assert!(!check_order(a, Vec2::new(5.0, 1.0), c));
}

#[test]
fn collinearity_detection() {
    let sites = |pts: &[(f64, f64)]| -> Vec<Site> {
        pts.iter()
            .enumerate()
            .map(|(i, &(x, y))| Site::new(x, y, i))
            .collect()
    };
    assert!(all_collinear(&sites(&[(0.0, 0.0), (5.0, 5.0)])));
    assert!(all_collinear(&sites(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])));
    assert!(!all_collinear(&sites(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])));
}

#[test]
fn hull_is_ccw_and_strict() {
    // Square with an interior point and a collinear edge midpoint.
    let pts = [
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 2.0),
        (0.0, 2.0),
        (1.0, 1.0),
        (1.0, 0.0),
    ];
    let sites: Vec<Site> = pts
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Site::new(x, y, i))
        .collect();
    let hull = graham_scan_hull(&sites);
    assert_eq!(hull.len(), 4);
    for i in 0..hull.len() {
        let a = hull[i].pos;
        let b = hull[(i + 1) % hull.len()].pos;
        let c = hull[(i + 2) % hull.len()].pos;
        assert_eq!(turn(a, b, c), 1);
    }
    // Anchored at the lowest-leftmost point.
    assert_eq!(hull[0].idx, 0);
}

mod laws {
    use super::*;
    use proptest::prelude::*;

    fn distinct_sites(pts: Vec<(i32, i32)>) -> Option<Vec<Site>> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for (x, y) in pts {
            if seen.insert((x, y)) {
                out.push(Site::new(x as f64, y as f64, out.len()));
            }
        }
        (out.len() >= 3 && !all_collinear(&out)).then_some(out)
    }

    proptest! {
        /// The hull of any permutation is the same CCW sequence up to
        /// rotation, with every collinear interior removed.
        #[test]
        fn hull_permutation_invariance(
            pts in proptest::collection::vec((-50i32..50, -50i32..50), 3..16),
            rot in 0usize..16,
        ) {
            let Some(sites) = distinct_sites(pts) else { return Ok(()); };
            let hull = graham_scan_hull(&sites);

            let mut permuted = sites.clone();
            let permuted_len = permuted.len();
            permuted.rotate_left(rot % permuted_len);
            let hull2 = graham_scan_hull(&permuted);

            prop_assert_eq!(hull.len(), hull2.len());
            let start = hull2
                .iter()
                .position(|s| s.idx == hull[0].idx)
                .expect("same vertex set");
            for (i, s) in hull.iter().enumerate() {
                prop_assert_eq!(s.idx, hull2[(start + i) % hull2.len()].idx);
            }
        }
    }
}
