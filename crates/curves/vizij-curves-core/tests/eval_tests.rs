use vizij_curves_core::{
    data::{Curve, Point, TangentMode, Vec2},
    interp::{evaluate_cubic, invert_cubic_time},
    path::{path_segments, PathCommand},
    sampling::{value_at, value_at_points},
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn key(x: f64, y: f64, mode: TangentMode) -> Point {
    Point::new(x, y, 0.25, mode)
}

fn curve(points: Vec<Point>) -> Curve {
    Curve::new("test", "#ffffff").with_points(points)
}

#[test]
fn linear_pair_interpolates_midpoint() {
    let c = curve(vec![
        key(0.0, 0.0, TangentMode::Linear),
        key(1.0, 1.0, TangentMode::Linear),
    ]);
    approx(value_at(&c, 0.5).unwrap(), 0.5, 1e-12);
    approx(value_at(&c, 0.25).unwrap(), 0.25, 1e-12);
}

#[test]
fn constant_start_holds_until_next_key() {
    let c = curve(vec![
        key(0.0, 0.0, TangentMode::Constant),
        key(1.0, 1.0, TangentMode::Linear),
    ]);
    assert_eq!(value_at(&c, 0.5), Some(0.0));
    assert_eq!(value_at(&c, 0.999), Some(0.0));
    assert_eq!(value_at(&c, 1.0), Some(1.0));
}

#[test]
fn empty_curve_has_no_value_and_single_key_is_flat() {
    assert_eq!(value_at(&curve(Vec::new()), 3.0), None);
    let single = curve(vec![key(2.0, 7.0, TangentMode::Auto)]);
    assert_eq!(value_at(&single, -100.0), Some(7.0));
    assert_eq!(value_at(&single, 100.0), Some(7.0));
}

#[test]
fn extrapolation_clamps_to_end_keys() {
    let c = curve(vec![
        key(1.0, 3.0, TangentMode::Auto),
        key(2.0, -1.0, TangentMode::Auto),
    ]);
    assert_eq!(value_at(&c, 0.0), Some(3.0));
    assert_eq!(value_at(&c, 5.0), Some(-1.0));
}

#[test]
fn nan_time_reads_the_first_key() {
    let c = curve(vec![
        key(1.0, 3.0, TangentMode::Linear),
        key(0.0, 2.0, TangentMode::Linear),
    ]);
    assert_eq!(value_at(&c, f64::NAN), Some(2.0));
    assert_eq!(value_at(&curve(Vec::new()), f64::NAN), None);
}

#[test]
fn key_values_are_reproduced_in_any_mode() {
    for mode in TangentMode::ALL {
        let c = curve(vec![
            key(0.0, 1.0, mode),
            key(1.0, 4.0, mode),
            key(3.0, -2.0, mode),
        ]);
        approx(value_at(&c, 0.0).unwrap(), 1.0, 1e-6);
        approx(value_at(&c, 1.0).unwrap(), 4.0, 1e-6);
        approx(value_at(&c, 3.0).unwrap(), -2.0, 1e-6);
    }
}

#[test]
fn unsorted_storage_is_evaluated_in_time_order() {
    let points = vec![
        key(1.0, 1.0, TangentMode::Linear),
        key(0.0, 0.0, TangentMode::Linear),
    ];
    approx(value_at_points(&points, 0.5).unwrap(), 0.5, 1e-12);
}

#[test]
fn flat_tangent_bezier_is_symmetric_ease() {
    // Horizontal handles of equal length give an S-curve through (0.5, 0.5).
    let c = curve(vec![
        key(0.0, 0.0, TangentMode::Auto),
        key(1.0, 1.0, TangentMode::Auto),
    ]);
    approx(value_at(&c, 0.5).unwrap(), 0.5, 1e-4);
    let early = value_at(&c, 0.1).unwrap();
    assert!(early < 0.1, "ease-in should lag linear, got {early}");
    let late = value_at(&c, 0.9).unwrap();
    assert!(late > 0.9, "ease-out should lead linear, got {late}");
}

#[test]
fn inversion_matches_forward_evaluation() {
    let (p0, p1, p2, p3) = (0.0, 0.4, 0.7, 1.0);
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        let x = evaluate_cubic(p0, p1, p2, p3, t);
        let back = invert_cubic_time(p0, p1, p2, p3, x);
        approx(back, t, 1e-4);
    }
}

#[test]
fn path_shapes_follow_start_mode() {
    let points = vec![
        key(0.0, 0.0, TangentMode::Linear),
        key(1.0, 1.0, TangentMode::Constant),
        key(2.0, 0.0, TangentMode::Auto),
        key(3.0, 2.0, TangentMode::Auto),
    ];
    let path = path_segments(&points);
    assert_eq!(path.len(), 5);
    assert_eq!(
        path[0],
        PathCommand::MoveTo {
            to: Vec2::new(0.0, 0.0)
        }
    );
    assert_eq!(
        path[1],
        PathCommand::LineTo {
            to: Vec2::new(1.0, 1.0)
        }
    );
    // Step: horizontal at the held value, then vertical to the next key.
    assert_eq!(
        path[2],
        PathCommand::LineTo {
            to: Vec2::new(2.0, 1.0)
        }
    );
    assert_eq!(
        path[3],
        PathCommand::LineTo {
            to: Vec2::new(2.0, 0.0)
        }
    );
    assert_eq!(
        path[4],
        PathCommand::CubicTo {
            c1: Vec2::new(2.25, 0.0),
            c2: Vec2::new(2.75, 2.0),
            to: Vec2::new(3.0, 2.0),
        }
    );
}

#[test]
fn degenerate_paths() {
    assert!(path_segments(&[]).is_empty());
    let one = path_segments(&[key(1.0, 2.0, TangentMode::Auto)]);
    assert_eq!(
        one,
        vec![PathCommand::MoveTo {
            to: Vec2::new(1.0, 2.0)
        }]
    );
}
