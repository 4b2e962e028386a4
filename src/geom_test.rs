use glam::DVec3;

use crate::geom::{correct, Bounds3, Plane};

#[test]
fn plane_from_points_matches_cross_product() {
    let plane = Plane::from_points(
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
    )
    .unwrap();

    assert_eq!(plane.normal, DVec3::new(0.0, 0.0, 1.0));
    assert_eq!(plane.distance, 0.0);

    let plane = Plane::from_points(
        DVec3::new(64.0, 0.0, 0.0),
        DVec3::new(64.0, 0.0, 1.0),
        DVec3::new(64.0, 1.0, 0.0),
    )
    .unwrap();

    assert_eq!(plane.normal, DVec3::new(1.0, 0.0, 0.0));
    assert_eq!(plane.distance, 64.0);
}

#[test]
fn plane_rejects_collinear_points() {
    let plane = Plane::from_points(
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
    );

    assert!(plane.is_none());
}

#[test]
fn plane_rejects_coincident_points() {
    let point = DVec3::new(8.0, -4.0, 2.0);
    let plane = Plane::from_points(point, point, DVec3::new(1.0, 1.0, 1.0));

    assert!(plane.is_none());
}

#[test]
fn correct_snaps_near_integral_components() {
    let snapped = correct(DVec3::new(0.9995, -2.0001, 0.5));
    assert_eq!(snapped, DVec3::new(1.0, -2.0, 0.5));
}

#[test]
fn bounds_contains_points_inclusively() {
    let bounds = Bounds3::cube(10.0);

    assert!(bounds.contains(DVec3::ZERO));
    assert!(bounds.contains(DVec3::new(10.0, -10.0, 10.0)));
    assert!(!bounds.contains(DVec3::new(11.0, 0.0, 0.0)));
}
