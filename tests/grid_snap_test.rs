use block_world::grid::{cell_centre, snap};
use cgmath::{Point3, Vector3};

fn fraction(v: f32) -> f32 {
    v - v.floor()
}

#[test]
fn cell_centre_is_floor_plus_half() {
    assert_eq!(cell_centre(0.0), 0.5);
    assert_eq!(cell_centre(0.99), 0.5);
    assert_eq!(cell_centre(-0.01), -0.5);
    assert_eq!(cell_centre(3.5), 3.5);
    assert_eq!(cell_centre(-2.0), -1.5);
}

#[test]
fn ground_hit_lands_in_the_cell_above() {
    let placed = snap(Point3::new(2.3, 0.0, -4.7), Vector3::unit_y());
    assert_eq!(placed, Point3::new(2.5, 0.5, -4.5));
}

#[test]
fn top_face_hit_stacks_one_block_up() {
    // top face of the block centred at (0.5, 0.5, 0.5)
    let placed = snap(Point3::new(0.2, 1.0, 0.8), Vector3::unit_y());
    assert_eq!(placed, Point3::new(0.5, 1.5, 0.5));
}

#[test]
fn side_face_hit_moves_along_the_normal() {
    // -X face of the block centred at (0.5, 0.5, 0.5)
    let placed = snap(Point3::new(0.0, 0.3, 0.6), -Vector3::unit_x());
    assert_eq!(placed, Point3::new(-0.5, 0.5, 0.5));

    // -Z face
    let placed = snap(Point3::new(0.4, 0.2, 0.0), -Vector3::unit_z());
    assert_eq!(placed, Point3::new(0.5, 0.5, -0.5));
}

#[test]
fn positive_side_normals_are_added_before_flooring() {
    // +X face at x = 1: 1 + 1 floors to 2
    let placed = snap(Point3::new(1.0, 0.3, 0.6), Vector3::unit_x());
    assert_eq!(placed, Point3::new(2.5, 0.5, 0.5));
}

#[test]
fn side_hit_in_the_upper_half_rounds_up_a_layer() {
    let placed = snap(Point3::new(0.0, 0.7, 0.6), -Vector3::unit_x());
    assert_eq!(placed.y, 1.5);
}

#[test]
fn vertical_normal_component_is_ignored() {
    let point = Point3::new(5.2, 2.0, 1.1);
    let up = snap(point, Vector3::unit_y());
    let down = snap(point, -Vector3::unit_y());
    assert_eq!(up.y, down.y);
    assert_eq!(up.y, 2.5);
}

#[test]
fn every_axis_has_a_half_fraction_and_follows_the_nudged_point() {
    let normals = [
        Vector3::unit_x(),
        -Vector3::unit_x(),
        Vector3::unit_y(),
        -Vector3::unit_y(),
        Vector3::unit_z(),
        -Vector3::unit_z(),
    ];
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(-3.25, 1.75, 12.5),
        Point3::new(7.9, 0.1, -0.4),
        Point3::new(-24.9, 3.0, 24.9),
    ];
    for point in points {
        for normal in normals {
            let placed = snap(point, normal);
            assert_eq!(fraction(placed.x), 0.5);
            assert_eq!(fraction(placed.y), 0.5);
            assert_eq!(fraction(placed.z), 0.5);
            assert_eq!(placed.x, (point.x + normal.x).floor() + 0.5);
            assert_eq!(placed.z, (point.z + normal.z).floor() + 0.5);
        }
    }
}
