//! Unit grid snapping for block placement.

use cgmath::{Point3, Vector3};

/// Edge length of one grid cell (and of one block).
pub const CELL_SIZE: f32 = 1.0;

/// Map a hit point and its surface normal to the centre of a grid cell.
///
/// The point is first nudged off the surface along the normal. The vertical
/// coordinate is then replaced by `point.y + 0.5`, so the vertical component
/// of the normal never contributes. Finally every axis is snapped to the
/// centre of its cell.
pub fn snap(point: Point3<f32>, normal: Vector3<f32>) -> Point3<f32> {
    let nudged = point + normal;
    let candidate = Point3::new(nudged.x, point.y + 0.5, nudged.z);
    Point3::new(
        cell_centre(candidate.x),
        cell_centre(candidate.y),
        cell_centre(candidate.z),
    )
}

/// Centre of the cell containing `v`: `floor(v) + 0.5` in cell units.
pub fn cell_centre(v: f32) -> f32 {
    (v / CELL_SIZE).floor() * CELL_SIZE + CELL_SIZE / 2.0
}
