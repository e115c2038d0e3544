//! Ray picking against the block world and the overlay.
//!
//! Picking happens on the CPU: a pointer position is turned into one ray per
//! camera (see [`PickRays`]) and intersected with simple analytic shapes.
//!
//! - Every shape is hit from its front side only
//! - A hit reports the world-space point, the world-space face normal and the
//!   distance along the ray
//! - When several candidates are hit, the nearest one wins. Equal distances
//!   keep the candidate that came first

use cgmath::{InnerSpace, Point3, Vector3, Zero};
use winit::dpi::PhysicalPosition;

use crate::camera::SceneCameras;

const EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    /// Unit length.
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn at(&self, distance: f32) -> Point3<f32> {
        self.origin + self.direction * distance
    }
}

/// The two rays a pointer position produces: one for the block scene, one
/// for the overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickRays {
    pub block: Ray,
    pub overlay: Ray,
}

impl PickRays {
    pub fn from_pointer(cameras: &SceneCameras, position: PhysicalPosition<f64>) -> Self {
        let ndc = cameras.viewport().to_ndc(position);
        Self {
            block: cameras.block.ray(ndc),
            overlay: cameras.overlay.ray(ndc),
        }
    }
}

/// Pickable geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned box, hit on any of its six outer faces.
    Cuboid { min: Point3<f32>, max: Point3<f32> },
    /// Horizontal square facing +Y.
    Floor { centre: Point3<f32>, half_extent: f32 },
    /// Rectangle in an XY plane facing +Z.
    Rect {
        centre: Point3<f32>,
        half_width: f32,
        half_height: f32,
    },
}

/// Result of a successful intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit<Id> {
    pub object: Id,
    pub point: Point3<f32>,
    pub normal: Vector3<f32>,
    pub distance: f32,
}

impl Shape {
    /// Axis-aligned cube of edge `size` around `centre`.
    pub fn cube(centre: Point3<f32>, size: f32) -> Self {
        let half = Vector3::new(size, size, size) / 2.0;
        Shape::Cuboid {
            min: centre - half,
            max: centre + half,
        }
    }

    /// Distance, point and normal of the first front-face hit.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, Point3<f32>, Vector3<f32>)> {
        match *self {
            Shape::Cuboid { min, max } => intersect_cuboid(ray, min, max),
            Shape::Floor {
                centre,
                half_extent,
            } => {
                if ray.direction.y > -EPSILON || ray.origin.y < centre.y {
                    return None;
                }
                let distance = (centre.y - ray.origin.y) / ray.direction.y;
                let mut point = ray.at(distance);
                point.y = centre.y;
                let inside = (point.x - centre.x).abs() <= half_extent
                    && (point.z - centre.z).abs() <= half_extent;
                inside.then_some((distance, point, Vector3::unit_y()))
            }
            Shape::Rect {
                centre,
                half_width,
                half_height,
            } => {
                if ray.direction.z > -EPSILON || ray.origin.z < centre.z {
                    return None;
                }
                let distance = (centre.z - ray.origin.z) / ray.direction.z;
                let mut point = ray.at(distance);
                point.z = centre.z;
                let inside = (point.x - centre.x).abs() <= half_width
                    && (point.y - centre.y).abs() <= half_height;
                inside.then_some((distance, point, Vector3::unit_z()))
            }
        }
    }
}

/** Slab test. Rays starting inside the box see no front face and miss. */
fn intersect_cuboid(
    ray: &Ray,
    min: Point3<f32>,
    max: Point3<f32>,
) -> Option<(f32, Point3<f32>, Vector3<f32>)> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut axis = 0;
    for i in 0..3 {
        let origin = ray.origin[i];
        let direction = ray.direction[i];
        if direction.abs() < EPSILON {
            if origin < min[i] || origin > max[i] {
                return None;
            }
            continue;
        }
        let t0 = (min[i] - origin) / direction;
        let t1 = (max[i] - origin) / direction;
        let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        if t0 > t_near {
            t_near = t0;
            axis = i;
        }
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }
    if t_near < 0.0 || !t_near.is_finite() {
        return None;
    }

    let mut normal = Vector3::zero();
    normal[axis] = -ray.direction[axis].signum();
    let mut point = ray.at(t_near);
    point[axis] = if normal[axis] > 0.0 { max[axis] } else { min[axis] };
    Some((t_near, point, normal))
}

/// Nearest hit among `candidates`, or `None` if the ray misses all of them.
pub fn nearest_hit<Id>(
    ray: &Ray,
    candidates: impl IntoIterator<Item = (Id, Shape)>,
) -> Option<Hit<Id>> {
    candidates
        .into_iter()
        .filter_map(|(object, shape)| {
            shape.intersect(ray).map(|(distance, point, normal)| Hit {
                object,
                point,
                normal,
                distance,
            })
        })
        .fold(None, |best, hit| match best {
            Some(best) if best.distance <= hit.distance => Some(best),
            _ => Some(hit),
        })
}

