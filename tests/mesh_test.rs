use block_world::data_structures::mesh::Geometry;
use cgmath::{InnerSpace, Vector3};

fn assert_outward_winding(geometry: &Geometry) {
    for triangle in geometry.indices.chunks(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]]
            .map(|i| Vector3::from(geometry.vertices[i as usize].position));
        let normal = Vector3::from(geometry.vertices[triangle[0] as usize].normal);
        let face = (b - a).cross(c - a).normalize();
        assert!((face.dot(normal) - 1.0).abs() < 1e-5);
    }
}

#[test]
fn cube_has_four_vertices_per_face() {
    let cube = Geometry::cube();
    assert_eq!(cube.vertices.len(), 24);
    assert_eq!(cube.indices.len(), 36);
    for vertex in &cube.vertices {
        assert!(vertex.position.iter().all(|v| v.abs() == 0.5));
    }
    assert_outward_winding(&cube);
}

#[test]
fn quad_faces_positive_z() {
    let quad = Geometry::quad();
    assert_eq!(quad.vertices.len(), 4);
    assert_eq!(quad.indices, vec![0, 1, 2, 0, 2, 3]);
    assert!(quad.vertices.iter().all(|v| v.position[2] == 0.0 && v.normal == [0.0, 0.0, 1.0]));
    assert_outward_winding(&quad);
}
