use block_world::{
    camera::{CameraUniform, OrbitCamera, OrbitController, SceneCameras, Viewport},
    config::Settings,
    data_structures::material::TextureKey,
    overlay::TexturePicker,
    pick::PickRays,
};
use cgmath::{InnerSpace, Point3, Rad, Vector2};
use winit::dpi::PhysicalPosition;

mod common;

use common::test_utils::{HEIGHT, WIDTH, assert_close};

fn cameras() -> SceneCameras {
    SceneCameras::new(&Settings::default(), Viewport::new(WIDTH, HEIGHT))
}

#[test]
fn pixel_to_ndc() {
    let viewport = Viewport::new(800, 600);
    assert_eq!(
        viewport.to_ndc(PhysicalPosition::new(0.0, 0.0)),
        Vector2::new(-1.0, 1.0)
    );
    assert_eq!(
        viewport.to_ndc(PhysicalPosition::new(400.0, 300.0)),
        Vector2::new(0.0, 0.0)
    );
    assert_eq!(
        viewport.to_ndc(PhysicalPosition::new(800.0, 600.0)),
        Vector2::new(1.0, -1.0)
    );
}

#[test]
fn zero_sized_viewports_are_clamped() {
    let viewport = Viewport::new(0, 0);
    assert_eq!((viewport.width, viewport.height), (1, 1));
}

#[test]
fn orbit_starts_at_the_configured_position() {
    let cameras = cameras();
    let position = cameras.block.orbit.position();
    assert_close(position.x, 0.0);
    assert_close(position.y, 5.0);
    assert_close(position.z, 30.0);
}

#[test]
fn centre_ray_points_at_the_target() {
    let cameras = cameras();
    let ray = cameras.block.ray(Vector2::new(0.0, 0.0));
    let expected = (Point3::new(0.0, 0.0, 0.0) - ray.origin).normalize();
    assert_close(ray.direction.dot(expected), 1.0);
}

#[test]
fn perspective_ray_passes_through_the_projected_point() {
    let cameras = cameras();
    let ndc = Vector2::new(0.3, -0.4);
    let ray = cameras.block.ray(ndc);
    let clip = cameras.block.view_proj() * ray.at(10.0).to_homogeneous();
    assert_close(clip.x / clip.w, ndc.x);
    assert_close(clip.y / clip.w, ndc.y);
}

#[test]
fn overlay_ray_starts_on_the_near_plane_and_points_down_z() {
    let cameras = cameras();
    let ray = cameras.overlay.ray(Vector2::new(0.0, 0.0));
    assert_eq!(ray.direction, -cgmath::Vector3::unit_z());
    assert_close(ray.origin.z, 34.0);
    assert_close(ray.origin.y, HEIGHT as f32 / 2.0 - 70.0);
    assert_close(ray.origin.x, 0.0);

    // one world unit per pixel
    let right = cameras.overlay.ray(Vector2::new(1.0, 0.0));
    assert_close(right.origin.x, WIDTH as f32 / 2.0);
}

#[test]
fn resize_moves_the_overlay_with_the_bottom_edge() {
    let mut cameras = cameras();
    cameras.resize(Viewport::new(1024, 768));
    assert_eq!(cameras.viewport(), Viewport::new(1024, 768));
    assert_close(cameras.overlay.position.y, 768.0 / 2.0 - 70.0);
    let ray = cameras.overlay.ray(Vector2::new(-1.0, -1.0));
    assert_close(ray.origin.x, -512.0);
    assert_close(ray.origin.y, -70.0);
}

#[test]
fn polar_angle_is_clamped_above_the_ground() {
    let max = std::f32::consts::FRAC_PI_2 - 0.1;
    let mut orbit = OrbitCamera::looking_at(
        Point3::new(0.0, 5.0, 30.0),
        Point3::new(0.0, 0.0, 0.0),
        Rad(max),
    );
    orbit.rotate(Rad(0.0), Rad(2.0));
    assert_close(orbit.polar.0, max);
    assert!(orbit.position().y > 0.0);

    orbit.rotate(Rad(0.0), Rad(-5.0));
    assert_close(orbit.polar.0, 0.01);
}

#[test]
fn dragging_right_turns_the_camera_around_the_target() {
    let mut cameras = cameras();
    let radius = cameras.block.orbit.radius;
    let viewport = cameras.viewport();
    let mut controller = OrbitController::default();

    // moves without a pressed button only track the cursor
    controller.cursor_moved(&mut cameras.block, viewport, PhysicalPosition::new(100.0, 100.0));
    assert_close(cameras.block.orbit.azimuth.0, 0.0);

    controller.set_rotating(true);
    assert!(controller.is_rotating());
    controller.cursor_moved(&mut cameras.block, viewport, PhysicalPosition::new(160.0, 100.0));
    assert!(cameras.block.orbit.azimuth.0 < 0.0);
    assert_close(cameras.block.orbit.radius, radius);
    assert_eq!(cameras.block.orbit.target, Point3::new(0.0, 0.0, 0.0));
}

#[test]
fn right_drag_pans_the_target_in_the_view_plane() {
    let mut cameras = cameras();
    let viewport = cameras.viewport();
    let radius = cameras.block.orbit.radius;
    let azimuth = cameras.block.orbit.azimuth;
    let polar = cameras.block.orbit.polar;
    let mut controller = OrbitController::default();

    controller.set_panning(true);
    assert!(controller.is_panning());
    controller.cursor_moved(&mut cameras.block, viewport, PhysicalPosition::new(100.0, 100.0));
    controller.cursor_moved(&mut cameras.block, viewport, PhysicalPosition::new(160.0, 100.0));

    // dragging right moves the scene right, so the target goes left by
    // 60 pixels' worth of world units at the target's distance
    let per_pixel = 2.0 * radius * (75.0f32.to_radians() / 2.0).tan() / HEIGHT as f32;
    let target = cameras.block.orbit.target;
    assert_close(target.x, -60.0 * per_pixel);
    assert_close(target.y, 0.0);
    assert_close(target.z, 0.0);

    // panning never rotates or dollies
    assert_close(cameras.block.orbit.radius, radius);
    assert_eq!(cameras.block.orbit.azimuth, azimuth);
    assert_eq!(cameras.block.orbit.polar, polar);
    assert_close(cameras.block.orbit.position().x, target.x);

    // dragging down lifts the target
    controller.cursor_moved(&mut cameras.block, viewport, PhysicalPosition::new(160.0, 160.0));
    assert!(cameras.block.orbit.target.y > 0.0);

    // the centre of the screen still looks at the target
    let ray = cameras.block.ray(Vector2::new(0.0, 0.0));
    let expected = (cameras.block.orbit.target - ray.origin).normalize();
    assert_close(ray.direction.dot(expected), 1.0);
}

#[test]
fn released_pan_button_stops_panning() {
    let mut cameras = cameras();
    let viewport = cameras.viewport();
    let mut controller = OrbitController::default();
    controller.set_panning(true);
    controller.cursor_moved(&mut cameras.block, viewport, PhysicalPosition::new(100.0, 100.0));
    controller.set_panning(false);
    controller.cursor_moved(&mut cameras.block, viewport, PhysicalPosition::new(300.0, 300.0));
    assert_eq!(cameras.block.orbit.target, Point3::new(0.0, 0.0, 0.0));
}

#[test]
fn overlay_keeps_its_size_on_hidpi_screens() {
    let settings = Settings::default();
    let picker = TexturePicker::build(&TextureKey::ALL);
    let viewport = Viewport::new(WIDTH, HEIGHT).with_scale_factor(2.0);
    let cameras = SceneCameras::new(&settings, viewport);

    assert_close(viewport.logical_width(), 400.0);
    assert_close(cameras.overlay.position.y, 300.0 / 2.0 - 70.0);

    // grass sits 140 logical pixels left of centre and 70 above the bottom,
    // which is twice that in physical pixels
    let grass = PhysicalPosition::new(400.0 - 280.0, 600.0 - 140.0);
    let hit = picker
        .pick(&PickRays::from_pointer(&cameras, grass).overlay)
        .expect("grass swatch under the pointer");
    assert_eq!(hit.object, TextureKey::Grass);

    // at scale 1 the same physical pixel is left of the whole row
    let flat = SceneCameras::new(&settings, Viewport::new(WIDTH, HEIGHT));
    assert!(picker.pick(&PickRays::from_pointer(&flat, grass).overlay).is_none());
}

#[test]
fn invalid_scale_factors_fall_back_to_one() {
    for factor in [0.0, -2.0, f64::NAN] {
        let viewport = Viewport::new(WIDTH, HEIGHT).with_scale_factor(factor);
        assert_eq!(viewport.scale_factor, 1.0);
    }
}

#[test]
fn camera_uniform_starts_with_identity_and_unit_light() {
    let settings = Settings::default();
    let uniform = CameraUniform::new(&settings);
    let floats: [f32; 24] = bytemuck::cast(uniform);

    for column in 0..4 {
        for row in 0..4 {
            let expected = if column == row { 1.0 } else { 0.0 };
            assert_eq!(floats[column * 4 + row], expected);
        }
    }
    let light = cgmath::Vector3::new(floats[16], floats[17], floats[18]);
    assert_close(light.magnitude(), 1.0);
    assert!(light.x > light.y && light.y > light.z);
}

#[test]
fn scrolling_dollies_towards_and_away_from_the_target() {
    let mut orbit = OrbitCamera::looking_at(
        Point3::new(0.0, 0.0, 20.0),
        Point3::new(0.0, 0.0, 0.0),
        Rad(std::f32::consts::FRAC_PI_2 - 0.1),
    );
    let mut controller = OrbitController::default();
    controller.scroll(&mut orbit, 1.0);
    assert_close(orbit.radius, 19.0);
    controller.scroll(&mut orbit, -1.0);
    assert_close(orbit.radius, 20.0);
    controller.scroll(&mut orbit, 0.0);
    assert_close(orbit.radius, 20.0);
}
