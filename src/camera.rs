//! Cameras, projections and orbit controls.
//!
//! Two cameras look at the two scenes of a frame:
//!
//! - [`PerspectiveCamera`] orbits the world origin and renders the blocks
//! - [`OrthographicCamera`] renders the texture picker overlay in pixel units
//!
//! Both can turn normalized device coordinates into a picking [`Ray`].
//! [`SceneCameras`] bundles them together with the [`OrbitController`] and the
//! current [`Viewport`].

use cgmath::{InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector2, Vector3};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use crate::{
    config::{Settings, linear_rgba},
    pick::Ray,
};

/// cgmath produces OpenGL clip space (z in -1..1), wgpu expects z in 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const MIN_POLAR_ANGLE: f32 = 0.01;
const MIN_RADIUS: f32 = 1.0;
const ZOOM_FACTOR: f32 = 0.95;

/// Size of the output surface in physical pixels. Never zero.
///
/// `scale_factor` is the window's physical pixels per logical pixel. The
/// overlay is laid out in logical pixels so it keeps its size on HiDPI
/// screens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale_factor: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            scale_factor: 1.0,
        }
    }

    /// Non-positive or non-finite factors fall back to 1.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        self
    }

    pub fn logical_width(&self) -> f32 {
        (f64::from(self.width) / self.scale_factor) as f32
    }

    pub fn logical_height(&self) -> f32 {
        (f64::from(self.height) / self.scale_factor) as f32
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Pixel position (origin top left) to normalized device coordinates.
    pub fn to_ndc(&self, position: PhysicalPosition<f64>) -> Vector2<f32> {
        Vector2::new(
            (position.x / f64::from(self.width) * 2.0 - 1.0) as f32,
            (-(position.y / f64::from(self.height)) * 2.0 + 1.0) as f32,
        )
    }
}

/// A camera on a sphere around `target`.
///
/// `azimuth` turns around the Y axis (0 looks along -Z from +Z), `polar` is
/// measured from +Y and is clamped so the camera never dips below the ground.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Point3<f32>,
    pub radius: f32,
    pub azimuth: Rad<f32>,
    pub polar: Rad<f32>,
    max_polar: Rad<f32>,
}

impl OrbitCamera {
    pub fn looking_at(position: Point3<f32>, target: Point3<f32>, max_polar: Rad<f32>) -> Self {
        let offset = position - target;
        let radius = offset.magnitude().max(MIN_RADIUS);
        let polar = Rad((offset.y / radius).clamp(-1.0, 1.0).acos());
        let azimuth = Rad(offset.x.atan2(offset.z));
        let mut camera = Self {
            target,
            radius,
            azimuth,
            polar,
            max_polar,
        };
        camera.clamp();
        camera
    }

    pub fn position(&self) -> Point3<f32> {
        let (polar_sin, polar_cos) = self.polar.0.sin_cos();
        let (azimuth_sin, azimuth_cos) = self.azimuth.0.sin_cos();
        self.target
            + Vector3::new(
                self.radius * polar_sin * azimuth_sin,
                self.radius * polar_cos,
                self.radius * polar_sin * azimuth_cos,
            )
    }

    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.position()).normalize()
    }

    pub fn rotate(&mut self, azimuth: Rad<f32>, polar: Rad<f32>) {
        self.azimuth += azimuth;
        self.polar += polar;
        self.clamp();
    }

    /// Shift the target, and the camera with it, within the view plane.
    pub fn pan(&mut self, right: f32, up: f32) {
        let forward = self.forward();
        let right_axis = forward.cross(Vector3::unit_y()).normalize();
        let up_axis = right_axis.cross(forward);
        self.target += right_axis * right + up_axis * up;
    }

    /// Scale the distance to the target. Values below 1 move closer.
    pub fn dolly(&mut self, scale: f32) {
        self.radius = (self.radius * scale).max(MIN_RADIUS);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position(), self.target, Vector3::unit_y())
    }

    fn clamp(&mut self) {
        self.polar = Rad(self.polar.0.clamp(MIN_POLAR_ANGLE, self.max_polar.0));
    }
}

#[derive(Clone, Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(viewport: Viewport, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: viewport.aspect(),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// The block scene camera.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub orbit: OrbitCamera,
    pub projection: Projection,
}

impl PerspectiveCamera {
    pub fn view_proj(&self) -> Matrix4<f32> {
        self.projection.calc_matrix() * self.orbit.view_matrix()
    }

    /// Ray from the camera position through the given NDC point.
    pub fn ray(&self, ndc: Vector2<f32>) -> Ray {
        let forward = self.orbit.forward();
        let right = forward.cross(Vector3::unit_y()).normalize();
        let up = right.cross(forward);
        let half_height = (self.projection.fovy.0 / 2.0).tan();
        let half_width = half_height * self.projection.aspect;
        let direction = forward + right * (ndc.x * half_width) + up * (ndc.y * half_height);
        Ray::new(self.orbit.position(), direction)
    }
}

/// The overlay camera: looks down -Z, one world unit per logical pixel.
#[derive(Clone, Debug)]
pub struct OrthographicCamera {
    pub position: Point3<f32>,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    znear: f32,
    zfar: f32,
    top_offset: f32,
}

impl OrthographicCamera {
    /// Frustum matching the viewport in logical pixels; the camera centre
    /// sits `top_offset` pixels below the viewport's half height.
    pub fn for_viewport(viewport: Viewport, top_offset: f32, z: f32, znear: f32, zfar: f32) -> Self {
        let mut camera = Self {
            position: Point3::new(0.0, 0.0, z),
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            znear,
            zfar,
            top_offset,
        };
        camera.resize(viewport);
        camera
    }

    pub fn resize(&mut self, viewport: Viewport) {
        let half_width = viewport.logical_width() / 2.0;
        let half_height = viewport.logical_height() / 2.0;
        self.left = -half_width;
        self.right = half_width;
        self.top = half_height;
        self.bottom = -half_height;
        self.position.y = half_height - self.top_offset;
    }

    pub fn view_proj(&self) -> Matrix4<f32> {
        let view = Matrix4::look_to_rh(self.position, -Vector3::unit_z(), Vector3::unit_y());
        let proj = cgmath::ortho(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.znear,
            self.zfar,
        );
        OPENGL_TO_WGPU_MATRIX * proj * view
    }

    /// Ray starting on the near plane under the NDC point, pointing along -Z.
    pub fn ray(&self, ndc: Vector2<f32>) -> Ray {
        let x = (ndc.x + 1.0) / 2.0 * (self.right - self.left) + self.left;
        let y = (ndc.y + 1.0) / 2.0 * (self.top - self.bottom) + self.bottom;
        let origin = Point3::new(
            self.position.x + x,
            self.position.y + y,
            self.position.z - self.znear,
        );
        Ray::new(origin, -Vector3::unit_z())
    }
}

/// Left-drag rotates the block camera around its target, right-drag pans
/// the target, the wheel dollies.
#[derive(Clone, Debug)]
pub struct OrbitController {
    rotate_speed: f32,
    rotating: bool,
    panning: bool,
    last_cursor: Option<PhysicalPosition<f64>>,
}

impl OrbitController {
    pub fn new(rotate_speed: f32) -> Self {
        Self {
            rotate_speed,
            rotating: false,
            panning: false,
            last_cursor: None,
        }
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    pub fn set_rotating(&mut self, rotating: bool) {
        self.rotating = rotating;
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    pub fn set_panning(&mut self, panning: bool) {
        self.panning = panning;
    }

    pub fn handle_window_events(
        &mut self,
        camera: &mut PerspectiveCamera,
        viewport: Viewport,
        event: &WindowEvent,
    ) {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.set_rotating(*state == ElementState::Pressed),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Right,
                ..
            } => self.set_panning(*state == ElementState::Pressed),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(camera, viewport, *position)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32,
                };
                self.scroll(&mut camera.orbit, lines);
            }
            _ => (),
        }
    }

    /// Rotate and/or pan by the cursor delta since the last move.
    ///
    /// Panning keeps the point under the cursor at the target's depth fixed
    /// on screen.
    pub fn cursor_moved(
        &mut self,
        camera: &mut PerspectiveCamera,
        viewport: Viewport,
        position: PhysicalPosition<f64>,
    ) {
        if let Some(last) = self.last_cursor {
            let dx = (position.x - last.x) as f32;
            let dy = (position.y - last.y) as f32;
            let height = viewport.height as f32;
            if self.rotating {
                let turn = 2.0 * std::f32::consts::PI * self.rotate_speed / height;
                camera.orbit.rotate(Rad(-dx * turn), Rad(-dy * turn));
            }
            if self.panning {
                let per_pixel =
                    2.0 * camera.orbit.radius * (camera.projection.fovy.0 / 2.0).tan() / height;
                camera.orbit.pan(-dx * per_pixel, dy * per_pixel);
            }
        }
        self.last_cursor = Some(position);
    }

    /// Positive values scroll away from the user and move the camera closer.
    pub fn scroll(&mut self, camera: &mut OrbitCamera, amount: f32) {
        if amount > 0.0 {
            camera.dolly(ZOOM_FACTOR);
        } else if amount < 0.0 {
            camera.dolly(1.0 / ZOOM_FACTOR);
        }
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Both cameras of a frame, their controls and the viewport they share.
#[derive(Clone, Debug)]
pub struct SceneCameras {
    pub block: PerspectiveCamera,
    pub overlay: OrthographicCamera,
    pub controls: OrbitController,
    viewport: Viewport,
}

impl SceneCameras {
    pub fn new(settings: &Settings, viewport: Viewport) -> Self {
        let orbit = OrbitCamera::looking_at(
            settings.camera_position.into(),
            Point3::new(0.0, 0.0, 0.0),
            Rad(settings.max_polar_angle),
        );
        let projection = Projection::new(
            viewport,
            cgmath::Deg(settings.fov_degrees),
            settings.znear,
            settings.zfar,
        );
        let overlay = OrthographicCamera::for_viewport(
            viewport,
            settings.overlay_top_offset,
            settings.overlay_camera_z,
            settings.overlay_znear,
            settings.overlay_zfar,
        );
        Self {
            block: PerspectiveCamera { orbit, projection },
            overlay,
            controls: OrbitController::default(),
            viewport,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.block.projection.resize(viewport);
        self.overlay.resize(viewport);
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        self.controls
            .handle_window_events(&mut self.block, self.viewport, event);
    }
}

/// Uniform shared by both scenes: view projection plus lighting.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
    // xyz direction towards the light, w unused
    light_direction: [f32; 4],
    // rgb ambient term, w unused
    ambient: [f32; 4],
}

impl CameraUniform {
    pub fn new(settings: &Settings) -> Self {
        let direction = Vector3::from(settings.light_direction).normalize();
        Self {
            view_proj: Matrix4::identity().into(),
            light_direction: [direction.x, direction.y, direction.z, 0.0],
            ambient: linear_rgba(settings.ambient_colour, 1.0),
        }
    }

    pub fn update_view_proj(&mut self, view_proj: Matrix4<f32>) {
        self.view_proj = view_proj.into();
    }
}
