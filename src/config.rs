//! Runtime settings.
//!
//! Everything that is a tunable constant of the demo lives in [`Settings`].
//! The defaults reproduce the stock scene; `flow::run_with` accepts overrides.

use crate::data_structures::material::TextureKey;

#[derive(Clone, Debug)]
pub struct Settings {
    /// Vertical field of view of the block camera in degrees.
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Requested MSAA sample count. Lowered to what the adapter supports.
    pub msaa_samples: u32,
    /// Start position of the block camera. It orbits the world origin.
    pub camera_position: [f32; 3],
    /// Upper bound of the orbit polar angle (radians, measured from +Y).
    pub max_polar_angle: f32,
    pub background_colour: u32,
    /// Edge length of the square ground plane.
    pub ground_size: f32,
    pub ground_colour: u32,
    pub ghost_colour: u32,
    pub ghost_opacity: f32,
    pub ghost_start: [f32; 3],
    pub ambient_colour: u32,
    pub light_direction: [f32; 3],
    /// Distance in logical pixels between the top edge of the viewport and the
    /// overlay camera's centre line.
    pub overlay_top_offset: f32,
    pub overlay_camera_z: f32,
    pub overlay_znear: f32,
    pub overlay_zfar: f32,
    pub panel_colour: u32,
    pub indicator_colour: u32,
    pub initial_texture: TextureKey,
    /// Directory (native) or URL path segment (web) holding `textures/`.
    pub asset_root: String,
    /// Id of the `<canvas>` element used on the web.
    pub canvas_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            msaa_samples: 4,
            camera_position: [0.0, 5.0, 30.0],
            max_polar_angle: std::f32::consts::FRAC_PI_2 - 0.1,
            background_colour: 0x88bbdd,
            ground_size: 50.0,
            ground_colour: 0xcccccc,
            ghost_colour: 0xff0000,
            ghost_opacity: 0.5,
            ghost_start: [1.0, 1.0, 1.0],
            ambient_colour: 0x666666,
            light_direction: [1.0, 0.75, 0.5],
            overlay_top_offset: 70.0,
            overlay_camera_z: 35.0,
            overlay_znear: 1.0,
            overlay_zfar: 1000.0,
            panel_colour: 0x444444,
            indicator_colour: 0xffff00,
            initial_texture: TextureKey::Grass,
            asset_root: "assets".to_string(),
            canvas_id: "canvas".to_string(),
        }
    }
}

/// Convert a `0xRRGGBB` sRGB colour to linear RGB.
pub fn linear_rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}

/// Linear colour with alpha, the layout instances and uniforms use.
pub fn linear_rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let [r, g, b] = linear_rgb(hex);
    [r, g, b, alpha]
}
