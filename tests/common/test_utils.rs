#![allow(dead_code)]

use block_world::{
    camera::{SceneCameras, Viewport},
    config::Settings,
    data_structures::material::TextureKey,
    interaction::{InteractionController, Outcome},
    overlay::TexturePicker,
    pick::PickRays,
    world::World,
};
use winit::dpi::PhysicalPosition;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;

/// Below the screen centre, the block camera sees the ground there.
pub const GROUND_PIXEL: PhysicalPosition<f64> = PhysicalPosition::new(430.0, 330.0);
/// Top edge, the block camera sees only sky there.
pub const SKY_PIXEL: PhysicalPosition<f64> = PhysicalPosition::new(400.0, 0.0);

/// Everything the interaction controller works on, without a window or GPU.
pub(crate) struct Fixture {
    pub settings: Settings,
    pub cameras: SceneCameras,
    pub world: World,
    pub picker: TexturePicker,
    pub controller: InteractionController,
}

impl Fixture {
    pub fn new() -> Self {
        let settings = Settings::default();
        let cameras = SceneCameras::new(&settings, Viewport::new(WIDTH, HEIGHT));
        let world = World::new(&settings);
        let picker = TexturePicker::build(&TextureKey::ALL);
        Self {
            settings,
            cameras,
            world,
            picker,
            controller: InteractionController::new(),
        }
    }

    pub fn rays(&self, position: PhysicalPosition<f64>) -> PickRays {
        PickRays::from_pointer(&self.cameras, position)
    }

    pub fn pointer_down(&mut self) {
        self.controller.pointer_down();
    }

    pub fn pointer_move(&mut self, position: PhysicalPosition<f64>) -> bool {
        self.controller
            .pointer_move(&mut self.world, &self.cameras, position)
    }

    pub fn pointer_up(&mut self, position: PhysicalPosition<f64>) -> Outcome {
        self.controller.pointer_up(
            &mut self.world,
            &mut self.picker,
            &self.cameras,
            position,
        )
    }

    /// Press and release without moving.
    pub fn click(&mut self, position: PhysicalPosition<f64>) -> Outcome {
        self.pointer_down();
        self.pointer_up(position)
    }

    pub fn shift_click(&mut self, position: PhysicalPosition<f64>) -> Outcome {
        self.controller.set_shift(true);
        let outcome = self.click(position);
        self.controller.set_shift(false);
        outcome
    }

    /// Pixel at the centre of the swatch for `key`.
    pub fn swatch_pixel(&self, key: TextureKey) -> PhysicalPosition<f64> {
        swatch_pixel(&self.cameras, &self.picker, key)
    }
}

/// The overlay camera sits `overlay_top_offset` logical pixels below the
/// viewport's half height, so the swatch row lands that far above the bottom
/// edge.
pub fn swatch_pixel(
    cameras: &SceneCameras,
    picker: &TexturePicker,
    key: TextureKey,
) -> PhysicalPosition<f64> {
    let viewport = cameras.viewport();
    let swatch = picker.swatch(key).expect("every key has a swatch");
    let x = f64::from(viewport.logical_width()) / 2.0 + f64::from(swatch.position.x);
    let y = f64::from(viewport.logical_height())
        - f64::from(Settings::default().overlay_top_offset);
    PhysicalPosition::new(x * viewport.scale_factor, y * viewport.scale_factor)
}

pub fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-4, "{} is not close to {}", a, b);
}
