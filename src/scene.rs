//! The block world scene: world state, texture picker and the interaction
//! controller, fed with winit window events.

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{Key, NamedKey},
    window::CursorIcon,
};

use crate::{
    camera::SceneCameras,
    config::Settings,
    data_structures::material::TextureKey,
    interaction::{InteractionController, Outcome},
    overlay::TexturePicker,
    world::World,
};

pub struct BlockWorld {
    pub world: World,
    pub picker: TexturePicker,
    pub controller: InteractionController,
    cursor: PhysicalPosition<f64>,
}

impl BlockWorld {
    pub fn new(settings: &Settings) -> Self {
        let mut picker = TexturePicker::build(&TextureKey::ALL);
        if let Some(x) = picker
            .swatch(settings.initial_texture)
            .map(|swatch| swatch.position.x)
        {
            picker.set_indicator_position(x);
        }
        Self {
            world: World::new(settings),
            picker,
            controller: InteractionController::new(),
            cursor: PhysicalPosition::new(0.0, 0.0),
        }
    }

    /// Feed one window event. Returns the cursor icon to show when it should
    /// change.
    pub fn handle_window_event(
        &mut self,
        cameras: &SceneCameras,
        event: &WindowEvent,
    ) -> Option<CursorIcon> {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Shift),
                        state,
                        ..
                    },
                ..
            } => {
                self.controller.set_shift(*state == ElementState::Pressed);
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = *position;
                self.controller
                    .pointer_move(&mut self.world, cameras, *position);
                None
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => {
                self.controller.pointer_down();
                Some(CursorIcon::Pointer)
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                ..
            } => {
                let outcome = self.controller.pointer_up(
                    &mut self.world,
                    &mut self.picker,
                    cameras,
                    self.cursor,
                );
                log_outcome(outcome);
                Some(CursorIcon::Default)
            }
            _ => None,
        }
    }
}

fn log_outcome(outcome: Outcome) {
    match outcome {
        Outcome::TextureSelected(key) => log::info!("Selected texture '{}'", key),
        Outcome::BlockPlaced(id) => log::debug!("Placed block {:?}", id),
        Outcome::BlockRemoved(id) => log::debug!("Removed block {:?}", id),
        Outcome::Nothing => (),
    }
}
