//! Pointer gestures turned into world edits.
//!
//! The [`InteractionController`] owns the gesture flags and decides what a
//! click means:
//!
//! - a click on a swatch selects that texture and nothing else
//! - a shift-click on a block removes it
//! - a click without drag on the ground or a block places a new block in the
//!   adjacent cell
//!
//! Pointer moves keep the ghost block under the cursor.

use winit::dpi::PhysicalPosition;

use crate::{
    camera::SceneCameras,
    data_structures::material::TextureKey,
    grid,
    overlay::TexturePicker,
    pick::PickRays,
    world::{ObjectId, World},
};

/// Flags of the current gesture plus the shift modifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionSession {
    pub mouse_down: bool,
    pub dragging: bool,
    pub shift_held: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    MouseDown,
    Dragging,
}

/// What a pointer-up did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    TextureSelected(TextureKey),
    BlockPlaced(ObjectId),
    BlockRemoved(ObjectId),
    Nothing,
}

#[derive(Debug, Default)]
pub struct InteractionController {
    session: InteractionSession,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> InteractionSession {
        self.session
    }

    pub fn state(&self) -> GestureState {
        match (self.session.mouse_down, self.session.dragging) {
            (true, true) => GestureState::Dragging,
            (true, false) => GestureState::MouseDown,
            _ => GestureState::Idle,
        }
    }

    pub fn set_shift(&mut self, held: bool) {
        self.session.shift_held = held;
    }

    pub fn pointer_down(&mut self) {
        self.session.mouse_down = true;
    }

    /// Marks a drag if a button is held and moves the ghost block. Returns
    /// whether the preview moved; without a block-scene hit it stays put.
    pub fn pointer_move(
        &mut self,
        world: &mut World,
        cameras: &SceneCameras,
        position: PhysicalPosition<f64>,
    ) -> bool {
        if self.session.mouse_down {
            self.session.dragging = true;
        }
        let rays = PickRays::from_pointer(cameras, position);
        match world.pick(&rays.block) {
            Some(hit) => {
                world.set_preview(grid::snap(hit.point, hit.normal));
                true
            }
            None => false,
        }
    }

    /// Finish the gesture. The overlay wins over the block scene; the session
    /// is back to idle afterwards whatever happened.
    pub fn pointer_up(
        &mut self,
        world: &mut World,
        picker: &mut TexturePicker,
        cameras: &SceneCameras,
        position: PhysicalPosition<f64>,
    ) -> Outcome {
        let rays = PickRays::from_pointer(cameras, position);
        let outcome = if let Some(hit) = picker.pick(&rays.overlay) {
            world.set_chosen_texture(hit.object);
            if let Some(x) = picker.swatch(hit.object).map(|swatch| swatch.position.x) {
                picker.set_indicator_position(x);
            }
            Outcome::TextureSelected(hit.object)
        } else {
            match world.pick(&rays.block) {
                None => Outcome::Nothing,
                Some(hit) if self.session.shift_held => {
                    if world.remove(hit.object) {
                        Outcome::BlockRemoved(hit.object)
                    } else {
                        Outcome::Nothing
                    }
                }
                Some(_) if self.session.dragging => Outcome::Nothing,
                Some(hit) => {
                    let position = grid::snap(hit.point, hit.normal);
                    Outcome::BlockPlaced(world.append(world.chosen_texture(), position))
                }
            }
        };
        self.session.mouse_down = false;
        self.session.dragging = false;
        outcome
    }
}
